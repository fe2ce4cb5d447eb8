//! Server command implementation

use std::path::Path;

use anyhow::Result;
use tripfund_server::ServerConfig;

use super::load_planner;

pub async fn cmd_serve(config_path: Option<&Path>, host: &str, port: u16) -> Result<()> {
    let planner = load_planner(config_path)?;
    let config = ServerConfig::from_env();

    println!("🚀 Starting Tripfund web server...");
    println!("   Listening: http://{}:{}", host, port);
    if let Some(path) = config_path {
        println!("   Estimator config: {}", path.display());
    }
    if config.allowed_origins.is_empty() {
        println!("   CORS: same-origin only");
    } else {
        println!("   CORS: {}", config.allowed_origins.join(", "));
    }
    println!();

    tripfund_server::serve_with_config(planner, host, port, config).await
}
