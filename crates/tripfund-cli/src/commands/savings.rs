//! Monthly savings and points command implementations

use anyhow::Result;
use tripfund_core::{MonthlySavingsRecommendation, PointsRedemption, POINTS_CONVERSION_RATE};

use super::format_money;

pub fn cmd_recommend(total: f64, savings: f64) -> Result<()> {
    if !total.is_finite() || !savings.is_finite() {
        anyhow::bail!("--total and --savings must be finite numbers");
    }

    let rec = MonthlySavingsRecommendation::compute(total, savings);

    println!();
    println!("🧮 Monthly savings");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Trip cost:      {}", format_money(rec.total_trip_cost));
    println!("   Already saved:  {}", format_money(rec.current_savings));
    println!("   Left to save:   {}", format_money(rec.amount_to_save));
    println!("   Target:         {} months", rec.target_months);
    println!();
    if rec.recommended_monthly > 0.0 {
        println!(
            "   👉 Save {}/month",
            format_money(rec.recommended_monthly)
        );
    } else {
        println!("   🎉 Nothing left to save");
    }
    println!();
    Ok(())
}

/// Work out a points redemption against a flights cost
pub fn redeem_points(
    flights: f64,
    points: f64,
    balance: Option<f64>,
    enabled: bool,
) -> (PointsRedemption, f64) {
    let redemption = PointsRedemption::new(enabled, points, balance);
    let net_flights = redemption.apply(flights);
    (redemption, net_flights)
}

pub fn cmd_points(flights: f64, points: f64, balance: Option<f64>, enabled: bool) -> Result<()> {
    let (redemption, net_flights) = redeem_points(flights, points, balance, enabled);

    println!();
    println!("🎟️  Points redemption");
    println!("   ─────────────────────────────────────────────────────────────");
    if !enabled {
        println!("   Redemption: OFF");
    }
    println!("   Points requested: {:.0}", points.max(0.0));
    if let Some(balance) = balance {
        println!("   Account balance:  {:.0}", balance.max(0.0));
    }
    println!(
        "   Points used:      {:.0} (@ ${} each)",
        redemption.effective_points(),
        POINTS_CONVERSION_RATE
    );
    println!("   Worth:            {}", format_money(redemption.dollar_value()));
    println!();
    println!(
        "   Flights: {} → {}",
        format_money(flights.max(0.0)),
        format_money(net_flights)
    );
    println!();
    Ok(())
}
