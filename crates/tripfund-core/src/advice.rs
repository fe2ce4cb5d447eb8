//! Per-category budget advice
//!
//! Advice comes from a pluggable `RecommendationProvider` (typically an LLM
//! service). Providers only ever see a finished `TripPlan`, so a slow or
//! failing provider can't affect the numbers.
//!
//! # Usage
//!
//! ```rust,ignore
//! let plan = planner.plan(&inputs, today);
//! let provider = StaticAdviceProvider::new();
//! let advice = collect_advice(&provider, &inputs, &plan).await;
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Category, TripInputs, PRIORITY_ORDER};
use crate::planner::TripPlan;

/// What a provider knows when advising on one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceContext {
    pub trip_name: String,
    pub destinations: Vec<String>,
    pub travelers: u32,
    pub category: Category,
    pub cost: f64,
    pub gap: f64,
    pub monthly_savings: f64,
}

impl AdviceContext {
    pub fn from_plan(inputs: &TripInputs, plan: &TripPlan, category: Category) -> Self {
        let allocation = plan.allocation.get(category);
        Self {
            trip_name: plan.name.clone(),
            destinations: inputs.destinations.clone(),
            travelers: inputs.travelers,
            category,
            cost: allocation.cost,
            gap: allocation.gap,
            monthly_savings: plan.monthly_savings,
        }
    }
}

/// Source of free-text budget advice per category
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Advice for one category of a trip
    async fn category_advice(&self, context: &AdviceContext) -> Result<String>;
}

/// Provider returning canned tips, for tests and offline use
#[derive(Debug, Clone, Default)]
pub struct StaticAdviceProvider;

impl StaticAdviceProvider {
    pub fn new() -> Self {
        Self
    }

    fn tip(category: Category) -> &'static str {
        match category {
            Category::Flights => "Set fare alerts and book 6-8 weeks out; midweek departures are usually cheaper.",
            Category::Accommodations => "Compare weekly rates on rentals and look just outside the busiest neighborhoods.",
            Category::Transportation => "Check multi-day transit passes before renting a car.",
            Category::Activities => "Look for city passes that bundle the attractions you already plan to visit.",
            Category::Food => "Plan one market or grocery meal a day to balance restaurant spending.",
            Category::Preparation => "Review travel insurance and document fees early so they don't surprise you.",
        }
    }
}

#[async_trait]
impl RecommendationProvider for StaticAdviceProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn category_advice(&self, context: &AdviceContext) -> Result<String> {
        let tip = Self::tip(context.category);
        if context.gap > 0.0 {
            Ok(format!(
                "{} You still need ${:.0} for {}.",
                tip,
                context.gap,
                context.category.label().to_lowercase()
            ))
        } else {
            Ok(tip.to_string())
        }
    }
}

/// Gather advice for every category of a plan, in priority order.
///
/// Failures are logged and the category is left out.
pub async fn collect_advice(
    provider: &dyn RecommendationProvider,
    inputs: &TripInputs,
    plan: &TripPlan,
) -> BTreeMap<Category, String> {
    let mut advice = BTreeMap::new();

    for category in PRIORITY_ORDER {
        let context = AdviceContext::from_plan(inputs, plan, category);
        match provider.category_advice(&context).await {
            Ok(text) => {
                advice.insert(category, text);
            }
            Err(e) => {
                tracing::warn!(
                    provider = provider.name(),
                    category = category.as_str(),
                    error = %e,
                    "Category advice failed"
                );
            }
        }
    }

    tracing::debug!(
        provider = provider.name(),
        count = advice.len(),
        "Advice collection complete"
    );
    advice
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::planner::TripPlanner;
    use chrono::NaiveDate;

    /// Provider that fails for one category
    struct FlakyProvider {
        failing: Category,
    }

    #[async_trait]
    impl RecommendationProvider for FlakyProvider {
        fn name(&self) -> &'static str {
            "flaky"
        }

        async fn category_advice(&self, context: &AdviceContext) -> Result<String> {
            if context.category == self.failing {
                Err(Error::Advice("upstream timeout".to_string()))
            } else {
                Ok(format!("advice for {}", context.category))
            }
        }
    }

    fn sample() -> (TripInputs, TripPlan) {
        let mut inputs = TripInputs {
            name: "Kyoto".to_string(),
            destinations: vec!["Kyoto".to_string()],
            current_savings: 1000.0,
            ..Default::default()
        };
        inputs.overrides.insert(Category::Flights, 900.0);
        let plan = TripPlanner::default().plan(&inputs, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        (inputs, plan)
    }

    #[tokio::test]
    async fn test_static_provider_covers_every_category() {
        let (inputs, plan) = sample();
        let advice = collect_advice(&StaticAdviceProvider::new(), &inputs, &plan).await;

        assert_eq!(advice.len(), PRIORITY_ORDER.len());
        let order: Vec<Category> = advice.keys().copied().collect();
        assert_eq!(order, PRIORITY_ORDER.to_vec());
    }

    #[tokio::test]
    async fn test_static_provider_mentions_gap() {
        let (inputs, plan) = sample();
        let advice = collect_advice(&StaticAdviceProvider::new(), &inputs, &plan).await;

        // Flights are covered by the 1000 saved
        assert!(!advice[&Category::Flights].contains("You still need"));
        assert!(advice[&Category::Accommodations].contains("You still need"));
    }

    #[tokio::test]
    async fn test_failed_category_is_skipped() {
        let (inputs, plan) = sample();
        let provider = FlakyProvider {
            failing: Category::Food,
        };
        let advice = collect_advice(&provider, &inputs, &plan).await;

        assert_eq!(advice.len(), PRIORITY_ORDER.len() - 1);
        assert!(!advice.contains_key(&Category::Food));
        assert_eq!(advice[&Category::Flights], "advice for flights");
    }

    #[test]
    fn test_context_from_plan() {
        let (inputs, plan) = sample();
        let context = AdviceContext::from_plan(&inputs, &plan, Category::Flights);

        assert_eq!(context.trip_name, "Kyoto");
        assert_eq!(context.cost, 900.0);
        assert_eq!(context.gap, 0.0);
        assert_eq!(context.monthly_savings, plan.monthly_savings);
    }
}
