//! Sequential savings allocation
//!
//! Savings are poured into categories one at a time in `PRIORITY_ORDER`.
//! A category only receives money once every category before it is fully
//! funded, so the funded amounts form a prefix of the trip.

use serde::{Deserialize, Serialize};

use crate::models::{clamp_amount, Category, CategoryCosts, CATEGORY_COUNT, PRIORITY_ORDER};

/// Funding state of a single category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    pub category: Category,
    pub cost: f64,
    /// Savings dollars applied to this category
    pub funded: f64,
    /// Amount still needed (cost - funded)
    pub gap: f64,
    pub is_funded: bool,
}

/// Result of allocating current savings across a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationState {
    pub current_savings: f64,
    /// One entry per category, in priority order
    pub categories: Vec<CategoryAllocation>,
    /// Savings left after every category is covered
    pub remaining_savings: f64,
}

impl AllocationState {
    /// Allocation for a category
    pub fn get(&self, category: Category) -> &CategoryAllocation {
        &self.categories[category.index()]
    }

    pub fn total_cost(&self) -> f64 {
        self.categories.iter().map(|c| c.cost).sum()
    }

    pub fn total_funded(&self) -> f64 {
        self.categories.iter().map(|c| c.funded).sum()
    }

    pub fn total_gap(&self) -> f64 {
        self.categories.iter().map(|c| c.gap).sum()
    }

    /// True once every category is covered
    pub fn is_fully_funded(&self) -> bool {
        self.categories.iter().all(|c| c.is_funded)
    }

    /// Sum of gaps for all categories at or before `category` in priority order
    pub fn cumulative_gap(&self, category: Category) -> f64 {
        self.categories[..=category.index()]
            .iter()
            .map(|c| c.gap)
            .sum()
    }

    /// First category that still has a gap
    pub fn first_unfunded(&self) -> Option<Category> {
        self.categories
            .iter()
            .find(|c| !c.is_funded)
            .map(|c| c.category)
    }
}

/// Allocate `current_savings` across `costs` in priority order.
pub fn allocate(costs: &CategoryCosts, current_savings: f64) -> AllocationState {
    let current_savings = clamp_amount(current_savings);
    let mut remaining = current_savings;
    let mut categories = Vec::with_capacity(CATEGORY_COUNT);

    for category in PRIORITY_ORDER {
        let cost = clamp_amount(costs.get(category));
        let funded = remaining.min(cost);
        let gap = (cost - funded).max(0.0);
        remaining -= funded;

        tracing::trace!(
            category = category.as_str(),
            cost,
            funded,
            gap,
            "Allocated savings to category"
        );

        categories.push(CategoryAllocation {
            category,
            cost,
            funded,
            gap,
            is_funded: gap == 0.0,
        });
    }

    AllocationState {
        current_savings,
        categories,
        remaining_savings: remaining.max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_costs() -> CategoryCosts {
        CategoryCosts::from_amounts([1200.0, 800.0, 300.0, 400.0, 500.0, 100.0])
    }

    /// Check priority ordering: nothing later is funded while something earlier has a gap
    fn assert_priority_respected(state: &AllocationState) {
        let mut saw_gap = false;
        for entry in &state.categories {
            if saw_gap {
                assert_eq!(
                    entry.funded, 0.0,
                    "{} funded while an earlier category has a gap",
                    entry.category
                );
            }
            if entry.gap > 0.0 {
                saw_gap = true;
            }
        }
    }

    #[test]
    fn test_flights_first_allocation() {
        let state = allocate(&sample_costs(), 1500.0);

        let flights = state.get(Category::Flights);
        assert_eq!(flights.funded, 1200.0);
        assert_eq!(flights.gap, 0.0);
        assert!(flights.is_funded);

        let lodging = state.get(Category::Accommodations);
        assert_eq!(lodging.funded, 300.0);
        assert_eq!(lodging.gap, 500.0);
        assert!(!lodging.is_funded);

        for category in &PRIORITY_ORDER[2..] {
            let entry = state.get(*category);
            assert_eq!(entry.funded, 0.0);
            assert_eq!(entry.gap, entry.cost);
        }
        assert_eq!(state.remaining_savings, 0.0);
    }

    #[test]
    fn test_entries_follow_priority_order() {
        let state = allocate(&sample_costs(), 0.0);
        let order: Vec<Category> = state.categories.iter().map(|c| c.category).collect();
        assert_eq!(order, PRIORITY_ORDER.to_vec());
    }

    #[test]
    fn test_zero_cost_is_vacuously_funded() {
        let costs = sample_costs().with(Category::Transportation, 0.0);
        let state = allocate(&costs, 0.0);

        let transport = state.get(Category::Transportation);
        assert_eq!(transport.funded, 0.0);
        assert_eq!(transport.gap, 0.0);
        assert!(transport.is_funded);
    }

    #[test]
    fn test_zero_savings_leaves_full_gaps() {
        let state = allocate(&sample_costs(), 0.0);
        for entry in &state.categories {
            assert_eq!(entry.funded, 0.0);
            assert_eq!(entry.gap, entry.cost);
        }
        assert_eq!(state.total_gap(), 3300.0);
    }

    #[test]
    fn test_negative_savings_treated_as_zero() {
        let state = allocate(&sample_costs(), -400.0);
        assert_eq!(state.current_savings, 0.0);
        assert_eq!(state.total_funded(), 0.0);
    }

    #[test]
    fn test_full_funding_leaves_remainder() {
        let state = allocate(&sample_costs(), 5000.0);
        assert!(state.is_fully_funded());
        assert_eq!(state.total_funded(), 3300.0);
        assert_eq!(state.remaining_savings, 1700.0);
        assert_eq!(state.first_unfunded(), None);
    }

    #[test]
    fn test_conservation_and_order_across_savings_levels() {
        let costs = sample_costs();
        let total = costs.total();

        for step in 0..=40 {
            let savings = step as f64 * 100.0;
            let state = allocate(&costs, savings);

            assert!(state.total_funded() <= savings + 1e-9);
            if savings <= total {
                assert!((state.total_funded() - savings).abs() < 1e-9);
            } else {
                assert!(state.is_fully_funded());
            }
            assert_priority_respected(&state);
        }
    }

    #[test]
    fn test_more_savings_never_increases_gap() {
        let costs = sample_costs();
        let mut previous = allocate(&costs, 0.0);

        for step in 1..=70 {
            let state = allocate(&costs, step as f64 * 50.0);
            for category in PRIORITY_ORDER {
                assert!(state.get(category).gap <= previous.get(category).gap);
            }
            previous = state;
        }
    }

    #[test]
    fn test_cumulative_gap() {
        let state = allocate(&sample_costs(), 1500.0);
        assert_eq!(state.cumulative_gap(Category::Flights), 0.0);
        assert_eq!(state.cumulative_gap(Category::Accommodations), 500.0);
        assert_eq!(state.cumulative_gap(Category::Transportation), 800.0);
        assert_eq!(state.cumulative_gap(Category::Preparation), state.total_gap());
        assert_eq!(state.first_unfunded(), Some(Category::Accommodations));
    }
}
