//! Savings timeline projection
//!
//! Turns allocation gaps and a monthly savings rate into months-to-fund and
//! projected booking dates. Each category gets two horizons:
//!
//! - its own gap in isolation
//! - the sequential horizon, using the cumulative gap of every category up to
//!   and including it, since savings reach a category only after everything
//!   ahead of it in `PRIORITY_ORDER` is covered
//!
//! A zero or negative monthly rate with a remaining gap never produces a date;
//! the horizon is `MonthsToFund::Unbounded` and renders as "N/A".

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::allocation::AllocationState;
use crate::models::{Category, PRIORITY_ORDER};

/// Months of saving needed before a gap closes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMonths", into = "RawMonths")]
pub enum MonthsToFund {
    Months(u32),
    /// No positive savings rate, so the gap never closes
    Unbounded,
}

impl MonthsToFund {
    /// Months to fund `gap` at `monthly_savings` per month (ceiling).
    pub fn for_gap(gap: f64, monthly_savings: f64) -> Self {
        if gap.is_nan() || gap <= 0.0 {
            return Self::Months(0);
        }
        if !monthly_savings.is_finite() || monthly_savings <= 0.0 {
            return Self::Unbounded;
        }
        // Float-to-int casts saturate, so absurd gaps pin at u32::MAX
        Self::Months((gap / monthly_savings).ceil() as u32)
    }

    pub fn months(&self) -> Option<u32> {
        match self {
            Self::Months(n) => Some(*n),
            Self::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

impl fmt::Display for MonthsToFund {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Months(1) => write!(f, "1 month"),
            Self::Months(n) => write!(f, "{} months", n),
            Self::Unbounded => write!(f, "N/A"),
        }
    }
}

/// Wire form: a month count, or the string "unbounded"
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawMonths {
    Count(u32),
    Label(String),
}

impl From<MonthsToFund> for RawMonths {
    fn from(months: MonthsToFund) -> Self {
        match months {
            MonthsToFund::Months(n) => RawMonths::Count(n),
            MonthsToFund::Unbounded => RawMonths::Label("unbounded".to_string()),
        }
    }
}

impl TryFrom<RawMonths> for MonthsToFund {
    type Error = String;

    fn try_from(raw: RawMonths) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawMonths::Count(n) => Ok(MonthsToFund::Months(n)),
            RawMonths::Label(s) if s == "unbounded" => Ok(MonthsToFund::Unbounded),
            RawMonths::Label(s) => Err(format!("Invalid months value: {}", s)),
        }
    }
}

/// Add calendar months to a date.
///
/// The day of month is kept; if the target month is too short, the extra days
/// spill into the following month (Jan 31 + 1 month = Mar 2 in a leap year).
/// Returns `None` if the result is outside chrono's supported range.
pub fn add_calendar_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(months);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = total.rem_euclid(12) as u32 + 1;

    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    first_of_month.checked_add_days(Days::new(u64::from(date.day() - 1)))
}

/// Render an optional booking date, using "N/A" for an unknown date
pub fn format_booking_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Round a dollar amount to whole cents
fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// When a given gap closes at a given savings rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundingHorizon {
    pub gap: f64,
    /// `Unbounded` also covers month counts too large to place on a calendar
    pub months_to_fund: MonthsToFund,
    /// `None` exactly when `months_to_fund` is `Unbounded`
    pub earliest_booking_date: Option<NaiveDate>,
    pub is_bookable_now: bool,
}

impl FundingHorizon {
    pub fn compute(gap: f64, monthly_savings: f64, reference_date: NaiveDate) -> Self {
        let gap = if gap > 0.0 { round_cents(gap) } else { 0.0 };
        let mut months_to_fund = MonthsToFund::for_gap(gap, monthly_savings);
        let earliest_booking_date = months_to_fund
            .months()
            .and_then(|m| add_calendar_months(reference_date, m));
        if earliest_booking_date.is_none() {
            months_to_fund = MonthsToFund::Unbounded;
        }

        let is_bookable_now = gap == 0.0
            || earliest_booking_date.is_some_and(|date| reference_date >= date);

        Self {
            gap,
            months_to_fund,
            earliest_booking_date,
            is_bookable_now,
        }
    }
}

/// Projection for one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryProjection {
    pub category: Category,
    /// Horizon for this category's own gap
    #[serde(flatten)]
    pub horizon: FundingHorizon,
    /// Horizon once every higher-priority category is also covered
    pub sequential: FundingHorizon,
}

/// Savings timeline for a whole trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsProjection {
    pub reference_date: NaiveDate,
    pub monthly_savings: f64,
    /// One entry per category, in priority order
    pub categories: Vec<CategoryProjection>,
    /// Horizon for the whole trip being funded
    pub full_funding: FundingHorizon,
}

impl SavingsProjection {
    pub fn get(&self, category: Category) -> &CategoryProjection {
        &self.categories[category.index()]
    }

    /// Months until every category is funded
    pub fn months_to_full_funding(&self) -> MonthsToFund {
        self.full_funding.months_to_fund
    }
}

/// Project booking dates for an allocation at a monthly savings rate.
///
/// The same `monthly_savings` figure drives every category.
pub fn project(
    allocation: &AllocationState,
    monthly_savings: f64,
    reference_date: NaiveDate,
) -> SavingsProjection {
    let mut categories = Vec::with_capacity(PRIORITY_ORDER.len());
    let mut cumulative_gap = 0.0;

    for category in PRIORITY_ORDER {
        let gap = round_cents(allocation.get(category).gap);
        cumulative_gap = round_cents(cumulative_gap + gap);

        let horizon = FundingHorizon::compute(gap, monthly_savings, reference_date);
        let sequential = FundingHorizon::compute(cumulative_gap, monthly_savings, reference_date);

        tracing::trace!(
            category = category.as_str(),
            gap,
            cumulative_gap,
            months = %sequential.months_to_fund,
            "Projected category horizon"
        );

        categories.push(CategoryProjection {
            category,
            horizon,
            sequential,
        });
    }

    let full_funding =
        FundingHorizon::compute(allocation.total_gap(), monthly_savings, reference_date);

    SavingsProjection {
        reference_date,
        monthly_savings,
        categories,
        full_funding,
    }
}
