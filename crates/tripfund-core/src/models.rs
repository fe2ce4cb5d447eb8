//! Domain models for Tripfund

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::points::PointsRedemption;

/// Number of spend categories in a trip
pub const CATEGORY_COUNT: usize = 6;

/// A trip spend category
///
/// Variant order is the savings priority order, so `Ord` and the derived
/// `BTreeMap` iteration order follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Category {
    Flights,
    Accommodations,
    Transportation,
    Activities,
    Food,
    Preparation,
}

/// Order in which accumulated savings are applied to categories.
///
/// Flights come first because they are the least flexible booking.
pub const PRIORITY_ORDER: [Category; CATEGORY_COUNT] = [
    Category::Flights,
    Category::Accommodations,
    Category::Transportation,
    Category::Activities,
    Category::Food,
    Category::Preparation,
];

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flights => "flights",
            Self::Accommodations => "accommodations",
            Self::Transportation => "transportation",
            Self::Activities => "activities",
            Self::Food => "food",
            Self::Preparation => "preparation",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Flights => "Flights",
            Self::Accommodations => "Accommodations",
            Self::Transportation => "Transportation",
            Self::Activities => "Activities",
            Self::Food => "Food",
            Self::Preparation => "Preparation",
        }
    }

    /// Position in `PRIORITY_ORDER`
    pub fn index(&self) -> usize {
        match self {
            Self::Flights => 0,
            Self::Accommodations => 1,
            Self::Transportation => 2,
            Self::Activities => 3,
            Self::Food => 4,
            Self::Preparation => 5,
        }
    }

    /// All categories in priority order
    pub fn all() -> &'static [Category] {
        &PRIORITY_ORDER
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flights" | "flight" => Ok(Self::Flights),
            "accommodations" | "accommodation" | "lodging" => Ok(Self::Accommodations),
            "transportation" | "transport" => Ok(Self::Transportation),
            "activities" | "activity" => Ok(Self::Activities),
            "food" => Ok(Self::Food),
            "preparation" | "prep" => Ok(Self::Preparation),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for &'static str {
    fn from(category: Category) -> Self {
        category.as_str()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Clamp a currency or point amount to a usable non-negative value.
///
/// Negative, NaN and infinite inputs all become 0.
pub fn clamp_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Cost per category with all six categories always present
///
/// Serializes as a map keyed by category name. Missing keys read as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Category, f64>",
    into = "BTreeMap<Category, f64>"
)]
pub struct CategoryCosts {
    amounts: [f64; CATEGORY_COUNT],
}

impl CategoryCosts {
    /// All categories at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from amounts given in priority order
    pub fn from_amounts(amounts: [f64; CATEGORY_COUNT]) -> Self {
        let mut costs = Self::new();
        for (category, amount) in PRIORITY_ORDER.iter().zip(amounts) {
            costs.set(*category, amount);
        }
        costs
    }

    pub fn get(&self, category: Category) -> f64 {
        self.amounts[category.index()]
    }

    /// Set a category cost (clamped to a non-negative value)
    pub fn set(&mut self, category: Category, amount: f64) {
        self.amounts[category.index()] = clamp_amount(amount);
    }

    /// Builder-style `set`
    pub fn with(mut self, category: Category, amount: f64) -> Self {
        self.set(category, amount);
        self
    }

    /// Iterate `(category, cost)` in priority order
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        PRIORITY_ORDER.iter().map(move |c| (*c, self.get(*c)))
    }

    pub fn total(&self) -> f64 {
        self.amounts.iter().sum()
    }
}

impl From<BTreeMap<Category, f64>> for CategoryCosts {
    fn from(map: BTreeMap<Category, f64>) -> Self {
        let mut costs = Self::new();
        for (category, amount) in map {
            costs.set(category, amount);
        }
        costs
    }
}

impl From<CategoryCosts> for BTreeMap<Category, f64> {
    fn from(costs: CategoryCosts) -> Self {
        costs.iter().collect()
    }
}

/// Travel season, used to scale fallback estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    #[default]
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
            Self::Winter => "winter",
        }
    }

    pub fn all() -> &'static [Season] {
        &[Self::Spring, Self::Summer, Self::Fall, Self::Winter]
    }
}

impl std::str::FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "fall" | "autumn" => Ok(Self::Fall),
            "winter" => Ok(Self::Winter),
            _ => Err(format!("Unknown season: {}", s)),
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything a user has told us about a trip
///
/// This is the fully-resolved snapshot a plan is computed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TripInputs {
    pub name: String,
    pub destinations: Vec<String>,
    pub travelers: u32,
    pub season: Season,
    pub duration_days: u32,
    /// User-entered costs. A present entry always wins over the estimate,
    /// including an explicit 0.
    pub overrides: BTreeMap<Category, f64>,
    pub current_savings: f64,
    /// User-entered monthly savings; used when > 0
    pub monthly_savings: Option<f64>,
    pub points: PointsRedemption,
    /// Categories the user has already booked
    pub booked: BTreeSet<Category>,
}

impl Default for TripInputs {
    fn default() -> Self {
        Self {
            name: "My Trip".to_string(),
            destinations: vec![],
            travelers: 1,
            season: Season::default(),
            duration_days: 7,
            overrides: BTreeMap::new(),
            current_savings: 0.0,
            monthly_savings: None,
            points: PointsRedemption::default(),
            booked: BTreeSet::new(),
        }
    }
}

impl TripInputs {
    /// Parse a trip description from TOML
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::Error::InvalidData(format!("Invalid trip TOML: {}", e)))
    }

    /// Override for a category, if the user entered one
    pub fn override_for(&self, category: Category) -> Option<f64> {
        self.overrides.get(&category).copied()
    }
}
