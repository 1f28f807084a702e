use crate::models::tour::TourType;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, str::FromStr};

pub const DEFAULT_MIN_PRICE: f64 = 0.0;
pub const DEFAULT_MAX_PRICE: f64 = 600.0;

/// Duration facet buckets. Tour durations are free text, so each bucket is
/// matched by a fixed set of phrases that appear in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationBucket {
    #[serde(rename = "2-4h")]
    FewHours,
    #[serde(rename = "1day")]
    OneDay,
    #[serde(rename = "2-3days")]
    TwoToThreeDays,
    #[serde(rename = "4plus")]
    FourPlusDays,
}

impl DurationBucket {
    /// Phrases that place a tour in this bucket
    pub fn markers(&self) -> &'static [&'static str] {
        match self {
            DurationBucket::FewHours => &["2 часа", "3 часа", "4.5 часа"],
            DurationBucket::OneDay => &["8 часов", "10 часов", "12 часов", "6 часов"],
            DurationBucket::TwoToThreeDays => &["3 дня", "2 дня"],
            DurationBucket::FourPlusDays => &[
                "4 дня", "5 дней", "6 дней", "7 дней", "8 дней", "9 дней",
            ],
        }
    }

    pub fn matches(&self, duration: &str) -> bool {
        self.markers().iter().any(|marker| duration.contains(marker))
    }
}

impl FromStr for DurationBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2-4h" => Ok(DurationBucket::FewHours),
            "1day" => Ok(DurationBucket::OneDay),
            "2-3days" => Ok(DurationBucket::TwoToThreeDays),
            "4plus" => Ok(DurationBucket::FourPlusDays),
            other => Err(format!("Unknown duration bucket: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    PriceLow,
    PriceHigh,
    Rating,
    Popular,
    Duration,
    #[default]
    Default,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "rating" => Ok(SortKey::Rating),
            "popular" => Ok(SortKey::Popular),
            "duration" => Ok(SortKey::Duration),
            "default" | "" => Ok(SortKey::Default),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

/// One filter pass worth of catalog criteria. Empty facet sets do not
/// constrain anything. `min_price <= max_price` is the caller's job.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub types: HashSet<TourType>,
    pub destinations: HashSet<String>,
    pub durations: HashSet<DurationBucket>,
    pub min_price: f64,
    pub max_price: f64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            types: HashSet::new(),
            destinations: HashSet::new(),
            durations: HashSet::new(),
            min_price: DEFAULT_MIN_PRICE,
            max_price: DEFAULT_MAX_PRICE,
        }
    }
}
