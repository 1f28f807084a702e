use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourType {
    Group,
    Private,
    Driver,
    Package,
}

impl TourType {
    pub const ALL: [TourType; 4] = [
        TourType::Group,
        TourType::Private,
        TourType::Driver,
        TourType::Package,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TourType::Group => "group",
            TourType::Private => "private",
            TourType::Driver => "driver",
            TourType::Package => "package",
        }
    }
}

impl fmt::Display for TourType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TourType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "group" => Ok(TourType::Group),
            "private" => Ok(TourType::Private),
            "driver" => Ok(TourType::Driver),
            "package" => Ok(TourType::Package),
            other => Err(format!("Unknown tour type: {}", other)),
        }
    }
}

/// A catalog entry as it appears in the tours document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub tour_type: TourType,
    pub price: f64,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub destinations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Tour {
    /// Minimal record, mostly useful for fixtures.
    pub fn new(id: u32, title: &str, tour_type: TourType, price: f64) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: String::new(),
            tour_type,
            price,
            duration: String::new(),
            destinations: Vec::new(),
            city: None,
            country: None,
            highlights: Vec::new(),
            image: None,
            gallery: Vec::new(),
            featured: false,
            rating: 0.0,
            review_count: 0,
            tags: Vec::new(),
            link: None,
        }
    }
}
