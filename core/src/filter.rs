use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Point;

/// Temporal classification applied to the visible point set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    Everything,
    Future,
    Present,
    Past,
}

impl FilterType {
    /// Filters in the order the filter bar shows them
    pub const ALL: [FilterType; 4] = [
        FilterType::Everything,
        FilterType::Future,
        FilterType::Present,
        FilterType::Past,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterType::Everything => "everything",
            FilterType::Future => "future",
            FilterType::Present => "present",
            FilterType::Past => "past",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterType::Everything => "Everything",
            FilterType::Future => "Future",
            FilterType::Present => "Present",
            FilterType::Past => "Past",
        }
    }

    /// Classify a point against `now`
    pub fn matches(self, point: &Point, now: DateTime<Utc>) -> bool {
        match self {
            FilterType::Everything => true,
            FilterType::Future => point.date_from > now,
            FilterType::Present => point.date_from <= now && now <= point.date_to,
            FilterType::Past => point.date_to < now,
        }
    }

    /// Points matching the filter, in their stored order
    pub fn apply(self, points: &[Point], now: DateTime<Utc>) -> Vec<Point> {
        points
            .iter()
            .filter(|p| self.matches(p, now))
            .cloned()
            .collect()
    }

    /// Whether the filter tab should be selectable for these points
    pub fn is_available(self, points: &[Point], now: DateTime<Utc>) -> bool {
        points.iter().any(|p| self.matches(p, now))
    }

    /// Message shown in place of an empty list
    pub fn empty_message(self) -> String {
        format!("There are no {} events now", self.name())
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        FilterType::ALL
            .into_iter()
            .find(|f| f.name() == normalized)
            .ok_or_else(|| format!("unknown filter '{}'", s))
    }
}
