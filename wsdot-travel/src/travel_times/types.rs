//! Travel time records as returned by `TravelTimesREST.svc`.
//!
//! Field names follow the upstream PascalCase JSON. Every key must be
//! present; textual fields and locations may be null, coordinates,
//! distances and times may not.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use super::timestamp;

/// Upstream identifier of a travel time route.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct TravelTimeId(i64);

impl TravelTimeId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for TravelTimeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Debug for TravelTimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TravelTimeId({})", self.0)
    }
}

impl fmt::Display for TravelTimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A point along a route.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TravelLocation {
    /// Free-text description, e.g. "I-5 @ NE 45th St".
    #[serde(deserialize_with = "Option::deserialize")]
    pub description: Option<String>,

    /// Direction of travel, e.g. "N" or "SB".
    #[serde(deserialize_with = "Option::deserialize")]
    pub direction: Option<String>,

    pub latitude: f64,

    pub longitude: f64,

    /// Highway mile marker.
    pub mile_post: f64,

    /// Road name, e.g. "005".
    #[serde(deserialize_with = "Option::deserialize")]
    pub road_name: Option<String>,
}

/// Current and average travel time for a named route.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TravelTime {
    /// Typical travel time in minutes.
    pub average_time: i64,

    /// Current travel time in minutes.
    pub current_time: i64,

    #[serde(deserialize_with = "Option::deserialize")]
    pub description: Option<String>,

    /// Route length in miles.
    pub distance: f64,

    #[serde(deserialize_with = "Option::deserialize")]
    pub end_point: Option<TravelLocation>,

    /// Short route name, e.g. "Everett-Seattle HOV".
    #[serde(deserialize_with = "Option::deserialize")]
    pub name: Option<String>,

    #[serde(deserialize_with = "Option::deserialize")]
    pub start_point: Option<TravelLocation>,

    /// When WSDOT last refreshed this estimate.
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub time_updated: DateTime<FixedOffset>,

    #[serde(rename = "TravelTimeID")]
    pub travel_time_id: TravelTimeId,
}

impl TravelTime {
    pub fn id(&self) -> TravelTimeId {
        self.travel_time_id
    }

    pub fn updated(&self) -> DateTime<FixedOffset> {
        self.time_updated
    }

    /// Minutes slower (positive) or faster (negative) than usual.
    pub fn delay(&self) -> i64 {
        self.current_time - self.average_time
    }
}
