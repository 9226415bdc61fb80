//! Reordering strategies

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::{Features, Point};

/// A strategy name that is neither `start-end` nor `centroid`
#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown strategy '{0}', expected 'start-end' or 'centroid'")]
pub struct UnknownStrategy(pub String);

/// Which path feature drives the nearest-neighbour search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Strategy {
    /// Enter each path at whichever endpoint is nearer, leave at the other
    #[default]
    StartEnd,
    /// Hop between path centroids; orientation is never changed
    Centroid,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::StartEnd => "start-end",
            Strategy::Centroid => "centroid",
        }
    }

    /// Point where the pen enters a path
    pub fn entry(self, features: &Features, reversed: bool) -> Point {
        match self {
            Strategy::StartEnd if reversed => features.end,
            Strategy::StartEnd => features.start,
            Strategy::Centroid => features.centroid,
        }
    }

    /// Point where the pen leaves a path
    pub fn exit(self, features: &Features, reversed: bool) -> Point {
        match self {
            Strategy::StartEnd if reversed => features.start,
            Strategy::StartEnd => features.end,
            Strategy::Centroid => features.centroid,
        }
    }

    /// Whether paths may be drawn in the opposite direction
    pub fn allows_reversal(self) -> bool {
        matches!(self, Strategy::StartEnd)
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "start-end" | "startend" => Ok(Strategy::StartEnd),
            "centroid" => Ok(Strategy::Centroid),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

impl TryFrom<String> for Strategy {
    type Error = UnknownStrategy;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_names() {
        assert_eq!("start-end".parse::<Strategy>().unwrap(), Strategy::StartEnd);
        assert_eq!("START_END".parse::<Strategy>().unwrap(), Strategy::StartEnd);
        assert_eq!("centroid".parse::<Strategy>().unwrap(), Strategy::Centroid);
        assert_eq!(Strategy::Centroid.to_string(), "centroid");
        assert_eq!(
            "nearest".parse::<Strategy>(),
            Err(UnknownStrategy("nearest".to_string()))
        );
    }

    #[test]
    fn test_entry_and_exit_points() {
        let f = Features {
            start: Point::new(0.0, 0.0),
            end: Point::new(10.0, 0.0),
            centroid: Point::new(5.0, 0.0),
        };
        assert_eq!(Strategy::StartEnd.entry(&f, false), f.start);
        assert_eq!(Strategy::StartEnd.exit(&f, false), f.end);
        assert_eq!(Strategy::StartEnd.entry(&f, true), f.end);
        assert_eq!(Strategy::StartEnd.exit(&f, true), f.start);
        assert_eq!(Strategy::Centroid.entry(&f, false), f.centroid);
        assert_eq!(Strategy::Centroid.exit(&f, false), f.centroid);
    }
}
