//! # Court Positions
//!
//! The five positions a roster must cover, written in documents by their
//! two-letter codes. Codes are case-sensitive.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// A basketball position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Position {
    /// Point guard.
    #[serde(rename = "PG")]
    PointGuard,
    /// Shooting guard.
    #[serde(rename = "SG")]
    ShootingGuard,
    /// Power forward.
    #[serde(rename = "PF")]
    PowerForward,
    /// Small forward.
    #[serde(rename = "SF")]
    SmallForward,
    /// Center.
    #[serde(rename = "C")]
    Center,
}

/// Every position, in the order codes are listed to users.
pub const POSITIONS: [Position; 5] = [
    Position::PointGuard,
    Position::ShootingGuard,
    Position::PowerForward,
    Position::SmallForward,
    Position::Center,
];

impl Position {
    /// Two-letter document code.
    pub fn code(&self) -> &'static str {
        match self {
            Position::PointGuard => "PG",
            Position::ShootingGuard => "SG",
            Position::PowerForward => "PF",
            Position::SmallForward => "SF",
            Position::Center => "C",
        }
    }

    /// Look up a position by its exact code.
    pub fn from_code(code: &str) -> Option<Self> {
        POSITIONS.into_iter().find(|p| p.code() == code)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The text is not a position code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown position code {0:?}")]
pub struct UnknownPosition(pub String);

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownPosition(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for position in POSITIONS {
            assert_eq!(position.code().parse::<Position>(), Ok(position));
        }
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        assert!("pg".parse::<Position>().is_err());
        assert!("Center".parse::<Position>().is_err());
    }

    #[test]
    fn test_display_is_code() {
        assert_eq!(Position::SmallForward.to_string(), "SF");
    }
}
