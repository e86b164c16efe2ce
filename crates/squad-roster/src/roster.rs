//! # Roster
//!
//! A team roster: named, dated, and carrying its players. A roster is only
//! valid when its players cover every position in [`POSITIONS`].
//!
//! ## Invariant
//!
//! The position check runs after every field, including each nested
//! [`Player`], has validated. Duplicate positions are allowed.
//! `player_count` is a plain data field and is not compared with the
//! number of players.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use serde::Serialize;
use squad_schema::{
    DateTimeFormat, FieldValue, Kind, Record, Schema, Validated, ValidationError, Validator,
};
use thiserror::Error;

use crate::player::Player;
use crate::position::{Position, POSITIONS};

/// The roster's players leave at least one position empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Every position must be filled.")]
pub struct InvalidRoster {
    missing: Vec<Position>,
}

impl InvalidRoster {
    /// Unfilled positions, in [`POSITIONS`] order.
    pub fn missing(&self) -> &[Position] {
        &self.missing
    }

    /// Find the roster invariant failure behind a validation error.
    pub fn find(err: &ValidationError) -> Option<&InvalidRoster> {
        err.invariant_ref::<InvalidRoster>()
    }
}

/// A validated team roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roster {
    name: String,
    player_count: i64,
    players: Vec<Player>,
    want_to_fly_like_an_eagle: bool,
    inception_date: NaiveDateTime,
}

impl Roster {
    /// Team name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared player count, as written in the document.
    pub fn player_count(&self) -> i64 {
        self.player_count
    }

    /// Players in document order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Defaults to `true` when the document leaves it out.
    pub fn want_to_fly_like_an_eagle(&self) -> bool {
        self.want_to_fly_like_an_eagle
    }

    /// When the team was founded.
    pub fn inception_date(&self) -> NaiveDateTime {
        self.inception_date
    }

    /// Returns true if every position has at least one player.
    pub fn has_every_position_filled(&self) -> bool {
        missing_positions(self.players.iter().map(Player::position)).is_empty()
    }
}

impl Validated for Roster {
    fn schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::new("Roster")
                .field("name", Validator::Type(Kind::Str))
                .field("player_count", Validator::Type(Kind::Int))
                .field("players", Validator::Repeated(Player::schema()))
                .field(
                    "want_to_fly_like_an_eagle",
                    Validator::optional(Validator::Type(Kind::Bool), FieldValue::Bool(true)),
                )
                .field("inception_date", Validator::custom(DateTimeFormat::new()))
                .check(check_every_position_filled)
        })
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        let players = record
            .take_list("players")?
            .into_iter()
            .map(Player::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: record.take_str("name")?,
            player_count: record.take_int("player_count")?,
            players,
            want_to_fly_like_an_eagle: record.take_bool("want_to_fly_like_an_eagle")?,
            inception_date: record.take_datetime("inception_date")?,
        })
    }

    fn to_record(&self) -> Record {
        Record::new("Roster")
            .with("name", FieldValue::Str(self.name.clone()))
            .with("player_count", FieldValue::Int(self.player_count))
            .with(
                "players",
                FieldValue::List(self.players.iter().map(Player::to_record).collect()),
            )
            .with(
                "want_to_fly_like_an_eagle",
                FieldValue::Bool(self.want_to_fly_like_an_eagle),
            )
            .with("inception_date", FieldValue::DateTime(self.inception_date))
    }
}

/// Whole-object check for [`Roster`]'s schema.
fn check_every_position_filled(record: &Record) -> Result<(), ValidationError> {
    let present = record
        .list_field("players")
        .unwrap_or_default()
        .iter()
        .filter_map(|player| player.str_field("position"))
        .filter_map(Position::from_code);
    let missing = missing_positions(present);
    if missing.is_empty() {
        return Ok(());
    }
    tracing::debug!(?missing, "roster leaves positions unfilled");
    Err(ValidationError::invariant("Roster", InvalidRoster { missing }))
}

fn missing_positions(present: impl IntoIterator<Item = Position>) -> Vec<Position> {
    let present: BTreeSet<Position> = present.into_iter().collect();
    POSITIONS
        .into_iter()
        .filter(|p| !present.contains(p))
        .collect()
}
