//! # Player

use std::sync::OnceLock;

use serde::Serialize;
use squad_schema::{FieldValue, Kind, Record, Schema, Validated, ValidationError, Validator};

use crate::position::{Position, POSITIONS};

/// One player on a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    name: String,
    position: Position,
}

impl Player {
    /// Player's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position the player fills.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl Validated for Player {
    fn schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::new("Player")
                .field("name", Validator::Type(Kind::Str))
                .field("position", Validator::options(POSITIONS.map(|p| p.code())))
        })
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        let name = record.take_str("name")?;
        let code = record.take_str("position")?;
        let position = code.parse().map_err(|_| ValidationError::OptionNotAllowed {
            key: "position".to_string(),
            value: code.clone(),
            allowed: POSITIONS.iter().map(|p| p.code().to_string()).collect(),
        })?;
        Ok(Self { name, position })
    }

    fn to_record(&self) -> Record {
        Record::new("Player")
            .with("name", FieldValue::Str(self.name.clone()))
            .with("position", FieldValue::Str(self.position.code().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squad_schema::{construct, parse_documents};

    fn player(text: &str) -> Result<Player, ValidationError> {
        let documents = parse_documents(text).unwrap();
        construct(&documents[0])
    }

    #[test]
    fn test_player_schema_declares_name_then_position() {
        let names: Vec<&str> = Player::schema().fields().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["name", "position"]);
    }

    #[test]
    fn test_valid_player() {
        let p = player("name: Lola Bunny\nposition: SF\n").unwrap();
        assert_eq!(p.name(), "Lola Bunny");
        assert_eq!(p.position(), Position::SmallForward);
    }

    #[test]
    fn test_unknown_position_rejected() {
        let err = player("name: Marvin\nposition: GK\n").unwrap_err();
        match err {
            ValidationError::OptionNotAllowed { key, value, allowed } => {
                assert_eq!(key, "position");
                assert_eq!(value, "GK");
                assert_eq!(allowed, vec!["PG", "SG", "PF", "SF", "C"]);
            }
            other => panic!("Expected OptionNotAllowed, got: {other}"),
        }
    }

    #[test]
    fn test_name_must_be_string() {
        let err = player("name: 23\nposition: SG\n").unwrap_err();
        assert!(matches!(err, ValidationError::TypeMismatch { ref key, .. } if key == "name"));
    }

    #[test]
    fn test_to_record_matches_schema_order() {
        let p = player("position: C\nname: Taz\n").unwrap();
        let record = p.to_record();
        assert_eq!(record.str_field("name"), Some("Taz"));
        assert_eq!(record.str_field("position"), Some("C"));
        let rebuilt = Player::schema()
            .construct(&Player::schema().serialize(&record))
            .unwrap();
        assert_eq!(rebuilt, record);
    }
}
