//! # squad-roster — Roster Domain Types
//!
//! Declares the [`Player`] and [`Roster`] schemas and the roster's
//! whole-object invariant: every position in [`POSITIONS`] must be filled.
//!
//! ```text
//! name: The Toon Squad
//! player_count: 5
//! players:
//! - name: Bugs Bunny
//!   position: PG
//! inception_date: 11/15/96
//! ```
//!
//! [`load_roster`] is the entry point for YAML text; everything else goes
//! through the generic machinery in `squad-schema`.

pub mod player;
pub mod position;
pub mod roster;

pub use player::Player;
pub use position::{Position, UnknownPosition, POSITIONS};
pub use roster::{InvalidRoster, Roster};

use squad_schema::{build_objects, LoadError};

/// Load the first roster in a YAML document stream.
pub fn load_roster(text: &str) -> Result<Option<Roster>, LoadError> {
    build_objects::<Roster>(text)
}
