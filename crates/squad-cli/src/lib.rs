//! # squad-cli — Roster Command-Line Interface
//!
//! ## Subcommands
//!
//! - `validate` — load a roster file and report whether it is valid
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handler.
//! - Handlers delegate to `squad-roster`; no validation logic here.

pub mod validate;
