//! Blood on the Clocktower storyteller rules engine.
//!
//! This crate provides the headless core behind a storyteller assistant:
//! - Character catalog and per-session script loading
//! - Quota-respecting random character assignment (5-15 players)
//! - Demon bluff selection from the unassigned good characters
//! - The step-by-step night-phase sequencer
//! - The mutable game state (roster, status flags, day/phase cycle)
//!
//! Rendering, dialogs and any I/O beyond the two JSON data files are out of
//! scope; everything here is drivable headlessly. Random draws accept an
//! injectable RNG (`*_with_rng`) so tests can run with a fixed seed.
//!
//! # Quick Start
//!
//! ```
//! use grimoire_core::{Catalog, GameState, NightProgress, Script};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::from_json(
//!     r#"[
//!       {"id": "chef", "name": "Chef", "team": "townsfolk",
//!        "ability": "You start knowing how many pairs of evil players there are.",
//!        "first_night_order": 36, "firstNightReminder": "Show the Chef a number."},
//!       {"id": "empath", "name": "Empath", "team": "townsfolk",
//!        "ability": "Each night, you learn how many of your alive neighbours are evil.",
//!        "first_night_order": 37, "other_night_order": 53,
//!        "firstNightReminder": "Show the Empath a number.",
//!        "otherNightReminder": "Show the Empath a number."},
//!       {"id": "soldier", "name": "Soldier", "team": "townsfolk",
//!        "ability": "You are safe from the Demon."},
//!       {"id": "poisoner", "name": "Poisoner", "team": "minion",
//!        "ability": "Each night, choose a player: they are poisoned.",
//!        "first_night_order": 17, "other_night_order": 8,
//!        "firstNightReminder": "The Poisoner points to a player.",
//!        "otherNightReminder": "The Poisoner points to a player."},
//!       {"id": "imp", "name": "Imp", "team": "demon",
//!        "ability": "Each night*, choose a player: they die.",
//!        "other_night_order": 24,
//!        "otherNightReminder": "The Imp points to a player."}
//!     ]"#,
//! )?;
//!
//! let load = Script::from_json(
//!     &catalog,
//!     r#"[{"id": "chef"}, {"id": "empath"}, {"id": "soldier"},
//!         {"id": "poisoner"}, {"id": "imp"}]"#,
//! )?;
//! assert!(load.unknown_ids.is_empty());
//!
//! let mut game = GameState::new(load.script);
//! game.generate_game(5)?;
//! assert_eq!(game.players().len(), 5);
//! assert_eq!(game.bluffs().len(), 0); // all five characters are in play
//!
//! if game.start_night(false) {
//!     loop {
//!         let step = game.night_current()?;
//!         println!("{} — {}", step.character.name, step.reminder);
//!         if game.night_advance()? == NightProgress::Finished {
//!             break;
//!         }
//!     }
//! }
//! game.advance_day();
//! assert_eq!(game.day(), 2);
//! # Ok(())
//! # }
//! ```

pub mod assign;
pub mod catalog;
pub mod game;
pub mod message;
pub mod night;
pub mod player;
pub mod roles;

// Primary public API
pub use assign::{
    draw_characters, draw_characters_with_rng, select_bluffs, select_bluffs_with_rng, AssignError,
    BLUFF_COUNT,
};
pub use catalog::{
    Catalog, CatalogError, Character, CharacterId, Script, ScriptLoad, Team, NO_NIGHT_ACTION_ORDER,
};
pub use game::{GameError, GameState, Phase};
pub use message::MessageKind;
pub use night::{
    NightError, NightPhase, NightProgress, NightSequencer, NightStep, NO_NIGHT_ACTION,
};
pub use player::{Player, PlayerId};
pub use roles::{TeamQuota, MAX_PLAYERS, MIN_PLAYERS};
