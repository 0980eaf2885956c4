//! Night-phase sequencing.
//!
//! The sequencer is a traversal cursor over the players who act tonight,
//! ordered by their character's night-order priority. It never mutates
//! player status; poison/drunk/kill toggles during a night are applied
//! directly to the game state by the operator. The machine is headless and
//! drivable without any rendering attached.

use crate::catalog::{Character, Script};
use crate::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Reminder text shown when a character has no action this phase but is
/// included anyway (show-all traversal).
pub const NO_NIGHT_ACTION: &str = "(No night action)";

/// Which night ordering and reminder fields apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NightPhase {
    /// The single first night after assignment.
    First,
    /// Every night after the first.
    Other,
}

/// Errors from driving the sequencer.
#[derive(Debug, Error)]
pub enum NightError {
    #[error("Night sequencer is not active")]
    NotActive,
}

/// Outcome of advancing the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NightProgress {
    /// Another player is up; `current` is valid again.
    Next,
    /// The traversal just finished; the caller runs end-of-night bookkeeping.
    Finished,
}

/// One step of the traversal: who is up and what to tell the storyteller.
#[derive(Debug, Clone, Copy)]
pub struct NightStep<'a> {
    pub player: &'a Player,
    pub character: &'a Character,
    pub reminder: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    Active { ordered: Vec<PlayerId>, index: usize },
    Complete,
}

/// Step-by-step night traversal state machine.
#[derive(Debug, Clone)]
pub struct NightSequencer {
    phase: NightPhase,
    state: State,
}

impl Default for NightSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl NightSequencer {
    pub fn new() -> Self {
        Self {
            phase: NightPhase::First,
            state: State::Idle,
        }
    }

    /// Begin a traversal for the given phase.
    ///
    /// Players whose phase reminder is empty are skipped unless `show_all`
    /// is set. The rest are sorted ascending by the phase night order;
    /// the sort is stable, so seating order breaks ties. An empty filtered
    /// list goes straight to `Complete`.
    pub fn start(&mut self, phase: NightPhase, players: &[Player], script: &Script, show_all: bool) {
        let mut ordered: Vec<(u32, PlayerId)> = players
            .iter()
            .filter_map(|p| {
                let character = script.get(&p.character)?;
                if show_all || character.has_night_action(phase) {
                    Some((character.night_order(phase), p.id))
                } else {
                    None
                }
            })
            .collect();
        ordered.sort_by_key(|(order, _)| *order);

        let ordered: Vec<PlayerId> = ordered.into_iter().map(|(_, id)| id).collect();
        debug!(?phase, steps = ordered.len(), "night traversal started");

        self.phase = phase;
        self.state = if ordered.is_empty() {
            State::Complete
        } else {
            State::Active { ordered, index: 0 }
        };
    }

    pub fn phase(&self) -> NightPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::Idle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, State::Complete)
    }

    /// Players remaining in the traversal, including the current one.
    pub fn remaining(&self) -> usize {
        match &self.state {
            State::Active { ordered, index } => ordered.len() - index,
            _ => 0,
        }
    }

    /// The step the cursor is on. Valid only while active.
    pub fn current<'a>(
        &self,
        players: &'a [Player],
        script: &'a Script,
    ) -> Result<NightStep<'a>, NightError> {
        let State::Active { ordered, index } = &self.state else {
            return Err(NightError::NotActive);
        };

        // Ids in `ordered` were taken from `players` at start; a missing
        // entry means the roster was rebuilt mid-night, which start/cancel
        // rule out.
        let id = ordered[*index];
        let player = players
            .iter()
            .find(|p| p.id == id)
            .ok_or(NightError::NotActive)?;
        let character = script.get(&player.character).ok_or(NightError::NotActive)?;

        let reminder = match character.night_reminder(self.phase) {
            "" => NO_NIGHT_ACTION,
            text => text,
        };

        Ok(NightStep {
            player,
            character,
            reminder,
        })
    }

    /// Move the cursor to the next player. Valid only while active; calling
    /// it again after `Finished` is an error, never a silent wrap-around.
    pub fn advance(&mut self) -> Result<NightProgress, NightError> {
        let State::Active { ordered, index } = &mut self.state else {
            return Err(NightError::NotActive);
        };

        *index += 1;
        if *index >= ordered.len() {
            self.state = State::Complete;
            debug!("night traversal finished");
            Ok(NightProgress::Finished)
        } else {
            Ok(NightProgress::Next)
        }
    }

    /// Abort the traversal from any state. Status flags toggled mid-sequence
    /// are left as they are.
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CharacterId, Team};

    fn chr(id: &str, first_order: u32, first_reminder: &str) -> Character {
        Character {
            id: CharacterId::from(id),
            name: id.to_string(),
            team: Team::Townsfolk,
            ability: String::new(),
            first_night_order: first_order,
            other_night_order: 999,
            first_night_reminder: first_reminder.to_string(),
            other_night_reminder: String::new(),
            reminders: Vec::new(),
        }
    }

    /// Three acting characters with orders 8, 2, 5 plus one sleeper.
    fn fixture() -> (Script, Vec<Player>) {
        let late = chr("late", 8, "Wake the late one.");
        let early = chr("early", 2, "Wake the early one.");
        let middle = chr("middle", 5, "Wake the middle one.");
        let sleeper = chr("sleeper", 999, "");

        let players = vec![
            Player::new("P1", &late),
            Player::new("P2", &early),
            Player::new("P3", &middle),
            Player::new("P4", &sleeper),
        ];
        let script = Script::new(vec![late, early, middle, sleeper]);
        (script, players)
    }

    #[test]
    fn test_traversal_order_ascending() {
        let (script, players) = fixture();
        let mut seq = NightSequencer::new();
        seq.start(NightPhase::First, &players, &script, false);

        let mut seen = Vec::new();
        loop {
            let step = seq.current(&players, &script).unwrap();
            seen.push(step.character.id.as_str().to_string());
            if seq.advance().unwrap() == NightProgress::Finished {
                break;
            }
        }
        assert_eq!(seen, vec!["early", "middle", "late"]);
    }

    #[test]
    fn test_empty_reminder_filtered_unless_show_all() {
        let (script, players) = fixture();

        let mut seq = NightSequencer::new();
        seq.start(NightPhase::First, &players, &script, false);
        assert_eq!(seq.remaining(), 3);

        seq.start(NightPhase::First, &players, &script, true);
        assert_eq!(seq.remaining(), 4);
    }

    #[test]
    fn test_show_all_reminder_placeholder() {
        let (script, players) = fixture();
        let mut seq = NightSequencer::new();
        seq.start(NightPhase::First, &players, &script, true);

        // Orders 2, 5, 8 then the 999 sleeper last.
        seq.advance().unwrap();
        seq.advance().unwrap();
        seq.advance().unwrap();
        let step = seq.current(&players, &script).unwrap();
        assert_eq!(step.character.id.as_str(), "sleeper");
        assert_eq!(step.reminder, NO_NIGHT_ACTION);
    }

    #[test]
    fn test_ties_keep_seating_order() {
        let a = chr("a", 5, "wake");
        let b = chr("b", 5, "wake");
        let c = chr("c", 5, "wake");
        let players = vec![
            Player::new("P1", &a),
            Player::new("P2", &b),
            Player::new("P3", &c),
        ];
        let script = Script::new(vec![a, b, c]);

        let mut seq = NightSequencer::new();
        seq.start(NightPhase::First, &players, &script, false);

        let mut names = Vec::new();
        loop {
            names.push(seq.current(&players, &script).unwrap().player.name.clone());
            if seq.advance().unwrap() == NightProgress::Finished {
                break;
            }
        }
        assert_eq!(names, vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn test_advance_finishes_exactly_once() {
        let (script, players) = fixture();
        let mut seq = NightSequencer::new();
        seq.start(NightPhase::First, &players, &script, false);

        assert_eq!(seq.advance().unwrap(), NightProgress::Next);
        assert_eq!(seq.advance().unwrap(), NightProgress::Next);
        assert_eq!(seq.advance().unwrap(), NightProgress::Finished);
        assert!(seq.is_complete());

        // Complete is terminal; another advance must fail, not wrap.
        assert!(matches!(seq.advance(), Err(NightError::NotActive)));
        assert!(matches!(
            seq.current(&players, &script),
            Err(NightError::NotActive)
        ));
    }

    #[test]
    fn test_empty_start_goes_straight_to_complete() {
        let (script, _) = fixture();
        let mut seq = NightSequencer::new();
        seq.start(NightPhase::First, &[], &script, false);
        assert!(seq.is_complete());
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let (script, players) = fixture();
        let mut seq = NightSequencer::new();
        seq.start(NightPhase::First, &players, &script, false);
        assert!(seq.is_active());

        seq.cancel();
        assert!(seq.is_idle());
        assert!(matches!(seq.advance(), Err(NightError::NotActive)));
    }

    #[test]
    fn test_other_phase_uses_other_fields() {
        let mut poisoner = chr("poisoner", 17, "First night poison.");
        poisoner.other_night_order = 7;
        poisoner.other_night_reminder = "The Poisoner picks again.".to_string();
        let washerwoman = chr("washerwoman", 32, "Show the token.");

        let players = vec![
            Player::new("P1", &washerwoman),
            Player::new("P2", &poisoner),
        ];
        let script = Script::new(vec![poisoner, washerwoman]);

        let mut seq = NightSequencer::new();
        seq.start(NightPhase::Other, &players, &script, false);

        // Only the poisoner acts on later nights.
        assert_eq!(seq.remaining(), 1);
        let step = seq.current(&players, &script).unwrap();
        assert_eq!(step.player.name, "P2");
        assert_eq!(step.reminder, "The Poisoner picks again.");
    }
}
