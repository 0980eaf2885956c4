//! QA tests for the day/night cycle driven end to end through the game
//! state, plus the sequencer's state machine guarantees.

use grimoire_core::{
    Character, CharacterId, GameState, NightError, NightPhase, NightProgress, NightSequencer,
    Phase, Player, Script, Team, NO_NIGHT_ACTION, NO_NIGHT_ACTION_ORDER,
};

fn chr(
    id: &str,
    team: Team,
    first: (u32, &str),
    other: (u32, &str),
) -> Character {
    Character {
        id: CharacterId::from(id),
        name: id.to_string(),
        team,
        ability: format!("{id} ability"),
        first_night_order: first.0,
        other_night_order: other.0,
        first_night_reminder: first.1.to_string(),
        other_night_reminder: other.1.to_string(),
        reminders: Vec::new(),
    }
}

/// Five characters whose first-night and other-night orders disagree, so
/// the two phases produce visibly different traversals.
fn night_script() -> Script {
    Script::new(vec![
        chr("washerwoman", Team::Townsfolk, (32, "Show the Townsfolk token."), (NO_NIGHT_ACTION_ORDER, "")),
        chr("empath", Team::Townsfolk, (37, "Show the Empath a number."), (53, "Show the Empath a number.")),
        chr("monk", Team::Townsfolk, (NO_NIGHT_ACTION_ORDER, ""), (12, "The Monk points to a player.")),
        chr("poisoner", Team::Minion, (17, "The Poisoner points to a player."), (8, "The Poisoner points to a player.")),
        chr("imp", Team::Demon, (NO_NIGHT_ACTION_ORDER, ""), (24, "The Imp points to a player.")),
    ])
}

/// Seat one named player per script character, in script order.
fn seat_everyone(game: &mut GameState) {
    let ids: Vec<CharacterId> = game
        .script()
        .characters()
        .iter()
        .map(|c| c.id.clone())
        .collect();
    for (i, id) in ids.iter().enumerate() {
        game.add_player(format!("Seat {}", i + 1), id).unwrap();
    }
}

fn run_night(game: &mut GameState, show_all: bool) -> Vec<String> {
    let mut visited = Vec::new();
    if !game.start_night(show_all) {
        return visited;
    }
    loop {
        let step = game.night_current().unwrap();
        visited.push(step.character.id.as_str().to_string());
        if game.night_advance().unwrap() == NightProgress::Finished {
            break;
        }
    }
    visited
}

// =============================================================================
// FULL CYCLE THROUGH GAME STATE
// =============================================================================

#[test]
fn qa_first_and_other_nights_use_their_own_ordering() {
    let mut game = GameState::new(night_script());
    seat_everyone(&mut game);

    // First night: poisoner 17, washerwoman 32, empath 37.
    let first = run_night(&mut game, false);
    assert_eq!(first, vec!["poisoner", "washerwoman", "empath"]);
    assert_eq!(game.phase(), Phase::Day);
    assert!(!game.is_first_night());

    // Every later night: poisoner 8, monk 12, imp 24, empath 53.
    let second = run_night(&mut game, false);
    assert_eq!(second, vec!["poisoner", "monk", "imp", "empath"]);

    let third = run_night(&mut game, false);
    assert_eq!(third, second, "other-night ordering repeats every night");
}

#[test]
fn qa_show_all_includes_sleepers_with_placeholder() {
    let mut game = GameState::new(night_script());
    seat_everyone(&mut game);

    assert!(game.start_night(true));
    assert_eq!(game.phase(), Phase::FirstNight);

    let mut reminders = Vec::new();
    loop {
        let step = game.night_current().unwrap();
        reminders.push((step.character.id.as_str().to_string(), step.reminder.to_string()));
        if game.night_advance().unwrap() == NightProgress::Finished {
            break;
        }
    }

    assert_eq!(reminders.len(), 5, "show-all traverses every seated player");
    // Characters without a first-night action sort last and show the
    // placeholder text.
    let (id, reminder) = &reminders[4];
    assert!(id == "monk" || id == "imp");
    assert_eq!(reminder, NO_NIGHT_ACTION);
}

#[test]
fn qa_day_counter_and_phase_cycle() {
    let mut game = GameState::new(night_script());
    seat_everyone(&mut game);
    assert_eq!(game.phase(), Phase::Setup);

    run_night(&mut game, false);
    assert_eq!((game.day(), game.phase()), (1, Phase::Day));

    game.advance_day();
    assert_eq!((game.day(), game.phase()), (2, Phase::Day));

    game.start_night(false);
    assert_eq!(game.phase(), Phase::OtherNight);
    game.end_night();
    assert_eq!(game.phase(), Phase::Day);

    game.advance_day();
    assert_eq!((game.day(), game.phase()), (3, Phase::Day));
}

#[test]
fn qa_end_night_short_circuits_but_keeps_toggles() {
    let mut game = GameState::new(night_script());
    seat_everyone(&mut game);

    game.start_night(false);
    let up = game.night_current().unwrap().player.id;
    game.toggle_poisoned(up).unwrap();
    game.night_advance().unwrap();
    game.end_night();

    assert!(!game.is_night_active());
    assert!(!game.is_first_night());
    assert!(game.player(up).unwrap().poisoned);

    // The interrupted first night still counts as the first night.
    let next = run_night(&mut game, false);
    assert_eq!(next[0], "poisoner");
    assert_eq!(next.len(), 4, "second night runs with other-night fields");
}

// =============================================================================
// SEQUENCER STATE MACHINE
// =============================================================================

#[test]
fn qa_sequencer_is_a_strict_cursor() {
    let script = night_script();
    let players: Vec<Player> = script
        .characters()
        .iter()
        .map(|c| Player::new(c.name.clone(), c))
        .collect();

    let mut seq = NightSequencer::new();
    assert!(seq.is_idle());
    assert!(matches!(seq.advance(), Err(NightError::NotActive)));

    seq.start(NightPhase::First, &players, &script, false);
    assert!(seq.is_active());
    assert_eq!(seq.remaining(), 3);

    assert_eq!(seq.advance().unwrap(), NightProgress::Next);
    assert_eq!(seq.advance().unwrap(), NightProgress::Next);
    assert_eq!(seq.advance().unwrap(), NightProgress::Finished);
    assert!(seq.is_complete());

    // Finished is signalled exactly once; Complete never wraps around.
    assert!(matches!(seq.advance(), Err(NightError::NotActive)));
    assert!(matches!(seq.current(&players, &script), Err(NightError::NotActive)));

    seq.cancel();
    assert!(seq.is_idle());
}

#[test]
fn qa_sequencer_never_mutates_players() {
    let script = night_script();
    let players: Vec<Player> = script
        .characters()
        .iter()
        .map(|c| Player::new(c.name.clone(), c))
        .collect();
    let before: Vec<String> = players.iter().map(Player::status).collect();

    let mut seq = NightSequencer::new();
    seq.start(NightPhase::First, &players, &script, true);
    while seq.advance().unwrap() != NightProgress::Finished {}

    let after: Vec<String> = players.iter().map(Player::status).collect();
    assert_eq!(before, after);
}
