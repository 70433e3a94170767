//! Setup phase: register teams and start (or restart) the game.

use crate::models::{EngineError, GamePhase, Session, Team};

/// Replace the teams with fresh ones built from `names` (blank names are skipped).
///
/// Requires between `min_teams` and `max_teams` non-empty names. The session goes back to
/// Setup so no completed or advancing id can point at a team that no longer exists.
pub fn initialize_teams<S: AsRef<str>>(
    session: &mut Session,
    names: &[S],
) -> Result<(), EngineError> {
    let names: Vec<&str> = names
        .iter()
        .map(|n| n.as_ref().trim())
        .filter(|n| !n.is_empty())
        .collect();
    let (min, max) = (session.rules.min_teams, session.rules.max_teams);
    if names.len() < min {
        return Err(EngineError::NotEnoughTeams {
            min,
            supplied: names.len(),
        });
    }
    if names.len() > max {
        return Err(EngineError::TooManyTeams {
            max,
            supplied: names.len(),
        });
    }

    session.teams = names.into_iter().map(Team::new).collect();
    session.round = 0;
    session.phase = GamePhase::Setup;
    session.questions_required = 0;
    session.current_matchup = None;
    session.set_current_question(None);
    session.completed.clear();
    session.advancing.clear();
    session.final_standings.clear();
    session.timer.reset();
    log::info!("Registered {} teams", session.teams.len());
    Ok(())
}

/// Start round 1: reset both question pools, the completed set and the timer.
///
/// The first main-pool question is shown as a placeholder until a pair is selected;
/// it is not marked used.
pub fn start_game(session: &mut Session) -> Result<(), EngineError> {
    if session.teams.len() < session.rules.min_teams {
        return Err(EngineError::NotEnoughTeams {
            min: session.rules.min_teams,
            supplied: session.teams.len(),
        });
    }
    session.round = 1;
    session.phase = GamePhase::Round1;
    session.questions_required = session.rules.questions_required(1);
    session.completed.clear();
    session.advancing.clear();
    session.final_standings.clear();
    session.current_matchup = None;
    for q in session.main_pool.iter_mut().chain(session.bonus_pool.iter_mut()) {
        q.used = false;
    }
    let placeholder = session.main_pool.first().cloned();
    session.set_current_question(placeholder);
    session.timer.reset();
    log::info!(
        "Game started with {} teams ({} main / {} bonus questions)",
        session.teams.len(),
        session.main_pool.len(),
        session.bonus_pool.len()
    );
    Ok(())
}
