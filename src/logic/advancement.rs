//! End of round: rank teams, pick survivors, move to the next round.

use crate::models::{EngineError, GamePhase, RoundRules, Session, Team, TeamId};

/// Rank teams by score (ties keep insertion order) and record which ids advance, using the
/// current round's survivor cutoff. Scores and round are left alone.
pub fn compute_round_results(session: &mut Session) -> Result<Vec<Team>, EngineError> {
    if !session.phase.is_playing() {
        return Err(EngineError::InvalidState);
    }
    let standings = session.standings();
    let cutoff = session.rules.survivors(session.round);
    session.advancing = standings.iter().take(cutoff).map(|t| t.id).collect();
    log::info!(
        "Round {} results: {} of {} teams advance",
        session.round,
        session.advancing.len(),
        standings.len()
    );
    Ok(standings)
}

/// Keep only the advancing teams (scores reset to zero) and move to the next round, or to
/// Finished after the final round.
///
/// `fallback` is consulted when the in-memory advancing set is empty (e.g. the copy read
/// back from durable storage). Ids that do not match a current team are ignored. If nothing
/// usable remains this fails with [`EngineError::NoAdvancingTeams`] and changes nothing.
pub fn advance_round(session: &mut Session, fallback: &[TeamId]) -> Result<(), EngineError> {
    if !session.phase.is_playing() {
        return Err(EngineError::InvalidState);
    }
    let source = if session.advancing.is_empty() {
        if !fallback.is_empty() {
            log::warn!("Advancing set empty in memory; using stored copy");
        }
        fallback
    } else {
        &session.advancing[..]
    };
    let advancing: Vec<TeamId> = source
        .iter()
        .copied()
        .filter(|id| session.team(*id).is_some())
        .collect();
    if advancing.is_empty() {
        log::error!("Cannot advance round {}: no advancing teams", session.round);
        return Err(EngineError::NoAdvancingTeams);
    }

    if session.round == RoundRules::FINAL_ROUND {
        session.final_standings = session.standings();
    }
    session.teams.retain(|t| advancing.contains(&t.id));
    for team in &mut session.teams {
        team.reset_score();
    }
    session.round += 1;
    session.phase = GamePhase::for_round(session.round);
    session.questions_required = session.rules.questions_required(session.round);
    session.completed.clear();
    session.current_matchup = None;
    session.set_current_question(None);
    session.timer.reset();
    session.advancing.clear();

    match session.phase {
        GamePhase::Finished => log::info!(
            "Game finished; winner: {}",
            session.teams.first().map(|t| t.name.as_str()).unwrap_or("-")
        ),
        phase => log::info!("Advanced to {:?} with {} teams", phase, session.teams.len()),
    }
    Ok(())
}
