//! Pairing: choose the next two teams, track who has competed this round.

use crate::logic::questions::draw_unused;
use crate::models::{EngineError, Matchup, Session, Team, TeamId};
use rand::Rng;

/// Start a matchup between two eligible teams and draw its first question at random.
///
/// Both teams must exist and not have competed this round. If the main pool is used up the
/// current question becomes `None` (no question available; go to results).
pub fn select_pair<R: Rng + ?Sized>(
    session: &mut Session,
    team_a: TeamId,
    team_b: TeamId,
    rng: &mut R,
) -> Result<(), EngineError> {
    if !session.phase.is_playing() {
        return Err(EngineError::InvalidState);
    }
    if team_a == team_b {
        return Err(EngineError::SameTeamTwice);
    }
    for id in [team_a, team_b] {
        if session.team(id).is_none() {
            return Err(EngineError::TeamNotFound(id));
        }
        if session.has_completed(id) {
            return Err(EngineError::TeamAlreadyCompeted(id));
        }
    }

    session.current_matchup = Some(Matchup::new(team_a, team_b));
    let question = draw_unused(&mut session.main_pool, rng);
    match &question {
        Some(q) => log::debug!("Question {} drawn for new matchup", q.id),
        None => log::warn!("Main question pool exhausted; no question for matchup"),
    }
    session.set_current_question(question);
    Ok(())
}

/// Same as [`select_pair`] but from a selection list, which must hold exactly two ids.
pub fn select_teams<R: Rng + ?Sized>(
    session: &mut Session,
    team_ids: &[TeamId],
    rng: &mut R,
) -> Result<(), EngineError> {
    match *team_ids {
        [a, b] => select_pair(session, a, b, rng),
        _ => Err(EngineError::WrongNumberOfTeams {
            selected: team_ids.len(),
        }),
    }
}

/// Mark both matchup teams as completed for this round and clear the matchup.
pub fn complete_match(session: &mut Session) -> Result<(), EngineError> {
    let matchup = session
        .current_matchup
        .take()
        .ok_or(EngineError::NoActiveMatchup)?;
    for id in matchup.team_ids() {
        if !session.completed.contains(&id) {
            session.completed.push(id);
        }
    }
    session.set_current_question(None);
    log::info!(
        "Matchup complete ({}/{} teams done this round)",
        session.completed.len(),
        session.teams.len()
    );
    Ok(())
}

/// Teams that have not competed yet this round, in insertion order.
pub fn available_pair_candidates(session: &Session) -> Vec<&Team> {
    session
        .teams
        .iter()
        .filter(|t| !session.has_completed(t.id))
        .collect()
}

/// True once every team that can be paired has competed. A lone leftover team with an odd
/// team count is never required to play.
pub fn all_pairs_completed_for_round(session: &Session) -> bool {
    session.completed.len() >= (session.teams.len() / 2) * 2
}
