//! Scoring: add an answer's points to a team.

use crate::models::{EngineError, Session, TeamId};

/// Add `points` to one team's score. Guarding against awarding the same answer twice is
/// up to the caller's answer bookkeeping (see [`assign_answer`]).
pub fn award_points(session: &mut Session, team_id: TeamId, points: u32) -> Result<(), EngineError> {
    let team = session
        .team_mut(team_id)
        .ok_or(EngineError::TeamNotFound(team_id))?;
    team.add_points(points);
    log::debug!("{} +{} (now {})", team.name, points, team.score);
    Ok(())
}

/// Give answer `index` of the current question to a team and award its points.
///
/// Each answer belongs to at most one team. Assigning it to the team that already holds it
/// changes nothing; assigning it to another team moves the points over. Returns whether any
/// score changed.
pub fn assign_answer(session: &mut Session, index: usize, team_id: TeamId) -> Result<bool, EngineError> {
    let question = session
        .current_question
        .as_ref()
        .ok_or(EngineError::NoActiveQuestion)?;
    let points = question
        .answers
        .get(index)
        .map(|a| a.points)
        .ok_or(EngineError::AnswerOutOfRange {
            index,
            answers: question.answers.len(),
        })?;
    if session.team(team_id).is_none() {
        return Err(EngineError::TeamNotFound(team_id));
    }

    match session.answer_owner(index) {
        Some(owner) if owner == team_id => return Ok(false),
        Some(owner) => {
            if let Some(previous) = session.team_mut(owner) {
                previous.remove_points(points);
                log::debug!("{} -{} (answer {} moved)", previous.name, points, index);
            }
            session.assigned_answers.retain(|(i, _)| *i != index);
        }
        None => {}
    }
    session.assigned_answers.push((index, team_id));
    award_points(session, team_id, points)?;
    Ok(true)
}
