//! Question pools: random draws, answer reveals, stepping through a matchup's questions.

use crate::models::{EngineError, Question, Session};
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick uniformly among the unused questions in `pool` and mark the pick used.
/// Returns `None` once every question has been used.
pub(crate) fn draw_unused<R: Rng + ?Sized>(pool: &mut [Question], rng: &mut R) -> Option<Question> {
    let unused: Vec<usize> = pool
        .iter()
        .enumerate()
        .filter(|(_, q)| !q.used)
        .map(|(i, _)| i)
        .collect();
    let &idx = unused.choose(rng)?;
    let question = &mut pool[idx];
    question.used = true;
    Some(question.clone())
}

/// Reveal an answer on the current question. Revealing twice has no further effect.
/// Returns whether the answer was newly revealed. Never touches pools or scores.
pub fn reveal_answer(session: &mut Session, index: usize) -> Result<bool, EngineError> {
    let question = session
        .current_question
        .as_ref()
        .ok_or(EngineError::NoActiveQuestion)?;
    if index >= question.answers.len() {
        return Err(EngineError::AnswerOutOfRange {
            index,
            answers: question.answers.len(),
        });
    }
    if session.revealed_answers.contains(&index) {
        return Ok(false);
    }
    session.revealed_answers.push(index);
    Ok(true)
}

/// Finish the question on screen for the current matchup.
///
/// Once the matchup has answered the round's required count the current question becomes
/// `None` and the caller should complete the matchup. Otherwise a fresh question is drawn
/// from the unused main pool (also `None` if the pool is exhausted).
pub fn advance_question<R: Rng + ?Sized>(
    session: &mut Session,
    rng: &mut R,
) -> Result<(), EngineError> {
    let required = session.questions_required;
    let matchup = session
        .current_matchup
        .as_mut()
        .ok_or(EngineError::NoActiveMatchup)?;
    matchup.questions_answered += 1;
    if matchup.questions_answered >= required {
        session.set_current_question(None);
        log::debug!("Matchup finished its {} question(s)", required);
        return Ok(());
    }
    let next = draw_unused(&mut session.main_pool, rng);
    if next.is_none() {
        log::warn!("Main question pool exhausted mid-matchup");
    }
    session.set_current_question(next);
    Ok(())
}

/// Show a random unused bonus question. Independent of round and matchup state.
/// Does nothing once the bonus pool is exhausted.
pub fn draw_bonus_question<'a, R: Rng + ?Sized>(
    session: &'a mut Session,
    rng: &mut R,
) -> Option<&'a Question> {
    match draw_unused(&mut session.bonus_pool, rng) {
        Some(q) => {
            log::debug!("Bonus question {} drawn", q.id);
            session.set_current_question(Some(q));
            session.current_question.as_ref()
        }
        None => {
            log::warn!("Bonus question pool exhausted");
            None
        }
    }
}
