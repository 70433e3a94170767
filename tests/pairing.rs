//! Integration tests for pairing, question draws and matchup completion.

use quiz_night::{
    advance_question, all_pairs_completed_for_round, available_pair_candidates, complete_match,
    draw_bonus_question, initialize_teams, reveal_answer, select_pair, select_teams, start_game,
    Answer, EngineError, GamePhase, Question, Session, TeamId,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn pool(prefix: &str, n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| {
            Question::new(
                format!("{prefix}{i}"),
                format!("Prompt {i}"),
                vec![Answer::new("A", 30), Answer::new("B", 20), Answer::new("C", 10)],
            )
        })
        .collect()
}

fn started_session(teams: usize, questions: usize) -> Session {
    let mut s = Session::new(pool("q", questions), pool("b", 2));
    let names: Vec<String> = (0..teams).map(|i| format!("T{i}")).collect();
    initialize_teams(&mut s, &names).unwrap();
    start_game(&mut s).unwrap();
    s
}

fn ids(s: &Session) -> Vec<TeamId> {
    s.teams.iter().map(|t| t.id).collect()
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn select_pair_draws_one_unused_question() {
    let mut s = started_session(8, 5);
    let t = ids(&s);
    select_pair(&mut s, t[0], t[1], &mut rng()).unwrap();

    let m = s.current_matchup.unwrap();
    assert_eq!((m.team_a, m.team_b), (t[0], t[1]));
    assert_eq!(m.questions_answered, 0);
    let q = s.current_question.clone().unwrap();
    assert_eq!(s.main_pool.iter().filter(|q| q.used).count(), 1);
    assert!(s.main_pool.iter().find(|p| p.id == q.id).unwrap().used);
}

#[test]
fn select_pair_rejects_completed_team_without_side_effects() {
    let mut s = started_session(8, 5);
    let t = ids(&s);
    let mut r = rng();
    select_pair(&mut s, t[0], t[1], &mut r).unwrap();
    complete_match(&mut s).unwrap();
    let pool_before = s.main_pool.clone();

    let err = select_pair(&mut s, t[2], t[1], &mut r).unwrap_err();
    assert_eq!(err, EngineError::TeamAlreadyCompeted(t[1]));
    assert!(s.current_matchup.is_none());
    assert!(s.current_question.is_none());
    assert_eq!(s.main_pool, pool_before);
}

#[test]
fn select_pair_validates_ids() {
    let mut s = started_session(8, 5);
    let t = ids(&s);
    let stranger = uuid::Uuid::new_v4();
    let mut r = rng();
    assert_eq!(
        select_pair(&mut s, t[0], t[0], &mut r),
        Err(EngineError::SameTeamTwice)
    );
    assert_eq!(
        select_pair(&mut s, t[0], stranger, &mut r),
        Err(EngineError::TeamNotFound(stranger))
    );
    assert_eq!(
        select_teams(&mut s, &t[0..3], &mut r),
        Err(EngineError::WrongNumberOfTeams { selected: 3 })
    );
    assert_eq!(
        select_teams(&mut s, &t[0..1], &mut r),
        Err(EngineError::WrongNumberOfTeams { selected: 1 })
    );
    assert!(s.main_pool.iter().all(|q| !q.used));
    select_teams(&mut s, &t[0..2], &mut r).unwrap();
    assert!(s.current_matchup.is_some());
}

#[test]
fn select_pair_requires_a_playing_phase() {
    let mut s = Session::new(pool("q", 3), Vec::new());
    let names: Vec<String> = (0..8).map(|i| format!("T{i}")).collect();
    initialize_teams(&mut s, &names).unwrap();
    let t = ids(&s);
    assert_eq!(
        select_pair(&mut s, t[0], t[1], &mut rng()),
        Err(EngineError::InvalidState)
    );
}

#[test]
fn draws_never_repeat_and_exhaust_to_none() {
    let mut s = started_session(8, 3);
    let t = ids(&s);
    let mut r = rng();
    let mut drawn = HashSet::new();
    for pair in t.chunks(2).take(3) {
        select_pair(&mut s, pair[0], pair[1], &mut r).unwrap();
        drawn.insert(s.current_question.clone().unwrap().id);
        complete_match(&mut s).unwrap();
    }
    assert_eq!(drawn.len(), 3);
    assert!(s.main_pool.iter().all(|q| q.used));

    select_pair(&mut s, t[6], t[7], &mut r).unwrap();
    assert!(s.current_question.is_none());
    assert!(s.current_matchup.is_some());
}

#[test]
fn complete_match_marks_both_teams_once() {
    let mut s = started_session(8, 5);
    let t = ids(&s);
    select_pair(&mut s, t[0], t[1], &mut rng()).unwrap();
    complete_match(&mut s).unwrap();
    assert_eq!(s.completed, vec![t[0], t[1]]);
    assert!(s.current_matchup.is_none());
    assert!(s.current_question.is_none());
    assert_eq!(s.questions_answered(), 0);
    assert_eq!(complete_match(&mut s), Err(EngineError::NoActiveMatchup));
    assert_eq!(s.completed.len(), 2);
}

#[test]
fn candidates_exclude_completed_teams() {
    let mut s = started_session(8, 5);
    let t = ids(&s);
    select_pair(&mut s, t[2], t[5], &mut rng()).unwrap();
    complete_match(&mut s).unwrap();
    let candidates: Vec<TeamId> = available_pair_candidates(&s).iter().map(|t| t.id).collect();
    assert_eq!(candidates, vec![t[0], t[1], t[3], t[4], t[6], t[7]]);
}

#[test]
fn odd_team_count_leaves_one_team_unpaired() {
    let mut s = started_session(9, 10);
    let t = ids(&s);
    let mut r = rng();
    for pair in t.chunks_exact(2) {
        assert!(!all_pairs_completed_for_round(&s));
        select_pair(&mut s, pair[0], pair[1], &mut r).unwrap();
        complete_match(&mut s).unwrap();
    }
    assert_eq!(s.completed.len(), 8);
    assert!(all_pairs_completed_for_round(&s));
    assert_eq!(available_pair_candidates(&s).len(), 1);
}

#[test]
fn round_one_matchup_ends_after_one_question() {
    let mut s = started_session(8, 5);
    let t = ids(&s);
    let mut r = rng();
    select_pair(&mut s, t[0], t[1], &mut r).unwrap();
    assert_eq!(s.question_number(), 1);
    advance_question(&mut s, &mut r).unwrap();
    assert!(s.current_question.is_none());
    assert_eq!(s.questions_answered(), 1);
    assert_eq!(s.main_pool.iter().filter(|q| q.used).count(), 1);
}

#[test]
fn later_rounds_draw_a_fresh_question_per_step() {
    let mut s = started_session(8, 5);
    s.round = 2;
    s.phase = GamePhase::Round2;
    s.questions_required = 2;
    let t = ids(&s);
    let mut r = rng();
    select_pair(&mut s, t[0], t[1], &mut r).unwrap();
    let first = s.current_question.clone().unwrap().id;

    advance_question(&mut s, &mut r).unwrap();
    let second = s.current_question.clone().unwrap().id;
    assert_ne!(first, second);
    assert_eq!(s.question_number(), 2);

    advance_question(&mut s, &mut r).unwrap();
    assert!(s.current_question.is_none());
    assert_eq!(s.main_pool.iter().filter(|q| q.used).count(), 2);
}

#[test]
fn advance_question_needs_a_matchup() {
    let mut s = started_session(8, 5);
    assert_eq!(
        advance_question(&mut s, &mut rng()),
        Err(EngineError::NoActiveMatchup)
    );
}

#[test]
fn reveal_is_idempotent_and_local_to_question() {
    let mut s = started_session(8, 5);
    let t = ids(&s);
    let mut r = rng();
    s.round = 2;
    s.phase = GamePhase::Round2;
    s.questions_required = 2;
    select_pair(&mut s, t[0], t[1], &mut r).unwrap();
    let pool_before = s.main_pool.clone();

    assert_eq!(reveal_answer(&mut s, 1), Ok(true));
    assert_eq!(reveal_answer(&mut s, 1), Ok(false));
    assert_eq!(s.revealed_answers, vec![1]);
    assert_eq!(
        reveal_answer(&mut s, 3),
        Err(EngineError::AnswerOutOfRange { index: 3, answers: 3 })
    );
    assert_eq!(s.main_pool, pool_before);
    assert!(s.teams.iter().all(|t| t.score == 0));

    advance_question(&mut s, &mut r).unwrap();
    assert!(s.revealed_answers.is_empty());
}

#[test]
fn bonus_draw_ignores_round_state_and_stops_when_exhausted() {
    let mut s = Session::new(pool("q", 3), pool("b", 2));
    let mut r = rng();
    let first = draw_bonus_question(&mut s, &mut r).unwrap().id.clone();
    let second = draw_bonus_question(&mut s, &mut r).unwrap().id.clone();
    assert_ne!(first, second);
    assert!(s.bonus_pool.iter().all(|q| q.used));
    assert!(s.main_pool.iter().all(|q| !q.used));

    assert!(draw_bonus_question(&mut s, &mut r).is_none());
    assert_eq!(s.current_question.as_ref().map(|q| q.id.clone()), Some(second));
}
