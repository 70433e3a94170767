//! The game controller: owns the session, the durable store and the random source.
//!
//! Every command runs the matching function from [`crate::logic`] and, when teams, phase,
//! round or advancing ids may have changed, mirrors them to the store (teams entry first,
//! then the session entry). Store failures are logged and otherwise ignored.

use crate::logic;
use crate::models::{EngineError, GamePhase, Question, Session, Team, TeamId};
use crate::store::{self, KeyValueStore, SessionRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct Engine<S, R = StdRng> {
    session: Session,
    store: S,
    rng: R,
}

impl<S: KeyValueStore> Engine<S, StdRng> {
    /// Fresh game with an entropy-seeded random source. Saved state is ignored.
    pub fn new(store: S, main_pool: Vec<Question>, bonus_pool: Vec<Question>) -> Self {
        Self::with_rng(store, Session::new(main_pool, bonus_pool), StdRng::from_entropy())
    }

    /// Like [`Engine::new`] but picks up an interrupted game from the store, if any.
    pub fn resume(store: S, main_pool: Vec<Question>, bonus_pool: Vec<Question>) -> Self {
        Self::resume_with_rng(store, Session::new(main_pool, bonus_pool), StdRng::from_entropy())
    }
}

impl<S: KeyValueStore, R: Rng> Engine<S, R> {
    /// Wrap an existing session with a caller-provided random source (seed it for tests).
    pub fn with_rng(store: S, session: Session, rng: R) -> Self {
        Self { session, store, rng }
    }

    /// Restore teams, phase, round and advancing ids onto `session` from the store.
    ///
    /// A missing or unreadable entry means "no prior session": the affected part keeps its
    /// default. A session entry is only applied together with a teams entry.
    pub fn resume_with_rng(store: S, mut session: Session, rng: R) -> Self {
        restore(&mut session, &store);
        Self { session, store, rng }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn initialize_teams<N: AsRef<str>>(&mut self, names: &[N]) -> Result<(), EngineError> {
        logic::initialize_teams(&mut self.session, names)?;
        self.persist();
        Ok(())
    }

    pub fn start_game(&mut self) -> Result<(), EngineError> {
        logic::start_game(&mut self.session)?;
        self.persist();
        Ok(())
    }

    pub fn select_pair(&mut self, team_a: TeamId, team_b: TeamId) -> Result<(), EngineError> {
        logic::select_pair(&mut self.session, team_a, team_b, &mut self.rng)
    }

    pub fn select_teams(&mut self, team_ids: &[TeamId]) -> Result<(), EngineError> {
        logic::select_teams(&mut self.session, team_ids, &mut self.rng)
    }

    pub fn reveal_answer(&mut self, index: usize) -> Result<bool, EngineError> {
        logic::reveal_answer(&mut self.session, index)
    }

    pub fn award_points(&mut self, team_id: TeamId, points: u32) -> Result<(), EngineError> {
        logic::award_points(&mut self.session, team_id, points)?;
        self.persist();
        Ok(())
    }

    /// Give an answer of the current question to a team; see [`logic::assign_answer`].
    pub fn assign_answer(&mut self, index: usize, team_id: TeamId) -> Result<bool, EngineError> {
        let changed = logic::assign_answer(&mut self.session, index, team_id)?;
        if changed {
            self.persist();
        }
        Ok(changed)
    }

    pub fn advance_question(&mut self) -> Result<(), EngineError> {
        logic::advance_question(&mut self.session, &mut self.rng)
    }

    pub fn complete_match(&mut self) -> Result<(), EngineError> {
        logic::complete_match(&mut self.session)
    }

    pub fn available_pair_candidates(&self) -> Vec<&Team> {
        logic::available_pair_candidates(&self.session)
    }

    pub fn all_pairs_completed_for_round(&self) -> bool {
        logic::all_pairs_completed_for_round(&self.session)
    }

    pub fn compute_round_results(&mut self) -> Result<Vec<Team>, EngineError> {
        let standings = logic::compute_round_results(&mut self.session)?;
        self.persist();
        Ok(standings)
    }

    /// Advance to the next round. Falls back to the stored advancing ids when the in-memory
    /// set is empty; on [`EngineError::NoAdvancingTeams`] nothing changes.
    pub fn advance_round(&mut self) -> Result<(), EngineError> {
        let fallback = if self.session.advancing.is_empty() {
            match store::load_session(&self.store) {
                Ok(Some(record)) => record.advancing_team_ids,
                Ok(None) => Vec::new(),
                Err(e) => {
                    log::warn!("Could not read stored advancing teams: {}", e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        logic::advance_round(&mut self.session, &fallback)?;
        self.persist();
        Ok(())
    }

    pub fn draw_bonus_question(&mut self) -> Option<&Question> {
        logic::draw_bonus_question(&mut self.session, &mut self.rng)
    }

    pub fn start_timer(&mut self) {
        self.session.timer.start();
    }

    pub fn stop_timer(&mut self) {
        self.session.timer.stop();
    }

    pub fn reset_timer(&mut self) {
        self.session.timer.reset();
    }

    /// One second elapsed. Returns whether the timer is still running.
    pub fn tick_timer(&mut self) -> bool {
        self.session.timer.tick()
    }

    /// Forget the saved game and go back to an empty setup. Question pools are kept.
    pub fn discard_saved_game(&mut self) {
        if let Err(e) = store::clear(&mut self.store) {
            log::warn!("Could not clear saved game: {}", e);
        }
        let rules = self.session.rules.clone();
        let main_pool = std::mem::take(&mut self.session.main_pool);
        let bonus_pool = std::mem::take(&mut self.session.bonus_pool);
        self.session = Session::with_rules(rules, main_pool, bonus_pool);
        log::info!("Saved game discarded");
    }

    fn persist(&mut self) {
        if let Err(e) = store::save_teams(&mut self.store, &self.session.teams) {
            log::warn!("Could not save teams: {}", e);
        }
        let record = SessionRecord {
            game_state: self.session.phase,
            current_round: self.session.round,
            advancing_team_ids: self.session.advancing.clone(),
        };
        if let Err(e) = store::save_session(&mut self.store, &record) {
            log::warn!("Could not save session: {}", e);
        }
    }
}

fn restore<S: KeyValueStore + ?Sized>(session: &mut Session, store: &S) {
    let teams = match store::load_teams(store) {
        Ok(Some(teams)) => teams,
        Ok(None) => return,
        Err(e) => {
            log::warn!("Ignoring saved teams: {}", e);
            return;
        }
    };
    session.teams = teams;

    let record = match store::load_session(store) {
        Ok(Some(record)) => record,
        Ok(None) => return,
        Err(e) => {
            log::warn!("Ignoring saved session: {}", e);
            return;
        }
    };
    if GamePhase::for_round(record.current_round) != record.game_state {
        log::warn!(
            "Ignoring saved session: round {} does not match phase {:?}",
            record.current_round,
            record.game_state
        );
        return;
    }
    session.round = record.current_round;
    session.phase = record.game_state;
    session.questions_required = session.rules.questions_required(record.current_round);
    session.advancing = record
        .advancing_team_ids
        .into_iter()
        .filter(|id| session.teams.iter().any(|t| t.id == *id))
        .collect();
    log::info!(
        "Resumed {:?} (round {}) with {} teams",
        session.phase,
        session.round,
        session.teams.len()
    );
}
