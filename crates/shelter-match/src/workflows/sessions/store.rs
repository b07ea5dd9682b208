use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{AdoptionMatch, AdoptionSession, HistoryEntry, MatchStatistics, SessionId};
use super::persistence::{PersistenceError, SessionDocument, SessionPersistence};
use crate::workflows::records::{AdopterId, AnimalId};

/// History entries at or above this score count as high matches.
pub const HIGH_MATCH_THRESHOLD: u8 = 80;

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session {0} not found")]
    NotFound(SessionId),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Sessions plus the flat match history, persisted as one document after every change.
///
/// Single writer: every mutating call takes `&mut self`, and callers sharing a store across
/// tasks must serialise access themselves. Sessions live only for the current run; the history
/// log is restored from the previous document on open. Sessions are kept in creation order.
pub struct SessionStore<P> {
    persistence: Arc<P>,
    sessions: Vec<AdoptionSession>,
    match_history: Vec<HistoryEntry>,
}

impl<P> SessionStore<P>
where
    P: SessionPersistence + 'static,
{
    pub fn open(persistence: Arc<P>) -> Self {
        let match_history = match persistence.load_history() {
            Ok(history) => history,
            Err(err) => {
                warn!(error = %err, "could not restore match history, starting fresh");
                Vec::new()
            }
        };
        info!(entries = match_history.len(), "match history restored");

        Self {
            persistence,
            sessions: Vec::new(),
            match_history,
        }
    }

    /// Starts a session, replacing any existing one with the same id in place.
    pub fn create_session(
        &mut self,
        session_id: SessionId,
        adopter_id: AdopterId,
    ) -> Result<AdoptionSession, SessionStoreError> {
        let session = AdoptionSession::new(session_id.clone(), adopter_id);
        match self.position(&session_id) {
            Some(index) => {
                warn!(%session_id, "session id reused, previous session replaced");
                self.sessions[index] = session.clone();
            }
            None => self.sessions.push(session.clone()),
        }
        self.persist()?;
        info!(%session_id, "session created");
        Ok(session)
    }

    pub fn session(&self, session_id: &SessionId) -> Option<&AdoptionSession> {
        let session = self
            .sessions
            .iter()
            .find(|session| &session.session_id == session_id);
        if session.is_none() {
            warn!(%session_id, "session not found");
        }
        session
    }

    pub fn sessions(&self) -> impl Iterator<Item = &AdoptionSession> {
        self.sessions.iter()
    }

    pub fn add_match(
        &mut self,
        session_id: &SessionId,
        recommendation: AdoptionMatch,
    ) -> Result<AdoptionSession, SessionStoreError> {
        self.update(session_id, |session| session.add_match(recommendation))
    }

    pub fn select_animal(
        &mut self,
        session_id: &SessionId,
        animal_id: AnimalId,
    ) -> Result<AdoptionSession, SessionStoreError> {
        self.update(session_id, |session| session.select_animal(animal_id))
    }

    pub fn complete_adoption(
        &mut self,
        session_id: &SessionId,
    ) -> Result<AdoptionSession, SessionStoreError> {
        self.update(session_id, AdoptionSession::complete_adoption)
    }

    pub fn add_feedback(
        &mut self,
        session_id: &SessionId,
        feedback: impl Into<String>,
    ) -> Result<AdoptionSession, SessionStoreError> {
        let feedback = feedback.into();
        self.update(session_id, |session| session.add_feedback(feedback))
    }

    /// Appends the recommendation to the history log, stamped with the current time.
    pub fn record_match(
        &mut self,
        recommendation: &AdoptionMatch,
    ) -> Result<HistoryEntry, SessionStoreError> {
        let entry = HistoryEntry {
            animal_id: recommendation.animal_id.clone(),
            adopter_id: recommendation.adopter_id.clone(),
            animal_name: recommendation.animal_name.clone(),
            score: recommendation.score,
            timestamp: Utc::now(),
        };
        self.match_history.push(entry.clone());
        self.persist()?;
        Ok(entry)
    }

    pub fn adopter_history(&self, adopter_id: &AdopterId) -> Vec<HistoryEntry> {
        self.match_history
            .iter()
            .filter(|entry| &entry.adopter_id == adopter_id)
            .cloned()
            .collect()
    }

    pub fn match_history(&self) -> &[HistoryEntry] {
        &self.match_history
    }

    pub fn match_statistics(&self) -> MatchStatistics {
        let total_matches = self.match_history.len();
        if total_matches == 0 {
            return MatchStatistics {
                total_matches: 0,
                average_score: None,
                high_matches: 0,
                total_adopters: 0,
            };
        }

        let score_sum: u64 = self
            .match_history
            .iter()
            .map(|entry| u64::from(entry.score))
            .sum();
        let high_matches = self
            .match_history
            .iter()
            .filter(|entry| entry.score >= HIGH_MATCH_THRESHOLD)
            .count();
        let total_adopters = self
            .match_history
            .iter()
            .map(|entry| &entry.adopter_id)
            .collect::<HashSet<_>>()
            .len();

        MatchStatistics {
            total_matches,
            average_score: Some(score_sum as f64 / total_matches as f64),
            high_matches,
            total_adopters,
        }
    }

    /// Rewrites the whole document. Last write wins.
    pub fn persist(&self) -> Result<(), SessionStoreError> {
        let document = SessionDocument {
            last_saved: Utc::now(),
            sessions: self.sessions.clone(),
            match_history: self.match_history.clone(),
        };
        self.persistence.save(&document)?;
        Ok(())
    }

    fn update(
        &mut self,
        session_id: &SessionId,
        apply: impl FnOnce(&mut AdoptionSession),
    ) -> Result<AdoptionSession, SessionStoreError> {
        let index = self
            .position(session_id)
            .ok_or_else(|| SessionStoreError::NotFound(session_id.clone()))?;
        let session = &mut self.sessions[index];
        apply(session);
        let snapshot = session.clone();
        self.persist()?;
        Ok(snapshot)
    }

    fn position(&self, session_id: &SessionId) -> Option<usize> {
        self.sessions
            .iter()
            .position(|session| &session.session_id == session_id)
    }
}
