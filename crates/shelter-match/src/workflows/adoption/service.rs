use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::workflows::guidance::{self, PostAdoptionGuidance};
use crate::workflows::ranking::{DetailedMatch, MatchRanker, RankedMatch};
use crate::workflows::records::{AdopterId, AdopterProfile, AnimalId, RecordStore};
use crate::workflows::scoring::CompatibilityScorer;
use crate::workflows::sessions::{
    AdoptionMatch, AdoptionSession, HistoryEntry, MatchStatistics, SessionId,
    SessionPersistence, SessionStore, SessionStoreError,
};

/// Result of one adoption inquiry.
#[derive(Debug, Clone, Serialize)]
pub struct InquiryOutcome {
    pub session_id: SessionId,
    pub adopter_id: AdopterId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adopter_profile: Option<AdopterProfile>,
    pub matches_found: usize,
    pub matches: Vec<RankedMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<PostAdoptionGuidance>,
    pub session: AdoptionSession,
}

impl InquiryOutcome {
    pub fn top_match(&self) -> Option<&RankedMatch> {
        self.matches.first()
    }
}

/// Inquiries run back to back by [`AdoptionService::simulate`].
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub inquiries: Vec<InquiryOutcome>,
}

impl SimulationReport {
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        for outcome in &self.inquiries {
            summary.push_str(&format!(
                "Adopter {}: {} matches found\n",
                outcome.adopter_id, outcome.matches_found
            ));
            if let Some(top) = outcome.top_match() {
                summary.push_str(&format!(
                    "  Top recommendation: {} (Score: {}/100)\n",
                    top.animal_name, top.score
                ));
            }
        }
        summary
    }
}

/// Service composing the record store, ranker, and session recorder.
pub struct AdoptionService<P> {
    records: Arc<RecordStore>,
    ranker: MatchRanker,
    sessions: SessionStore<P>,
    default_top_n: usize,
}

impl<P> AdoptionService<P>
where
    P: SessionPersistence + 'static,
{
    pub fn new(
        records: Arc<RecordStore>,
        scorer: Arc<CompatibilityScorer>,
        persistence: Arc<P>,
        default_top_n: usize,
    ) -> Self {
        Self {
            records,
            ranker: MatchRanker::new(scorer),
            sessions: SessionStore::open(persistence),
            default_top_n: default_top_n.max(1),
        }
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn default_top_n(&self) -> usize {
        self.default_top_n
    }

    pub fn find_matches(&self, adopter_id: &AdopterId, top_n: Option<usize>) -> Vec<RankedMatch> {
        let top_n = top_n.unwrap_or(self.default_top_n);
        self.ranker.find_matches(&self.records, adopter_id, top_n)
    }

    pub fn detailed_match(
        &self,
        animal_id: &AnimalId,
        adopter_id: &AdopterId,
    ) -> Option<DetailedMatch> {
        self.ranker
            .detailed_match(&self.records, animal_id, adopter_id)
    }

    /// Opens a session, ranks animals for the adopter, and records every recommendation.
    ///
    /// An unknown adopter still gets a session, with no matches.
    pub fn process_inquiry(
        &mut self,
        adopter_id: &AdopterId,
        top_n: Option<usize>,
    ) -> Result<InquiryOutcome, AdoptionServiceError> {
        let session_id = SessionId::generate();
        self.sessions
            .create_session(session_id.clone(), adopter_id.clone())?;

        let adopter_profile = self.records.adopter_profile(adopter_id);
        if adopter_profile.is_none() {
            warn!(%adopter_id, %session_id, "inquiry for unknown adopter");
        }

        let matches = self.find_matches(adopter_id, top_n);
        for ranked in &matches {
            let recommendation = AdoptionMatch::recommended(
                ranked.animal_id.clone(),
                ranked.adopter_id.clone(),
                ranked.animal_name.clone(),
                ranked.adopter_name.clone(),
                ranked.score,
                ranked.reasoning.clone(),
            );
            self.sessions.record_match(&recommendation)?;
            self.sessions.add_match(&session_id, recommendation)?;
        }

        let guidance = matches
            .first()
            .and_then(|top| self.guidance_for(&top.animal_id, adopter_id, None));

        self.sessions.persist()?;
        let session = self
            .sessions
            .session(&session_id)
            .cloned()
            .ok_or_else(|| SessionStoreError::NotFound(session_id.clone()))?;

        info!(
            %adopter_id,
            %session_id,
            matches = matches.len(),
            "adoption inquiry processed"
        );

        Ok(InquiryOutcome {
            session_id,
            adopter_id: adopter_id.clone(),
            adopter_profile,
            matches_found: matches.len(),
            matches,
            guidance,
            session,
        })
    }

    pub fn simulate(
        &mut self,
        adopter_ids: &[AdopterId],
    ) -> Result<SimulationReport, AdoptionServiceError> {
        let mut inquiries = Vec::with_capacity(adopter_ids.len());
        for adopter_id in adopter_ids {
            inquiries.push(self.process_inquiry(adopter_id, None)?);
        }
        Ok(SimulationReport { inquiries })
    }

    pub fn session(&self, session_id: &SessionId) -> Option<&AdoptionSession> {
        self.sessions.session(session_id)
    }

    /// The animal must be listed; the session must exist.
    pub fn select_animal(
        &mut self,
        session_id: &SessionId,
        animal_id: AnimalId,
    ) -> Result<AdoptionSession, AdoptionServiceError> {
        if self.records.animal(&animal_id).is_none() {
            return Err(AdoptionServiceError::UnknownAnimal(animal_id));
        }
        Ok(self.sessions.select_animal(session_id, animal_id)?)
    }

    pub fn complete_adoption(
        &mut self,
        session_id: &SessionId,
    ) -> Result<AdoptionSession, AdoptionServiceError> {
        Ok(self.sessions.complete_adoption(session_id)?)
    }

    pub fn add_feedback(
        &mut self,
        session_id: &SessionId,
        feedback: impl Into<String>,
    ) -> Result<AdoptionSession, AdoptionServiceError> {
        Ok(self.sessions.add_feedback(session_id, feedback)?)
    }

    pub fn adopter_history(&self, adopter_id: &AdopterId) -> Vec<HistoryEntry> {
        self.sessions.adopter_history(adopter_id)
    }

    pub fn match_statistics(&self) -> MatchStatistics {
        self.sessions.match_statistics()
    }

    pub fn guidance_for(
        &self,
        animal_id: &AnimalId,
        adopter_id: &AdopterId,
        concern: Option<&str>,
    ) -> Option<PostAdoptionGuidance> {
        let animal = self.records.animal(animal_id)?;
        let adopter = self.records.adopter(adopter_id)?;
        Some(guidance::post_adoption_guidance(
            &animal.name,
            &animal.breed,
            &adopter.name,
            concern,
        ))
    }

    pub fn training_tips(&self, animal_id: &AnimalId, behavior: &str) -> Option<String> {
        let animal = self.records.animal(animal_id)?;
        Some(guidance::training_tips(
            &animal.species,
            &animal.breed,
            animal.age_years,
            behavior,
        ))
    }
}

/// Error raised by the adoption service.
#[derive(Debug, thiserror::Error)]
pub enum AdoptionServiceError {
    #[error("animal {0} not found")]
    UnknownAnimal(AnimalId),
    #[error(transparent)]
    Session(#[from] SessionStoreError),
}
