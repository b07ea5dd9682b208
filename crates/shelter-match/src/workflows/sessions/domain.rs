use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::records::{AdopterId, AnimalId};

/// Identifier for one adoption inquiry session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Lifecycle of a recommendation inside a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Recommended,
    Accepted,
    Rejected,
    Completed,
}

/// A recommendation shown to the adopter during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionMatch {
    pub animal_id: AnimalId,
    pub adopter_id: AdopterId,
    pub animal_name: String,
    pub adopter_name: String,
    pub score: u8,
    #[serde(default)]
    pub reasoning: String,
    pub timestamp: DateTime<Utc>,
    pub status: MatchStatus,
    #[serde(default)]
    pub notes: String,
}

impl AdoptionMatch {
    pub fn recommended(
        animal_id: AnimalId,
        adopter_id: AdopterId,
        animal_name: impl Into<String>,
        adopter_name: impl Into<String>,
        score: u8,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            animal_id,
            adopter_id,
            animal_name: animal_name.into(),
            adopter_name: adopter_name.into(),
            score,
            reasoning: reasoning.into(),
            timestamp: Utc::now(),
            status: MatchStatus::Recommended,
            notes: String::new(),
        }
    }
}

/// Keys written into [`AdoptionSession::session_state`].
pub const STATE_SELECTION_TIME: &str = "selection_time";
pub const STATE_STATUS: &str = "status";
pub const STATE_FEEDBACK_TIME: &str = "feedback_time";
pub const STATUS_COMPLETED: &str = "completed";

/// One adopter's journey from inquiry to (possibly) adoption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionSession {
    pub session_id: SessionId,
    pub adopter_id: AdopterId,
    pub created_at: DateTime<Utc>,
    pub matches: Vec<AdoptionMatch>,
    pub selected_animal: Option<AnimalId>,
    pub adoption_date: Option<DateTime<Utc>>,
    pub feedback: String,
    pub session_state: BTreeMap<String, String>,
}

impl AdoptionSession {
    pub fn new(session_id: SessionId, adopter_id: AdopterId) -> Self {
        Self {
            session_id,
            adopter_id,
            created_at: Utc::now(),
            matches: Vec::new(),
            selected_animal: None,
            adoption_date: None,
            feedback: String::new(),
            session_state: BTreeMap::new(),
        }
    }

    /// Appends without deduplication.
    pub fn add_match(&mut self, recommendation: AdoptionMatch) {
        self.matches.push(recommendation);
    }

    pub fn select_animal(&mut self, animal_id: AnimalId) {
        self.selected_animal = Some(animal_id);
        self.session_state
            .insert(STATE_SELECTION_TIME.to_string(), Utc::now().to_rfc3339());
    }

    pub fn complete_adoption(&mut self) {
        self.adoption_date = Some(Utc::now());
        self.session_state
            .insert(STATE_STATUS.to_string(), STATUS_COMPLETED.to_string());
    }

    pub fn add_feedback(&mut self, feedback: impl Into<String>) {
        self.feedback = feedback.into();
        self.session_state
            .insert(STATE_FEEDBACK_TIME.to_string(), Utc::now().to_rfc3339());
    }

    pub fn is_completed(&self) -> bool {
        self.session_state.get(STATE_STATUS).map(String::as_str) == Some(STATUS_COMPLETED)
    }

    /// Human-readable recap for staff.
    pub fn summary(&self) -> String {
        let selected = self
            .selected_animal
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "None yet".to_string());
        let status = self
            .session_state
            .get(STATE_STATUS)
            .map(String::as_str)
            .unwrap_or("In Progress");
        let feedback = if self.feedback.is_empty() {
            "No feedback yet"
        } else {
            self.feedback.as_str()
        };

        format!(
            "SESSION SUMMARY\n{rule}\nSession ID: {id}\nAdopter ID: {adopter}\nCreated: {created}\n\
Matches Explored: {matches}\nSelected Animal: {selected}\nStatus: {status}\nFeedback: {feedback}\n",
            rule = "=".repeat(50),
            id = self.session_id,
            adopter = self.adopter_id,
            created = self.created_at.format("%Y-%m-%d %H:%M"),
            matches = self.matches.len(),
        )
    }
}

/// Entry in the flat, append-only match history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub animal_id: AnimalId,
    pub adopter_id: AdopterId,
    pub animal_name: String,
    pub score: u8,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate view over the history log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchStatistics {
    pub total_matches: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
    pub high_matches: usize,
    pub total_adopters: usize,
}
