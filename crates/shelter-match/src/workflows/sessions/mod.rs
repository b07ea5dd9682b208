//! Adoption sessions and the match history log.

pub mod domain;
pub mod persistence;
mod store;

pub use domain::{
    AdoptionMatch, AdoptionSession, HistoryEntry, MatchStatistics, MatchStatus, SessionId,
};
pub use persistence::{
    InMemorySessionPersistence, JsonFileSessionPersistence, PersistenceError, SessionDocument,
    SessionPersistence,
};
pub use store::{SessionStore, SessionStoreError, HIGH_MATCH_THRESHOLD};
