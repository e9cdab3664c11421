//! In-memory tournament store used by the web host.
//!
//! Engine operations are pure; the store serializes them per tournament by running them under its
//! write lock, and an optional expected version rejects submissions computed from a stale value.

use crate::models::{Tournament, TournamentError, TournamentId};
use log::info;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    NotFound(TournamentId),
    /// Caller's version is not the stored one.
    VersionConflict { expected: u64, actual: u64 },
    LockPoisoned,
    Tournament(TournamentError),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(_) => write!(f, "No tournament"),
            StoreError::VersionConflict { expected, actual } => write!(
                f,
                "Tournament changed since it was loaded (version {}, now {})",
                expected, actual
            ),
            StoreError::LockPoisoned => write!(f, "lock error"),
            StoreError::Tournament(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<TournamentError> for StoreError {
    fn from(e: TournamentError) -> Self {
        StoreError::Tournament(e)
    }
}

/// A tournament together with its store version.
#[derive(Clone, Debug)]
pub struct Versioned {
    pub tournament: Tournament,
    pub version: u64,
}

/// Result of a successful update: the value before and after.
#[derive(Clone, Debug)]
pub struct Transition {
    pub previous: Tournament,
    pub current: Tournament,
    pub version: u64,
}

/// Per-tournament entry: tournament data, version, last activity time (for auto-cleanup).
struct Entry {
    tournament: Tournament,
    version: u64,
    last_activity: Instant,
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<TournamentId, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly generated tournament at version 1.
    pub fn insert(&self, tournament: Tournament) -> Result<Versioned, StoreError> {
        let mut g = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        g.insert(
            tournament.id,
            Entry {
                tournament: tournament.clone(),
                version: 1,
                last_activity: Instant::now(),
            },
        );
        Ok(Versioned {
            tournament,
            version: 1,
        })
    }

    /// Get a tournament by id. Touching it refreshes last_activity.
    pub fn get(&self, id: TournamentId) -> Result<Versioned, StoreError> {
        let mut g = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        let entry = g.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        entry.last_activity = Instant::now();
        Ok(Versioned {
            tournament: entry.tournament.clone(),
            version: entry.version,
        })
    }

    /// All tournaments, newest first.
    pub fn list(&self) -> Result<Vec<Tournament>, StoreError> {
        let g = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut all: Vec<Tournament> = g.values().map(|e| e.tournament.clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let g = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(g.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Run `op` on the stored tournament and keep its result.
    ///
    /// If `expected_version` is given it must equal the stored version. The stored value and
    /// version change only when `op` succeeds.
    pub fn update<F>(
        &self,
        id: TournamentId,
        expected_version: Option<u64>,
        op: F,
    ) -> Result<Transition, StoreError>
    where
        F: FnOnce(&Tournament) -> Result<Tournament, TournamentError>,
    {
        let mut g = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        let entry = g.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        entry.last_activity = Instant::now();
        if let Some(expected) = expected_version {
            if expected != entry.version {
                return Err(StoreError::VersionConflict {
                    expected,
                    actual: entry.version,
                });
            }
        }
        let current = op(&entry.tournament)?;
        let previous = std::mem::replace(&mut entry.tournament, current.clone());
        entry.version += 1;
        Ok(Transition {
            previous,
            current,
            version: entry.version,
        })
    }

    /// Remove tournaments not accessed within `timeout`. Returns how many were removed.
    pub fn evict_inactive(&self, timeout: Duration) -> Result<usize, StoreError> {
        let mut g = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        let before = g.len();
        g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
        let removed = before - g.len();
        if removed > 0 {
            info!("Cleaned up {} inactive tournament(s)", removed);
        }
        Ok(removed)
    }
}
