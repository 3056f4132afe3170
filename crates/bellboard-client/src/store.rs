//! Ranked leaderboard cache.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{info, warn};

use bellboard_core::{FetchError, LeaderboardEntry, LeaderboardSource, rank};

/// A full ranking and when it was fetched.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardSnapshot {
    /// Entries sorted by score, highest first.
    pub entries: Arc<Vec<LeaderboardEntry>>,
    /// Time of the refresh that produced `entries`; `None` before the first one.
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Fetches, scores and ranks historical submissions.
///
/// Cheap to clone; clones share the same cached ranking. Each successful
/// refresh replaces the whole ranking at once, and a failed refresh leaves the
/// previous one in place.
#[derive(Clone)]
pub struct LeaderboardStore {
    source: Arc<dyn LeaderboardSource>,
    snapshot: Arc<RwLock<LeaderboardSnapshot>>,
}

impl std::fmt::Debug for LeaderboardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaderboardStore").finish_non_exhaustive()
    }
}

impl LeaderboardStore {
    /// Create an empty store reading from `source`.
    pub fn new(source: Arc<dyn LeaderboardSource>) -> Self {
        Self {
            source,
            snapshot: Arc::new(RwLock::new(LeaderboardSnapshot::default())),
        }
    }

    /// Fetch the listing, rank it and replace the cached ranking.
    pub async fn refresh(&self) -> Result<Arc<Vec<LeaderboardEntry>>, FetchError> {
        let records = match self.source.list().await {
            Ok(records) => records,
            Err(err) => {
                warn!("Leaderboard refresh failed, keeping previous entries: {err}");
                return Err(err);
            }
        };

        let ranked = Arc::new(rank(records));
        {
            let mut snapshot = self.snapshot.write().await;
            snapshot.entries = Arc::clone(&ranked);
            snapshot.refreshed_at = Some(Utc::now());
        }
        info!("Leaderboard refreshed: {} entries", ranked.len());
        Ok(ranked)
    }

    /// The current ranking.
    pub async fn entries(&self) -> Arc<Vec<LeaderboardEntry>> {
        Arc::clone(&self.snapshot.read().await.entries)
    }

    /// The current ranking with its refresh time.
    pub async fn snapshot(&self) -> LeaderboardSnapshot {
        self.snapshot.read().await.clone()
    }
}
