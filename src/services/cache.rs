use std::sync::atomic::{AtomicU64, Ordering};

use sha2::{Digest, Sha256};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheScope {
    Questions,
    QuestionStats,
    Units,
}

impl CacheScope {
    pub const ALL: [CacheScope; 3] = [
        CacheScope::Questions,
        CacheScope::QuestionStats,
        CacheScope::Units,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheScope::Questions => "questions",
            CacheScope::QuestionStats => "stats",
            CacheScope::Units => "units",
        }
    }
}

/// Receives a notification after every write to the question store so that
/// whatever caches its read side can drop stale entries.
pub trait CacheInvalidator: Send + Sync {
    fn invalidate(&self, scopes: &[CacheScope]);
}

/// Per-scope count of writes seen by this process, reported on `/health`.
#[derive(Debug, Default)]
pub struct RevisionInvalidator {
    questions: AtomicU64,
    stats: AtomicU64,
    units: AtomicU64,
}

impl RevisionInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, scope: CacheScope) -> &AtomicU64 {
        match scope {
            CacheScope::Questions => &self.questions,
            CacheScope::QuestionStats => &self.stats,
            CacheScope::Units => &self.units,
        }
    }

    pub fn revision(&self, scope: CacheScope) -> u64 {
        self.counter(scope).load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> [(CacheScope, u64); 3] {
        CacheScope::ALL.map(|scope| (scope, self.revision(scope)))
    }
}

/// Weak validator for one serialised representation.
///
/// Derived from the body bytes alone: equal content carries the same tag on
/// every instance and across restarts, and any change to the stored data
/// changes it, whoever wrote it.
pub fn content_etag(scope: CacheScope, body: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body);
    let digest = format!("{:x}", hasher.finalize());
    format!("W/\"{}-{}\"", scope.as_str(), &digest[..32])
}

impl CacheInvalidator for RevisionInvalidator {
    fn invalidate(&self, scopes: &[CacheScope]) {
        for scope in scopes {
            let revision = self.counter(*scope).fetch_add(1, Ordering::AcqRel) + 1;
            log::debug!("Invalidated '{}' cache, now at revision {}", scope.as_str(), revision);
        }
    }
}
