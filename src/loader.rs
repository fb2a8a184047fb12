// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Startup document loading.
//!
//! Produce the one portfolio document a session starts from. Up to three
//! sources are probed:
//!
//! 1. A __seed document__ injected when the site was published. A published
//!    site carries its permanent content this way. An empty seed object marks
//!    an ordinary editing session.
//! 2. The __snapshot__ left in the snapshot slot by a previous session.
//! 3. The default document.
//!
//! Which of the first two wins is an explicit [`SeedPolicy`]. Whatever source
//! wins is merged over defaults, so the result is always complete. A source
//! that cannot be parsed is skipped as if it were absent. Loading itself never
//! fails.

use crate::{
    document::PortfolioDocument,
    merge::{merge_over_defaults, parse_partial},
    storage::SnapshotStorage,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Precedence between seed document and snapshot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedPolicy {
    /// Non-empty seed always wins, even over a newer snapshot.
    #[default]
    SeedWins,

    /// Snapshot wins when present, seed is only used for a fresh start.
    SnapshotWins,
}

/// Source that a loaded document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOrigin {
    Seed,
    Snapshot,
    Default,
}

/// Loaded document along with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub document: PortfolioDocument,
    pub origin: DocumentOrigin,
}

/// Startup document loader.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Loader {
    seed: Option<String>,
    policy: SeedPolicy,
}

impl Loader {
    /// Construct new loader without a seed document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use JSON text as seed document.
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Use target seed policy.
    pub fn with_policy(mut self, policy: SeedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Load document from the first usable source.
    #[instrument(skip(self, storage), level = "debug")]
    pub fn load(&self, storage: &impl SnapshotStorage) -> LoadedDocument {
        let probes = match self.policy {
            SeedPolicy::SeedWins => [DocumentOrigin::Seed, DocumentOrigin::Snapshot],
            SeedPolicy::SnapshotWins => [DocumentOrigin::Snapshot, DocumentOrigin::Seed],
        };

        for origin in probes {
            let document = match origin {
                DocumentOrigin::Seed => self.probe_seed(),
                DocumentOrigin::Snapshot => probe_snapshot(storage),
                DocumentOrigin::Default => None,
            };

            if let Some(document) = document {
                info!("load portfolio document from {origin:?}");
                return LoadedDocument { document, origin };
            }
        }

        info!("start from default portfolio document");
        LoadedDocument {
            document: PortfolioDocument::default(),
            origin: DocumentOrigin::Default,
        }
    }

    fn probe_seed(&self) -> Option<PortfolioDocument> {
        let seed = self.seed.as_deref().filter(|seed| !seed.trim().is_empty())?;
        let value = match parse_partial(seed) {
            Ok(value) => value,
            Err(error) => {
                warn!("ignore malformed seed document: {error}");
                return None;
            }
        };

        // INVARIANT: Empty seed object means no seed at all.
        if value.as_object().is_some_and(|object| object.is_empty()) {
            debug!("seed document is empty");
            return None;
        }

        merge_over_defaults(&value)
            .map_err(|error| warn!("ignore malformed seed document: {error}"))
            .ok()
    }
}

fn probe_snapshot(storage: &impl SnapshotStorage) -> Option<PortfolioDocument> {
    let contents = match storage.read() {
        Ok(Some(contents)) => contents,
        Ok(None) => return None,
        Err(error) => {
            debug!("cannot read snapshot: {error}");
            return None;
        }
    };

    parse_partial(&contents)
        .and_then(|value| merge_over_defaults(&value))
        .map_err(|error| debug!("discard malformed snapshot: {error}"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        document::{Hero, Meta},
        storage::MemoryStorage,
    };
    use pretty_assertions::assert_eq;
    use simple_test_case::test_case;

    const SEED: &str = r#"{ "meta": { "siteTitle": "Ann's Work" } }"#;
    const SNAPSHOT: &str = r#"{ "hero": { "name": "Ann" } }"#;

    #[test]
    fn fresh_start_yields_default() {
        let result = Loader::new().load(&MemoryStorage::new());
        assert_eq!(result.origin, DocumentOrigin::Default);
        assert_eq!(result.document, PortfolioDocument::default());
    }

    #[test]
    fn legacy_snapshot_is_backfilled() {
        let result = Loader::new().load(&MemoryStorage::with_contents(SNAPSHOT));

        let expect = PortfolioDocument {
            hero: Hero {
                name: "Ann".into(),
                ..Hero::default()
            },
            ..PortfolioDocument::default()
        };
        assert_eq!(result.origin, DocumentOrigin::Snapshot);
        assert_eq!(result.document, expect);
    }

    #[test_case("{ hero: "; "not json")]
    #[test_case("[1, 2, 3]"; "not an object")]
    #[test_case(r#"{ "projects": 7 }"#; "wrong shape")]
    #[test]
    fn malformed_snapshot_falls_back_to_default(snapshot: &str) {
        let result = Loader::new().load(&MemoryStorage::with_contents(snapshot));
        pretty_assertions::assert_eq!(result.origin, DocumentOrigin::Default);
        pretty_assertions::assert_eq!(result.document, PortfolioDocument::default());
    }

    #[test]
    fn seed_wins_over_snapshot_by_default() {
        let storage = MemoryStorage::with_contents(SNAPSHOT);
        let result = Loader::new().with_seed(SEED).load(&storage);

        let expect = PortfolioDocument {
            meta: Meta {
                site_title: "Ann's Work".into(),
                ..Meta::default()
            },
            ..PortfolioDocument::default()
        };
        assert_eq!(result.origin, DocumentOrigin::Seed);
        assert_eq!(result.document, expect);
    }

    #[test]
    fn snapshot_wins_when_asked_to() {
        let storage = MemoryStorage::with_contents(SNAPSHOT);
        let loader = Loader::new()
            .with_seed(SEED)
            .with_policy(SeedPolicy::SnapshotWins);

        let result = loader.load(&storage);
        assert_eq!(result.origin, DocumentOrigin::Snapshot);
        assert_eq!(result.document.hero.name, "Ann");

        // INVARIANT: Seed still covers a fresh start.
        let result = loader.load(&MemoryStorage::new());
        assert_eq!(result.origin, DocumentOrigin::Seed);
    }

    #[test_case("{}"; "empty object")]
    #[test_case("   "; "blank text")]
    #[test_case("{ broken"; "malformed")]
    #[test]
    fn unusable_seed_is_skipped(seed: &str) {
        let storage = MemoryStorage::with_contents(SNAPSHOT);
        let result = Loader::new().with_seed(seed).load(&storage);
        pretty_assertions::assert_eq!(result.origin, DocumentOrigin::Snapshot);
    }
}
