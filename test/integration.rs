// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use crate::SiteFixture;

use folio::{
    document::PortfolioDocument,
    exchange::{export_document, ImportMode},
    loader::DocumentOrigin,
    patch::{FooterPatch, HeroPatch},
    publish::{Git2Publisher, PublishRequest, Publisher},
    settings::PublishSettings,
    FileStorage, Loader, SeedPolicy, Settings, SnapshotStorage, Store,
};

use anyhow::Result;
use indoc::indoc;
use pretty_assertions::assert_eq;
use sealed_test::prelude::*;
use serde_json::json;

fn rename(store: &mut Store, name: &str) {
    store.update_hero(HeroPatch {
        name: Some(name.into()),
        ..HeroPatch::default()
    });
}

#[sealed_test]
fn editing_resumes_from_snapshot_file() -> Result<()> {
    let mut store = Store::open(&Loader::new(), FileStorage::new("data/folio/snapshot.json"));
    rename(&mut store, "Ann Lee");
    store.update_footer(FooterPatch {
        show_year: Some(false),
        ..FooterPatch::default()
    });
    let storage = store.close()?;

    let loaded = Loader::new().load(&storage);
    assert_eq!(loaded.origin, DocumentOrigin::Snapshot);
    assert_eq!(loaded.document.hero.name, "Ann Lee");
    assert!(!loaded.document.footer.show_year);

    let store = Store::open(&Loader::new(), storage);
    assert_eq!(store.document(), &loaded.document);
    assert!(!store.can_undo());

    Ok(())
}

#[sealed_test]
fn seed_precedence_follows_policy() -> Result<()> {
    let seed = r#"{ "hero": { "name": "Published Ann" } }"#;
    let mut store = Store::open(&Loader::new(), FileStorage::new("snapshot.json"));
    rename(&mut store, "Draft Ann");
    let storage = store.close()?;

    let seed_wins = Loader::new().with_seed(seed).load(&storage);
    assert_eq!(seed_wins.origin, DocumentOrigin::Seed);
    assert_eq!(seed_wins.document.hero.name, "Published Ann");

    let snapshot_wins = Loader::new()
        .with_seed(seed)
        .with_policy(SeedPolicy::SnapshotWins)
        .load(&storage);
    assert_eq!(snapshot_wins.origin, DocumentOrigin::Snapshot);
    assert_eq!(snapshot_wins.document.hero.name, "Draft Ann");

    let empty_seed = Loader::new().with_seed("{}").load(&storage);
    assert_eq!(empty_seed.origin, DocumentOrigin::Snapshot);

    Ok(())
}

#[sealed_test]
fn legacy_snapshot_gains_new_groups() -> Result<()> {
    let mut storage = FileStorage::new("snapshot.json");
    storage.write(&json!({ "hero": { "name": "Old Ann" } }).to_string())?;

    let store = Store::open(&Loader::new(), storage);
    let defaults = PortfolioDocument::default();
    assert_eq!(store.document().hero.name, "Old Ann");
    assert_eq!(store.document().footer, defaults.footer);
    assert_eq!(store.document().contact, defaults.contact);

    Ok(())
}

#[sealed_test]
fn resume_import_publishes_to_site() -> Result<()> {
    let site = SiteFixture::new("site")?;
    site.stage_and_commit("README.md", "# Portfolio\n")?;

    let mut store = Store::open(&Loader::new(), FileStorage::new("snapshot.json"));
    store.import_merged(&json!({
        "hero": { "name": "Ann Lee", "title": "Systems Engineer" },
        "about": { "skills": ["Rust", "Go"] },
        "projects": [
            { "title": "Kernel" },
            { "title": "Compiler" }
        ]
    }))?;
    assert!(store.can_undo());

    let document = store.export()?;
    let publisher = Git2Publisher::open(site.path()?, PublishSettings::default())?;
    let receipt = publisher.publish(&PublishRequest {
        document: &document,
        message: "Publish portfolio",
        push: false,
    })?;
    assert!(receipt.changed);
    assert_eq!(site.commit_count()?, 2);
    assert_eq!(site.committed("src/portfolio.config.json")?, document);
    assert_eq!(site.committed(".env")?, "VITE_VIEWER_MODE=true\n");

    // Published site starts from exactly what was committed.
    let committed = site.committed("src/portfolio.config.json")?;
    let published = Loader::new()
        .with_seed(committed)
        .load(&FileStorage::new("visitor.json"));
    assert_eq!(published.origin, DocumentOrigin::Seed);
    assert_eq!(&published.document, store.document());
    assert_eq!(published.document.projects.len(), 2);
    assert_ne!(
        published.document.projects[0].id,
        published.document.projects[1].id
    );

    Ok(())
}

#[sealed_test]
fn exported_file_reimports_into_fresh_store() -> Result<()> {
    let mut store = Store::open(&Loader::new(), FileStorage::new("first.json"));
    rename(&mut store, "Ann Lee");
    let exported = store.export()?;

    let mut fresh = Store::open(&Loader::new(), FileStorage::new("second.json"));
    fresh.import_text(&exported, ImportMode::Replace)?;
    assert_eq!(fresh.document(), store.document());
    assert_eq!(export_document(fresh.document())?, exported);

    let storage = fresh.close()?;
    assert_eq!(Loader::new().load(&storage).document, *store.document());

    Ok(())
}

#[sealed_test]
fn settings_bound_history() -> Result<()> {
    let settings: Settings = indoc! {r#"
        [store]
        snapshot = "snapshot.json"
        history_capacity = 2
    "#}
    .parse()?;

    let snapshot = settings.store.snapshot.clone().unwrap_or_default();
    let mut store = Store::open(&Loader::new(), FileStorage::new(snapshot))
        .with_history_capacity(settings.store.history_capacity);
    for name in ["one", "two", "three"] {
        rename(&mut store, name);
    }

    assert_eq!(store.history().len(), 2);
    assert!(store.undo());
    assert!(store.undo());
    assert!(!store.undo());
    assert_eq!(store.document().hero.name, "one");

    Ok(())
}
