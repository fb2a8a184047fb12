// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Portfolio configuration store.
//!
//! A single structured __portfolio document__ drives an entire personal
//! portfolio site: metadata, theme, headline, profile, projects, contact
//! details, social links, and footer. Folio owns the live copy of that
//! document, keeps it complete no matter how partial or outdated its inputs
//! are, remembers a bounded number of prior versions for undo, and persists
//! every change so editing can resume later.
//!
//! # Document Sources
//!
//! On start up the document comes from, in order:
//!
//! 1. A seed document bundled with a published site.
//! 2. A snapshot written by a previous session.
//! 3. Built-in defaults.
//!
//! Whichever source wins is merged over defaults, so documents written by
//! older versions of the site pick up any group or field added since.
//!
//! # Publishing
//!
//! Exported documents can be committed into a local clone of the site template
//! and pushed to a remote, from where a static hosting provider deploys the
//! site. See [`publish`].

pub mod collection;
pub mod document;
pub mod exchange;
pub mod loader;
pub mod merge;
pub mod patch;
pub mod path;
pub mod publish;
pub mod settings;
pub mod storage;
pub mod store;

pub use document::PortfolioDocument;
pub use loader::{Loader, SeedPolicy};
pub use settings::Settings;
pub use storage::{FileStorage, MemoryStorage, SnapshotStorage};
pub use store::Store;
