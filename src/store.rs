// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Portfolio configuration store.
//!
//! The __store__ owns the live portfolio document for the length of an editing
//! session. It is the only sanctioned way to change the document. Every change
//! goes through one of its scoped update operations, which all follow the same
//! steps:
//!
//! 1. Record the current document in the undo history.
//! 2. Evict the oldest history entry if history is over capacity.
//! 3. Apply the change.
//! 4. Persist the new document to the snapshot slot.
//!
//! # Store Lifecycle
//!
//! A store is opened from a [`Loader`], mutated for the length of a session,
//! and finally closed, which flushes any snapshot write that failed earlier.
//! Nothing about a store is global. Whoever holds it decides who may change
//! it.
//!
//! # Undo History
//!
//! History is a bounded queue of whole-document copies, 20 by default. Undo
//! pops the newest copy back into place. There is no redo: once undone, the
//! discarded state is gone.
//!
//! # Persistence Failures
//!
//! Snapshot writes are not allowed to fail an edit. A failed write is logged,
//! the store is marked dirty, and the in-memory document stays as edited.
//! [`Store::flush`] retries the write and reports the error.

use crate::{
    document::{PortfolioDocument, Project, SocialLink},
    exchange::{export_document, read_import, snapshot_document, ExchangeError, ImportMode},
    loader::Loader,
    merge::{merge_over_defaults, normalize_ids, MergeError},
    patch::{AboutPatch, ContactPatch, DocumentPatch, FooterPatch, HeroPatch, MetaPatch, ThemePatch},
    storage::{FileStorage, SnapshotStorage, StorageError},
};

use serde_json::Value;
use std::collections::VecDeque;
use tracing::{debug, info, instrument, warn};

/// Number of undo steps kept by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Owner of the live portfolio document.
#[derive(Debug)]
pub struct Store<S = FileStorage>
where
    S: SnapshotStorage,
{
    current: PortfolioDocument,
    history: VecDeque<PortfolioDocument>,
    capacity: usize,
    storage: S,
    dirty: bool,
}

impl<S> Store<S>
where
    S: SnapshotStorage,
{
    /// Construct new store around a document.
    ///
    /// The document is not written to storage until the first change.
    pub fn new(document: PortfolioDocument, storage: S) -> Self {
        Self {
            current: document,
            history: VecDeque::new(),
            capacity: DEFAULT_HISTORY_CAPACITY,
            storage,
            dirty: false,
        }
    }

    /// Open store with whatever document the loader finds in storage.
    pub fn open(loader: &Loader, storage: S) -> Self {
        let loaded = loader.load(&storage);
        Self::new(loaded.document, storage)
    }

    /// Use target history capacity.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self.trim_history();
        self
    }

    /// Live document.
    pub fn document(&self) -> &PortfolioDocument {
        &self.current
    }

    /// Shallow-merge top-level fields. Supplied groups replace current groups
    /// wholesale.
    pub fn update_config(&mut self, patch: DocumentPatch) {
        self.mutate(|document| patch.apply(document));
    }

    pub fn update_meta(&mut self, patch: MetaPatch) {
        self.mutate(|document| patch.apply(&mut document.meta));
    }

    pub fn update_theme(&mut self, patch: ThemePatch) {
        self.mutate(|document| patch.apply(&mut document.theme));
    }

    pub fn update_hero(&mut self, patch: HeroPatch) {
        self.mutate(|document| patch.apply(&mut document.hero));
    }

    pub fn update_about(&mut self, patch: AboutPatch) {
        self.mutate(|document| patch.apply(&mut document.about));
    }

    pub fn update_contact(&mut self, patch: ContactPatch) {
        self.mutate(|document| patch.apply(&mut document.contact));
    }

    pub fn update_footer(&mut self, patch: FooterPatch) {
        self.mutate(|document| patch.apply(&mut document.footer));
    }

    /// Replace project collection wholesale.
    pub fn update_projects(&mut self, projects: Vec<Project>) {
        self.mutate(|document| document.projects = projects);
    }

    /// Replace social link collection wholesale.
    pub fn update_social_links(&mut self, social_links: Vec<SocialLink>) {
        self.mutate(|document| document.social_links = social_links);
    }

    /// Replace live document with the default document.
    ///
    /// Ignores any seed or snapshot the session was started from. Can be
    /// undone like any other change.
    #[instrument(skip(self), level = "debug")]
    pub fn reset(&mut self) {
        info!("reset portfolio document to defaults");
        self.mutate(|document| *document = PortfolioDocument::default());
    }

    /// Restore document as it was before the latest change.
    ///
    /// Returns `false` and does nothing if there is no history left.
    #[instrument(skip(self), level = "debug")]
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.pop_back() else {
            debug!("nothing to undo");
            return false;
        };

        self.current = previous;
        self.persist();
        true
    }

    /// Check if there is anything to undo.
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// History entries, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &PortfolioDocument> {
        self.history.iter()
    }

    /// Maximum number of history entries kept.
    pub fn history_capacity(&self) -> usize {
        self.capacity
    }

    /// Replace live document outright.
    ///
    /// No merging and no defaulting take place, and history is left alone.
    /// Meant for trusted documents, e.g., one produced by [`Store::export`].
    pub fn load(&mut self, document: PortfolioDocument) {
        self.current = document;
        self.persist();
    }

    /// Merge partial document over defaults and make it the live document.
    ///
    /// Meant for documents generated elsewhere, which may be missing any
    /// number of fields. Can be undone.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::Merge`] if document cannot be merged. The live
    ///   document is left unchanged.
    pub fn import_merged(&mut self, partial: &Value) -> Result<()> {
        let document = merge_over_defaults(partial)?;
        self.mutate(|current| *current = document);
        Ok(())
    }

    /// Import user supplied text. Can be undone.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::Exchange`] if text cannot be read as a document
    ///   in the requested mode. The live document is left unchanged.
    #[instrument(skip(self, text), level = "debug")]
    pub fn import_text(&mut self, text: &str, mode: ImportMode) -> Result<()> {
        let document = read_import(text, mode)?;
        info!("import portfolio document ({mode})");
        self.mutate(|current| *current = document);
        Ok(())
    }

    /// Serialize live document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::Exchange`] if serialization fails.
    pub fn export(&self) -> Result<String> {
        Ok(export_document(&self.current)?)
    }

    /// Check if the latest snapshot write failed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write live document to storage now.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::Storage`] if storage refuses the write.
    /// - Return [`StoreError::Exchange`] if serialization fails.
    pub fn flush(&mut self) -> Result<()> {
        self.write_snapshot()?;
        self.dirty = false;
        Ok(())
    }

    /// Flush and give back the storage.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::Storage`] if the final write fails.
    pub fn close(mut self) -> Result<S> {
        if self.dirty {
            self.flush()?;
        }

        Ok(self.storage)
    }

    /// Snapshot storage backing this store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    fn mutate(&mut self, change: impl FnOnce(&mut PortfolioDocument)) {
        let mut next = self.current.clone();
        change(&mut next);

        // INVARIANT: Identifiers stay unique however the collections were set.
        normalize_ids(&mut next);

        let previous = std::mem::replace(&mut self.current, next);
        self.history.push_back(previous);
        self.trim_history();
        debug!("history holds {} of {} entries", self.history.len(), self.capacity);

        self.persist();
    }

    fn trim_history(&mut self) {
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }
    }

    fn persist(&mut self) {
        match self.write_snapshot() {
            Ok(()) => self.dirty = false,
            Err(error) => {
                warn!("failed to persist portfolio document: {error}");
                self.dirty = true;
            }
        }
    }

    fn write_snapshot(&mut self) -> Result<()> {
        let contents = snapshot_document(&self.current)?;
        self.storage.write(&contents)?;
        Ok(())
    }
}

/// All possible error types for store interaction.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Snapshot storage fails.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Import or export fails.
    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    /// Partial document cannot be merged.
    #[error(transparent)]
    Merge(#[from] MergeError),
}

/// Friendly result alias :3
type Result<T, E = StoreError> = std::result::Result<T, E>;
