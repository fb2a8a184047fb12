// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Publishing of exported documents.
//!
//! A portfolio site is published by committing the exported document into a
//! copy of the site template repository. A static hosting provider then builds
//! the site straight from that repository. The seed document that the
//! published site starts from is exactly the committed document.
//!
//! Publishing never touches the store. It only ever sees exported text, so a
//! failed or slow publish cannot leave the live document half changed.
//!
//! # Viewer Mode
//!
//! A published site should not show the editor. Along with the document, a
//! small environment file is committed that switches the site template into
//! viewer mode.

pub mod git;

pub use git::Git2Publisher;

use std::path::PathBuf;

/// Environment file that switches a published site into viewer mode.
pub const VIEWER_MODE_FILE: &str = ".env";

/// Contents of the viewer mode environment file.
pub const VIEWER_MODE_CONTENTS: &str = "VITE_VIEWER_MODE=true\n";

/// What to publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishRequest<'a> {
    /// Exported document text.
    pub document: &'a str,

    /// Commit message to use.
    pub message: &'a str,

    /// Push to remote after committing.
    pub push: bool,
}

/// Outcome of a publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    /// Commit that holds the published document.
    pub commit: String,

    /// Whether a new commit was made. Publishing an unchanged document
    /// reuses the existing commit.
    pub changed: bool,

    /// URL of the remote repository, if one is configured.
    pub repository_url: Option<String>,

    /// URL that starts a deployment of the remote repository.
    pub deploy_url: Option<String>,
}

/// Layer of indirection for publishing.
pub trait Publisher {
    /// Publish exported document.
    fn publish(&self, request: &PublishRequest<'_>) -> Result<PublishReceipt>;
}

/// URL that starts a hosting deployment of target repository.
pub fn deploy_url(repository_url: &str) -> String {
    format!("https://vercel.com/new/clone?repository-url={repository_url}")
}

/// All possible error types for publishing.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Exported text is not a JSON document.
    #[error("refuse to publish malformed document: {0}")]
    InvalidDocument(#[source] serde_json::Error),

    /// Repository has no working tree to write into.
    #[error("repository {0:?} has no working tree")]
    BareRepository(PathBuf),

    /// HEAD does not point at a branch.
    #[error("cannot push from a detached HEAD")]
    DetachedHead,

    /// Failed to write file into working tree.
    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every push attempt failed.
    #[error("push failed after {attempts} attempts")]
    PushExhausted {
        attempts: u32,
        #[source]
        source: git2::Error,
    },

    /// Style template cannot be set for progress bars.
    #[error(transparent)]
    IndicatifStyleTemplate(#[from] indicatif::style::TemplateError),

    /// Operations from libgit2 fail.
    #[error(transparent)]
    Git2(#[from] git2::Error),
}

/// Friendly result alias :3
pub type Result<T, E = PublishError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deploy_url_embeds_repository() {
        assert_eq!(
            deploy_url("https://github.com/ann/portfolio"),
            "https://vercel.com/new/clone?repository-url=https://github.com/ann/portfolio"
        );
    }
}
