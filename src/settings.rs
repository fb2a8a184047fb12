// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Tool settings layout.
//!
//! Specify the layout of the settings file that tells Folio where to keep its
//! snapshot, where to find a seed document, and where to publish to. Every
//! section and every field is optional. Missing ones take the defaults below.
//!
//! # General Layout
//!
//! ```toml
//! [store]
//! snapshot = "$XDG_DATA_HOME/folio/portfolio-config.json"
//! history_capacity = 20
//!
//! [seed]
//! path = "~/site/src/portfolio.config.json"
//! policy = "seed-wins"
//!
//! [publish]
//! repository = "~/site"
//! remote = "origin"
//! config_path = "src/portfolio.config.json"
//! viewer_mode = true
//! attempts = 3
//! backoff_ms = 2000
//! ```
//!
//! Paths go through shell expansion when parsed.

use crate::{loader::SeedPolicy, store::DEFAULT_HISTORY_CAPACITY};

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Error as FmtError, Formatter, Result as FmtResult},
    fs::read_to_string,
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::debug;

/// Settings file layout.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Snapshot and history settings.
    pub store: StoreSettings,

    /// Seed document settings.
    pub seed: SeedSettings,

    /// Publishing settings.
    pub publish: PublishSettings,
}

impl Settings {
    /// Read settings file, falling back to defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// - Return [`SettingsError::Read`] if file exists, but cannot be read.
    /// - Return [`SettingsError::Deserialize`] if file contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        match read_to_string(path.as_ref()) {
            Ok(data) => data.parse(),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("no settings at {:?}, use defaults", path.as_ref().display());
                Ok(Self::default())
            }
            Err(error) => Err(SettingsError::Read {
                path: path.as_ref().to_path_buf(),
                source: error,
            }),
        }
    }
}

impl FromStr for Settings {
    type Err = SettingsError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let mut settings: Settings = toml::de::from_str(data).map_err(SettingsError::Deserialize)?;

        // INVARIANT: Perform shell expansion on every path field.
        settings.store.snapshot = settings.store.snapshot.as_deref().map(expand).transpose()?;
        settings.seed.path = settings.seed.path.as_deref().map(expand).transpose()?;
        settings.publish.repository =
            settings.publish.repository.as_deref().map(expand).transpose()?;

        Ok(settings)
    }
}

impl Display for Settings {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(
            toml::ser::to_string_pretty(self)
                .map_err(SettingsError::Serialize)?
                .as_str(),
        )
    }
}

/// Snapshot and history settings.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Snapshot file to use instead of the default one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,

    /// Number of undo steps to keep.
    pub history_capacity: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            snapshot: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Seed document settings.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SeedSettings {
    /// JSON file holding the seed document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Precedence between seed document and snapshot.
    pub policy: SeedPolicy,
}

/// Publishing settings.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PublishSettings {
    /// Local clone of the site template repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<PathBuf>,

    /// Remote to push published commits to.
    pub remote: String,

    /// Path of the document inside the repository.
    pub config_path: PathBuf,

    /// Commit a marker that hides the editor on the published site.
    pub viewer_mode: bool,

    /// Number of push attempts before giving up.
    pub attempts: u32,

    /// Base delay between push attempts in milliseconds. Grows linearly with
    /// each failed attempt.
    pub backoff_ms: u64,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            repository: None,
            remote: "origin".into(),
            config_path: PathBuf::from("src/portfolio.config.json"),
            viewer_mode: true,
            attempts: 3,
            backoff_ms: 2000,
        }
    }
}

fn expand(path: &Path) -> Result<PathBuf> {
    let expanded = shellexpand::full(path.to_string_lossy().as_ref())
        .map_err(SettingsError::ShellExpansion)?
        .into_owned();
    Ok(PathBuf::from(expanded))
}

/// Settings error types.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Failed to read settings file.
    #[error("failed to read settings {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to deserialize settings.
    #[error(transparent)]
    Deserialize(#[from] toml::de::Error),

    /// Failed to serialize settings.
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    /// Failed to perform shell expansion on settings.
    #[error(transparent)]
    ShellExpansion(#[from] shellexpand::LookupError<std::env::VarError>),
}

impl From<SettingsError> for FmtError {
    fn from(_: SettingsError) -> Self {
        FmtError
    }
}

/// Friendly result alias :3
type Result<T, E = SettingsError> = std::result::Result<T, E>;
