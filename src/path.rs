// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Path resolution utilities.
//!
//! Determine relevent path information for files that Folio reads and writes
//! between sessions.

use std::path::PathBuf;

/// Determine default absolute path to the snapshot file.
///
/// Uses XDG Base Directory path `$XDG_DATA_HOME/folio/portfolio-config.json`.
/// Does not check if the path returned actually exists.
///
/// # Errors
///
/// - Return [`NoWayHome`] if data directory path cannot be determined.
///
/// # See Also
///
/// - [XDG Base Directory](https://wiki.archlinux.org/title/XDG_Base_Directory)
pub fn default_snapshot_file() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|path| path.join("folio").join("portfolio-config.json"))
        .ok_or(NoWayHome)
}

/// Determine default absolute path to the settings file.
///
/// Uses `$XDG_CONFIG_HOME/folio/folio.toml`. Does not check if the path
/// returned actually exists.
///
/// # Errors
///
/// - Return [`NoWayHome`] if configuration directory path cannot be
///   determined.
pub fn default_settings_file() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|path| path.join("folio").join("folio.toml"))
        .ok_or(NoWayHome)
}

/// No way to determine user's data or configuration directories.
///
/// # See Also
///
/// - [`dirs::data_dir`](https://docs.rs/dirs/latest/dirs/fn.data_dir.html)
#[derive(Clone, Debug, thiserror::Error)]
#[error("cannot determine absolute path to user's data or configuration directory")]
pub struct NoWayHome;

/// Friendly result alias :3
pub type Result<T, E = NoWayHome> = std::result::Result<T, E>;
