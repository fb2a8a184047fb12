// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Document export and import formats.
//!
//! Exported documents are complete, pretty-printed JSON, suitable for download
//! or for committing into a site repository. Nothing is filtered out, so
//! unknown keys picked up along the way are exported too.
//!
//! Imported text comes in one of two flavours. A previously exported file is
//! trusted to be complete and replaces the live document as is. Anything
//! produced elsewhere, e.g., data extracted from a resume, is merged over
//! defaults first.

use crate::{
    document::PortfolioDocument,
    merge::{merge_over_defaults, parse_partial, MergeError},
};

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// How imported text becomes a document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Text must be a complete document and is used as is.
    #[default]
    Replace,

    /// Text may be partial and is merged over defaults.
    Merge,
}

impl FromStr for ImportMode {
    type Err = ExchangeError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        match data {
            "replace" => Ok(Self::Replace),
            "merge" => Ok(Self::Merge),
            other => Err(ExchangeError::UnknownMode(other.into())),
        }
    }
}

impl Display for ImportMode {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Replace => fmt.write_str("replace"),
            Self::Merge => fmt.write_str("merge"),
        }
    }
}

/// Serialize document as pretty-printed JSON.
///
/// # Errors
///
/// - Return [`ExchangeError::Serialize`] if serialization fails.
pub fn export_document(document: &PortfolioDocument) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(ExchangeError::Serialize)
}

/// Serialize document as compact JSON for the snapshot slot.
///
/// # Errors
///
/// - Return [`ExchangeError::Serialize`] if serialization fails.
pub fn snapshot_document(document: &PortfolioDocument) -> Result<String> {
    serde_json::to_string(document).map_err(ExchangeError::Serialize)
}

/// Parse imported text into a document.
///
/// # Errors
///
/// - Return [`ExchangeError::Parse`] if text is not a complete document in
///   [`ImportMode::Replace`].
/// - Return [`ExchangeError::Merge`] if text is not a JSON object, or does
///   not fit the document layout, in [`ImportMode::Merge`].
pub fn read_import(text: &str, mode: ImportMode) -> Result<PortfolioDocument> {
    match mode {
        ImportMode::Replace => serde_json::from_str(text).map_err(ExchangeError::Parse),
        ImportMode::Merge => Ok(merge_over_defaults(&parse_partial(text)?)?),
    }
}

/// Document exchange error types.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// Imported text is not a complete portfolio document.
    #[error("invalid configuration file: {0}")]
    Parse(#[source] serde_json::Error),

    /// Imported text cannot be merged over defaults.
    #[error("invalid configuration file: {0}")]
    Merge(#[from] MergeError),

    /// Document cannot be serialized.
    #[error("failed to serialize portfolio document: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Import mode name is not recognized.
    #[error("unknown import mode {0:?}, expected \"replace\" or \"merge\"")]
    UnknownMode(String),
}

/// Friendly result alias :3
type Result<T, E = ExchangeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn export_is_pretty_printed() -> anyhow::Result<()> {
        let mut document = PortfolioDocument::default();
        document.footer.text = "bye".into();

        let result = export_document(&document)?;
        let expect = indoc! {r#"
              "footer": {
                "text": "bye",
                "showYear": true
              }
            }"#};
        assert!(result.starts_with("{\n  \"version\": \"1.0.0\",\n"));
        assert!(result.ends_with(expect), "{result}");

        Ok(())
    }

    #[test]
    fn exported_text_reimports_exactly() -> anyhow::Result<()> {
        let mut document = PortfolioDocument::default();
        document.hero.extra.insert("sparkles".into(), 3.into());
        document.meta.og_image = Some("https://ann.dev/og.png".into());

        let text = export_document(&document)?;
        assert_eq!(read_import(&text, ImportMode::Replace)?, document);
        assert_eq!(read_import(&text, ImportMode::Merge)?, document);

        Ok(())
    }

    #[test]
    fn replace_requires_complete_document() {
        let result = read_import(r#"{ "hero": { "name": "Ann" } }"#, ImportMode::Replace);
        assert!(matches!(result, Err(ExchangeError::Parse(_))));
    }

    #[test]
    fn merge_accepts_partial_document() -> anyhow::Result<()> {
        let result = read_import(r#"{ "hero": { "name": "Ann" } }"#, ImportMode::Merge)?;
        assert_eq!(result.hero.name, "Ann");

        Ok(())
    }

    #[test]
    fn merge_rejects_garbage() {
        let result = read_import("not json at all", ImportMode::Merge);
        assert!(matches!(result, Err(ExchangeError::Merge(MergeError::Parse(_)))));
    }

    #[test]
    fn parse_import_mode() -> anyhow::Result<()> {
        assert_eq!("merge".parse::<ImportMode>()?, ImportMode::Merge);
        assert_eq!(ImportMode::Replace.to_string(), "replace");
        assert!("append".parse::<ImportMode>().is_err());

        Ok(())
    }
}
