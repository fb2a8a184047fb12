// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Merge partial documents over defaults.
//!
//! Documents arrive from places that cannot be trusted to be complete: an old
//! snapshot written by a previous template version, a seed injected at publish
//! time, or data generated from a resume. All of them go through
//! [`merge_over_defaults`], which is the one place that decides what a field
//! is when it is absent.
//!
//! # Merge Rules
//!
//! - Top-level keys of the supplied document override the default ones.
//! - Groups (`meta`, `theme`, `hero`, `about`, `contact`, `footer`) are merged
//!   key-by-key: supplied keys win, absent keys fall back to the default,
//!   unknown keys are kept.
//! - Collections (`projects`, `socialLinks`, `about.skills`,
//!   `about.experiences`) are taken verbatim when supplied, even when empty,
//!   and otherwise fall back to the default collection as a whole. Elements
//!   are never merged by position or by identifier.
//! - A `null` on a known key is treated exactly like an absent key. Unknown
//!   keys keep their `null`, so it survives export and import.
//! - Entities without an identifier, or with one already used earlier in the
//!   same collection, receive a new identifier. See [`normalize_ids`].

use crate::{
    collection::Identified,
    document::PortfolioDocument,
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use uuid::Uuid;

const GROUPS: [&str; 6] = ["meta", "theme", "hero", "about", "contact", "footer"];

/// Parse text into a partial document without applying any defaults.
///
/// # Errors
///
/// - Return [`MergeError::Parse`] if text is not valid JSON.
/// - Return [`MergeError::NotAnObject`] if text is valid JSON, but not an
///   object.
pub fn parse_partial(text: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(text).map_err(MergeError::Parse)?;
    if !value.is_object() {
        return Err(MergeError::NotAnObject);
    }

    Ok(value)
}

/// Merge partial document over the default document.
///
/// Always yields a fully populated document, including for an empty object.
///
/// # Errors
///
/// - Return [`MergeError::NotAnObject`] if supplied value is not an object.
/// - Return [`MergeError::Shape`] if a known field holds a value of the wrong
///   type, e.g., a string where a collection is expected.
pub fn merge_over_defaults(supplied: &Value) -> Result<PortfolioDocument> {
    let supplied = supplied.as_object().ok_or(MergeError::NotAnObject)?;
    let mut merged = as_object(PortfolioDocument::default())?;

    for (key, value) in supplied {
        if value.is_null() && merged.contains_key(key.as_str()) {
            continue;
        }

        match (merged.get_mut(key.as_str()), value) {
            (Some(Value::Object(group)), Value::Object(partial))
                if GROUPS.contains(&key.as_str()) =>
            {
                overlay(group, partial);
            }
            _ => {
                merged.insert(key.clone(), value.clone());
            }
        }
    }

    let mut document: PortfolioDocument =
        serde_json::from_value(Value::Object(merged)).map_err(MergeError::Shape)?;

    normalize_ids(&mut document);

    Ok(document)
}

/// Give every entity in the document a non-empty identifier that is unique
/// within its collection.
///
/// The first entity holding an identifier keeps it. Replacement identifiers
/// are derived from the collection name, position, and contents of the
/// entity, so normalizing the same input always yields the same identifiers.
pub fn normalize_ids(document: &mut PortfolioDocument) {
    assign_missing_ids("projects", &mut document.projects);
    assign_missing_ids("socialLinks", &mut document.social_links);
    assign_missing_ids("about.experiences", &mut document.about.experiences);
}

/// Overwrite fields of a single record with the keys of a JSON patch.
///
/// Follows the same key rules as group merging.
///
/// # Errors
///
/// - Return [`MergeError::Serialize`] if record cannot be turned into JSON.
/// - Return [`MergeError::Shape`] if patch holds a value of the wrong type.
pub fn overlay_record<T>(record: &T, patch: &Map<String, Value>) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = as_object(record)?;
    overlay(&mut merged, patch);
    serde_json::from_value(Value::Object(merged)).map_err(MergeError::Shape)
}

fn overlay(base: &mut Map<String, Value>, partial: &Map<String, Value>) {
    for (key, value) in partial {
        if value.is_null() && base.contains_key(key) {
            continue;
        }

        base.insert(key.clone(), value.clone());
    }
}

fn as_object(record: impl Serialize) -> Result<Map<String, Value>> {
    match serde_json::to_value(record).map_err(MergeError::Serialize)? {
        Value::Object(map) => Ok(map),
        _ => Err(MergeError::NotAnObject),
    }
}

fn assign_missing_ids<T>(collection: &str, items: &mut [T])
where
    T: Identified + Serialize,
{
    let reserved = items
        .iter()
        .map(|item| item.id().to_owned())
        .filter(|id| !id.is_empty())
        .collect::<HashSet<_>>();
    let mut seen = HashSet::new();

    for (index, item) in items.iter_mut().enumerate() {
        if !item.id().is_empty() && seen.insert(item.id().to_owned()) {
            continue;
        }

        // INVARIANT: Replacement never collides with an identifier in use.
        let contents = serde_json::to_string(&*item).unwrap_or_default();
        let id = (0..)
            .map(|bump| derived_id(collection, index, bump, &contents))
            .find(|id| !reserved.contains(id) && !seen.contains(id))
            .unwrap_or_default();
        seen.insert(id.clone());
        *item.id_mut() = id;
    }
}

fn derived_id(collection: &str, index: usize, bump: usize, contents: &str) -> String {
    let name = format!("{collection}/{index}/{bump}/{contents}");
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

/// Merge error types.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Text is not valid JSON.
    #[error("document is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// Document is valid JSON, but not an object.
    #[error("document must be a JSON object")]
    NotAnObject,

    /// Known field holds a value of the wrong type.
    #[error("document does not match portfolio layout: {0}")]
    Shape(#[source] serde_json::Error),

    /// Record could not be converted to JSON.
    #[error("failed to convert record to JSON: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Friendly result alias :3
type Result<T, E = MergeError> = std::result::Result<T, E>;
