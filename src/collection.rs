// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Element edits over document collections.
//!
//! Collections in a portfolio document are opaque, immutable sequences. Editing
//! one element is modeled as producing a whole new collection with that one
//! element replaced, removed, inserted, or moved, which the caller then hands
//! to the store's wholesale setter. Nothing here mutates a collection in
//! place.
//!
//! Operations that target an identifier not present in the collection return
//! an unchanged copy.

use crate::{
    document::{Experience, Project, SocialLink},
    merge::{overlay_record, MergeError},
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

/// Entity with a stable identifier inside its collection.
pub trait Identified {
    fn id(&self) -> &str;

    fn id_mut(&mut self) -> &mut String;
}

impl Identified for Project {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn id_mut(&mut self) -> &mut String {
        &mut self.id
    }
}

impl Identified for SocialLink {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn id_mut(&mut self) -> &mut String {
        &mut self.id
    }
}

impl Identified for Experience {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn id_mut(&mut self) -> &mut String {
        &mut self.id
    }
}

/// Direction to move an element in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Find element by identifier.
pub fn find<'a, T: Identified>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

/// Copy of collection with new element placed first.
pub fn prepend<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut result = Vec::with_capacity(items.len() + 1);
    result.push(item);
    result.extend_from_slice(items);
    result
}

/// Copy of collection with new element placed last.
pub fn append<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut result = items.to_vec();
    result.push(item);
    result
}

/// Copy of collection with one element edited through a closure.
pub fn edit<T>(items: &[T], id: &str, edit: impl FnOnce(&mut T)) -> Vec<T>
where
    T: Identified + Clone,
{
    let mut result = items.to_vec();
    if let Some(item) = result.iter_mut().find(|item| item.id() == id) {
        edit(item);
    }
    result
}

/// Copy of collection with one element shallow-patched from JSON.
///
/// The identifier of the element cannot be changed this way.
///
/// # Errors
///
/// - Return [`MergeError::Shape`] if patch does not fit the element layout.
pub fn patch_element<T>(items: &[T], id: &str, patch: &Map<String, Value>) -> Result<Vec<T>>
where
    T: Identified + Clone + Serialize + DeserializeOwned,
{
    let mut result = items.to_vec();
    if let Some(item) = result.iter_mut().find(|item| item.id() == id) {
        let mut patched = overlay_record(&*item, patch)?;
        *patched.id_mut() = id.to_owned();
        *item = patched;
    }

    Ok(result)
}

/// Draft entity overlaid with a JSON object.
///
/// The draft keeps its own identifier, whatever the object says.
///
/// # Errors
///
/// - Return [`MergeError::Shape`] if patch does not fit the element layout.
pub fn fill_draft<T>(draft: T, patch: &Map<String, Value>) -> Result<T>
where
    T: Identified + Serialize + DeserializeOwned,
{
    let mut entry = overlay_record(&draft, patch)?;
    *entry.id_mut() = draft.id().to_owned();
    Ok(entry)
}

/// Copy of collection without the target element.
pub fn remove<T>(items: &[T], id: &str) -> Vec<T>
where
    T: Identified + Clone,
{
    items.iter().filter(|item| item.id() != id).cloned().collect()
}

/// Copy of collection with target element swapped with its neighbour.
///
/// Moving the first element up, or the last element down, changes nothing.
pub fn shift<T>(items: &[T], id: &str, direction: Direction) -> Vec<T>
where
    T: Identified + Clone,
{
    let mut result = items.to_vec();
    let Some(index) = result.iter().position(|item| item.id() == id) else {
        return result;
    };

    let swap = match direction {
        Direction::Up if index > 0 => index - 1,
        Direction::Down if index + 1 < result.len() => index + 1,
        _ => return result,
    };
    result.swap(index, swap);
    result
}

/// Copy of skill list with a new skill at the end.
///
/// Skill is trimmed first. Blank skills and skills already listed are ignored.
pub fn add_skill(skills: &[String], skill: &str) -> Vec<String> {
    let skill = skill.trim();
    if skill.is_empty() || skills.iter().any(|existing| existing == skill) {
        return skills.to_vec();
    }

    append(skills, skill.to_owned())
}

/// Copy of skill list without target skill.
pub fn remove_skill(skills: &[String], skill: &str) -> Vec<String> {
    skills
        .iter()
        .filter(|existing| existing.as_str() != skill)
        .cloned()
        .collect()
}

/// Friendly result alias :3
type Result<T, E = MergeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Platform, SocialLink};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use simple_test_case::test_case;

    fn links() -> Vec<SocialLink> {
        vec![
            SocialLink::new("a", Platform::Github, "https://github.com/ann", "GitHub"),
            SocialLink::new("b", Platform::Medium, "https://medium.com/@ann", "Medium"),
            SocialLink::new("c", Platform::Resume, "https://ann.dev/cv.pdf", "Resume"),
        ]
    }

    fn ids(items: &[SocialLink]) -> Vec<&str> {
        items.iter().map(|item| item.id()).collect()
    }

    #[test_case("a", Direction::Up, vec!["a", "b", "c"]; "first up")]
    #[test_case("a", Direction::Down, vec!["b", "a", "c"]; "first down")]
    #[test_case("c", Direction::Up, vec!["a", "c", "b"]; "last up")]
    #[test_case("c", Direction::Down, vec!["a", "b", "c"]; "last down")]
    #[test_case("zzz", Direction::Up, vec!["a", "b", "c"]; "unknown id")]
    #[test]
    fn shift_moves_element(id: &str, direction: Direction, expect: Vec<&str>) {
        let items = links();
        let result = shift(&items, id, direction);
        pretty_assertions::assert_eq!(ids(&result), expect);
    }

    #[test]
    fn unknown_id_leaves_collection_alone() -> anyhow::Result<()> {
        let items = links();
        assert_eq!(remove(&items, "zzz"), items);
        assert_eq!(edit(&items, "zzz", |link| link.label = "x".into()), items);

        let Value::Object(patch) = json!({ "label": "x" }) else {
            anyhow::bail!("patch is not an object");
        };
        assert_eq!(patch_element(&items, "zzz", &patch)?, items);

        Ok(())
    }

    #[test]
    fn edit_touches_only_target() {
        let items = links();
        let result = edit(&items, "b", |link| link.url = "https://ann.blog".into());
        assert_eq!(result[1].url, "https://ann.blog");
        assert_eq!(result[0], items[0]);
        assert_eq!(result[2], items[2]);

        // INVARIANT: Source collection is never mutated.
        assert_eq!(items[1].url, "https://medium.com/@ann");
    }

    #[test]
    fn patch_element_cannot_change_id() -> anyhow::Result<()> {
        let Value::Object(patch) = json!({ "id": "hijack", "platform": "youtube" }) else {
            anyhow::bail!("patch is not an object");
        };
        let result = patch_element(&links(), "a", &patch)?;
        assert_eq!(result[0].id, "a");
        assert_eq!(result[0].platform, Platform::Youtube);

        Ok(())
    }

    #[test]
    fn prepend_and_append_place_elements() {
        let items = links();
        let extra = SocialLink::new("d", Platform::Website, "", "Site");
        assert_eq!(ids(&prepend(&items, extra.clone())), vec!["d", "a", "b", "c"]);
        assert_eq!(ids(&append(&items, extra)), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn add_skill_trims_and_skips_duplicates() {
        let skills = vec!["Rust".to_string()];
        assert_eq!(add_skill(&skills, "  Go "), vec!["Rust", "Go"]);
        assert_eq!(add_skill(&skills, "Rust"), vec!["Rust"]);
        assert_eq!(add_skill(&skills, "   "), vec!["Rust"]);
        assert_eq!(remove_skill(&skills, "Rust"), Vec::<String>::new());
    }

    #[test]
    fn fill_draft_keeps_draft_id() -> anyhow::Result<()> {
        let draft = SocialLink::new("new", Platform::Website, "", "My Website");
        let Value::Object(patch) = json!({ "id": "x", "platform": "github" }) else {
            anyhow::bail!("patch is not an object");
        };

        let result = fill_draft(draft, &patch)?;
        assert_eq!(result.id, "new");
        assert_eq!(result.platform, Platform::Github);
        assert_eq!(result.label, "My Website");

        let Value::Object(patch) = json!({ "platform": "myspace" }) else {
            anyhow::bail!("patch is not an object");
        };
        assert!(fill_draft(SocialLink::draft(), &patch).is_err());

        Ok(())
    }
}
