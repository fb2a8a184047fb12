// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Partial updates for portfolio document groups.
//!
//! Each group of a [`PortfolioDocument`] has a matching __patch__ whose fields
//! are all optional. Applying a patch overwrites exactly the fields it carries
//! and leaves everything else alone, i.e., a shallow field-by-field merge.
//!
//! Fields that are themselves optional in the document (an avatar URL, a phone
//! number, etc.) are wrapped twice. `None` leaves the field unchanged, while
//! `Some(None)` clears it. When deserializing, an explicit JSON `null` maps
//! to `Some(None)`.
//!
//! Patches only know the fields of their group. Deserializing a patch with any
//! other key fails, so a misspelled field is reported instead of silently
//! changing nothing. Unknown keys enter a document through import only.

use crate::document::{
    About, BorderRadius, Contact, Experience, FontFamily, Footer, Hero, Meta, PortfolioDocument,
    Project, SocialLink, Theme,
};

use serde::{Deserialize, Deserializer};

/// Shallow patch of site metadata.
#[derive(Debug, Default, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct MetaPatch {
    pub site_title: Option<String>,
    pub site_description: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub og_image: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub favicon: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub google_analytics_id: Option<Option<String>>,
}

impl MetaPatch {
    pub fn apply(self, meta: &mut Meta) {
        set(&mut meta.site_title, self.site_title);
        set(&mut meta.site_description, self.site_description);
        set(&mut meta.og_image, self.og_image);
        set(&mut meta.favicon, self.favicon);
        set(&mut meta.google_analytics_id, self.google_analytics_id);
    }
}

/// Shallow patch of theme tokens.
#[derive(Debug, Default, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ThemePatch {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub dark_mode: Option<bool>,
    pub font_family: Option<FontFamily>,
    pub border_radius: Option<BorderRadius>,
}

impl ThemePatch {
    pub fn apply(self, theme: &mut Theme) {
        set(&mut theme.primary_color, self.primary_color);
        set(&mut theme.secondary_color, self.secondary_color);
        set(&mut theme.accent_color, self.accent_color);
        set(&mut theme.dark_mode, self.dark_mode);
        set(&mut theme.font_family, self.font_family);
        set(&mut theme.border_radius, self.border_radius);
    }
}

/// Shallow patch of the landing headline.
#[derive(Debug, Default, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct HeroPatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub tagline_highlight: Option<String>,
    pub subtitle: Option<String>,
    pub available_for_work: Option<bool>,
    pub available_text: Option<String>,
    pub cta_text: Option<String>,
    pub show_animation: Option<bool>,
}

impl HeroPatch {
    pub fn apply(self, hero: &mut Hero) {
        set(&mut hero.name, self.name);
        set(&mut hero.title, self.title);
        set(&mut hero.tagline, self.tagline);
        set(&mut hero.tagline_highlight, self.tagline_highlight);
        set(&mut hero.subtitle, self.subtitle);
        set(&mut hero.available_for_work, self.available_for_work);
        set(&mut hero.available_text, self.available_text);
        set(&mut hero.cta_text, self.cta_text);
        set(&mut hero.show_animation, self.show_animation);
    }
}

/// Shallow patch of the profile section.
///
/// Supplying `skills` or `experiences` replaces that collection wholesale.
#[derive(Debug, Default, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct AboutPatch {
    pub initials: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub avatar_url: Option<Option<String>>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub resume_url: Option<Option<String>>,
    pub skills: Option<Vec<String>>,
    pub experiences: Option<Vec<Experience>>,
}

impl AboutPatch {
    pub fn apply(self, about: &mut About) {
        set(&mut about.initials, self.initials);
        set(&mut about.avatar_url, self.avatar_url);
        set(&mut about.full_name, self.full_name);
        set(&mut about.role, self.role);
        set(&mut about.location, self.location);
        set(&mut about.email, self.email);
        set(&mut about.bio, self.bio);
        set(&mut about.resume_url, self.resume_url);
        set(&mut about.skills, self.skills);
        set(&mut about.experiences, self.experiences);
    }
}

/// Shallow patch of the contact page.
#[derive(Debug, Default, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ContactPatch {
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub email: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub calendly_url: Option<Option<String>>,
    pub show_contact_form: Option<bool>,
    #[serde(deserialize_with = "double_option")]
    pub form_endpoint: Option<Option<String>>,
    pub location_text: Option<String>,
    pub availability_text: Option<String>,
}

impl ContactPatch {
    pub fn apply(self, contact: &mut Contact) {
        set(&mut contact.headline, self.headline);
        set(&mut contact.subheadline, self.subheadline);
        set(&mut contact.email, self.email);
        set(&mut contact.phone, self.phone);
        set(&mut contact.calendly_url, self.calendly_url);
        set(&mut contact.show_contact_form, self.show_contact_form);
        set(&mut contact.form_endpoint, self.form_endpoint);
        set(&mut contact.location_text, self.location_text);
        set(&mut contact.availability_text, self.availability_text);
    }
}

/// Shallow patch of the footer.
#[derive(Debug, Default, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FooterPatch {
    pub text: Option<String>,
    pub show_year: Option<bool>,
}

impl FooterPatch {
    pub fn apply(self, footer: &mut Footer) {
        set(&mut footer.text, self.text);
        set(&mut footer.show_year, self.show_year);
    }
}

/// Top-level patch of a whole document.
///
/// Only merges at the top level. Any group supplied here replaces the current
/// group wholesale. Use the group patches above to merge inside a group.
#[derive(Debug, Default, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct DocumentPatch {
    pub version: Option<String>,
    pub meta: Option<Meta>,
    pub theme: Option<Theme>,
    pub hero: Option<Hero>,
    pub about: Option<About>,
    pub projects: Option<Vec<Project>>,
    pub contact: Option<Contact>,
    pub social_links: Option<Vec<SocialLink>>,
    pub footer: Option<Footer>,
}

impl DocumentPatch {
    pub fn apply(self, document: &mut PortfolioDocument) {
        set(&mut document.version, self.version);
        set(&mut document.meta, self.meta);
        set(&mut document.theme, self.theme);
        set(&mut document.hero, self.hero);
        set(&mut document.about, self.about);
        set(&mut document.projects, self.projects);
        set(&mut document.contact, self.contact);
        set(&mut document.social_links, self.social_links);
        set(&mut document.footer, self.footer);
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

// Any value that is present, `null` included, becomes `Some`. Absent keys
// never reach this function and fall back to `None` through `default`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
