// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Portfolio document layout.
//!
//! Specify the canonical layout of a __portfolio document__, i.e., the single
//! configuration object that describes every section of a generated portfolio
//! site. Serialization follows the camelCase JSON layout that the site
//! template expects. File I/O is left to the caller to figure out.
//!
//! # General Layout
//!
//! A portfolio document is composed of flat __groups__ (`meta`, `theme`,
//! `hero`, `contact`, `footer`, and the scalar part of `about`) and ordered
//! __collections__ (`projects`, `socialLinks`, `about.skills`, and
//! `about.experiences`). Groups are merged field-by-field against defaults,
//! while collections are always replaced wholesale.
//!
//! Every record keeps any keys it does not recognize in an `extra` map, so
//! documents written by newer templates survive a load and export untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Image shown for projects that do not provide one.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1517694712202-14dd9538aa97?auto=format&fit=crop&w=600&q=75";

/// Keys a record does not know about, kept verbatim.
pub type Extra = Map<String, Value>;

/// Generate a new entity identifier.
///
/// Identifiers are random, so an identifier freed by deletion is never handed
/// out again.
pub fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Root portfolio document.
///
/// Always fully populated. Partial or legacy input must go through
/// [`merge_over_defaults`](crate::merge::merge_over_defaults) before it can
/// become one of these.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDocument {
    /// Informational document version.
    pub version: String,

    /// Site-level metadata.
    pub meta: Meta,

    /// Color, typography, and shape tokens.
    pub theme: Theme,

    /// Landing headline.
    pub hero: Hero,

    /// Profile, skills, and work history.
    pub about: About,

    /// Showcased projects, in display order.
    pub projects: Vec<Project>,

    /// Contact page.
    pub contact: Contact,

    /// Social links, in display order.
    pub social_links: Vec<SocialLink>,

    /// Page footer.
    pub footer: Footer,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for PortfolioDocument {
    fn default() -> Self {
        Self {
            version: "1.0.0".into(),
            meta: Meta::default(),
            theme: Theme::default(),
            hero: Hero::default(),
            about: About::default(),
            projects: vec![Project {
                id: "1".into(),
                title: "Sample Project".into(),
                description: "A sample project showcasing my skills in web development.".into(),
                tags: vec!["React".into(), "Node.js".into(), "MongoDB".into()],
                image: PLACEHOLDER_IMAGE.into(),
                demo_url: Some("https://example.com".into()),
                code_url: Some("https://github.com/example".into()),
                extra: Extra::new(),
            }],
            contact: Contact::default(),
            social_links: vec![
                SocialLink::new("1", Platform::Github, "https://github.com", "GitHub"),
                SocialLink::new("2", Platform::Linkedin, "https://linkedin.com", "LinkedIn"),
                SocialLink::new("3", Platform::Twitter, "https://twitter.com", "Twitter"),
            ],
            footer: Footer::default(),
            extra: Extra::new(),
        }
    }
}

/// Site-level metadata.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub site_title: String,
    pub site_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_analytics_id: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            site_title: "My Portfolio".into(),
            site_description: "Welcome to my portfolio - showcasing my work and skills".into(),
            og_image: None,
            favicon: None,
            google_analytics_id: None,
            extra: Extra::new(),
        }
    }
}

/// Visual tokens consumed by the site template.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub dark_mode: bool,
    pub font_family: FontFamily,
    pub border_radius: BorderRadius,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#3B82F6".into(),
            secondary_color: "#8B5CF6".into(),
            accent_color: "#10B981".into(),
            dark_mode: true,
            font_family: FontFamily::default(),
            border_radius: BorderRadius::default(),
            extra: Extra::new(),
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Inter,
    Poppins,
    Roboto,
    Playfair,
    Montserrat,
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderRadius {
    None,
    Sm,
    Md,
    Lg,
    Xl,
    #[default]
    #[serde(rename = "2xl")]
    TwoXl,
    #[serde(rename = "3xl")]
    ThreeXl,
}

/// Landing headline.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub name: String,
    pub title: String,
    pub tagline: String,
    pub tagline_highlight: String,
    pub subtitle: String,
    pub available_for_work: bool,
    pub available_text: String,
    pub cta_text: String,
    pub show_animation: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            name: "Your Name".into(),
            title: "Full Stack Developer".into(),
            tagline: "Crafting Digital".into(),
            tagline_highlight: "Experiences".into(),
            subtitle: "Specializing in modern web applications with React, TypeScript, and \
                       cutting-edge design systems."
                .into(),
            available_for_work: true,
            available_text: "Available for work".into(),
            cta_text: "View My Work".into(),
            show_animation: true,
            extra: Extra::new(),
        }
    }
}

/// Profile section.
///
/// Scalar fields merge like any other group. The `skills` and `experiences`
/// collections are replaced wholesale, never merged element-by-element.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub initials: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub full_name: String,
    pub role: String,
    pub location: String,
    pub email: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    pub skills: Vec<String>,
    pub experiences: Vec<Experience>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for About {
    fn default() -> Self {
        Self {
            initials: "YN".into(),
            avatar_url: None,
            full_name: "Your Name".into(),
            role: "Full Stack Developer".into(),
            location: "Your City, Country".into(),
            email: "your@email.com".into(),
            bio: "Full Stack Developer passionate about creating exceptional digital experiences"
                .into(),
            resume_url: None,
            skills: ["React", "TypeScript", "Node.js", "Python", "AWS", "Docker"]
                .into_iter()
                .map(String::from)
                .collect(),
            experiences: vec![Experience {
                id: "1".into(),
                title: "Software Developer".into(),
                company: "Company Name".into(),
                company_url: Some("https://example.com".into()),
                start_date: "2023".into(),
                end_date: "Present".into(),
                current: true,
                highlights: vec![
                    "Built and maintained web applications".into(),
                    "Collaborated with cross-functional teams".into(),
                ],
                color: ExperienceColor::Blue,
                extra: Extra::new(),
            }],
            extra: Extra::new(),
        }
    }
}

/// Single position in the work history.
///
/// Missing fields in externally supplied entries fall back to empty values,
/// so sparse generated data still deserializes.
#[derive(Debug, Default, PartialEq, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_url: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub highlights: Vec<String>,
    pub color: ExperienceColor,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Experience {
    /// Fresh position as created by the editor's "add" action.
    pub fn draft(start_year: impl Into<String>) -> Self {
        Self {
            id: fresh_id(),
            title: "New Position".into(),
            company: "Company Name".into(),
            company_url: Some(String::new()),
            start_date: start_year.into(),
            end_date: "Present".into(),
            current: true,
            highlights: vec!["Add your accomplishments here".into()],
            color: ExperienceColor::Blue,
            extra: Extra::new(),
        }
    }

    /// End date as it should be displayed.
    ///
    /// Current positions always read "Present", whatever `end_date` holds.
    pub fn display_end_date(&self) -> &str {
        if self.current {
            "Present"
        } else {
            self.end_date.as_str()
        }
    }
}

/// Display palette for experience entries.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceColor {
    #[default]
    Blue,
    Purple,
    Green,
    Orange,
    Pink,
}

/// Showcased project.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_url: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            description: String::new(),
            tags: Vec::new(),
            image: PLACEHOLDER_IMAGE.into(),
            demo_url: None,
            code_url: None,
            extra: Extra::new(),
        }
    }
}

impl Project {
    /// Fresh project as created by the editor's "add" action.
    pub fn draft() -> Self {
        Self {
            id: fresh_id(),
            title: "New Project".into(),
            description: "Describe your project here...".into(),
            tags: vec!["React".into(), "TypeScript".into()],
            image: PLACEHOLDER_IMAGE.into(),
            demo_url: Some(String::new()),
            code_url: Some(String::new()),
            extra: Extra::new(),
        }
    }

    /// Image to display, falling back to [`PLACEHOLDER_IMAGE`] when blank.
    pub fn image_url(&self) -> &str {
        if self.image.trim().is_empty() {
            PLACEHOLDER_IMAGE
        } else {
            self.image.as_str()
        }
    }
}

/// Link to one of the user's external profiles.
#[derive(Debug, Default, PartialEq, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLink {
    pub id: String,
    pub platform: Platform,
    pub url: String,
    pub label: String,
    #[serde(flatten)]
    pub extra: Extra,
}

impl SocialLink {
    /// Construct new social link.
    pub fn new(
        id: impl Into<String>,
        platform: Platform,
        url: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            platform,
            url: url.into(),
            label: label.into(),
            extra: Extra::new(),
        }
    }

    /// Fresh link as created by the editor's "add" action.
    pub fn draft() -> Self {
        Self::new(fresh_id(), Platform::Website, "", "My Website")
    }
}

/// Closed set of supported social platforms.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Github,
    Linkedin,
    Twitter,
    Resume,
    #[default]
    Website,
    Youtube,
    Instagram,
    Dribbble,
    Behance,
    Medium,
}

impl Platform {
    pub const ALL: [Platform; 10] = [
        Self::Github,
        Self::Linkedin,
        Self::Twitter,
        Self::Resume,
        Self::Website,
        Self::Youtube,
        Self::Instagram,
        Self::Dribbble,
        Self::Behance,
        Self::Medium,
    ];

    /// Wire name of platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Linkedin => "linkedin",
            Self::Twitter => "twitter",
            Self::Resume => "resume",
            Self::Website => "website",
            Self::Youtube => "youtube",
            Self::Instagram => "instagram",
            Self::Dribbble => "dribbble",
            Self::Behance => "behance",
            Self::Medium => "medium",
        }
    }

    /// Human readable name of platform.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Github => "GitHub",
            Self::Linkedin => "LinkedIn",
            Self::Twitter => "Twitter/X",
            Self::Resume => "Resume",
            Self::Website => "Website",
            Self::Youtube => "YouTube",
            Self::Instagram => "Instagram",
            Self::Dribbble => "Dribbble",
            Self::Behance => "Behance",
            Self::Medium => "Medium",
        }
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let wanted = data.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_str() == wanted)
            .ok_or_else(|| UnknownPlatform(data.into()))
    }
}

impl Display for Platform {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(self.as_str())
    }
}

/// Platform name outside of the supported set.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown social platform {0:?}")]
pub struct UnknownPlatform(pub String);

/// Contact page.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub headline: String,
    pub subheadline: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendly_url: Option<String>,
    pub show_contact_form: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_endpoint: Option<String>,
    pub location_text: String,
    pub availability_text: String,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            headline: "Get in Touch".into(),
            subheadline: "Have a project in mind? Let's build something amazing together.".into(),
            email: "your@email.com".into(),
            phone: None,
            calendly_url: None,
            show_contact_form: true,
            form_endpoint: None,
            location_text: "Your Location".into(),
            availability_text: "Available for Remote Work".into(),
            extra: Extra::new(),
        }
    }
}

/// Page footer.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub text: String,
    pub show_year: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            text: "Built with ❤️".into(),
            show_year: true,
            extra: Extra::new(),
        }
    }
}
