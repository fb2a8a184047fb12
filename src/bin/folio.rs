// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use folio::{
    collection::{self, Direction, Identified},
    document::{Experience, Platform, Project, SocialLink},
    exchange::ImportMode,
    merge::parse_partial,
    patch::AboutPatch,
    path::{default_settings_file, default_snapshot_file},
    publish::{Git2Publisher, PublishRequest, Publisher},
    FileStorage, Loader, Settings, Store,
};

use anyhow::{bail, Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{Confirm, InquireError, Text};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::{
    fs::{read_to_string, write},
    path::PathBuf,
    process::exit,
};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "folio [options] <folio-command>",
    subcommand_help_heading = "Commands",
    version
)]
struct Cli {
    /// Settings file to use instead of the default one.
    #[arg(short, long, value_name = "path")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Single line of an editing session.
#[derive(Debug, Clone, Parser)]
#[command(
    no_binary_name = true,
    disable_version_flag = true,
    subcommand_help_heading = "Commands"
)]
struct SessionLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Print whole document, or one section of it.
    #[command(override_usage = "folio show [<section>]")]
    Show(ShowOptions),

    /// Shallow-merge JSON object into a section.
    #[command(override_usage = "folio edit <section> <json>...")]
    Edit(EditOptions),

    /// Manage showcased projects.
    #[command(subcommand)]
    Project(EntryAction),

    /// Manage social links.
    #[command(subcommand)]
    Social(EntryAction),

    /// Manage work history.
    #[command(subcommand)]
    Experience(EntryAction),

    /// Manage skill list.
    #[command(subcommand)]
    Skill(SkillAction),

    /// List supported social platforms.
    Platforms,

    /// Reset document to defaults.
    Reset(ResetOptions),

    /// Revert most recent change of this session.
    Undo,

    /// Replace document with contents of a file.
    #[command(override_usage = "folio import [options] <file>")]
    Import(ImportOptions),

    /// Write document as pretty-printed JSON.
    #[command(override_usage = "folio export [<file>]")]
    Export(ExportOptions),

    /// Commit document into site repository.
    Publish(PublishOptions),

    /// Run commands interactively, keeping undo history between them.
    Session,
}

#[derive(Parser, Clone, Debug)]
struct ShowOptions {
    /// Section to print.
    #[arg(value_enum, value_name = "section")]
    pub section: Option<Section>,
}

#[derive(Parser, Clone, Debug)]
struct EditOptions {
    /// Section to edit.
    #[arg(value_enum, value_name = "section")]
    pub section: Section,

    /// JSON to merge. Collections take a JSON array that replaces them.
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "json"
    )]
    pub json: Vec<String>,
}

#[derive(Debug, Clone, Subcommand)]
enum EntryAction {
    /// Add new entry, optionally filled from a JSON object.
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "json")]
        json: Vec<String>,
    },

    /// Remove entry.
    Remove {
        #[arg(value_name = "id")]
        id: String,

        /// Do not ask for confirmation.
        #[arg(short, long)]
        yes: bool,
    },

    /// Swap entry with its neighbour.
    Move {
        #[arg(value_name = "id")]
        id: String,

        #[arg(value_enum, value_name = "direction")]
        direction: MoveDirection,
    },

    /// Shallow-merge JSON object into entry.
    Edit {
        #[arg(value_name = "id")]
        id: String,

        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "json"
        )]
        json: Vec<String>,
    },
}

#[derive(Debug, Clone, Subcommand)]
enum SkillAction {
    /// Add skill to end of list.
    Add {
        #[arg(required = true, value_name = "skill")]
        skill: Vec<String>,
    },

    /// Remove skill from list.
    Remove {
        #[arg(required = true, value_name = "skill")]
        skill: Vec<String>,
    },
}

#[derive(Parser, Clone, Debug)]
struct ResetOptions {
    /// Do not ask for confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Parser, Clone, Debug)]
struct ImportOptions {
    /// Merge file over defaults instead of requiring a complete document.
    #[arg(short, long)]
    pub merge: bool,

    /// File to import.
    #[arg(value_name = "file")]
    pub file: PathBuf,
}

#[derive(Parser, Clone, Debug)]
struct ExportOptions {
    /// File to write to instead of standard output.
    #[arg(value_name = "file")]
    pub file: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug)]
struct PublishOptions {
    /// Push commit to remote.
    #[arg(short, long)]
    pub push: bool,

    /// Commit message.
    #[arg(
        short,
        long,
        value_name = "message",
        default_value = "Update portfolio configuration"
    )]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Section {
    Meta,
    Theme,
    Hero,
    About,
    Projects,
    Contact,
    SocialLinks,
    Footer,
}

impl Section {
    fn key(self) -> &'static str {
        match self {
            Self::Meta => "meta",
            Self::Theme => "theme",
            Self::Hero => "hero",
            Self::About => "about",
            Self::Projects => "projects",
            Self::Contact => "contact",
            Self::SocialLinks => "socialLinks",
            Self::Footer => "footer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MoveDirection {
    Up,
    Down,
}

impl From<MoveDirection> for Direction {
    fn from(direction: MoveDirection) -> Self {
        match direction {
            MoveDirection::Up => Direction::Up,
            MoveDirection::Down => Direction::Down,
        }
    }
}

fn main() {
    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .without_time();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    if let Err(error) = run() {
        error!("{error:?}");
        exit(1);
    }

    exit(0)
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings_file = match cli.settings {
        Some(path) => path,
        None => default_settings_file()?,
    };
    let settings = Settings::load(settings_file)?;
    let mut store = open_store(&settings)?;

    match cli.command {
        Command::Session => run_session(&mut store, &settings)?,
        command => execute(&mut store, &settings, command)?,
    }

    store.close()?;
    Ok(())
}

fn open_store(settings: &Settings) -> Result<Store> {
    let snapshot = match &settings.store.snapshot {
        Some(path) => path.clone(),
        None => default_snapshot_file()?,
    };

    let mut loader = Loader::new().with_policy(settings.seed.policy);
    if let Some(path) = &settings.seed.path {
        match read_to_string(path) {
            Ok(seed) => loader = loader.with_seed(seed),
            Err(error) => warn!("cannot read seed document {path:?}: {error}"),
        }
    }

    let store = Store::open(&loader, FileStorage::new(snapshot))
        .with_history_capacity(settings.store.history_capacity);
    Ok(store)
}

fn execute(store: &mut Store, settings: &Settings, command: Command) -> Result<()> {
    match command {
        Command::Show(opts) => run_show(store, opts),
        Command::Edit(opts) => run_edit(store, opts),
        Command::Project(action) => run_project(store, action),
        Command::Social(action) => run_social(store, action),
        Command::Experience(action) => run_experience(store, action),
        Command::Skill(action) => run_skill(store, action),
        Command::Platforms => run_platforms(),
        Command::Reset(opts) => run_reset(store, opts),
        Command::Undo => run_undo(store),
        Command::Import(opts) => run_import(store, opts),
        Command::Export(opts) => run_export(store, opts),
        Command::Publish(opts) => run_publish(store, settings, opts),
        Command::Session => {
            warn!("already in an editing session");
            Ok(())
        }
    }
}

fn run_session(store: &mut Store, settings: &Settings) -> Result<()> {
    info!("start editing session, enter \"help\" for commands or \"quit\" to leave");
    info!("undo keeps up to {} changes", store.history_capacity());
    loop {
        let line = match Text::new("folio>").prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(error) => return Err(error.into()),
        };

        // JSON arguments are rejoined with single spaces.
        let words = line.split_whitespace().collect::<Vec<_>>();
        match words.as_slice() {
            [] => continue,
            ["quit" | "exit"] => break,
            _ => {}
        }

        let command = match SessionLine::try_parse_from(words) {
            Ok(line) => line.command,
            Err(error) => {
                error.print()?;
                continue;
            }
        };

        if let Err(error) = execute(store, settings, command) {
            error!("{error:?}");
        }
    }

    Ok(())
}

fn run_show(store: &Store, opts: ShowOptions) -> Result<()> {
    let Some(section) = opts.section else {
        println!("{}", store.export()?);
        return Ok(());
    };

    let document = serde_json::to_value(store.document())?;
    let value = document.get(section.key()).cloned().unwrap_or(Value::Null);
    println!("{}", serde_json::to_string_pretty(&value)?);

    Ok(())
}

fn run_edit(store: &mut Store, opts: EditOptions) -> Result<()> {
    let text = opts.json.join(" ");
    match opts.section {
        Section::Meta => store.update_meta(serde_json::from_str(&text)?),
        Section::Theme => store.update_theme(serde_json::from_str(&text)?),
        Section::Hero => store.update_hero(serde_json::from_str(&text)?),
        Section::About => store.update_about(serde_json::from_str(&text)?),
        Section::Projects => store.update_projects(serde_json::from_str(&text)?),
        Section::Contact => store.update_contact(serde_json::from_str(&text)?),
        Section::SocialLinks => store.update_social_links(serde_json::from_str(&text)?),
        Section::Footer => store.update_footer(serde_json::from_str(&text)?),
    }
    info!("edit {}", opts.section.key());

    Ok(())
}

fn run_project(store: &mut Store, action: EntryAction) -> Result<()> {
    let projects = &store.document().projects;
    if let Some(projects) = edit_entries(projects, action, Project::draft, Placement::Front)? {
        store.update_projects(projects);
    }

    Ok(())
}

fn run_social(store: &mut Store, action: EntryAction) -> Result<()> {
    let links = &store.document().social_links;
    if let Some(links) = edit_entries(links, action, SocialLink::draft, Placement::Back)? {
        store.update_social_links(links);
    }

    Ok(())
}

fn run_experience(store: &mut Store, action: EntryAction) -> Result<()> {
    let year = chrono::Local::now().year().to_string();
    let experiences = &store.document().about.experiences;
    let draft = || Experience::draft(year);
    if let Some(experiences) = edit_entries(experiences, action, draft, Placement::Front)? {
        store.update_about(AboutPatch {
            experiences: Some(experiences),
            ..AboutPatch::default()
        });
    }

    Ok(())
}

fn run_skill(store: &mut Store, action: SkillAction) -> Result<()> {
    let skills = &store.document().about.skills;
    let skills = match action {
        SkillAction::Add { skill } => collection::add_skill(skills, &skill.join(" ")),
        SkillAction::Remove { skill } => collection::remove_skill(skills, &skill.join(" ")),
    };

    if skills == store.document().about.skills {
        info!("skill list unchanged");
        return Ok(());
    }

    store.update_about(AboutPatch {
        skills: Some(skills),
        ..AboutPatch::default()
    });

    Ok(())
}

fn run_platforms() -> Result<()> {
    for platform in Platform::ALL {
        println!("{:<12}{}", platform.as_str(), platform.label());
    }

    Ok(())
}

fn run_reset(store: &mut Store, opts: ResetOptions) -> Result<()> {
    if !confirmed(opts.yes, "Reset portfolio to defaults?")? {
        return Ok(());
    }

    store.reset();
    Ok(())
}

fn run_undo(store: &mut Store) -> Result<()> {
    if !store.undo() {
        info!("nothing to undo");
    }

    Ok(())
}

fn run_import(store: &mut Store, opts: ImportOptions) -> Result<()> {
    let text = read_to_string(&opts.file)
        .with_context(|| format!("failed to read {:?}", opts.file.display()))?;
    let mode = if opts.merge {
        ImportMode::Merge
    } else {
        ImportMode::Replace
    };
    store.import_text(&text, mode)?;
    info!("import {:?} using {mode}", opts.file.display());

    Ok(())
}

fn run_export(store: &Store, opts: ExportOptions) -> Result<()> {
    let text = store.export()?;
    match opts.file {
        Some(path) => {
            write(&path, text).with_context(|| format!("failed to write {:?}", path.display()))?;
            info!("export to {:?}", path.display());
        }
        None => println!("{text}"),
    }

    Ok(())
}

fn run_publish(store: &Store, settings: &Settings, opts: PublishOptions) -> Result<()> {
    let Some(repository) = &settings.publish.repository else {
        bail!("no site repository to publish to, set `repository` under [publish] in settings");
    };

    let document = store.export()?;
    let publisher = Git2Publisher::open(repository, settings.publish.clone())?;
    let receipt = publisher.publish(&PublishRequest {
        document: &document,
        message: &opts.message,
        push: opts.push,
    })?;

    info!("published commit {}", receipt.commit);
    if let Some(url) = receipt.deploy_url {
        info!("deploy site at {url}");
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Front,
    Back,
}

fn edit_entries<T>(
    entries: &[T],
    action: EntryAction,
    draft: impl FnOnce() -> T,
    placement: Placement,
) -> Result<Option<Vec<T>>>
where
    T: Identified + Clone + Serialize + DeserializeOwned,
{
    let entries = match action {
        EntryAction::Add { json } => {
            let entry = if json.is_empty() {
                draft()
            } else {
                collection::fill_draft(draft(), &json_object(&json)?)?
            };
            info!("add entry {}", entry.id());
            match placement {
                Placement::Front => collection::prepend(entries, entry),
                Placement::Back => collection::append(entries, entry),
            }
        }
        EntryAction::Remove { id, yes } => {
            ensure_known(entries, &id)?;
            if !confirmed(yes, &format!("Delete entry {id}?"))? {
                return Ok(None);
            }
            collection::remove(entries, &id)
        }
        EntryAction::Move { id, direction } => {
            ensure_known(entries, &id)?;
            collection::shift(entries, &id, direction.into())
        }
        EntryAction::Edit { id, json } => {
            ensure_known(entries, &id)?;
            collection::patch_element(entries, &id, &json_object(&json)?)?
        }
    };

    Ok(Some(entries))
}

fn ensure_known<T: Identified>(entries: &[T], id: &str) -> Result<()> {
    if collection::find(entries, id).is_none() {
        bail!("no entry with id {id:?}");
    }

    Ok(())
}

fn json_object(words: &[String]) -> Result<Map<String, Value>> {
    match parse_partial(&words.join(" "))? {
        Value::Object(map) => Ok(map),
        _ => bail!("expected a JSON object"),
    }
}

fn confirmed(yes: bool, message: &str) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    Ok(Confirm::new(message).with_default(false).prompt()?)
}
