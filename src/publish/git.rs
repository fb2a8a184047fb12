// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Publishing through libgit2.
//!
//! Write the exported document into the working tree of a local clone of the
//! site template, commit it to HEAD, and optionally push HEAD to a remote.
//!
//! A freshly created remote repository may not accept pushes right away, so
//! pushing is retried a fixed number of times with a delay that grows with
//! each failed attempt.

use crate::{
    publish::{
        deploy_url, PublishError, PublishReceipt, PublishRequest, Publisher, Result,
        VIEWER_MODE_CONTENTS, VIEWER_MODE_FILE,
    },
    settings::PublishSettings,
};

use auth_git2::GitAuthenticator;
use git2::{Config, Oid, PushOptions, RemoteCallbacks, Repository, Signature};
use indicatif::{ProgressBar, ProgressStyle};
use std::{fs::write, path::Path, thread, time::Duration};
use tracing::{debug, info, instrument, warn};

/// Publisher backed by a local git repository.
pub struct Git2Publisher {
    repository: Repository,
    settings: PublishSettings,
}

impl Git2Publisher {
    /// Construct new publisher.
    pub fn new(repository: Repository, settings: PublishSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Open existing repository at target path.
    ///
    /// # Errors
    ///
    /// - Return [`PublishError::Git2`] if repository cannot be opened.
    pub fn open(path: impl AsRef<Path>, settings: PublishSettings) -> Result<Self> {
        let repository = Repository::open(path.as_ref())?;
        Ok(Self::new(repository, settings))
    }

    fn write_and_stage(
        &self,
        index: &mut git2::Index,
        relative: &Path,
        contents: &str,
    ) -> Result<()> {
        let workdir = self
            .repository
            .workdir()
            .ok_or_else(|| PublishError::BareRepository(self.repository.path().to_path_buf()))?;
        let full_path = workdir.join(relative);

        // INVARIANT: Parent directories of target file must exist.
        if let Some(parent) = full_path.parent() {
            mkdirp::mkdirp(parent).map_err(|error| PublishError::Write {
                path: parent.to_path_buf(),
                source: error,
            })?;
        }

        write(&full_path, contents).map_err(|error| PublishError::Write {
            path: full_path.clone(),
            source: error,
        })?;
        index.add_path(relative)?;

        Ok(())
    }

    #[instrument(skip(self, document), level = "debug")]
    fn commit(&self, document: &str, message: &str) -> Result<(Oid, bool)> {
        let mut index = self.repository.index()?;
        self.write_and_stage(&mut index, &self.settings.config_path, document)?;
        if self.settings.viewer_mode {
            self.write_and_stage(&mut index, Path::new(VIEWER_MODE_FILE), VIEWER_MODE_CONTENTS)?;
        }
        index.write()?;

        let tree_oid = index.write_tree()?;
        let tree = self.repository.find_tree(tree_oid)?;

        // INVARIANT: Always determine latest parent commit to append to.
        let parent = match self.repository.head().ok().and_then(|head| head.target()) {
            Some(oid) => Some(self.repository.find_commit(oid)?),
            None => None,
        };

        if let Some(parent) = &parent {
            if parent.tree_id() == tree_oid {
                info!("document unchanged since {}", parent.id());
                return Ok((parent.id(), false));
            }
        }

        let signature = self
            .repository
            .signature()
            .or_else(|_| Signature::now("Folio", "folio@localhost"))?;
        let parents = parent.iter().collect::<Vec<_>>();
        let oid = self.repository.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;
        info!("commit {oid}: {message}");

        Ok((oid, true))
    }

    #[instrument(skip(self), level = "debug")]
    fn push(&self) -> Result<()> {
        let head = self.repository.head()?;
        let branch = head.name().ok_or(PublishError::DetachedHead)?;
        if !head.is_branch() {
            return Err(PublishError::DetachedHead);
        }
        let refspec = format!("{branch}:{branch}");

        let config = self.repository.config()?;
        let authenticator = GitAuthenticator::default();
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{elapsed_precise:.green}  {msg:<50}  [{wide_bar:.yellow/blue}]",
        )?
        .progress_chars("-Cco.");
        bar.set_style(style);
        bar.set_message(format!("push {} to {}", branch, self.settings.remote));

        let attempts = self.settings.attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.push_once(&refspec, &authenticator, &config, &bar) {
                Ok(()) => {
                    bar.finish_and_clear();
                    info!("pushed {branch} to {}", self.settings.remote);
                    return Ok(());
                }
                Err(error) if attempt < attempts => {
                    let delay = Duration::from_millis(self.settings.backoff_ms * u64::from(attempt));
                    warn!("push attempt {attempt} failed: {error}, retry in {delay:?}");
                    thread::sleep(delay);
                }
                Err(error) => {
                    bar.abandon();
                    return Err(PublishError::PushExhausted {
                        attempts: attempt,
                        source: error,
                    });
                }
            }
        }
    }

    fn push_once(
        &self,
        refspec: &str,
        authenticator: &GitAuthenticator,
        config: &Config,
        bar: &ProgressBar,
    ) -> std::result::Result<(), git2::Error> {
        let mut remote = self.repository.find_remote(&self.settings.remote)?;

        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(authenticator.credentials(config));
        callbacks.push_transfer_progress(|current, total, _bytes| {
            bar.set_length(total as u64);
            bar.set_position(current as u64);
        });
        callbacks.push_update_reference(|reference, status| match status {
            Some(message) => Err(git2::Error::from_str(&format!(
                "remote rejected {reference}: {message}"
            ))),
            None => Ok(()),
        });

        let mut options = PushOptions::new();
        options.remote_callbacks(callbacks);
        remote.push(&[refspec], Some(&mut options))
    }

    fn remote_url(&self) -> Option<String> {
        self.repository
            .find_remote(&self.settings.remote)
            .ok()
            .and_then(|remote| remote.url().map(ToString::to_string))
    }
}

impl Publisher for Git2Publisher {
    fn publish(&self, request: &PublishRequest<'_>) -> Result<PublishReceipt> {
        // INVARIANT: Only ever commit a parseable document.
        serde_json::from_str::<serde_json::Value>(request.document)
            .map_err(PublishError::InvalidDocument)?;

        debug!(
            "publish document to {:?}",
            self.settings.config_path.display()
        );
        let (commit, changed) = self.commit(request.document, request.message)?;
        if request.push {
            self.push()?;
        }

        let repository_url = self.remote_url();
        let deploy_url = repository_url.as_deref().map(deploy_url);

        Ok(PublishReceipt {
            commit: commit.to_string(),
            changed,
            repository_url,
            deploy_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{document::PortfolioDocument, exchange::export_document};
    use git2::RepositoryInitOptions;
    use pretty_assertions::assert_eq;
    use sealed_test::prelude::*;
    use std::env::current_dir;

    fn init_site(path: &str) -> anyhow::Result<Repository> {
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repository = Repository::init_opts(path, &opts)?;

        // INVARIANT: Always provide valid name and email.
        let mut config = repository.config()?;
        config.set_str("user.name", "John Doe")?;
        config.set_str("user.email", "john@doe.com")?;

        Ok(repository)
    }

    fn committed_file(repository: &Repository, path: &str) -> anyhow::Result<String> {
        let tree = repository.head()?.peel_to_commit()?.tree()?;
        let entry = tree.get_path(Path::new(path))?;
        let blob = repository.find_blob(entry.id())?;
        Ok(String::from_utf8(blob.content().to_vec())?)
    }

    fn request(document: &str) -> PublishRequest<'_> {
        PublishRequest {
            document,
            message: "Update portfolio configuration",
            push: false,
        }
    }

    #[sealed_test]
    fn publish_commits_document_and_viewer_marker() -> anyhow::Result<()> {
        let repository = init_site("site")?;
        let publisher = Git2Publisher::new(repository, PublishSettings::default());
        let document = export_document(&PortfolioDocument::default())?;

        let receipt = publisher.publish(&request(&document))?;
        assert!(receipt.changed);
        assert_eq!(receipt.repository_url, None);
        assert_eq!(receipt.deploy_url, None);

        let repository = Repository::open("site")?;
        assert_eq!(committed_file(&repository, "src/portfolio.config.json")?, document);
        assert_eq!(committed_file(&repository, ".env")?, VIEWER_MODE_CONTENTS);

        Ok(())
    }

    #[sealed_test]
    fn publish_unchanged_document_reuses_commit() -> anyhow::Result<()> {
        let repository = init_site("site")?;
        let publisher = Git2Publisher::new(repository, PublishSettings::default());
        let document = export_document(&PortfolioDocument::default())?;

        let first = publisher.publish(&request(&document))?;
        let second = publisher.publish(&request(&document))?;
        assert!(!second.changed);
        assert_eq!(first.commit, second.commit);

        Ok(())
    }

    #[sealed_test]
    fn publish_refuses_malformed_document() -> anyhow::Result<()> {
        let repository = init_site("site")?;
        let publisher = Git2Publisher::new(repository, PublishSettings::default());

        let result = publisher.publish(&request("{ not json"));
        assert!(matches!(result, Err(PublishError::InvalidDocument(_))));

        let repository = Repository::open("site")?;
        assert!(repository.head().is_err());

        Ok(())
    }

    #[sealed_test]
    fn publish_pushes_to_remote() -> anyhow::Result<()> {
        let remote_path = current_dir()?.join("remote.git");
        Repository::init_bare(&remote_path)?;
        let repository = init_site("site")?;
        let remote_url = remote_path.to_string_lossy().into_owned();
        repository.remote("origin", &remote_url)?;

        let publisher = Git2Publisher::new(repository, PublishSettings::default());
        let document = export_document(&PortfolioDocument::default())?;
        let receipt = publisher.publish(&PublishRequest {
            push: true,
            ..request(&document)
        })?;

        assert_eq!(receipt.repository_url.as_deref(), Some(remote_url.as_str()));
        assert_eq!(receipt.deploy_url, Some(deploy_url(&remote_url)));

        let remote = Repository::open_bare(&remote_path)?;
        let pushed = remote.find_reference("refs/heads/main")?.target();
        assert_eq!(pushed.map(|oid| oid.to_string()), Some(receipt.commit));

        Ok(())
    }

    #[sealed_test]
    fn push_gives_up_after_configured_attempts() -> anyhow::Result<()> {
        let repository = init_site("site")?;
        let settings = PublishSettings {
            attempts: 2,
            backoff_ms: 0,
            ..PublishSettings::default()
        };
        let publisher = Git2Publisher::new(repository, settings);
        let document = export_document(&PortfolioDocument::default())?;

        let result = publisher.publish(&PublishRequest {
            push: true,
            ..request(&document)
        });
        assert!(matches!(
            result,
            Err(PublishError::PushExhausted { attempts: 2, .. })
        ));

        Ok(())
    }
}
