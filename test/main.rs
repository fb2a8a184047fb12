// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

mod integration;

use anyhow::Result;
use git2::{Repository, RepositoryInitOptions};
use std::path::Path;

/// Local clone of a portfolio site template.
pub(crate) struct SiteFixture {
    repo: Repository,
}

impl SiteFixture {
    pub(crate) fn new(path: impl AsRef<Path>) -> Result<Self> {
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(path.as_ref(), &opts)?;

        // INVARIANT: Always provide valid name and email.
        //   - Git will complain if this is not set in CI/CD environments.
        let mut config = repo.config()?;
        config.set_str("user.name", "John Doe")?;
        config.set_str("user.email", "john@doe.com")?;

        Ok(Self { repo })
    }

    pub(crate) fn path(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| anyhow::anyhow!("site fixture has no working tree"))
    }

    pub(crate) fn stage_and_commit(
        &self,
        filename: impl AsRef<Path>,
        contents: impl AsRef<str>,
    ) -> Result<()> {
        std::fs::write(self.path()?.join(filename.as_ref()), contents.as_ref())?;

        // INVARIANT: Always use new tree produced by index after staging new entry.
        let mut index = self.repo.index()?;
        index.add_path(filename.as_ref())?;
        index.write()?;
        let tree_oid = index.write_tree()?;
        let tree = self.repo.find_tree(tree_oid)?;

        // INVARIANT: Always determine latest parent commits to append to.
        let signature = self.repo.signature()?;
        let mut parents = Vec::new();
        if let Some(parent) = self.repo.head().ok().and_then(|head| head.target()) {
            parents.push(self.repo.find_commit(parent)?);
        }
        let parents = parents.iter().collect::<Vec<_>>();

        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            format!("chore: add {:?}", filename.as_ref()).as_ref(),
            &tree,
            &parents,
        )?;

        Ok(())
    }

    pub(crate) fn committed(&self, filename: impl AsRef<Path>) -> Result<String> {
        let tree = self.repo.head()?.peel_to_commit()?.tree()?;
        let entry = tree.get_path(filename.as_ref())?;
        let blob = self.repo.find_blob(entry.id())?;
        Ok(String::from_utf8(blob.content().to_vec())?)
    }

    pub(crate) fn commit_count(&self) -> Result<usize> {
        let mut walk = self.repo.revwalk()?;
        walk.push_head()?;
        Ok(walk.count())
    }
}
