use std::collections::HashMap;
use std::path::{Path, PathBuf};

use git2::{Oid, Repository};

use crate::error::{ReleasyError, Result};

/// Wrapper around git2 Repository for the release workflow.
///
/// Provides the high-level operations releasy needs: locating the latest
/// tag, collecting commit history for the changelog, listing touched and
/// tracked files, and committing and tagging the release.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Creates a GitRepo for the repository containing the current directory.
    ///
    /// # Returns
    /// * `Ok(GitRepo)` - Successfully initialized repository wrapper
    /// * `Err` - If not in a git repository
    pub fn discover() -> Result<Self> {
        Self::open(Path::new("."))
    }

    /// Creates a GitRepo for the repository containing `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .map_err(|e| ReleasyError::repo(format!("Not in a git repository: {}", e)))?;
        Ok(GitRepo { repo })
    }

    /// The repository working directory.
    ///
    /// # Returns
    /// * `Err` - For bare repositories, which have no working tree to rewrite
    pub fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| ReleasyError::repo("Bare repository has no working directory"))
    }

    /// Finds the latest tag reachable from HEAD.
    ///
    /// Walks the commit history from HEAD backwards to find the most recent
    /// tagged commit. Handles both lightweight and annotated tags.
    ///
    /// # Returns
    /// * `Ok(Some(tag))` - The latest tag name found
    /// * `Ok(None)` - If no tag is reachable from HEAD
    pub fn latest_tag(&self) -> Result<Option<String>> {
        let head_oid = self.head_commit_oid()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(head_oid)?;

        // Map every tag to the commit it points at (peeling annotated tags)
        let mut tag_oids = HashMap::new();
        let tags = self.repo.tag_names(None)?;
        for tag_name in tags.iter().flatten() {
            if let Ok(tag_ref) = self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
                if let Ok(commit) = tag_ref.peel_to_commit() {
                    tag_oids.insert(commit.id(), tag_name.to_string());
                }
            }
        }

        for oid in revwalk {
            match oid {
                Ok(oid) => {
                    if let Some(tag_name) = tag_oids.get(&oid) {
                        return Ok(Some(tag_name.clone()));
                    }
                }
                Err(_) => continue,
            }
        }

        Ok(None)
    }

    /// Collects commit messages from a tag (exclusive) up to HEAD.
    ///
    /// Messages are returned newest first, the order the changelog lists
    /// them in. With no tag, every commit reachable from HEAD is returned.
    ///
    /// # Arguments
    /// * `tag_name` - Optional tag bounding the range (`tag..HEAD`)
    pub fn commits_since(&self, tag_name: Option<&str>) -> Result<Vec<String>> {
        let head_oid = self.head_commit_oid()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(head_oid)?;

        if let Some(tag_name) = tag_name {
            if let Ok(tag_ref) = self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
                if let Ok(commit) = tag_ref.peel_to_commit() {
                    revwalk.hide(commit.id())?;
                }
            }
        }

        let mut messages = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            if let Ok(commit) = self.repo.find_commit(oid) {
                if let Some(message) = commit.message() {
                    messages.push(message.trim_end().to_string());
                }
            }
        }

        Ok(messages)
    }

    /// Lists workdir-relative paths touched since a tag.
    ///
    /// Compares the tag's tree against the working directory and index;
    /// these are the candidate files for copyright-header updates.
    pub fn changed_files_since(&self, tag_name: &str) -> Result<Vec<PathBuf>> {
        let tag_ref = self
            .repo
            .find_reference(&format!("refs/tags/{}", tag_name))
            .map_err(|_| ReleasyError::tag(format!("Tag '{}' not found", tag_name)))?;
        let tree = tag_ref.peel_to_tree()?;

        let diff = self
            .repo
            .diff_tree_to_workdir_with_index(Some(&tree), None)?;

        let mut files = Vec::new();
        for delta in diff.deltas() {
            if let Some(path) = delta.new_file().path() {
                files.push(path.to_path_buf());
            }
        }
        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Lists every path in the index (workdir-relative).
    pub fn tracked_files(&self) -> Result<Vec<PathBuf>> {
        let index = self.repo.index()?;
        Ok(index
            .iter()
            .map(|entry| PathBuf::from(String::from_utf8_lossy(&entry.path).to_string()))
            .collect())
    }

    /// Stages the given workdir-relative paths and commits them on HEAD.
    pub fn stage_and_commit(&self, files: &[PathBuf], message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        for file in files {
            index.add_path(file)?;
        }
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let parent = self.repo.head()?.peel_to_commit()?;

        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        Ok(())
    }

    /// Creates an annotated tag with a message on the current HEAD commit.
    ///
    /// # Returns
    /// * `Err` - If the tag already exists or tag creation fails
    pub fn create_annotated_tag(&self, tag_name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        let signature = self.repo.signature()?;
        self.repo
            .tag(tag_name, head.as_object(), &signature, message, false)?;
        Ok(())
    }

    fn head_commit_oid(&self) -> Result<Oid> {
        Ok(self.repo.head()?.peel_to_commit()?.id())
    }
}
