use std::cell::Cell;
use std::path::{Path, PathBuf};

use git2::{Cred, CredentialType, PushOptions, RemoteCallbacks, Repository as Git2Repo};
use log::*;

use crate::error::{ReleaseError, Result};

/// Maximum number of times the credentials callback may be asked per push
const MAX_CREDENTIAL_ATTEMPTS: usize = 4;

/// How release tags are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagStyle {
    #[default]
    Lightweight,
    Annotated,
}

impl TagStyle {
    pub fn from_annotated(annotated: bool) -> Self {
        if annotated {
            TagStyle::Annotated
        } else {
            TagStyle::Lightweight
        }
    }
}

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    tag_style: TagStyle,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository {
            repo,
            tag_style: TagStyle::default(),
        })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo,
            tag_style: TagStyle::default(),
        }
    }

    pub fn with_tag_style(mut self, tag_style: TagStyle) -> Self {
        self.tag_style = tag_style;
        self
    }

    /// Root of the work tree
    pub fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| ReleaseError::config("Repository is bare; a work tree is required"))
    }

    /// Converts a path to the work-tree-relative form the index expects.
    fn index_path(&self, path: &Path) -> Result<PathBuf> {
        if path.is_relative() {
            return Ok(path.to_path_buf());
        }

        let workdir = self.workdir()?;
        if let Ok(relative) = path.strip_prefix(workdir) {
            return Ok(relative.to_path_buf());
        }

        // Symlinked temp dirs and the like
        let canonical_path = path.canonicalize()?;
        let canonical_workdir = workdir.canonicalize()?;
        canonical_path
            .strip_prefix(&canonical_workdir)
            .map(Path::to_path_buf)
            .map_err(|_| {
                ReleaseError::config(format!(
                    "{} is outside the work tree {}",
                    path.display(),
                    workdir.display()
                ))
            })
    }

    /// Resolves `master` or `1.4.10` to `refs/heads/master` or `refs/tags/1.4.10`.
    fn full_reference_name(&self, reference: &str) -> Result<String> {
        if reference.starts_with("refs/") {
            return Ok(reference.to_string());
        }

        let resolved = self
            .repo
            .resolve_reference_from_short_name(reference)
            .map_err(|e| ReleaseError::remote(format!("Cannot resolve '{}': {}", reference, e)))?;

        resolved
            .name()
            .map(str::to_string)
            .ok_or_else(|| ReleaseError::remote(format!("Reference '{}' is not UTF-8", reference)))
    }
}

impl super::Repository for Git2Repository {
    fn add(&self, path: &Path) -> Result<()> {
        let relative = self.index_path(path)?;
        let mut index = self.repo.index()?;
        index.add_path(&relative)?;
        index.write()?;

        debug!("staged {}", relative.display());
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                None
            }
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        debug!("created commit {}", oid);
        Ok(oid.to_string())
    }

    fn push(&self, remote_name: &str, reference: &str) -> Result<()> {
        let refname = self.full_reference_name(reference)?;

        let mut remote = self.repo.find_remote(remote_name).map_err(|_| {
            ReleaseError::remote(format!("No remote named '{}' found", remote_name))
        })?;

        let attempts = Cell::new(0usize);
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            attempts.set(attempts.get() + 1);
            if attempts.get() > MAX_CREDENTIAL_ATTEMPTS {
                return Err(git2::Error::from_str("no usable credentials"));
            }

            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(CredentialType::SSH_KEY) {
                if attempts.get() == 1 {
                    if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                        return Ok(cred);
                    }
                }

                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let key_path = home.join(".ssh").join(key);
                        if key_path.exists() {
                            if let Ok(cred) = Cred::ssh_key(username, None, &key_path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }
            }

            Cred::default()
        });

        // The remote reports per-reference rejections (non-fast-forward,
        // protected branch) here rather than failing the push call itself
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "{} rejected by remote: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("{}:{}", refname, refname);
        debug!("pushing {} to {}", refspec, remote_name);

        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| {
                if e.class() == git2::ErrorClass::Net {
                    ReleaseError::remote(format!("Network error during push: {}", e))
                } else if e.class() == git2::ErrorClass::Reference {
                    ReleaseError::remote(format!("Reference error during push: {}", e))
                } else {
                    ReleaseError::remote(format!(
                        "Failed to push '{}' to '{}': {}",
                        reference, remote_name, e
                    ))
                }
            })
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;

        match self.tag_style {
            TagStyle::Lightweight => {
                self.repo.tag_lightweight(name, head.as_object(), false)?;
            }
            TagStyle::Annotated => {
                let signature = self.repo.signature()?;
                self.repo.tag(
                    name,
                    head.as_object(),
                    &signature,
                    &format!("Release {}", name),
                    false,
                )?;
            }
        }

        debug!("tagged {} as {}", head.id(), name);
        Ok(())
    }
}
