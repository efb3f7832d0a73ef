//! Git operations for the local slop repository.
//!
//! The repository is append-only from this crate's point of view: publishes
//! add new files under `slops/` and never rewrite existing ones. A completed
//! commit is never undone by a later pipeline failure.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use git2::{Commit, Repository};

use crate::error::AppError;

/// The version-control capability the publish pipeline depends on.
///
/// Provides "persist file, commit, push, return stable commit hash"
/// semantics. [`SlopRepo`] is the git2-backed implementation; tests
/// substitute in-memory fakes.
pub trait VersionControl: Send + Sync {
    /// Repository coordinates in `org/name` form.
    fn coordinates(&self) -> &str;

    /// Write a file relative to the repository root, creating parent
    /// directories as needed.
    fn persist(&self, rel_path: &str, contents: &str) -> Result<PathBuf, AppError>;

    /// Stage the file, commit, push to origin; returns the new commit SHA.
    fn commit_and_push(&self, rel_path: &str, message: &str) -> Result<String, AppError>;
}

/// The local slop git repository.
pub struct SlopRepo {
    // git2::Repository is Send but not Sync; the Mutex makes SlopRepo
    // satisfy the `VersionControl: Send + Sync` bound.
    repo: Mutex<Repository>,
    workdir: PathBuf,
    coordinates: String,
}

impl std::fmt::Debug for SlopRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlopRepo")
            .field("workdir", &self.workdir)
            .field("coordinates", &self.coordinates)
            .finish_non_exhaustive()
    }
}

impl SlopRepo {
    /// Open an existing repository clone.
    pub fn open<P: AsRef<Path>>(path: P, coordinates: &str) -> Result<Self, AppError> {
        let path = path.as_ref();
        let repo = Repository::discover(path)
            .map_err(|_| AppError::RepoNotFound(path.display().to_string()))?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| AppError::VersionControl {
                message: format!("repository at {} is bare", path.display()),
            })?
            .to_path_buf();
        Ok(Self {
            repo: Mutex::new(repo),
            workdir,
            coordinates: coordinates.to_string(),
        })
    }

    /// Clone `org/name` from GitHub into the destination directory.
    pub fn clone_repo(coordinates: &str, dest: &Path) -> Result<Self, AppError> {
        if dest.exists() {
            return Err(AppError::VersionControl {
                message: format!("repository already exists at {}", dest.display()),
            });
        }
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let url = format!("https://github.com/{}.git", coordinates);
        Repository::clone(&url, dest).map_err(|e| AppError::VersionControl {
            message: format!("failed to clone {}: {}", url, e),
        })?;
        Self::open(dest, coordinates)
    }

    /// Normalize repository coordinates to `org/name`.
    ///
    /// Accepts full URLs (`https://github.com/org/name.git`) and
    /// `github.com/org/name` forms.
    pub fn normalize_coordinates(input: &str) -> String {
        let trimmed = input.trim().trim_end_matches('/');
        let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|s| !s.is_empty() && !s.contains(':') && *s != "github.com")
            .collect();
        match segments.as_slice() {
            [.., org, name] => format!("{}/{}", org, name),
            _ => trimmed.to_string(),
        }
    }

    /// Current HEAD commit SHA.
    pub fn head_sha(&self) -> Result<String, AppError> {
        let repo = self.repo.lock().unwrap();
        let head = repo.head().map_err(|e| AppError::VersionControl {
            message: format!("failed to get HEAD: {}", e),
        })?;
        let commit = head.peel_to_commit().map_err(|e| AppError::VersionControl {
            message: format!("failed to get HEAD commit: {}", e),
        })?;
        Ok(commit.id().to_string())
    }

    fn signature(repo: &Repository) -> Result<git2::Signature<'_>, AppError> {
        repo.signature().map_err(|e| AppError::VersionControl {
            message: format!("no git identity configured: {}", e),
        })
    }

    fn push_head(repo: &Repository) -> Result<(), AppError> {
        let head = repo.head().map_err(|e| AppError::VersionControl {
            message: format!("failed to get HEAD: {}", e),
        })?;
        let branch = head.shorthand().unwrap_or("main").to_string();

        let mut remote = repo
            .find_remote("origin")
            .map_err(|e| AppError::VersionControl {
                message: format!("no origin remote: {}", e),
            })?;

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|url, username_from_url, _allowed| {
            let config = git2::Config::open_default()?;
            git2::Cred::credential_helper(&config, url, username_from_url)
        });
        let mut options = git2::PushOptions::new();
        options.remote_callbacks(callbacks);

        let refspec = format!("refs/heads/{0}:refs/heads/{0}", branch);
        remote
            .push(&[&refspec], Some(&mut options))
            .map_err(|e| AppError::VersionControl {
                message: format!("push failed: {}", e),
            })
    }
}

impl VersionControl for SlopRepo {
    fn coordinates(&self) -> &str {
        &self.coordinates
    }

    fn persist(&self, rel_path: &str, contents: &str) -> Result<PathBuf, AppError> {
        let full = self.workdir.join(rel_path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full, contents)?;
        Ok(full)
    }

    fn commit_and_push(&self, rel_path: &str, message: &str) -> Result<String, AppError> {
        let repo = self.repo.lock().unwrap();
        let mut index = repo.index().map_err(|e| AppError::VersionControl {
            message: format!("failed to open index: {}", e),
        })?;
        index
            .add_path(Path::new(rel_path))
            .map_err(|e| AppError::VersionControl {
                message: format!("failed to stage {}: {}", rel_path, e),
            })?;
        index.write().map_err(|e| AppError::VersionControl {
            message: format!("failed to write index: {}", e),
        })?;
        let tree_id = index.write_tree().map_err(|e| AppError::VersionControl {
            message: format!("failed to write tree: {}", e),
        })?;
        let tree = repo
            .find_tree(tree_id)
            .map_err(|e| AppError::VersionControl {
                message: format!("failed to find tree: {}", e),
            })?;

        let signature = Self::signature(&repo)?;
        // First commit in a fresh repository has no parent
        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit().map_err(|e| AppError::VersionControl {
                message: format!("failed to get HEAD commit: {}", e),
            })?),
            Err(_) => None,
        };
        let parents: Vec<&Commit> = parent.iter().collect();

        let commit_id = repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .map_err(|e| AppError::VersionControl {
                message: format!("commit failed: {}", e),
            })?;

        Self::push_head(&repo)?;

        Ok(commit_id.to_string())
    }
}
