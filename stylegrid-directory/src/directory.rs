//! The project state directory.
//!
//! A [`ManagedDirectory`] lives at the git root, or in the current directory
//! outside a repository. Opening it creates the folder, a `.gitignore` and
//! the folders listed by its [`DirectoryConfig`].

use crate::config::DirectoryConfig;
use crate::error::{DirectoryError, Result};
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// An opened state directory of kind `C`.
///
/// ```no_run
/// use stylegrid_directory::{ManagedDirectory, StyleGridDirConfig};
///
/// let dir = ManagedDirectory::<StyleGridDirConfig>::from_project()?;
/// println!("styles folder: {}", dir.subdir("styles").display());
/// # Ok::<(), stylegrid_directory::DirectoryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ManagedDirectory<C: DirectoryConfig> {
    root: PathBuf,
    _kind: PhantomData<C>,
}

impl<C: DirectoryConfig> ManagedDirectory<C> {
    /// Open `C::DIR_NAME` inside `parent`, creating what is missing.
    pub fn open_in(parent: &Path) -> Result<Self> {
        let root = parent.join(C::DIR_NAME);
        if !root.is_dir() {
            create_folder(&root)?;
            tracing::debug!("Created {}", root.display());
        }

        let gitignore = root.join(".gitignore");
        if !gitignore.exists() {
            fs::write(&gitignore, C::GITIGNORE_CONTENT).map_err(|source| {
                DirectoryError::WriteGitignore {
                    path: gitignore.clone(),
                    source,
                }
            })?;
        }

        for name in C::init_subdirs() {
            create_folder(&root.join(name))?;
        }

        Ok(Self {
            root,
            _kind: PhantomData,
        })
    }

    /// Open at the git root when there is one, otherwise in the current directory.
    pub fn from_project() -> Result<Self> {
        match find_git_repository_root() {
            Some(git_root) => Self::open_in(&git_root),
            None => {
                let cwd = std::env::current_dir().map_err(DirectoryError::CurrentDir)?;
                tracing::debug!(
                    "No git repository, keeping {} in {}",
                    C::DIR_NAME,
                    cwd.display()
                );
                Self::open_in(&cwd)
            }
        }
    }

    /// Directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a folder inside the directory. Nothing is created.
    pub fn subdir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

fn create_folder(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| DirectoryError::CreateFolder {
        path: path.to_path_buf(),
        source,
    })
}

/// The nearest ancestor of the current directory containing `.git`.
pub fn find_git_repository_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}
