//! Tree walking — lazy enumeration of a directory tree as relative entries.
//!
//! Every call re-reads the live filesystem; nothing is cached between sync
//! cycles. A missing root yields an empty sequence rather than an error —
//! the planner decides what a missing root means.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::EngineError;

/// Kind of a walked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// One entry under a walk root, addressed relative to that root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub rel: PathBuf,
    pub kind: EntryKind,
}

/// Lazy walk over all descendants of a root directory.
///
/// Directories are yielded as entries of their own (including empty ones),
/// so empty-directory creation and removal stay detectable. The root itself
/// is not yielded. Symlinks are skipped.
pub struct TreeWalk {
    root: PathBuf,
    inner: Option<walkdir::IntoIter>,
}

impl TreeWalk {
    fn new(root: &Path, contents_first: bool) -> Self {
        let inner = root.is_dir().then(|| {
            WalkDir::new(root)
                .min_depth(1)
                .contents_first(contents_first)
                .into_iter()
        });
        Self {
            root: root.to_path_buf(),
            inner,
        }
    }
}

impl Iterator for TreeWalk {
    type Item = Result<TreeEntry, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        let inner = self.inner.as_mut()?;
        loop {
            let entry = match inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    return Some(Err(EngineError::Walk { path, source: err }));
                }
            };

            let file_type = entry.file_type();
            let kind = if file_type.is_dir() {
                EntryKind::Dir
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                // Symlinks and special files are out of scope.
                continue;
            };

            let rel = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path())
                .to_path_buf();
            return Some(Ok(TreeEntry { rel, kind }));
        }
    }
}

/// Walk `root` parents-before-children (source pass order).
pub fn top_down(root: &Path) -> TreeWalk {
    TreeWalk::new(root, false)
}

/// Walk `root` children-before-parents (replica removal pass order).
pub fn bottom_up(root: &Path) -> TreeWalk {
    TreeWalk::new(root, true)
}
