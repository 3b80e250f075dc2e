//! Deterministic depth-first file walker.

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use globalsearch_core::{SearchConfig, SearchFailure};

/// Lazy depth-first traversal yielding every regular file under a root.
///
/// Order is deterministic: within each directory, entries are sorted by
/// name and regular files are yielded before any subdirectory is descended
/// into. Traversal uses an explicit work stack, so deeply nested trees do
/// not grow the call stack.
///
/// A nonexistent root, or a root that is not a directory, produces an empty
/// sequence. Directories that cannot be listed mid-walk are surfaced as
/// `Err` items and traversal continues.
pub struct FileWalker {
    /// Directories pending descent, LIFO for depth-first order.
    stack: Vec<(PathBuf, u32)>,
    /// Files and failures queued from the most recently read directory.
    queue: VecDeque<Result<PathBuf, SearchFailure>>,
    /// Canonical paths of directories already descended into.
    visited: HashSet<PathBuf>,
    follow_symlinks: bool,
    max_depth: Option<u32>,
    include_hidden: bool,
}

impl FileWalker {
    /// Create a walker rooted at `root` with the traversal policy from `config`.
    pub fn new(root: impl Into<PathBuf>, config: &SearchConfig) -> Self {
        let root = root.into();
        let mut walker = Self {
            stack: Vec::new(),
            queue: VecDeque::new(),
            visited: HashSet::new(),
            follow_symlinks: config.follow_symlinks,
            max_depth: config.max_depth,
            include_hidden: config.include_hidden,
        };
        if root.is_dir() {
            walker.push_dir(root, 0);
        }
        walker
    }

    /// Queue a directory for descent unless its real path was already seen.
    ///
    /// The visited check guarantees termination when symlinks or binds
    /// create cycles in the tree.
    fn push_dir(&mut self, path: PathBuf, depth: u32) {
        match path.canonicalize() {
            Ok(real) => {
                if self.visited.insert(real) {
                    self.stack.push((path, depth));
                } else {
                    tracing::debug!(path = %path.display(), "skipping already-visited directory");
                }
            }
            // Vanished between listing and descent; nothing to walk.
            Err(_) => {}
        }
    }

    /// Read one directory, queueing its files and stacking its subdirectories.
    fn read_dir(&mut self, dir: &Path, depth: u32) {
        let entries = match fs::read_dir(dir) {
            Ok(iter) => iter,
            Err(err) => {
                self.queue.push_back(Err(SearchFailure::traversal(dir, &err)));
                return;
            }
        };

        let mut files = Vec::new();
        let mut dirs = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    self.queue.push_back(Err(SearchFailure::traversal(dir, &err)));
                    continue;
                }
            };

            if !self.include_hidden && entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            let Ok(mut file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_symlink() {
                if !self.follow_symlinks {
                    continue;
                }
                // Resolve the target; a broken link is simply skipped.
                match fs::metadata(&path) {
                    Ok(meta) => file_type = meta.file_type(),
                    Err(_) => continue,
                }
            }

            if file_type.is_file() {
                files.push(path);
            } else if file_type.is_dir() {
                dirs.push(path);
            }
        }

        files.sort();
        dirs.sort();

        self.queue.extend(files.into_iter().map(Ok));

        let child_depth = depth + 1;
        if self.max_depth.is_none_or(|d| child_depth <= d) {
            // Reversed so the stack pops subdirectories in sorted order.
            for dir in dirs.into_iter().rev() {
                self.push_dir(dir, child_depth);
            }
        }
    }
}

impl Iterator for FileWalker {
    type Item = Result<PathBuf, SearchFailure>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.queue.pop_front() {
                return Some(item);
            }
            let (dir, depth) = self.stack.pop()?;
            self.read_dir(&dir, depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn walk_names(root: &Path, config: &SearchConfig) -> Vec<String> {
        FileWalker::new(root, config)
            .filter_map(|entry| entry.ok())
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("dir1")).unwrap();
        fs::create_dir(root.join("dir2")).unwrap();
        fs::create_dir(root.join("dir1/subdir")).unwrap();

        fs::write(root.join("file1.txt"), "hello").unwrap();
        fs::write(root.join("dir1/file2.txt"), "world").unwrap();
        fs::write(root.join("dir1/subdir/file3.txt"), "test").unwrap();
        fs::write(root.join("dir2/file4.txt"), "another").unwrap();

        temp
    }

    #[test]
    fn test_deterministic_depth_first_order() {
        let temp = create_test_tree();
        let config = SearchConfig::new(temp.path(), "q");

        let names = walk_names(temp.path(), &config);
        assert_eq!(
            names,
            vec![
                "file1.txt",
                "dir1/file2.txt",
                "dir1/subdir/file3.txt",
                "dir2/file4.txt",
            ]
        );

        // Same tree, same order
        assert_eq!(names, walk_names(temp.path(), &config));
    }

    #[test]
    fn test_nonexistent_root_is_empty() {
        let config = SearchConfig::new("/definitely/not/a/path", "q");
        let mut walker = FileWalker::new("/definitely/not/a/path", &config);
        assert!(walker.next().is_none());
    }

    #[test]
    fn test_file_as_root_is_empty() {
        let temp = create_test_tree();
        let file = temp.path().join("file1.txt");
        let config = SearchConfig::new(&file, "q");
        let mut walker = FileWalker::new(&file, &config);
        assert!(walker.next().is_none());
    }

    #[test]
    fn test_max_depth_limits_descent() {
        let temp = create_test_tree();
        let mut config = SearchConfig::new(temp.path(), "q");
        config.max_depth = Some(1);

        let names = walk_names(temp.path(), &config);
        assert_eq!(names, vec!["file1.txt", "dir1/file2.txt", "dir2/file4.txt"]);

        config.max_depth = Some(0);
        assert_eq!(walk_names(temp.path(), &config), vec!["file1.txt"]);
    }

    #[test]
    fn test_hidden_entries_skipped() {
        let temp = create_test_tree();
        fs::write(temp.path().join(".hidden.txt"), "secret").unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        fs::write(temp.path().join(".git/config"), "secret").unwrap();

        let mut config = SearchConfig::new(temp.path(), "q");
        config.include_hidden = false;
        let names = walk_names(temp.path(), &config);
        assert!(!names.iter().any(|n| n.contains(".hidden") || n.contains(".git")));

        config.include_hidden = true;
        let names = walk_names(temp.path(), &config);
        assert!(names.iter().any(|n| n.contains(".hidden")));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_terminates() {
        let temp = create_test_tree();
        // dir1/subdir/loop -> root, a cycle when links are followed
        std::os::unix::fs::symlink(temp.path(), temp.path().join("dir1/subdir/loop")).unwrap();

        let mut config = SearchConfig::new(temp.path(), "q");
        config.follow_symlinks = true;

        let names: Vec<_> = FileWalker::new(temp.path(), &config)
            .filter_map(|e| e.ok())
            .collect();
        // Terminates, and every real file is seen exactly once
        assert_eq!(names.len(), 4);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_skipped_by_default() {
        let temp = create_test_tree();
        std::os::unix::fs::symlink(
            temp.path().join("file1.txt"),
            temp.path().join("alias.txt"),
        )
        .unwrap();

        let config = SearchConfig::new(temp.path(), "q");
        let names = walk_names(temp.path(), &config);
        assert!(!names.contains(&"alias.txt".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_surfaces_failure() {
        use std::os::unix::fs::PermissionsExt;

        let temp = create_test_tree();
        let locked = temp.path().join("dir2");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let config = SearchConfig::new(temp.path(), "q");
        let entries: Vec<_> = FileWalker::new(temp.path(), &config).collect();

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let failures: Vec<_> = entries.iter().filter(|e| e.is_err()).collect();
        assert_eq!(failures.len(), 1);
        // Siblings are still walked
        let files: Vec<_> = entries.iter().filter(|e| e.is_ok()).collect();
        assert_eq!(files.len(), 3);
    }
}
