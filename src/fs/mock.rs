use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-memory file tree. Relative paths resolve against `root`.
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, Option<String>>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/workspace"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            root,
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());

        if let Some(parent) = path.parent() {
            Self::ensure_dirs(&mut files, parent);
        }
        files.insert(path, Some(content.to_string()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());
        Self::ensure_dirs(&mut files, &path);
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_dirs(files: &mut HashMap<PathBuf, Option<String>>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files.entry(current.clone()).or_insert(None);
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.files
            .read()
            .map(|files| matches!(files.get(&path), Some(Some(_))))
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.normalize_path(path);
        let files = self
            .files
            .read()
            .map_err(|_| anyhow!("mock file system lock poisoned"))?;

        match files.get(&path) {
            Some(Some(content)) => Ok(content.clone()),
            Some(None) => Err(anyhow!("failed to read {}: is a directory", path.display())),
            None => Err(anyhow!(
                "failed to read {}: no such file or directory",
                path.display()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file_creates_parents() {
        let fs = MockFileSystem::new();
        fs.add_file("app/pyproject.toml", "[tool.poetry]");

        assert!(!fs.is_file(Path::new("/workspace/app")));
        let err = fs.read_to_string(Path::new("/workspace/app")).unwrap_err();
        assert!(err.to_string().contains("is a directory"));
        assert!(fs.is_file(Path::new("/workspace/app/pyproject.toml")));
    }

    #[test]
    fn test_read_to_string() {
        let fs = MockFileSystem::with_root(PathBuf::from("/work"));
        fs.add_file("pyproject.toml", "[tool.poetry]");

        let content = fs.read_to_string(Path::new("/work/pyproject.toml")).unwrap();
        assert_eq!(content, "[tool.poetry]");
    }

    #[test]
    fn test_read_directory_fails() {
        let fs = MockFileSystem::new();
        fs.add_dir("src");

        let err = fs.read_to_string(Path::new("src")).unwrap_err();
        assert!(err.to_string().contains("is a directory"));
    }

    #[test]
    fn test_read_missing_fails() {
        let fs = MockFileSystem::new();
        let err = fs.read_to_string(Path::new("pyproject.toml")).unwrap_err();
        assert!(err.to_string().contains("no such file or directory"));
    }
}
