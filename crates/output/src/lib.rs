use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory used when no output directory is given.
pub const DEFAULT_OUTPUT_DIR: &str = "build";

/// Errors raised while locating or preparing the output directory.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read current directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("failed to create output directory {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Directory the CLI writes its artifacts into, `log.json` among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPath {
    dir: PathBuf,
}

impl OutputPath {
    /// Resolves `explicit` against the current directory, falling back to
    /// `./build` when nothing is given.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self, Error> {
        let cwd = std::env::current_dir().map_err(Error::CurrentDir)?;
        Ok(Self::resolve_from(explicit, &cwd))
    }

    /// Same as [`OutputPath::resolve`] with an explicit current directory.
    pub fn resolve_from(explicit: Option<PathBuf>, cwd: &Path) -> Self {
        let dir = match explicit {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => cwd.join(dir),
            None => cwd.join(DEFAULT_OUTPUT_DIR),
        };
        OutputPath { dir }
    }

    /// The resolved directory, always absolute when `cwd` was.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of `file` inside the output directory.
    pub fn join(&self, file: impl AsRef<Path>) -> PathBuf {
        self.dir.join(file)
    }

    /// Creates the directory and any missing parents.
    pub fn ensure_exists(&self) -> Result<(), Error> {
        std::fs::create_dir_all(&self.dir).map_err(|source| Error::Create {
            path: self.dir.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_build_under_cwd() {
        let out = OutputPath::resolve_from(None, Path::new("/work"));
        assert_eq!(out.dir(), Path::new("/work/build"));
        assert_eq!(out.join("log.json"), PathBuf::from("/work/build/log.json"));
    }

    #[test]
    fn relative_dirs_are_joined_to_cwd() {
        let out = OutputPath::resolve_from(Some(PathBuf::from("out/run1")), Path::new("/work"));
        assert_eq!(out.dir(), Path::new("/work/out/run1"));
    }

    #[test]
    fn absolute_dirs_are_kept() {
        let out = OutputPath::resolve_from(Some(PathBuf::from("/var/epicli")), Path::new("/work"));
        assert_eq!(out.dir(), Path::new("/var/epicli"));
    }

    #[test]
    fn ensure_exists_creates_nested_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let out = OutputPath::resolve_from(Some(PathBuf::from("a/b/c")), tmp.path());
        assert!(!out.dir().exists());

        out.ensure_exists().unwrap();
        assert!(out.dir().is_dir());
        out.ensure_exists().unwrap();
    }

    #[test]
    fn ensure_exists_reports_the_path() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, b"not a dir").unwrap();

        let out = OutputPath::resolve_from(Some(blocker.join("sub")), tmp.path());
        let err = out.ensure_exists().unwrap_err();
        assert!(matches!(err, Error::Create { .. }));
        assert!(err.to_string().contains("sub"));
    }
}
