//! Loading and saving entries on disk
//!
//! Level 4 - File I/O
//!
//! One program per file, named after the entry. A file that fails to
//! parse is skipped when loading a directory; I/O failures are not.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use warhill_core::{Backend, Entry, ParseError, Parser};

use crate::hill::Hill;

impl<B: Backend> Hill<B> {
    /// Load one program file as an established (not new) entry
    ///
    /// Returns false if an entry with that name is already present.
    pub fn load_file(&mut self, path: &Path) -> Result<bool> {
        let name = file_name(path)?;
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let mut entry = Entry::new(name, source).with_new_flag(false);
        entry.ensure_parsed(self.parser(), &self.config().limits)?;
        Ok(self.add_entry(entry))
    }

    /// Load every file in `dir`, skipping files that fail to parse
    ///
    /// Returns the number of entries added.
    pub fn load_directory(&mut self, dir: &Path) -> Result<usize> {
        let mut added = 0;
        for path in list_files(dir)? {
            tracing::info!("Loading {}", path.display());
            match self.load_file(&path) {
                Ok(true) => added += 1,
                Ok(false) => {}
                Err(e) if e.downcast_ref::<ParseError>().is_some() => {
                    tracing::error!("Failed to parse {}: {}", path.display(), e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(added)
    }

    /// Load every file in `dir` into the bias set
    ///
    /// Bias programs are a fixed baseline, so any parse failure is fatal.
    pub fn load_bias(&mut self, dir: &Path) -> Result<usize> {
        let mut added = 0;
        for path in list_files(dir)? {
            let name = file_name(&path)?;
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read bias {}", path.display()))?;
            let program = self
                .parser()
                .parse(&name, &source, &self.config().limits)
                .with_context(|| format!("Failed to parse bias {}", path.display()))?;
            if self.add_bias(program) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Write the top `count` entries (default: the hill size) to `dir`
    ///
    /// Returns the number of files written.
    pub fn save_hill(&mut self, dir: &Path, count: Option<usize>) -> Result<usize> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let count = count.unwrap_or(self.config().hill_size);
        let mut written = 0;

        for program in self.top_programs(count)? {
            let path = dir.join(&program.name);
            tracing::debug!("Writing {}", path.display());
            std::fs::write(&path, program.to_string())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            written += 1;
        }

        tracing::info!("Saved {} entries to {}", written, dir.display());
        Ok(written)
    }
}

/// Regular files in `dir`, sorted by name
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Directory does not exist: {}", dir.display());
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .with_context(|| format!("Invalid file name: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{first_named_wins, make_test_config, ScriptedBackend};
    use std::fs;

    fn make_test_hill(hill_size: usize) -> Hill<ScriptedBackend> {
        Hill::new(make_test_config(hill_size), ScriptedBackend::new(first_named_wins)).unwrap()
    }

    #[test]
    fn test_load_directory_skips_parse_failures() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("imp"), "MOV 0, 1\n").unwrap();
        fs::write(dir.path().join("blank"), "\n\n").unwrap();
        fs::write(dir.path().join("dwarf"), "ADD #4, 3\nMOV 2, @2\nJMP -2\n").unwrap();

        let mut hill = make_test_hill(10);
        let added = hill.load_directory(dir.path()).unwrap();

        assert_eq!(added, 2);
        assert!(hill.find_entry("blank").is_none());
        let dwarf = hill.find_entry("dwarf").unwrap();
        assert!(!dwarf.is_new);
        assert_eq!(dwarf.program().unwrap().len(), 3);
    }

    #[test]
    fn test_load_directory_missing_dir() {
        let mut hill = make_test_hill(10);
        assert!(hill.load_directory(Path::new("/definitely/not/here")).is_err());
    }

    #[test]
    fn test_load_file_twice_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imp");
        fs::write(&path, "MOV 0, 1\n").unwrap();

        let mut hill = make_test_hill(10);
        assert!(hill.load_file(&path).unwrap());
        assert!(!hill.load_file(&path).unwrap());
        assert_eq!(hill.len(), 1);
    }

    #[test]
    fn test_load_bias() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("x"), "DAT 0, 0\n").unwrap();
        fs::write(dir.path().join("y"), "SPL 0\nMOV 0, 1\n").unwrap();

        let mut hill = make_test_hill(10);
        assert_eq!(hill.load_bias(dir.path()).unwrap(), 2);
        assert_eq!(hill.bias()[0].name, "x");
        assert!(hill.is_empty());
    }

    #[test]
    fn test_load_bias_parse_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("x"), "").unwrap();

        let mut hill = make_test_hill(10);
        assert!(hill.load_bias(dir.path()).is_err());
    }

    #[test]
    fn test_save_hill_writes_top_entries() {
        let mut hill = make_test_hill(10);
        for name in ["a", "b", "c"] {
            hill.load_string(name, &format!("MOV {}, 1", name)).unwrap();
        }
        hill.score_hill(true).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("saved");
        assert_eq!(hill.save_hill(&out, Some(2)).unwrap(), 2);

        let first = fs::read_to_string(out.join("a")).unwrap();
        assert!(first.contains("MOV a, 1"));
        assert!(out.join("b").exists());
        assert!(!out.join("c").exists());

        assert_eq!(hill.save_hill(&out, None).unwrap(), 3);
    }
}
