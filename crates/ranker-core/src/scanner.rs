// Candidate document discovery
use ranker_config::InputConfig;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// List the candidate files under `root`, sorted by path.
///
/// Hidden files are skipped. Files matching an include pattern are kept even
/// when their extension is unknown, so that the loader reports them instead
/// of them disappearing silently.
pub fn scan_documents(root: &Path, config: &InputConfig) -> io::Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("resume directory not found: {}", root.display()),
        ));
    }

    let include_set = build_globset(config.include_paths.clone());
    let exclude_set = build_globset(config.exclude_paths.clone());

    let mut files = Vec::new();
    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(false)
        .git_exclude(false)
        .git_global(false)
        .build();

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Error scanning path: {}", err);
                continue;
            }
        };
        if !entry.file_type().map_or(false, |ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let rel_path = path.strip_prefix(root).unwrap_or(path);
        let rel_str = rel_path.to_string_lossy();

        if let Some(set) = &include_set {
            if !set.is_match(rel_str.as_ref()) {
                debug!("Skipping {} (not included)", rel_str);
                continue;
            }
        }
        if let Some(set) = &exclude_set {
            if set.is_match(rel_str.as_ref()) {
                debug!("Skipping {} (excluded)", rel_str);
                continue;
            }
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

pub fn build_globset(patterns: Vec<String>) -> Option<GlobSet> {
    if patterns.is_empty() {
        return None;
    }
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        match Glob::new(&pat) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(err) => warn!("Ignoring invalid glob pattern {}: {}", pat, err),
        }
    }
    match builder.build() {
        Ok(set) => Some(set),
        Err(err) => {
            warn!("Failed to build globset: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "content").unwrap();
    }

    fn relative_names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_default_scan_keeps_unknown_extensions() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.txt");
        touch(dir.path(), "a.pdf");
        touch(dir.path(), "notes.docx");
        touch(dir.path(), "archive/old.txt");
        touch(dir.path(), ".hidden.txt");

        let config = InputConfig {
            exclude_paths: vec!["archive/**".to_string()],
            ..Default::default()
        };
        let files = scan_documents(dir.path(), &config).unwrap();
        assert_eq!(
            relative_names(dir.path(), &files),
            vec!["a.pdf", "b.txt", "notes.docx"]
        );
    }

    #[test]
    fn test_scan_respects_include_patterns() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.txt");
        touch(dir.path(), "a.pdf");
        touch(dir.path(), "notes.docx");
        touch(dir.path(), "archive/old.txt");

        let config = InputConfig {
            include_paths: vec!["**/*.txt".to_string()],
            ..Default::default()
        };
        let files = scan_documents(dir.path(), &config).unwrap();
        assert_eq!(
            relative_names(dir.path(), &files),
            vec!["archive/old.txt", "b.txt"]
        );
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(scan_documents(&missing, &InputConfig::default()).is_err());
    }

    #[test]
    fn test_invalid_glob_ignored() {
        let set = build_globset(vec!["[".to_string(), "*.txt".to_string()]).unwrap();
        assert!(set.is_match("cv.txt"));
    }
}
