// src/artifacts.rs

//! Locating built library artifacts under an install prefix
//!
//! After install, the orchestrator verifies that the expected libraries
//! actually landed under the prefix. Autotools trees scatter libraries
//! across `lib/`, `lib64/`, and occasionally deeper, so the search walks
//! the whole prefix by default.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Search a prefix for libraries with the given artifact stem
///
/// `stem` is the library name without extension (`libnetcdf_c++4`).
/// Shared searches match `<stem>.so`, versioned `<stem>.so.N...`, and
/// `<stem>.dylib`; static searches match `<stem>.a`. A non-recursive
/// search only looks at the prefix's direct children. Results are sorted
/// for deterministic output.
pub fn find_libraries(stem: &str, root: &Path, shared: bool, recursive: bool) -> Vec<PathBuf> {
    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|name| matches_stem(name, stem, shared))
        })
        .map(|e| e.into_path())
        .collect();

    found.sort();
    for path in &found {
        debug!("Matched library: {}", path.display());
    }

    found
}

fn matches_stem(name: &str, stem: &str, shared: bool) -> bool {
    if shared {
        if name == format!("{}.so", stem) || name == format!("{}.dylib", stem) {
            return true;
        }
        // Versioned soname: libfoo.so.1, libfoo.so.1.0.3
        name.strip_prefix(stem)
            .and_then(|rest| rest.strip_prefix(".so."))
            .is_some_and(|suffix| {
                !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit() || c == '.')
            })
    } else {
        name == format!("{}.a", stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_matches_shared_names() {
        assert!(matches_stem("libnetcdf_c++4.so", "libnetcdf_c++4", true));
        assert!(matches_stem("libnetcdf_c++4.so.1", "libnetcdf_c++4", true));
        assert!(matches_stem("libnetcdf_c++4.so.1.0.3", "libnetcdf_c++4", true));
        assert!(matches_stem("libnetcdf_c++4.dylib", "libnetcdf_c++4", true));
    }

    #[test]
    fn test_rejects_non_matching_names() {
        assert!(!matches_stem("libnetcdf_c++4.a", "libnetcdf_c++4", true));
        assert!(!matches_stem("libnetcdf.so", "libnetcdf_c++4", true));
        assert!(!matches_stem("libnetcdf_c++4.so.bak", "libnetcdf_c++4", true));
        assert!(!matches_stem("libnetcdf_c++4.so", "libnetcdf_c++4", false));
        assert!(matches_stem("libnetcdf_c++4.a", "libnetcdf_c++4", false));
    }

    #[test]
    fn test_find_recursive() {
        let prefix = tempfile::tempdir().unwrap();
        touch(&prefix.path().join("lib/libnetcdf_c++4.so"));
        touch(&prefix.path().join("lib/libnetcdf_c++4.so.1.0.3"));
        touch(&prefix.path().join("lib64/nested/libnetcdf_c++4.so"));
        touch(&prefix.path().join("lib/libnetcdf_c++4.a"));
        touch(&prefix.path().join("include/netcdf"));

        let libs = find_libraries("libnetcdf_c++4", prefix.path(), true, true);
        assert_eq!(libs.len(), 3);
        assert!(libs.iter().all(|p| p.starts_with(prefix.path())));
        // Sorted output
        let mut sorted = libs.clone();
        sorted.sort();
        assert_eq!(libs, sorted);
    }

    #[test]
    fn test_find_non_recursive() {
        let prefix = tempfile::tempdir().unwrap();
        touch(&prefix.path().join("libnetcdf_c++4.so"));
        touch(&prefix.path().join("lib/libnetcdf_c++4.so"));

        let libs = find_libraries("libnetcdf_c++4", prefix.path(), true, false);
        assert_eq!(libs.len(), 1);
        assert_eq!(libs[0], prefix.path().join("libnetcdf_c++4.so"));
    }

    #[test]
    fn test_find_static() {
        let prefix = tempfile::tempdir().unwrap();
        touch(&prefix.path().join("lib/libnetcdf_c++4.a"));
        touch(&prefix.path().join("lib/libnetcdf_c++4.so"));

        let libs = find_libraries("libnetcdf_c++4", prefix.path(), false, true);
        assert_eq!(libs.len(), 1);
        assert!(libs[0].ends_with("libnetcdf_c++4.a"));
    }

    #[test]
    fn test_find_empty_tree() {
        let prefix = tempfile::tempdir().unwrap();
        let libs = find_libraries("libnetcdf_c++4", prefix.path(), true, true);
        assert!(libs.is_empty());
    }
}
