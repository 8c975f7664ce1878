//! Source file discovery under a project root.

use std::path::Path;
use tracing::trace;

/// Directories never descended into.
const SKIPPED_DIRECTORIES: &[&str] = &["node_modules", ".git", "dist", "build"];

/// Include and exclude patterns, relative to the project root.
///
/// Include patterns are globs (`**` matches any number of directories, `*`
/// and `?` match within one path component). An exclude pattern matches a
/// path when it glob-matches the path or any of its leading directories.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            include: vec!["**/*.ts".to_string()],
            exclude: vec!["node_modules".to_string()],
        }
    }
}

impl DiscoveryOptions {
    pub fn is_included(&self, relative: &str) -> bool {
        self.include.iter().any(|pattern| glob_match(pattern, relative)) && !self.is_excluded(relative)
    }

    pub fn is_excluded(&self, relative: &str) -> bool {
        self.exclude.iter().any(|pattern| {
            let pattern = pattern.trim_start_matches("./").trim_end_matches('/');
            let mut prefix_end = 0;
            loop {
                let candidate = match relative[prefix_end..].find('/') {
                    Some(i) => &relative[..prefix_end + i],
                    None => relative,
                };
                if glob_match(pattern, candidate) {
                    return true;
                }
                if candidate.len() == relative.len() {
                    return false;
                }
                prefix_end = candidate.len() + 1;
            }
        })
    }
}

/// Walk `root` and return matching files as sorted `/`-separated paths
/// relative to `root`.
pub(crate) fn discover_source_files(root: &Path, options: &DiscoveryOptions) -> Vec<String> {
    let mut result = Vec::new();
    walk_directory(root, "", options, &mut result);
    result.sort();
    result.dedup();
    result
}

fn walk_directory(dir: &Path, prefix: &str, options: &DiscoveryOptions, result: &mut Vec<String>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let relative = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", prefix, name)
        };

        if path.is_dir() {
            if SKIPPED_DIRECTORIES.contains(&name) || options.is_excluded(&relative) {
                trace!(dir = %relative, "skipping directory");
                continue;
            }
            walk_directory(&path, &relative, options, result);
        } else if path.is_file() && options.is_included(&relative) {
            result.push(relative);
        }
    }
}

/// Match a `/`-separated path against a glob pattern.
pub fn glob_match(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match_segments(&pattern, &path)
}

fn match_segments(pattern: &[&str], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((&"**", rest)) => (0..=path.len()).any(|skip| match_segments(rest, &path[skip..])),
        Some((first, rest)) => match path.split_first() {
            Some((segment, path_rest)) => match_component(first.as_bytes(), segment.as_bytes()) && match_segments(rest, path_rest),
            None => false,
        },
    }
}

fn match_component(pattern: &[u8], text: &[u8]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some((b'*', rest)) => (0..=text.len()).any(|skip| match_component(rest, &text[skip..])),
        Some((b'?', rest)) => !text.is_empty() && match_component(rest, &text[1..]),
        Some((c, rest)) => text.first() == Some(c) && match_component(rest, &text[1..]),
    }
}
