//! morph_tspath: Path normalization, extension handling and module specifiers.
//!
//! Project file names are kept as forward-slash strings. Import reconciliation
//! needs two directions: a relative module specifier from one file to another,
//! and the candidate files a relative specifier may resolve to.

/// File extensions the project loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    Ts,
    Tsx,
    Dts,
    Mts,
    Cts,
}

impl Extension {
    /// Get the string representation of this extension (including the dot).
    pub fn as_str(&self) -> &'static str {
        match self {
            Extension::Ts => ".ts",
            Extension::Tsx => ".tsx",
            Extension::Dts => ".d.ts",
            Extension::Mts => ".mts",
            Extension::Cts => ".cts",
        }
    }

    /// Try to determine the extension from a file path string.
    pub fn from_path(path: &str) -> Option<Extension> {
        let lower = path.to_lowercase();
        // Check .d.ts before .ts
        if lower.ends_with(".d.ts") {
            Some(Extension::Dts)
        } else if lower.ends_with(".ts") {
            Some(Extension::Ts)
        } else if lower.ends_with(".tsx") {
            Some(Extension::Tsx)
        } else if lower.ends_with(".mts") {
            Some(Extension::Mts)
        } else if lower.ends_with(".cts") {
            Some(Extension::Cts)
        } else {
            None
        }
    }
}

/// Extensions tried, in order, when resolving an extensionless specifier.
pub const RESOLUTION_EXTENSIONS: [Extension; 3] = [Extension::Ts, Extension::Tsx, Extension::Dts];

/// Convert backslashes to forward slashes.
pub fn normalize_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Normalize a path: forward slashes, `.` segments dropped and `..`
/// segments folded into their parent where possible.
pub fn normalize_path(path: &str) -> String {
    let path = normalize_slashes(path);
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }
    let joined = parts.join("/");
    if rooted {
        format!("/{}", joined)
    } else {
        joined
    }
}

/// Combine two path segments.
pub fn combine_paths(base: &str, relative: &str) -> String {
    if relative.starts_with('/') || base.is_empty() {
        return relative.to_string();
    }
    format!("{}{}", ensure_trailing_directory_separator(base), relative)
}

/// Get the directory path (everything up to and including the last `/`).
pub fn get_directory_path(path: &str) -> String {
    let normalized = normalize_slashes(path);
    if let Some(last_slash) = normalized.rfind('/') {
        normalized[..=last_slash].to_string()
    } else {
        String::new()
    }
}

/// Get the base name (file name) from a path.
pub fn get_base_name(path: &str) -> &str {
    match path.rfind(|c| c == '/' || c == '\\') {
        Some(last_slash) => &path[last_slash + 1..],
        None => path,
    }
}

/// Remove the file extension from a path.
pub fn remove_extension(path: &str) -> String {
    if path.to_lowercase().ends_with(".d.ts") {
        return path[..path.len() - 5].to_string();
    }
    if let Some(dot_pos) = path.rfind('.') {
        let slash_pos = path.rfind('/').unwrap_or(0);
        if dot_pos > slash_pos {
            return path[..dot_pos].to_string();
        }
    }
    path.to_string()
}

/// Ensure a path ends with a directory separator.
pub fn ensure_trailing_directory_separator(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

/// Whether `path` names `name`, either exactly or as a trailing path
/// component sequence (`"structures/Structure.ts"` matches
/// `"src/structures/Structure.ts"` but not `"src/xstructures/Structure.ts"`).
pub fn path_ends_with(path: &str, name: &str) -> bool {
    let path = normalize_slashes(path);
    let name = normalize_slashes(name);
    let name = name.trim_start_matches("./");
    if path == name {
        return true;
    }
    path.ends_with(name) && path[..path.len() - name.len()].ends_with('/')
}

/// Get the relative path from directory `from_dir` to path `to`.
pub fn get_relative_path(from_dir: &str, to: &str) -> String {
    let from = normalize_path(from_dir);
    let to = normalize_path(to);
    let from_parts: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_parts: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result: Vec<&str> = Vec::new();
    for _ in common..from_parts.len() {
        result.push("..");
    }
    result.extend_from_slice(&to_parts[common..]);
    result.join("/")
}

/// The relative module specifier an import in `from_file` uses to reach
/// `to_file`: extension dropped, `/index` collapsed, and a leading `./` for
/// same-or-child directories.
pub fn module_specifier(from_file: &str, to_file: &str) -> String {
    let mut target = remove_extension(&normalize_path(to_file));
    if get_base_name(&target) == "index" {
        target.truncate(target.len() - "index".len());
        let trimmed = target.trim_end_matches('/').to_string();
        target = trimmed;
    }
    let relative = get_relative_path(&get_directory_path(from_file), &target);
    if relative.is_empty() {
        ".".to_string()
    } else if relative.starts_with("..") {
        relative
    } else {
        format!("./{}", relative)
    }
}

/// Candidate file paths a relative specifier written in `from_file` may
/// resolve to, in resolution order. Bare (package) specifiers yield nothing.
pub fn resolution_candidates(from_file: &str, specifier: &str) -> Vec<String> {
    if !(specifier.starts_with("./") || specifier.starts_with("../") || specifier == "." || specifier == "..") {
        return Vec::new();
    }
    let base = normalize_path(&combine_paths(&get_directory_path(from_file), specifier));
    let mut candidates = Vec::new();
    if Extension::from_path(&base).is_some() {
        candidates.push(base.clone());
    }
    for ext in RESOLUTION_EXTENSIONS {
        candidates.push(format!("{}{}", base, ext.as_str()));
    }
    for ext in RESOLUTION_EXTENSIONS {
        candidates.push(format!("{}{}", combine_paths(&base, "index"), ext.as_str()));
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_path() {
        assert_eq!(Extension::from_path("foo.ts"), Some(Extension::Ts));
        assert_eq!(Extension::from_path("foo.d.ts"), Some(Extension::Dts));
        assert_eq!(Extension::from_path("foo.tsx"), Some(Extension::Tsx));
        assert_eq!(Extension::from_path("foo.js"), None);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("a\\b\\c"), "a/b/c");
        assert_eq!(normalize_path("a/./b/../c"), "a/c");
        assert_eq!(normalize_path("../a/b"), "../a/b");
        assert_eq!(normalize_path("/a/../../b"), "/b");
    }

    #[test]
    fn test_get_directory_path() {
        assert_eq!(get_directory_path("/a/b/c.ts"), "/a/b/");
        assert_eq!(get_directory_path("file.ts"), "");
    }

    #[test]
    fn test_remove_extension() {
        assert_eq!(remove_extension("foo.ts"), "foo");
        assert_eq!(remove_extension("foo.d.ts"), "foo");
        assert_eq!(remove_extension("foo/Structure.generated.ts"), "foo/Structure.generated");
        assert_eq!(remove_extension("dir.v1/file"), "dir.v1/file");
    }

    #[test]
    fn test_path_ends_with() {
        assert!(path_ends_with("src/structures/Structure.generated.ts", "Structure.generated.ts"));
        assert!(path_ends_with("src/structures/Structure.generated.ts", "structures/Structure.generated.ts"));
        assert!(!path_ends_with("src/structures/MyStructure.generated.ts", "Structure.generated.ts"));
        assert!(path_ends_with("Structure.generated.ts", "./Structure.generated.ts"));
    }

    #[test]
    fn test_get_relative_path() {
        assert_eq!(get_relative_path("src/a/", "src/a/b/c"), "b/c");
        assert_eq!(get_relative_path("src/a/", "src/d/e"), "../d/e");
        assert_eq!(get_relative_path("", "x/y"), "x/y");
    }

    #[test]
    fn test_module_specifier() {
        assert_eq!(
            module_specifier("src/structures/Structure.generated.ts", "src/structures/class/ClassDeclarationStructure.ts"),
            "./class/ClassDeclarationStructure"
        );
        assert_eq!(
            module_specifier("src/structures/Structure.generated.ts", "src/structures/StructureKind.ts"),
            "./StructureKind"
        );
        assert_eq!(
            module_specifier("src/structures/Structure.generated.ts", "src/types.ts"),
            "../types"
        );
        assert_eq!(
            module_specifier("src/structures/Structure.generated.ts", "src/structures/class/index.ts"),
            "./class"
        );
        assert_eq!(module_specifier("src/a/b.ts", "src/a/index.ts"), ".");
    }

    #[test]
    fn test_resolution_candidates() {
        let candidates = resolution_candidates("src/structures/Structure.generated.ts", "./class");
        assert_eq!(candidates[0], "src/structures/class.ts");
        assert!(candidates.contains(&"src/structures/class/index.ts".to_string()));
        assert!(resolution_candidates("src/a.ts", "typescript").is_empty());

        let parent = resolution_candidates("src/structures/Structure.generated.ts", "../types");
        assert_eq!(parent[0], "src/types.ts");
    }
}
