//! Path Utilities
//!
//! Pure string helpers shared by the name resolver and the orchestrator.
//! Everything operates on normalized (forward-slash) paths and nothing in
//! this module touches the filesystem, so identical logical paths compare
//! equal on every platform.

/// Normalize path separators to avoid Windows / Unix differences.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Final path segment. Empty for paths that end in a separator.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Everything before the final separator. Empty when there is none.
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Base name without its final extension. A leading dot does not count as
/// an extension separator, so `.vue` stays `.vue`.
pub fn file_stem(path: &str) -> &str {
    let base = base_name(path);
    match base.rfind('.') {
        Some(idx) if idx > 0 => &base[..idx],
        _ => base,
    }
}

/// Compute `path` relative to `root` by segment comparison alone.
///
/// Returns `None` when `path` is not under `root` (the relative form would
/// have to escape through `..`, or the two disagree on a drive prefix).
pub fn relative_to(root: &str, path: &str) -> Option<String> {
    let root_segments: Vec<&str> = root.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if path_segments.len() < root_segments.len() {
        return None;
    }
    if root_segments
        .iter()
        .zip(path_segments.iter())
        .any(|(a, b)| a != b)
    {
        return None;
    }

    Some(path_segments[root_segments.len()..].join("/"))
}

/// Resolve an include directory against the project root.
///
/// Absolute inputs pass through; relative inputs are joined onto `root`.
/// The result is normalized, `.`/`..` segments are folded out, and there is
/// no trailing slash, so it can be used directly as a prefix.
pub fn resolve_dir(root: &str, dir: &str) -> String {
    let dir = normalize_path(dir);
    let joined = if is_absolute(&dir) {
        dir
    } else {
        format!("{}/{}", normalize_path(root).trim_end_matches('/'), dir)
    };
    clean(&joined)
}

fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || path.as_bytes().get(1) == Some(&b':')
}

/// Fold `.` and `..` segments out of a normalized path.
fn clean(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(last) if *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}
