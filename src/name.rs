//! Component Name Derivation
//!
//! Sanitizers plus the strategy-driven resolver that turn a file path into
//! the display name spliced into the component.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::paths::{base_name, file_stem, normalize_path, parent_dir, relative_to};

lazy_static! {
    /// ASCII word class on purpose: the output must stay a safe JS string.
    static ref NON_WORD_RE: Regex = Regex::new(r"[^[:word:]-]").unwrap();
    static ref UNDERSCORE_RUN_RE: Regex = Regex::new(r"_+").unwrap();
    static ref EDGE_UNDERSCORES_RE: Regex = Regex::new(r"^_+|_+$").unwrap();
    static ref HYPHEN_RUN_RE: Regex = Regex::new(r"-+").unwrap();
    static ref EDGE_HYPHENS_RE: Regex = Regex::new(r"^-+|-+$").unwrap();

    /// Leading catch-all marker: `[...` layers or a bare `...`.
    static ref CATCH_ALL_PREFIX_RE: Regex = Regex::new(r"^\[*\.{3}").unwrap();
    static ref TRAILING_BRACKETS_RE: Regex = Regex::new(r"\]*$").unwrap();
    /// Optional-parameter convention: every layer of surrounding brackets.
    static ref OPTIONAL_PARAM_RE: Regex = Regex::new(r"^\[+(.*?)\]+$").unwrap();

    static ref VUE_EXT_RE: Regex = Regex::new(r"\.vue$").unwrap();
}

/// Minimal cleanup so the generated `name: '...'` literal is always valid.
///
/// NFKD fold first, then everything outside `[A-Za-z0-9_-]` collapses into a
/// single underscore, trimmed at the edges. May return an empty string.
pub fn sanitize_component_name(name: &str) -> String {
    let folded: String = name.nfkd().collect();
    let replaced = NON_WORD_RE.replace_all(&folded, "_");
    let collapsed = UNDERSCORE_RUN_RE.replace_all(&replaced, "_");
    EDGE_UNDERSCORES_RE.replace_all(&collapsed, "").into_owned()
}

/// Capitalized concatenation of hyphen/underscore/slash-delimited words.
/// Only the first letter of each word changes; the rest keeps its casing.
pub fn pascal_case(input: &str) -> String {
    input
        .split(&['-', '_', '/'][..])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Clean one path segment, folding routing conventions into a readable word.
///
/// `[...slug]` and `...slug` become a `CatchAll` prefix, optional-parameter
/// brackets and grouping parentheses are stripped, a leading `@` marker is
/// dropped, and the remainder is pascal-cased. Delimiter-only input yields
/// an empty string.
pub fn sanitize_segment(segment: &str) -> String {
    let mut name = segment.to_string();

    if name.starts_with("[...") || name.starts_with("...") {
        let stripped = CATCH_ALL_PREFIX_RE.replace(&name, "");
        name = format!("CatchAll{}", TRAILING_BRACKETS_RE.replace(&stripped, ""));
    }

    name = OPTIONAL_PARAM_RE.replace(&name, "$1").into_owned();

    while name.starts_with('(') && name.ends_with(')') {
        name = name[1..name.len() - 1].to_string();
    }

    if let Some(rest) = name.strip_prefix('@') {
        name = rest.to_string();
    }

    let replaced = NON_WORD_RE.replace_all(&name, "-");
    let collapsed = HYPHEN_RUN_RE.replace_all(&replaced, "-");
    let trimmed = EDGE_HYPHENS_RE.replace_all(&collapsed, "");

    pascal_case(&trimmed)
}

/// Naming algorithm for a synthesized component name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameStrategy {
    /// Base name of the component file.
    File,
    /// Base name of the parent directory.
    Dir,
    /// Sanitized segments of the root-relative path, concatenated.
    Path,
}

impl Default for NameStrategy {
    fn default() -> Self {
        NameStrategy::Path
    }
}

impl NameStrategy {
    /// Parse the wire form used by the build driver.
    pub fn parse(value: &str) -> Option<NameStrategy> {
        match value {
            "file" => Some(NameStrategy::File),
            "dir" => Some(NameStrategy::Dir),
            "path" => Some(NameStrategy::Path),
            _ => None,
        }
    }
}

/// Derive a candidate name for `id` under the chosen strategy.
///
/// `Path` is pure string manipulation over the normalized id: segments of
/// the root-relative path (minus the `.vue` extension, empty segments, and
/// case-insensitive `index`) are sanitized and concatenated. A file outside
/// `root`, or one that sanitizes down to nothing, resolves to `None` rather
/// than an error.
pub fn resolve_name_by_strategy(
    id: &str,
    strategy: NameStrategy,
    root: &str,
) -> Option<String> {
    match strategy {
        NameStrategy::File => Some(file_stem(id).to_string()),
        NameStrategy::Dir => Some(base_name(parent_dir(id)).to_string()),
        NameStrategy::Path => {
            let rel = relative_to(&normalize_path(root), id)?;
            let joined: String = VUE_EXT_RE
                .replace(&rel, "")
                .split('/')
                .filter(|seg| !seg.is_empty() && !seg.eq_ignore_ascii_case("index"))
                .map(sanitize_segment)
                .collect();
            if joined.is_empty() {
                None
            } else {
                Some(joined)
            }
        }
    }
}
