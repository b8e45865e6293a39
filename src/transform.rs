//! Transform Orchestrator
//!
//! Per-file entry point: applicability gates, descriptor parse, name
//! resolution, and the splice. A transform is a pure function of
//! (source, id, resolved options); the only side effect is the optional
//! debug line, which never changes the returned data.

use serde::{Deserialize, Serialize};

#[cfg(feature = "napi")]
use napi_derive::napi;

use crate::detect::{has_declared_name, setup_has_name_attr};
use crate::name::{resolve_name_by_strategy, sanitize_component_name, NameStrategy};
use crate::parse::{parse_sfc, TransformError, BAD_STRATEGY};
use crate::paths::{normalize_path, relative_to, resolve_dir};
use crate::splice::{inject_name, SpliceResult};

pub const PLUGIN_NAME: &str = "vite:vue-setup-name";

const COMPONENT_EXT: &str = ".vue";

// ═══════════════════════════════════════════════════════════════════════════════
// OPTIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// Plugin options as supplied by the build driver. All fields optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "napi", napi(object))]
pub struct ExtendOptions {
    /// Master on/off switch, default true.
    pub enable: Option<bool>,
    /// Only files under these directories take effect. Relative entries are
    /// resolved against the project root. Empty means all files.
    pub dirs: Option<Vec<String>>,
    /// Naming strategy: "file" | "dir" | "path". Default "path".
    pub strategy: Option<String>,
    /// Print the file-to-name mapping per injected file.
    pub debug: Option<bool>,
}

/// Options resolved once at plugin setup and shared read-only across every
/// per-file invocation. The project root is always explicit — it comes from
/// the driver, never from ambient process state.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub enable: bool,
    pub dirs: Vec<String>,
    pub strategy: NameStrategy,
    pub debug: bool,
    pub root: String,
}

impl ResolvedOptions {
    pub fn resolve(options: &ExtendOptions, root: &str) -> Result<ResolvedOptions, TransformError> {
        let strategy = match options.strategy.as_deref() {
            None => NameStrategy::default(),
            Some(value) => NameStrategy::parse(value).ok_or_else(|| {
                TransformError::new(
                    BAD_STRATEGY,
                    &format!("unknown naming strategy \"{}\"", value),
                    "",
                    0,
                    0,
                )
            })?,
        };

        let root = normalize_path(root);
        let dirs = options
            .dirs
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|dir| resolve_dir(&root, dir))
            .collect();

        Ok(ResolvedOptions {
            enable: options.enable.unwrap_or(true),
            dirs,
            strategy,
            debug: options.debug.unwrap_or(false),
            root,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PER-FILE TRANSFORM
// ═══════════════════════════════════════════════════════════════════════════════

/// Inject a display name into one component file.
///
/// Returns `Ok(None)` when the file is ineligible and the caller keeps the
/// original source. The gates short-circuit in order, so no work happens
/// for files the transform does not apply to:
///
/// 1. disabled, or not a `.vue` file
/// 2. outside every include directory
/// 3. descriptor parse (malformed source fails here)
/// 4. an explicit plain `<script>` block already exists
/// 5. no `<script setup>` block to annotate
/// 6. a name is already declared (textually, or as a setup-tag attribute)
/// 7. no resolvable name, or the name sanitizes to nothing
pub fn transform_sfc(
    source: &str,
    id: &str,
    options: &ResolvedOptions,
) -> Result<Option<SpliceResult>, TransformError> {
    if !options.enable || !id.ends_with(COMPONENT_EXT) {
        return Ok(None);
    }

    let id = normalize_path(id);

    if !options.dirs.is_empty()
        && !options
            .dirs
            .iter()
            .any(|dir| id.starts_with(&format!("{}/", dir)))
    {
        return Ok(None);
    }

    let descriptor = parse_sfc(source, &id)?;

    if descriptor.has_plain_script() {
        return Ok(None);
    }
    if !descriptor.has_setup_script() {
        return Ok(None);
    }
    if has_declared_name(source) || setup_has_name_attr(&descriptor) {
        return Ok(None);
    }

    let name = match resolve_name_by_strategy(&id, options.strategy, &options.root) {
        Some(name) => name,
        None => return Ok(None),
    };
    let safe_name = sanitize_component_name(&name);
    if safe_name.is_empty() {
        return Ok(None);
    }

    if options.debug {
        let rel = relative_to(&options.root, &id).unwrap_or_else(|| id.clone());
        eprintln!("[{}] {} -> {}", PLUGIN_NAME, rel, safe_name);
    }

    let lang = descriptor.setup_lang().map(|lang| lang.to_string());
    Ok(Some(inject_name(source, &name, lang.as_deref(), &id)))
}

/// Transform many files against one shared option set. Files are
/// independent, so they run in parallel; each entry keeps its own outcome
/// and one malformed file never affects the others.
pub fn transform_sfc_batch(
    files: Vec<(String, String)>,
    options: &ResolvedOptions,
) -> Vec<(String, Result<Option<SpliceResult>, TransformError>)> {
    use rayon::prelude::*;

    files
        .into_par_iter()
        .map(|(id, source)| {
            let result = transform_sfc(&source, &id, options);
            (id, result)
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Per-file result handed back to the JS build driver.
#[cfg(feature = "napi")]
#[napi(object)]
pub struct TransformOutput {
    /// Full new source text.
    pub code: String,
    /// Source map as a JSON string.
    pub map: String,
}

#[cfg(feature = "napi")]
#[napi]
pub fn transform_sfc_native(
    code: String,
    id: String,
    root: String,
    options: Option<ExtendOptions>,
) -> napi::Result<Option<TransformOutput>> {
    let resolved = ResolvedOptions::resolve(&options.unwrap_or_default(), &root)
        .map_err(|e| napi::Error::from_reason(e.message))?;

    transform_sfc(&code, &id, &resolved)
        .map(|result| {
            result.map(|r| TransformOutput {
                code: r.code,
                map: r.map.to_json(),
            })
        })
        .map_err(|e| napi::Error::from_reason(e.message))
}

/// One file of a batch request.
#[cfg(feature = "napi")]
#[napi(object)]
pub struct BatchFile {
    pub id: String,
    pub code: String,
}

/// Outcome for one batch entry: `code`/`map` set on change, `error` set on a
/// per-file failure, all unset when the file was left untouched.
#[cfg(feature = "napi")]
#[napi(object)]
pub struct BatchOutput {
    pub id: String,
    pub code: Option<String>,
    pub map: Option<String>,
    pub error: Option<String>,
}

#[cfg(feature = "napi")]
#[napi]
pub fn transform_sfc_batch_native(
    files: Vec<BatchFile>,
    root: String,
    options: Option<ExtendOptions>,
) -> napi::Result<Vec<BatchOutput>> {
    let resolved = ResolvedOptions::resolve(&options.unwrap_or_default(), &root)
        .map_err(|e| napi::Error::from_reason(e.message))?;

    let inputs = files.into_iter().map(|f| (f.id, f.code)).collect();

    Ok(transform_sfc_batch(inputs, &resolved)
        .into_iter()
        .map(|(id, result)| match result {
            Ok(Some(r)) => BatchOutput {
                id,
                code: Some(r.code),
                map: Some(r.map.to_json()),
                error: None,
            },
            Ok(None) => BatchOutput {
                id,
                code: None,
                map: None,
                error: None,
            },
            Err(e) => BatchOutput {
                id,
                code: None,
                map: None,
                error: Some(e.message),
            },
        })
        .collect())
}
