//! # Native setup-name injection for Vue single-file components
//!
//! Build-pipeline hook that gives `<script setup>` components an explicit
//! display name derived from their file path, before the rest of the
//! toolchain sees the source.
//!
//! ## Transform Invariants
//!
//! 1. **Prepend only**: original bytes are never altered, only prefixed, so
//!    the position map is a pure line shift and stays exact.
//! 2. **Idempotence**: the injected declaration satisfies the declared-name
//!    detector, and the injected plain `<script>` block makes a second pass
//!    ineligible on its own.
//! 3. **Author intent wins**: any existing name declaration — a
//!    `defineOptions`/`defineComponent` call with a `name:` key, a bare
//!    `name:` field, or a `name` attribute on the setup tag — suppresses
//!    injection.
//! 4. **Determinism**: identical (source, id, options) yield byte-identical
//!    output. Per-file work shares nothing mutable, so independent files
//!    may be transformed in parallel.
//! 5. **Failure isolation**: a malformed file fails alone, with no partial
//!    splice and no effect on other files.

#[cfg(feature = "napi")]
use napi_derive::napi;

mod detect;
mod name;
mod parse;
mod paths;
mod sourcemap;
mod splice;
mod transform;


pub use detect::{has_declared_name, setup_has_name_attr};
pub use name::{
    pascal_case, resolve_name_by_strategy, sanitize_component_name, sanitize_segment, NameStrategy,
};
pub use parse::{parse_sfc, ScriptBlock, SfcDescriptor, TransformError};
pub use paths::normalize_path;
pub use sourcemap::SourceMap;
pub use splice::{create_script_block, inject_name, SpliceResult};
pub use transform::{
    transform_sfc, transform_sfc_batch, ExtendOptions, ResolvedOptions, PLUGIN_NAME,
};

#[cfg(feature = "napi")]
pub use transform::{transform_sfc_batch_native, transform_sfc_native};

#[cfg(feature = "napi")]
#[napi]
pub fn setup_name_bridge() -> String {
    "Vue Setup Name Native Bridge Connected".to_string()
}
