//! Component File Parsing
//!
//! Regex-based structural scan of a `.vue` file: which script blocks exist,
//! their attributes, and their byte offsets. The transform only needs block
//! presence and the setup block's `lang`, so no embedded-script parsing
//! happens here.

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Script block regex
    static ref SCRIPT_BLOCK_RE: Regex =
        Regex::new(r"(?is)<script\b([^>]*)>([\s\S]*?)</script>").unwrap();

    /// Opening tags, counted separately to catch unterminated blocks
    static ref SCRIPT_OPEN_RE: Regex = Regex::new(r"(?i)<script\b").unwrap();

    /// Attribute regex for parsing script-tag attributes
    static ref SCRIPT_ATTR_RE: Regex =
        Regex::new(r#"(?i)([a-z0-9-]+)(?:=(?:"([^"]*)"|'([^']*)'|([^>\s]+)))?"#).unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR TYPE
// ═══════════════════════════════════════════════════════════════════════════════

pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const BAD_STRATEGY: &str = "BAD_STRATEGY";

/// Failure local to one file. The transform never produces a partial splice
/// on error; the build driver decides what to surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformError {
    pub code: String,
    pub message: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl TransformError {
    pub fn new(code: &str, message: &str, file: &str, line: u32, column: u32) -> Self {
        TransformError {
            code: code.to_string(),
            message: message.to_string(),
            file: file.to_string(),
            line,
            column,
        }
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.file, self.message)
    }
}

impl std::error::Error for TransformError {}

// ═══════════════════════════════════════════════════════════════════════════════
// DESCRIPTOR TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// One `<script>` block of a component file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptBlock {
    pub content: String,
    pub attributes: HashMap<String, String>,
    /// Embedded language tag (`lang="ts"`), if any.
    pub lang: Option<String>,
    /// Byte offset of the block's opening `<`.
    pub start: usize,
    /// Byte offset just past the closing `</script>`.
    pub end: usize,
}

/// Structural summary of a component file's script blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SfcDescriptor {
    /// Explicit options-object block (`<script>` without `setup`).
    pub script: Option<ScriptBlock>,
    /// Terse top-level-executable block (`<script setup>`).
    pub script_setup: Option<ScriptBlock>,
}

impl SfcDescriptor {
    pub fn has_plain_script(&self) -> bool {
        self.script.is_some()
    }

    pub fn has_setup_script(&self) -> bool {
        self.script_setup.is_some()
    }

    pub fn setup_lang(&self) -> Option<&str> {
        self.script_setup.as_ref().and_then(|block| block.lang.as_deref())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PARSING
// ═══════════════════════════════════════════════════════════════════════════════

/// Scan `source` for script blocks and build the descriptor.
///
/// An opening `<script` tag with no matching close is malformed input and
/// fails the whole file. Extra blocks of a kind already seen are ignored;
/// the first one wins.
pub fn parse_sfc(source: &str, file: &str) -> Result<SfcDescriptor, TransformError> {
    let mut descriptor = SfcDescriptor::default();
    let mut matched = 0;

    for caps in SCRIPT_BLOCK_RE.captures_iter(source) {
        matched += 1;

        let full = caps.get(0).unwrap();
        let attr_text = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let content = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        let attributes = parse_attributes(attr_text);
        let block = ScriptBlock {
            content: content.to_string(),
            lang: attributes.get("lang").cloned(),
            attributes,
            start: full.start(),
            end: full.end(),
        };

        if block.attributes.contains_key("setup") {
            if descriptor.script_setup.is_none() {
                descriptor.script_setup = Some(block);
            }
        } else if descriptor.script.is_none() {
            descriptor.script = Some(block);
        }
    }

    if SCRIPT_OPEN_RE.find_iter(source).count() > matched {
        return Err(TransformError::new(
            PARSE_ERROR,
            "unterminated <script> block",
            file,
            0,
            0,
        ));
    }

    Ok(descriptor)
}

/// Parse the attribute text of a script tag. Bare attributes get the value
/// `"true"`, mirroring how the build toolchain reports them.
fn parse_attributes(attr_text: &str) -> HashMap<String, String> {
    let mut attributes = HashMap::new();

    for caps in SCRIPT_ATTR_RE.captures_iter(attr_text) {
        if let Some(name) = caps.get(1) {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "true".to_string());
            attributes.insert(name.as_str().to_lowercase(), value);
        }
    }

    attributes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_setup_block_with_lang() {
        let source = r#"<script setup lang="ts">const x = 1</script>"#;
        let descriptor = parse_sfc(source, "test.vue").unwrap();

        assert!(!descriptor.has_plain_script());
        assert!(descriptor.has_setup_script());
        assert_eq!(descriptor.setup_lang(), Some("ts"));

        let block = descriptor.script_setup.unwrap();
        assert_eq!(block.content, "const x = 1");
        assert_eq!(block.attributes.get("setup"), Some(&"true".to_string()));
        assert_eq!(block.start, 0);
        assert_eq!(block.end, source.len());
    }

    #[test]
    fn test_parse_plain_block() {
        let descriptor = parse_sfc("<script>export default {}</script>", "test.vue").unwrap();
        assert!(descriptor.has_plain_script());
        assert!(!descriptor.has_setup_script());
        assert_eq!(descriptor.setup_lang(), None);
    }

    #[test]
    fn test_parse_both_blocks() {
        let source = "<script>export default {}</script>\n<script setup>const a = 1</script>";
        let descriptor = parse_sfc(source, "test.vue").unwrap();
        assert!(descriptor.has_plain_script());
        assert!(descriptor.has_setup_script());
    }

    #[test]
    fn test_parse_no_script() {
        let descriptor = parse_sfc("<template><div /></template>", "test.vue").unwrap();
        assert!(!descriptor.has_plain_script());
        assert!(!descriptor.has_setup_script());
    }

    #[test]
    fn test_parse_attribute_quoting_variants() {
        let descriptor =
            parse_sfc("<script setup lang='ts' generic=T>x</script>", "test.vue").unwrap();
        let block = descriptor.script_setup.unwrap();
        assert_eq!(block.lang.as_deref(), Some("ts"));
        assert_eq!(block.attributes.get("generic"), Some(&"T".to_string()));
    }

    #[test]
    fn test_parse_unterminated_block_is_an_error() {
        let err = parse_sfc("<script setup>\nconst x = 1", "broken.vue").unwrap_err();
        assert_eq!(err.code, PARSE_ERROR);
        assert_eq!(err.file, "broken.vue");
    }
}
