//! Declaration Splicing
//!
//! Builds the minimal `<script>` declaration block and prepends it to the
//! component source. Original bytes are never altered, only prefixed, which
//! keeps the position map a pure line shift.

use crate::name::sanitize_component_name;
use crate::sourcemap::{prepend_map, SourceMap};

/// Result of one splice: the full new source plus its position map.
#[derive(Debug, Clone)]
pub struct SpliceResult {
    pub code: String,
    pub map: SourceMap,
}

/// Render the declaration block for `name`, tagged with the setup block's
/// language when present.
pub fn create_script_block(name: &str, lang: Option<&str>) -> String {
    let safe_name = sanitize_component_name(name);
    let lang_attr = lang
        .map(|lang| format!(" lang=\"{}\"", lang))
        .unwrap_or_default();

    format!(
        concat!(
            "<script{}>\n",
            "import {{ defineComponent }} from 'vue'\n",
            "\n",
            "export default defineComponent({{\n",
            "  name: '{}',\n",
            "}})\n",
            "</script>\n",
        ),
        lang_attr, safe_name
    )
}

/// Prepend the declaration block at offset 0 and map every original line to
/// its shifted position. Deterministic: identical inputs yield byte-identical
/// output.
pub fn inject_name(source: &str, name: &str, lang: Option<&str>, file_id: &str) -> SpliceResult {
    let block = create_script_block(name, lang);
    let inserted_lines = block.matches('\n').count() as u32;

    let mut code = String::with_capacity(block.len() + source.len());
    code.push_str(&block);
    code.push_str(source);

    SpliceResult {
        code,
        map: prepend_map(source, inserted_lines, file_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::has_declared_name;

    #[test]
    fn test_create_script_block_without_lang() {
        let block = create_script_block("test", None);
        assert_eq!(
            block,
            "<script>\nimport { defineComponent } from 'vue'\n\nexport default defineComponent({\n  name: 'test',\n})\n</script>\n"
        );
    }

    #[test]
    fn test_create_script_block_with_lang() {
        let block = create_script_block("Card", Some("ts"));
        assert!(block.starts_with("<script lang=\"ts\">\n"));
        assert!(block.contains("  name: 'Card',\n"));
    }

    #[test]
    fn test_create_script_block_sanitizes_name() {
        let block = create_script_block("foo.bar", None);
        assert!(block.contains("name: 'foo_bar'"));
    }

    #[test]
    fn test_inject_name_prepends_without_altering_source() {
        let source = "<script setup>\n</script>";
        let result = inject_name(source, "test", None, "test.vue");

        assert!(result.code.ends_with(source));
        assert_eq!(
            result.code.len(),
            create_script_block("test", None).len() + source.len()
        );
    }

    #[test]
    fn test_inject_name_is_deterministic() {
        let first = inject_name("<script setup>\n</script>", "App", Some("ts"), "App.vue");
        let second = inject_name("<script setup>\n</script>", "App", Some("ts"), "App.vue");
        assert_eq!(first.code, second.code);
        assert_eq!(first.map, second.map);
    }

    #[test]
    fn test_injected_block_satisfies_detector() {
        let result = inject_name("<script setup>\n</script>", "test", None, "test.vue");
        assert!(has_declared_name(&result.code));
    }

    #[test]
    fn test_block_line_count_matches_map_shift() {
        let block = create_script_block("test", None);
        assert_eq!(block.matches('\n').count(), 7);

        let result = inject_name("first\nsecond", "test", None, "test.vue");
        assert_eq!(result.map.original_position_for(7, 0), Some((0, 0)));
        assert_eq!(result.map.original_position_for(8, 3), Some((1, 3)));
    }
}
