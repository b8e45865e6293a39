//! Declared-Name Detection
//!
//! Decides whether a component already carries an explicit name, so the
//! transform never overrides author intent and a second pass over its own
//! output is a no-op.

use lazy_static::lazy_static;
use regex::Regex;

use crate::parse::SfcDescriptor;

lazy_static! {
    static ref DEFINE_OPTIONS_NAME_RE: Regex =
        Regex::new(r"defineOptions\s*\(\s*\{[\s\S]*?\bname\s*:").unwrap();
    static ref DEFINE_COMPONENT_NAME_RE: Regex =
        Regex::new(r"defineComponent\s*\(\s*\{[\s\S]*?\bname\s*:").unwrap();
    static ref NAME_FIELD_RE: Regex = Regex::new(r#"\bname\s*:\s*["'][^"']+["']"#).unwrap();
}

/// Textual scan for an existing name declaration.
///
/// Deliberately a pattern match, not a parse: an unrelated `name: '...'`
/// key anywhere in the file also counts as declared. Skipping injection on
/// such a false positive is the safe direction, and it keeps the check a
/// single pass over the source with no second language parse.
pub fn has_declared_name(source: &str) -> bool {
    DEFINE_OPTIONS_NAME_RE.is_match(source)
        || DEFINE_COMPONENT_NAME_RE.is_match(source)
        || NAME_FIELD_RE.is_match(source)
}

/// A `name="..."` attribute on the setup tag counts as declared too. The
/// descriptor already carries the parsed attributes, so this check is
/// structural rather than textual.
pub fn setup_has_name_attr(descriptor: &SfcDescriptor) -> bool {
    descriptor
        .script_setup
        .as_ref()
        .map(|block| block.attributes.contains_key("name"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_sfc;

    #[test]
    fn test_define_options_name() {
        let source = "<script setup>\ndefineOptions({\n  name: 'Card'\n})\n</script>";
        assert!(has_declared_name(source));
    }

    #[test]
    fn test_define_component_name() {
        let source = "export default defineComponent({ name: 'Card' })";
        assert!(has_declared_name(source));
    }

    #[test]
    fn test_bare_name_field() {
        assert!(has_declared_name("const meta = { name: \"Card\" }"));
        // Empty values do not count.
        assert!(!has_declared_name("const meta = { name: '' }"));
    }

    #[test]
    fn test_undeclared() {
        assert!(!has_declared_name("<script setup>\nconst count = ref(0)\n</script>"));
        // The textual heuristic does not look at tag attributes.
        assert!(!has_declared_name("<script setup name=\"Card\">\n</script>"));
    }

    #[test]
    fn test_setup_name_attribute() {
        let with = parse_sfc("<script setup name=\"Card\">\n</script>", "a.vue").unwrap();
        assert!(setup_has_name_attr(&with));

        let without = parse_sfc("<script setup>\n</script>", "a.vue").unwrap();
        assert!(!setup_has_name_attr(&without));
    }
}
