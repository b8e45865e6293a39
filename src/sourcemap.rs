//! Position Mapping
//!
//! Source map v3 generation for the prepend-only splice. The splice never
//! touches original bytes, so one mapping per original line at column 0 is
//! exact: columns are unshifted and every original line `n` lives at
//! generated line `n + k` for `k` inserted lines. `original_position_for`
//! walks the map back the other way for overlays and debuggers.

use serde::{Deserialize, Serialize};

const BASE64_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Standard source map, serialized with the conventional JSON field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    pub version: u32,
    pub file: Option<String>,
    pub sources: Vec<String>,
    pub sources_content: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Translate a post-transform position (0-based line/column) back to the
    /// original source. Returns `None` for generated lines with no mapping,
    /// which here is exactly the inserted block.
    pub fn original_position_for(&self, line: u32, column: u32) -> Option<(u32, u32)> {
        let mut src_line: i64 = 0;
        let mut src_col: i64 = 0;
        let mut best: Option<(i64, i64, i64)> = None;

        for (gen_line, group) in self.mappings.split(';').enumerate() {
            if gen_line as u32 > line {
                break;
            }
            let mut gen_col: i64 = 0;
            for segment in group.split(',').filter(|s| !s.is_empty()) {
                let fields = decode_segment(segment)?;
                gen_col += fields.first().copied().unwrap_or(0);
                if fields.len() >= 4 {
                    src_line += fields[2];
                    src_col += fields[3];
                }
                if gen_line as u32 == line && gen_col as u32 <= column {
                    best = Some((gen_col, src_line, src_col));
                }
            }
        }

        // Mapped positions sit on line boundaries, so the column offset
        // carries over unchanged.
        best.map(|(gen_col, line, col)| (line as u32, col as u32 + (column - gen_col as u32)))
    }
}

/// Build the map for `inserted_lines` lines prepended to `original`.
pub fn prepend_map(original: &str, inserted_lines: u32, file_id: &str) -> SourceMap {
    let original_lines = original.split('\n').count() as u32;
    let mut mappings = String::new();

    for _ in 0..inserted_lines {
        mappings.push(';');
    }
    for line in 0..original_lines {
        if line > 0 {
            mappings.push(';');
        }
        // Segment fields: generated column, source index, source line
        // delta, source column. All deltas after the first line are 1.
        encode_vlq(&mut mappings, 0);
        encode_vlq(&mut mappings, 0);
        encode_vlq(&mut mappings, if line == 0 { 0 } else { 1 });
        encode_vlq(&mut mappings, 0);
    }

    SourceMap {
        version: 3,
        file: None,
        sources: vec![file_id.to_string()],
        sources_content: vec![original.to_string()],
        names: Vec::new(),
        mappings,
    }
}

fn encode_vlq(out: &mut String, value: i64) {
    let mut vlq = if value < 0 {
        (((-value) as u64) << 1) | 1
    } else {
        (value as u64) << 1
    };

    loop {
        let mut digit = (vlq & 0b11111) as usize;
        vlq >>= 5;
        if vlq > 0 {
            digit |= 0b100000;
        }
        out.push(BASE64_CHARS[digit] as char);
        if vlq == 0 {
            break;
        }
    }
}

fn decode_segment(segment: &str) -> Option<Vec<i64>> {
    let mut fields = Vec::with_capacity(5);
    let mut value: i64 = 0;
    let mut shift = 0;

    for byte in segment.bytes() {
        let digit = BASE64_CHARS.iter().position(|&c| c == byte)? as i64;
        value |= (digit & 0b11111) << shift;
        if digit & 0b100000 != 0 {
            shift += 5;
        } else {
            let magnitude = value >> 1;
            fields.push(if value & 1 != 0 { -magnitude } else { magnitude });
            value = 0;
            shift = 0;
        }
    }

    Some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(value: i64) -> i64 {
        let mut encoded = String::new();
        encode_vlq(&mut encoded, value);
        decode_segment(&encoded).unwrap()[0]
    }

    #[test]
    fn test_vlq_roundtrip() {
        for value in [0, 1, -1, 15, 16, 31, 32, 1024, -1024, 123456] {
            assert_eq!(roundtrip(value), value);
        }
    }

    #[test]
    fn test_prepend_map_mappings_shape() {
        let map = prepend_map("line one\nline two", 2, "test.vue");
        assert_eq!(map.version, 3);
        assert_eq!(map.sources, vec!["test.vue".to_string()]);
        assert_eq!(map.sources_content, vec!["line one\nline two".to_string()]);
        // Two empty groups for the inserted lines, then one segment per
        // original line.
        assert_eq!(map.mappings, ";;AAAA;AACA");
    }

    #[test]
    fn test_original_position_for_shifted_lines() {
        let map = prepend_map("a\nbb\nccc", 7, "test.vue");
        assert_eq!(map.original_position_for(7, 0), Some((0, 0)));
        assert_eq!(map.original_position_for(8, 1), Some((1, 1)));
        assert_eq!(map.original_position_for(9, 2), Some((2, 2)));
    }

    #[test]
    fn test_original_position_for_inserted_lines() {
        let map = prepend_map("a\nb", 7, "test.vue");
        for line in 0..7 {
            assert_eq!(map.original_position_for(line, 0), None);
        }
    }

    #[test]
    fn test_map_serializes_with_standard_field_names() {
        let json = prepend_map("x", 1, "a.vue").to_json();
        assert!(json.contains("\"version\":3"));
        assert!(json.contains("\"sourcesContent\""));
        assert!(json.contains("\"mappings\":\";AAAA\""));
    }
}
