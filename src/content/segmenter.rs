//! Splits raw topic text into prose and fenced-code segments.
//!
//! Topic content is markdown-like text where the only recognized structure
//! is the triple-backtick fence, optionally tagged `sql` or `bash`. All
//! other markdown syntax (lists, headers, emphasis) passes through as raw
//! prose. Segmentation is a pure function: identical input always yields an
//! identical, order-preserving sequence, and segment contents are never
//! transformed beyond trimming at the boundaries.

use serde::Serialize;

/// The fence delimiter recognized in topic content.
const FENCE: &str = "```";

/// Language tag of a fenced code block.
///
/// Untagged and unrecognized fences default to SQL since the catalog is a
/// SQL tutorial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Sql,
    Bash,
}

impl Language {
    /// Parse an opening-fence tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "bash" => Language::Bash,
            _ => Language::Sql,
        }
    }

    /// Display label for the code-block header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Sql => "sql",
            Language::Bash => "bash",
        }
    }
}

/// One unit of parsed topic content: either prose or a tagged code block.
///
/// Segments carry no identity beyond their position in the produced
/// sequence; they are rebuilt from scratch on every topic change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    Text { content: String },
    Code { language: Language, content: String },
}

impl Segment {
    /// Returns the segment body.
    pub fn content(&self) -> &str {
        match self {
            Segment::Text { content } | Segment::Code { content, .. } => content,
        }
    }

    /// True for code segments.
    pub fn is_code(&self) -> bool {
        matches!(self, Segment::Code { .. })
    }
}

/// Split raw topic text into an ordered sequence of segments.
///
/// The scanner walks the string left to right looking for opening fences.
/// The remainder of the opening-fence line is the language tag; the body
/// runs up to the next fence (lazy matching, so the first closing fence
/// terminates the block). Text between fences is trimmed and kept only if
/// non-empty. An unterminated opening fence is not dropped: the remainder
/// of the string, fence included, is kept as literal prose so no input text
/// can silently vanish.
pub fn segment(raw: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut pos = 0;

    while let Some(rel) = raw[pos..].find(FENCE) {
        let fence_start = pos + rel;
        let tag_start = fence_start + FENCE.len();

        // The rest of the fence line is the language tag.
        let (tag, body_start) = match raw[tag_start..].find('\n') {
            Some(nl) => (raw[tag_start..tag_start + nl].trim(), tag_start + nl + 1),
            None => (raw[tag_start..].trim(), raw.len()),
        };

        // Unterminated fence: treat the remainder as prose.
        let Some(close_rel) = raw[body_start..].find(FENCE) else {
            break;
        };
        let close = body_start + close_rel;

        push_text(&mut segments, &raw[pos..fence_start]);
        segments.push(Segment::Code {
            language: Language::from_tag(tag),
            content: raw[body_start..close].trim().to_string(),
        });
        pos = close + FENCE.len();
    }

    push_text(&mut segments, &raw[pos..]);
    segments
}

/// Append a text segment if the span is non-empty after trimming.
fn push_text(segments: &mut Vec<Segment>, span: &str) {
    let trimmed = span.trim();
    if !trimmed.is_empty() {
        segments.push(Segment::Text {
            content: trimmed.to_string(),
        });
    }
}

/// Split prose into paragraphs.
///
/// A paragraph boundary is any whitespace run containing at least two line
/// breaks. Each paragraph is trimmed; empty paragraphs are dropped.
pub fn paragraphs(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut para_start = 0;
    let mut ws_start: Option<usize> = None;
    let mut newlines = 0;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if ws_start.is_none() {
                ws_start = Some(i);
                newlines = 0;
            }
            if c == '\n' {
                newlines += 1;
            }
        } else if let Some(ws) = ws_start.take() {
            if newlines >= 2 {
                let para = text[para_start..ws].trim();
                if !para.is_empty() {
                    out.push(para);
                }
                para_start = i;
            }
        }
    }

    let tail = text[para_start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

/// Derive the copy key for a code block.
///
/// Keys are qualified by topic id so an indicator scheduled for one topic
/// can never match a block of another topic, and `index` is the code
/// block's ordinal within the topic's segmented output.
pub fn copy_key(topic_id: &str, index: usize) -> String {
    format!("{topic_id}-code-{index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &str) -> Segment {
        Segment::Text {
            content: content.to_string(),
        }
    }

    fn code(language: Language, content: &str) -> Segment {
        Segment::Code {
            language,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_no_fences_yields_single_text_segment() {
        assert_eq!(segment("just text"), vec![text("just text")]);
    }

    #[test]
    fn test_blank_input_yields_no_segments() {
        assert!(segment("").is_empty());
        assert!(segment("   \n\n\t  ").is_empty());
    }

    #[test]
    fn test_prose_code_prose() {
        let raw = "intro\n```sql\nSELECT 1;\n```\nmore";
        assert_eq!(
            segment(raw),
            vec![text("intro"), code(Language::Sql, "SELECT 1;"), text("more")]
        );
    }

    #[test]
    fn test_bash_tag() {
        let raw = "```bash\nls -la\n```";
        assert_eq!(segment(raw), vec![code(Language::Bash, "ls -la")]);
    }

    #[test]
    fn test_untagged_fence_defaults_to_sql() {
        let raw = "```\nSELECT 2;\n```";
        assert_eq!(segment(raw), vec![code(Language::Sql, "SELECT 2;")]);
    }

    #[test]
    fn test_unrecognized_tag_defaults_to_sql() {
        let raw = "```python\nprint(1)\n```";
        assert_eq!(segment(raw), vec![code(Language::Sql, "print(1)")]);
    }

    #[test]
    fn test_adjacent_code_blocks() {
        let raw = "```sql\nA\n```\n```bash\nB\n```";
        assert_eq!(
            segment(raw),
            vec![code(Language::Sql, "A"), code(Language::Bash, "B")]
        );
    }

    #[test]
    fn test_whitespace_only_spans_are_dropped() {
        let raw = "\n\n```sql\nA\n```\n   \n";
        assert_eq!(segment(raw), vec![code(Language::Sql, "A")]);
    }

    #[test]
    fn test_unterminated_fence_kept_as_prose() {
        let raw = "before\n```sql\nSELECT 1;";
        assert_eq!(segment(raw), vec![text("before\n```sql\nSELECT 1;")]);
    }

    #[test]
    fn test_unterminated_fence_after_closed_block() {
        let raw = "```sql\nA\n```\ntail\n```bash\nnever closed";
        assert_eq!(
            segment(raw),
            vec![code(Language::Sql, "A"), text("tail\n```bash\nnever closed")]
        );
    }

    #[test]
    fn test_segmentation_is_idempotent() {
        let raw = "a\n\n```sql\nSELECT 1;\n```\n\nb\n```bash\nls\n```";
        assert_eq!(segment(raw), segment(raw));
    }

    #[test]
    fn test_structure_round_trip() {
        // Every non-whitespace character of the input lands in exactly one
        // segment, in source order.
        let raw = "first\n```sql\nSELECT 1;\n```\nmiddle\n```bash\nls\n```\nlast";
        let segs = segment(raw);
        let rebuilt: Vec<&str> = segs.iter().map(|s| s.content()).collect();
        assert_eq!(rebuilt, vec!["first", "SELECT 1;", "middle", "ls", "last"]);
        assert_eq!(
            segs.iter().map(|s| s.is_code()).collect::<Vec<_>>(),
            vec![false, true, false, true, false]
        );
    }

    #[test]
    fn test_code_content_preserves_inner_lines() {
        let raw = "```sql\nSELECT a,\n       b\nFROM t;\n```";
        assert_eq!(
            segment(raw),
            vec![code(Language::Sql, "SELECT a,\n       b\nFROM t;")]
        );
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        assert_eq!(paragraphs("one\n\ntwo\n\n\nthree"), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_paragraphs_keep_single_newlines_together() {
        assert_eq!(paragraphs("a\nb\n\nc"), vec!["a\nb", "c"]);
    }

    #[test]
    fn test_paragraphs_handle_crlf_and_padding() {
        assert_eq!(paragraphs("  a\r\n\r\n  b  "), vec!["a", "b"]);
        assert!(paragraphs("  \n\n ").is_empty());
    }

    #[test]
    fn test_copy_key_is_topic_qualified() {
        assert_eq!(copy_key("joins", 0), "joins-code-0");
        assert_ne!(copy_key("joins", 1), copy_key("ctes", 1));
    }

    #[test]
    fn test_serialized_shape() {
        let segs = segment("hello\n```sql\nSELECT 1;\n```");
        let json = serde_json::to_value(&segs).unwrap();
        assert_eq!(json[0]["kind"], "text");
        assert_eq!(json[1]["kind"], "code");
        assert_eq!(json[1]["language"], "sql");
        assert_eq!(json[1]["content"], "SELECT 1;");
    }
}
