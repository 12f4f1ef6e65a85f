use std::sync::OnceLock;

use eframe::egui;
use regex::Regex;

/// One piece of a message body after code detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    InlineCode(String),
    CodeBlock {
        /// First line of the fence, if non-empty after trimming.
        language: Option<String>,
        code: String,
    },
}

/// Fenced blocks first so a fence is never eaten as inline code.
fn code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)```.*?```|`[^`]+`").expect("valid code pattern"))
}

/// Split message text on triple-backtick and single-backtick delimiters.
/// Anything malformed (e.g. an unterminated fence) stays plain text.
pub fn segment(content: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for found in code_pattern().find_iter(content) {
        if found.start() > cursor {
            segments.push(Segment::Text(content[cursor..found.start()].to_string()));
        }
        segments.push(parse_code(found.as_str()));
        cursor = found.end();
    }

    if cursor < content.len() {
        segments.push(Segment::Text(content[cursor..].to_string()));
    }

    segments
}

fn parse_code(part: &str) -> Segment {
    if part.starts_with("```") && part.ends_with("```") && part.len() >= 6 {
        let inner = &part[3..part.len() - 3];
        let (first_line, rest) = inner.split_once('\n').unwrap_or((inner, ""));
        let language = first_line.trim();
        Segment::CodeBlock {
            language: (!language.is_empty()).then(|| language.to_string()),
            code: rest.to_string(),
        }
    } else {
        Segment::InlineCode(part[1..part.len() - 1].to_string())
    }
}

/// Paint a message body: plain labels, inline code spans, and framed
/// code blocks with an optional language label on top.
pub fn render(ui: &mut egui::Ui, content: &str) {
    for piece in segment(content) {
        match piece {
            Segment::Text(text) => {
                let trimmed = text.trim_matches('\n');
                if !trimmed.is_empty() {
                    ui.label(trimmed);
                }
            }
            Segment::InlineCode(code) => {
                ui.code(code);
            }
            Segment::CodeBlock { language, code } => {
                if let Some(language) = language {
                    ui.label(egui::RichText::new(language).monospace().weak().small());
                }
                egui::Frame::dark_canvas(ui.style())
                    .inner_margin(egui::Margin::same(8))
                    .show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.monospace(code);
                    });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_code_becomes_span() {
        assert_eq!(segment("`x`"), vec![Segment::InlineCode("x".to_string())]);
    }

    #[test]
    fn fenced_block_with_language_label() {
        let segments = segment("```go\nfmt.Println()\n```");
        assert_eq!(
            segments,
            vec![Segment::CodeBlock {
                language: Some("go".to_string()),
                code: "fmt.Println()\n".to_string(),
            }]
        );
    }

    #[test]
    fn fenced_block_without_language() {
        let segments = segment("```\nlet x = 1;\n```");
        assert_eq!(
            segments,
            vec![Segment::CodeBlock {
                language: None,
                code: "let x = 1;\n".to_string(),
            }]
        );
    }

    #[test]
    fn mixed_content_keeps_order() {
        let segments = segment("try `foo()` like this:\n```rust\nfoo();\n```done");
        assert_eq!(
            segments,
            vec![
                Segment::Text("try ".to_string()),
                Segment::InlineCode("foo()".to_string()),
                Segment::Text(" like this:\n".to_string()),
                Segment::CodeBlock {
                    language: Some("rust".to_string()),
                    code: "foo();\n".to_string(),
                },
                Segment::Text("done".to_string()),
            ]
        );
    }

    #[test]
    fn unterminated_fence_stays_text() {
        let segments = segment("```rust\nfn broken(");
        assert_eq!(
            segments,
            vec![Segment::Text("```rust\nfn broken(".to_string())]
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(
            segment("no code here"),
            vec![Segment::Text("no code here".to_string())]
        );
    }

    #[test]
    fn empty_fence_has_no_label_and_no_code() {
        let segments = segment("``````");
        assert_eq!(
            segments,
            vec![Segment::CodeBlock {
                language: None,
                code: String::new(),
            }]
        );
    }

    #[test]
    fn single_line_fence_is_all_label() {
        // No newline after the fence opener: the whole body is the label
        // line, so the block has no code.
        let segments = segment("```go```");
        assert_eq!(
            segments,
            vec![Segment::CodeBlock {
                language: Some("go".to_string()),
                code: String::new(),
            }]
        );
    }

    #[test]
    fn inline_code_may_span_words() {
        let segments = segment("`cargo build --release`");
        assert_eq!(
            segments,
            vec![Segment::InlineCode("cargo build --release".to_string())]
        );
    }
}
