//! Comment scrubbing state machine
//!
//! Converts raw header text into comment-free text with identical line
//! structure: every non-whitespace character belonging to a comment is
//! masked to a space, so the classification pass sees directives at their
//! original line and column. Each contiguous comment block is reported as a
//! `Comment` event tagged with the line it opened on.
//!
//! One exception: a block comment that opens and closes on the same line and
//! wraps nothing but an `#undef` of a recognized flag name is unwrapped back
//! into the output as a real directive. Headers use that convention to
//! document platform flags that are deliberately left undefined.

use defscan_core::{Error, Result, SourceEvent};
use regex::Regex;
use tracing::trace;

/// Only flag names with this prefix are recognized inside commented-out
/// undef lines.
const COMMENTED_UNDEF_PREFIX: &str = "OMR_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Outside any comment
    Code,
    /// Saw `/`, not yet emitted
    FirstSlash,
    /// Inside `// ...`
    LineComment,
    /// Inside `/* ... */`
    BlockComment,
    /// Inside a block comment, saw `*`
    BlockCommentStar,
}

/// Result of one scrubbing pass
pub struct ScrubOutput {
    /// Comment-free text, same line structure as the input
    pub text: String,
    /// One event per comment block, in discovery order
    pub comments: Vec<SourceEvent>,
}

/// Character-level comment scrubber
pub struct CommentScrubber {
    commented_undef: Regex,
}

impl CommentScrubber {
    pub fn new() -> Self {
        let pattern = format!(
            r"^/\*\s*#undef\s+({}[A-Za-z0-9_]+)\s*\*/$",
            COMMENTED_UNDEF_PREFIX
        );
        Self {
            commented_undef: Regex::new(&pattern).unwrap(),
        }
    }

    /// Scrub `source`, producing masked text plus the comment events.
    pub fn scrub(&self, source: &str) -> Result<ScrubOutput> {
        let mut out = String::with_capacity(source.len());
        let mut comments = Vec::new();
        let mut state = State::Code;
        let mut comment = String::new();
        let mut comment_line = 0u32;
        let mut line = 1u32;

        for ch in source.chars() {
            match (state, ch) {
                (State::Code, '/') => state = State::FirstSlash,
                (State::Code, c) => out.push(c),

                (State::FirstSlash, '/') => {
                    state = State::LineComment;
                    comment_line = line;
                    comment.push_str("//");
                }
                (State::FirstSlash, '*') => {
                    state = State::BlockComment;
                    comment_line = line;
                    comment.push_str("/*");
                }
                (State::FirstSlash, c) => {
                    state = State::Code;
                    out.push('/');
                    out.push(c);
                }

                (State::LineComment, '\n') => {
                    state = State::Code;
                    let text = std::mem::take(&mut comment);
                    mask_into(&mut out, &text);
                    comments.push(SourceEvent::Comment {
                        text,
                        line: comment_line,
                    });
                    out.push('\n');
                }
                (State::LineComment, c) => comment.push(c),

                (State::BlockComment, '*') => state = State::BlockCommentStar,
                (State::BlockComment, c) => comment.push(c),

                (State::BlockCommentStar, '/') => {
                    state = State::Code;
                    comment.push_str("*/");
                    let text = std::mem::take(&mut comment);
                    self.close_block(&mut out, &mut comments, text, comment_line, line);
                }
                (State::BlockCommentStar, c) => {
                    state = State::BlockComment;
                    comment.push('*');
                    comment.push(c);
                }
            }

            // Line numbers track the original file regardless of state.
            if ch == '\n' {
                line += 1;
            }
        }

        match state {
            State::Code => {
                if !comment.is_empty() {
                    return Err(Error::ScrubberState(format!(
                        "buffered comment text outside a comment: {:?}",
                        comment
                    )));
                }
            }
            State::FirstSlash => out.push('/'),
            // Line comment terminated by end of input rather than a newline.
            State::LineComment => {
                let text = std::mem::take(&mut comment);
                mask_into(&mut out, &text);
                comments.push(SourceEvent::Comment {
                    text,
                    line: comment_line,
                });
            }
            // Unterminated block comment. The remainder of the file was
            // comment text, so report it as such.
            State::BlockComment | State::BlockCommentStar => {
                if state == State::BlockCommentStar {
                    comment.push('*');
                }
                let text = std::mem::take(&mut comment);
                mask_into(&mut out, &text);
                comments.push(SourceEvent::Comment {
                    text,
                    line: comment_line,
                });
            }
        }

        Ok(ScrubOutput {
            text: out,
            comments,
        })
    }

    /// Close a block comment: either unwrap a same-line commented-out undef
    /// back into the output, or mask it and record the event.
    fn close_block(
        &self,
        out: &mut String,
        comments: &mut Vec<SourceEvent>,
        text: String,
        comment_line: u32,
        current_line: u32,
    ) {
        if comment_line == current_line {
            if let Some(caps) = self.commented_undef.captures(&text) {
                let directive = format!("#undef {}", &caps[1]);
                trace!(line = comment_line, "unwrapping commented-out undef");
                out.push_str(&directive);
                // Pad to the comment's width so later columns are unchanged.
                for _ in directive.chars().count()..text.chars().count() {
                    out.push(' ');
                }
                return;
            }
        }
        mask_into(out, &text);
        comments.push(SourceEvent::Comment {
            text,
            line: comment_line,
        });
    }
}

impl Default for CommentScrubber {
    fn default() -> Self {
        Self::new()
    }
}

/// Mask comment text into the output: whitespace is kept, everything else
/// becomes a space, so line structure and column offsets survive.
fn mask_into(out: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_whitespace() {
            out.push(c);
        } else {
            out.push(' ');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scrub(source: &str) -> ScrubOutput {
        CommentScrubber::new().scrub(source).unwrap()
    }

    #[test]
    fn test_line_structure_preserved() {
        let source = "int a; /* one\ntwo */ int b;\n// tail\nint c;\n";
        let output = scrub(source);
        assert_eq!(output.text.lines().count(), source.lines().count());
        assert_eq!(output.text.len(), source.len());
        // Non-comment characters keep their positions.
        assert_eq!(output.text.find("int a;"), source.find("int a;"));
        assert_eq!(output.text.find("int b;"), source.find("int b;"));
        assert_eq!(output.text.find("int c;"), source.find("int c;"));
    }

    #[test]
    fn test_block_comment_masked() {
        let output = scrub("a/* x */b\n");
        assert_eq!(output.text, "a       b\n");
        assert_eq!(
            output.comments,
            vec![SourceEvent::Comment {
                text: "/* x */".to_string(),
                line: 1,
            }]
        );
    }

    #[test]
    fn test_line_comment_masked() {
        let output = scrub("x = 1; // note\ny = 2;\n");
        assert_eq!(output.text, "x = 1;        \ny = 2;\n");
        assert_eq!(
            output.comments,
            vec![SourceEvent::Comment {
                text: "// note".to_string(),
                line: 1,
            }]
        );
    }

    #[test]
    fn test_division_is_not_a_comment() {
        let output = scrub("a = b / c;\n");
        assert_eq!(output.text, "a = b / c;\n");
        assert!(output.comments.is_empty());
    }

    #[test]
    fn test_multi_line_block_comment_line_tag() {
        let source = "one\n/* spans\nlines */\nfour\n";
        let output = scrub(source);
        assert_eq!(output.comments.len(), 1);
        assert_eq!(output.comments[0].line(), 2);
        assert_eq!(output.text.lines().count(), 4);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let source = "#define A 1 /* cast */\n// done\n#define B 2\n";
        let first = scrub(source);
        let second = scrub(&first.text);
        assert_eq!(second.text, first.text);
        assert!(second.comments.is_empty());
    }

    #[test]
    fn test_commented_undef_unwrapped() {
        let source = "/* #undef OMR_FOO */\n";
        let output = scrub(source);
        assert!(output.comments.is_empty());
        assert_eq!(output.text.lines().next().unwrap().trim_end(), "#undef OMR_FOO");
        // Width is preserved by the padding.
        assert_eq!(output.text.len(), source.len());
    }

    #[test]
    fn test_commented_undef_requires_prefix() {
        let output = scrub("/* #undef PLAIN_FLAG */\n");
        assert_eq!(output.comments.len(), 1);
        assert!(!output.text.contains("#undef"));
    }

    #[test]
    fn test_commented_undef_requires_single_line() {
        let output = scrub("/* #undef OMR_FOO\n*/\n");
        assert_eq!(output.comments.len(), 1);
        assert!(!output.text.contains("#undef"));
    }

    #[test]
    fn test_line_comment_at_eof() {
        let output = scrub("// no newline");
        assert_eq!(
            output.comments,
            vec![SourceEvent::Comment {
                text: "// no newline".to_string(),
                line: 1,
            }]
        );
    }

    #[test]
    fn test_trailing_slash_kept() {
        let output = scrub("a = b /");
        assert_eq!(output.text, "a = b /");
    }
}
