//! Classified source events
//!
//! Each event carries the 1-based line number in the original file where it
//! was discovered. Events are ordered by line alone; the variant never
//! participates in ordering.

use serde::{Deserialize, Serialize};

/// A classified fact extracted from one header file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceEvent {
    /// A contiguous comment block, delimiters included, tagged with the
    /// line on which the comment opened
    Comment { text: String, line: u32 },
    /// A `#define NAME <value>` whose value classified as a numeric constant
    NumericConstant { name: String, line: u32 },
    /// A value-less `#define NAME` or `#undef NAME`
    FlagDirective {
        name: String,
        is_define: bool,
        line: u32,
    },
}

impl SourceEvent {
    /// Source line (1-based) the event was discovered on
    pub fn line(&self) -> u32 {
        match self {
            SourceEvent::Comment { line, .. }
            | SourceEvent::NumericConstant { line, .. }
            | SourceEvent::FlagDirective { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for SourceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceEvent::Comment { text, line } => write!(f, "{}: comment {:?}", line, text),
            SourceEvent::NumericConstant { name, line } => {
                write!(f, "{}: constant {}", line, name)
            }
            SourceEvent::FlagDirective {
                name,
                is_define,
                line,
            } => {
                let keyword = if *is_define { "define" } else { "undef" };
                write!(f, "{}: {} {}", line, keyword, name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_accessor() {
        let event = SourceEvent::NumericConstant {
            name: "SIZE_MAX".to_string(),
            line: 7,
        };
        assert_eq!(event.line(), 7);
    }

    #[test]
    fn test_display() {
        let event = SourceEvent::FlagDirective {
            name: "FLAG_OFF".to_string(),
            is_define: false,
            line: 3,
        };
        assert_eq!(event.to_string(), "3: undef FLAG_OFF");
    }

    #[test]
    fn test_serialize() {
        let event = SourceEvent::Comment {
            text: "/* x */".to_string(),
            line: 1,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("Comment"));
        assert_eq!(serde_json::from_str::<SourceEvent>(&json).unwrap(), event);
    }
}
