//! Visitor contract for event consumers
//!
//! The scanner invokes a visitor once per surviving event, in ascending line
//! order. The metadata generator that turns events into a persisted blob
//! lives outside this workspace and implements this trait.

use crate::event::SourceEvent;

/// Callback interface for the ordered event stream
pub trait EventVisitor {
    /// A comment block, full text including delimiters
    fn visit_comment(&mut self, text: &str, line: u32);

    /// A `#define NAME <value>` classified as a numeric constant
    fn visit_numeric_constant(&mut self, name: &str, line: u32);

    /// A value-less `#define NAME` or `#undef NAME`
    fn visit_no_value_constant(&mut self, name: &str, is_define: bool, line: u32);
}

/// Visitor that records every event it receives
///
/// Convenient for tests and for consumers that want the stream as a `Vec`
/// rather than implementing the callbacks themselves.
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    /// Events in dispatch order
    pub events: Vec<SourceEvent>,
}

impl CollectingVisitor {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventVisitor for CollectingVisitor {
    fn visit_comment(&mut self, text: &str, line: u32) {
        self.events.push(SourceEvent::Comment {
            text: text.to_string(),
            line,
        });
    }

    fn visit_numeric_constant(&mut self, name: &str, line: u32) {
        self.events.push(SourceEvent::NumericConstant {
            name: name.to_string(),
            line,
        });
    }

    fn visit_no_value_constant(&mut self, name: &str, is_define: bool, line: u32) {
        self.events.push(SourceEvent::FlagDirective {
            name: name.to_string(),
            is_define,
            line,
        });
    }
}
