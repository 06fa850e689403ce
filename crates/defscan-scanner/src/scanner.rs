//! Scan driver and event dispatch
//!
//! Runs the two passes in order (comment scrubbing, then line
//! classification), reconciles constants against later non-constant
//! redefinitions, and dispatches the surviving events to the visitor in
//! ascending line order.

use std::fs;
use std::path::Path;

use defscan_core::{EventVisitor, Result, SourceEvent};
use tracing::debug;

use crate::classify::{Classifier, LineKind, Patterns};
use crate::comments::CommentScrubber;
use crate::lines::LogicalLines;

/// Header scanner
///
/// Holds only compiled patterns; every scan keeps its state local to the
/// call, so one `Scanner` can serve many files, including concurrently from
/// several threads.
pub struct Scanner {
    scrubber: CommentScrubber,
    patterns: Patterns,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            scrubber: CommentScrubber::new(),
            patterns: Patterns::new(),
        }
    }

    /// Scan a header file and dispatch its event stream to `visitor`.
    ///
    /// Read failures propagate immediately; no partial results are
    /// delivered.
    pub fn scan(&self, path: &Path, visitor: &mut dyn EventVisitor) -> Result<()> {
        debug!("scanning {:?}", path);
        let source = fs::read_to_string(path)?;
        self.scan_source(&source, visitor)
    }

    /// Scan in-memory header text.
    pub fn scan_source(&self, source: &str, visitor: &mut dyn EventVisitor) -> Result<()> {
        let scrubbed = self.scrubber.scrub(source)?;
        let mut events = scrubbed.comments;
        let mut classifier = Classifier::new(&self.patterns);

        for (logical, line) in LogicalLines::new(&scrubbed.text) {
            match classifier.classify(&logical) {
                LineKind::Constant { name } => {
                    events.push(SourceEvent::NumericConstant { name, line });
                }
                LineKind::Flag { name, is_define } => {
                    events.push(SourceEvent::FlagDirective {
                        name,
                        is_define,
                        line,
                    });
                }
                LineKind::Other => {}
            }
        }

        // A non-constant occurrence anywhere in the file disqualifies every
        // accepted constant of that name.
        let rejected = classifier.into_non_constants();
        events.retain(|event| match event {
            SourceEvent::NumericConstant { name, .. } => !rejected.contains(name),
            _ => true,
        });

        // Stable: events on the same line stay in discovery order.
        events.sort_by_key(SourceEvent::line);
        debug!(events = events.len(), "dispatching event stream");

        for event in &events {
            match event {
                SourceEvent::Comment { text, line } => visitor.visit_comment(text, *line),
                SourceEvent::NumericConstant { name, line } => {
                    visitor.visit_numeric_constant(name, *line)
                }
                SourceEvent::FlagDirective {
                    name,
                    is_define,
                    line,
                } => visitor.visit_no_value_constant(name, *is_define, *line),
            }
        }
        Ok(())
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}
