//! defscan Core
//!
//! Core types and interfaces for the defscan header scanner: the classified
//! event stream extracted from a header file, the visitor contract through
//! which a consumer (typically a metadata generator) receives it, and the
//! shared error type.

pub mod error;
pub mod event;
pub mod visitor;

pub use error::{Error, Result};
pub use event::SourceEvent;
pub use visitor::{CollectingVisitor, EventVisitor};
