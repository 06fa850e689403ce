//! defscan Scanner
//!
//! A limited-function C preprocessor that scans C/C++ header text and
//! extracts named numeric constant definitions (`#define NAME <value>`) and
//! build-flag directives (`#define`/`#undef` without a value) as an ordered
//! stream of classified events. It recognizes constant-shaped values; it
//! does not evaluate conditionals, expand function-like macros, or compute
//! expression results.
//!
//! ## Modules
//!
//! - `comments` - comment scrubbing state machine
//! - `lines` - logical line assembly over backslash continuations
//! - `classify` - line classification and value validation
//! - `scanner` - scan driver and event dispatch

pub mod classify;
pub mod comments;
pub mod lines;
pub mod scanner;

pub use scanner::Scanner;
