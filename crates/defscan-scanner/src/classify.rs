//! Line classification and value validation
//!
//! Decides, per logical line, whether it defines a numeric constant, a
//! value-less build flag, or nothing of interest. A candidate value goes
//! through a normalization pipeline before shape matching: names of
//! previously accepted constants are substituted with `1`, whitespace is
//! removed, and any leading cast prefixes are stripped. Shape matching is a
//! coarse syntactic check against a fixed set of literal forms, never an
//! evaluator.

use regex::Regex;
use tracing::debug;

/// Classification of one logical line
#[derive(Debug, PartialEq, Eq)]
pub enum LineKind {
    /// `#define NAME <value>` with a value that classified as a constant
    Constant { name: String },
    /// Value-less `#define NAME` or `#undef NAME`
    Flag { name: String, is_define: bool },
    /// Anything else, including defines whose value failed classification
    Other,
}

/// Compiled pattern tables, shared read-only across scans
pub struct Patterns {
    define_value: Regex,
    flag: Regex,
    cast_prefix: Regex,
    hex: Regex,
    decimal: Regex,
    simple_expr: Regex,
    const64: Regex,
}

impl Patterns {
    pub fn new() -> Self {
        Self {
            // Name must be a single non-parenthesis token; a `(` right after
            // the name would make it a function-like macro, which is not
            // expanded here.
            define_value: Regex::new(r"(?s)^\s*#define\s+([^\s(]+)\s+(\S.*)$").unwrap(),
            flag: Regex::new(r"(?i)^\s*#(define|undef)\s+([^\s(]+)\s*$").unwrap(),
            // Textual cast strip, no real parenthesis balancing.
            cast_prefix: Regex::new(r"^\([^()]*\)").unwrap(),
            hex: Regex::new(r"^(0[xX][0-9a-fA-F]+|\(0[xX][0-9a-fA-F]+\))$").unwrap(),
            decimal: Regex::new(r"^(-?[0-9]+|\(-?[0-9]+\))$").unwrap(),
            simple_expr: Regex::new(r"^\([0-9xX+\-*/|&]+\)$").unwrap(),
            const64: Regex::new(r"^J9CONST64\((0[xX][0-9a-fA-F]+|[0-9]+)\)$").unwrap(),
        }
    }
}

impl Default for Patterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-scan line classifier
///
/// Tracks the set of names currently believed to hold constant values
/// (consulted during substitution) and the names seen with non-constant
/// values (used afterwards to disqualify earlier acceptances).
pub struct Classifier<'p> {
    patterns: &'p Patterns,
    macros: Vec<String>,
    non_constants: Vec<String>,
}

impl<'p> Classifier<'p> {
    pub fn new(patterns: &'p Patterns) -> Self {
        Self {
            patterns,
            macros: Vec::new(),
            non_constants: Vec::new(),
        }
    }

    /// Classify one logical line. The constant-definition pattern is tried
    /// first and takes precedence over the flag pattern.
    pub fn classify(&mut self, line: &str) -> LineKind {
        if let Some(caps) = self.patterns.define_value.captures(line) {
            let name = caps[1].to_string();
            if self.is_constant_value(&caps[2]) {
                self.macros.push(name.clone());
                return LineKind::Constant { name };
            }
            debug!(name = %name, "define value did not classify as a constant");
            // Any non-constant occurrence disqualifies the name everywhere
            // in the file. The name may have been accepted more than once,
            // so keep removing until absent.
            // TODO: revisit for headers with conflicting defines under
            // nested conditionals; see the reconciliation note in DESIGN.md.
            while let Some(pos) = self.macros.iter().position(|m| m == &name) {
                self.macros.remove(pos);
            }
            self.non_constants.push(name);
            return LineKind::Other;
        }
        if let Some(caps) = self.patterns.flag.captures(line) {
            return LineKind::Flag {
                name: caps[2].to_string(),
                is_define: caps[1].eq_ignore_ascii_case("define"),
            };
        }
        LineKind::Other
    }

    /// Names seen with non-constant values, in discovery order
    pub fn into_non_constants(self) -> Vec<String> {
        self.non_constants
    }

    fn is_constant_value(&self, raw: &str) -> bool {
        // Substitute previously accepted constant names so references to
        // them read as numeric operands. Plain substring replacement; the
        // substituted text is only ever used for shape classification.
        let mut value = raw.to_string();
        for name in &self.macros {
            if value.contains(name.as_str()) {
                value = value.replace(name.as_str(), "1");
            }
        }
        value.retain(|c| !c.is_whitespace());
        let stripped = self.strip_casts(&value);

        let p = self.patterns;
        p.hex.is_match(stripped)
            || p.decimal.is_match(stripped)
            || p.simple_expr.is_match(stripped)
            // J9CONST64 carries no logic of its own, so a wrapped literal
            // counts as a bare literal.
            || p.const64.is_match(stripped)
    }

    /// Strip a leading run of parenthesized cast prefixes. Prefix-only and
    /// textual: interior groups are never touched, and a value that is one
    /// big parenthesized group is left intact rather than stripped to
    /// nothing.
    fn strip_casts<'v>(&self, value: &'v str) -> &'v str {
        let mut rest = value;
        while let Some(found) = self.patterns.cast_prefix.find(rest) {
            let tail = &rest[found.end()..];
            if tail.is_empty() {
                break;
            }
            rest = tail;
        }
        rest
    }
}
