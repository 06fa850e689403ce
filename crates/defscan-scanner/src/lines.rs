//! Logical line assembly
//!
//! Iterates over comment-free text joining backslash-continued physical
//! lines into single logical lines. The joined parts keep a `\n` separator
//! between them, and the line number attached to a logical line is that of
//! its first physical line.

/// Iterator yielding `(logical_line, first_physical_line)` pairs
pub struct LogicalLines<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> LogicalLines<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
        }
    }
}

impl Iterator for LogicalLines<'_> {
    type Item = (String, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let mut logical = String::new();
        let mut first_line: Option<u32> = None;

        for (idx, physical) in self.lines.by_ref() {
            let number = idx as u32 + 1;
            match first_line {
                None => {
                    if physical.is_empty() {
                        continue;
                    }
                    first_line = Some(number);
                }
                Some(_) => logical.push('\n'),
            }
            match physical.strip_suffix('\\') {
                Some(rest) => logical.push_str(rest),
                None => {
                    logical.push_str(physical);
                    return Some((logical, first_line?));
                }
            }
        }

        // A trailing continuation with no following line still forms a
        // logical line.
        first_line.map(|line| (logical, line))
    }
}
