//! Unfolding of physical feed lines into logical content lines.

/// Turn raw feed text into an iterator over logical lines.
///
/// Physical lines are separated by `\r\n`. A physical line whose first
/// character is whitespace continues the current logical line; exactly that
/// first character is stripped. Empty physical lines are dropped: they
/// neither terminate nor extend the logical line being assembled.
pub fn logical_lines(data: &str) -> LogicalLines<'_> {
    LogicalLines {
        physical: data.split("\r\n"),
        pending: None,
    }
}

/// Single-pass iterator produced by [`logical_lines`].
pub struct LogicalLines<'a> {
    physical: std::str::Split<'a, &'static str>,
    pending: Option<String>,
}

impl Iterator for LogicalLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        for physical in self.physical.by_ref() {
            if physical.is_empty() {
                continue;
            }
            if physical.starts_with(|c: char| c.is_whitespace()) {
                let mut chars = physical.chars();
                chars.next();
                let continuation = chars.as_str();
                match self.pending.as_mut() {
                    Some(line) => line.push_str(continuation),
                    None => self.pending = Some(continuation.to_string()),
                }
                continue;
            }
            if let Some(finished) = self.pending.replace(physical.to_string()) {
                return Some(finished);
            }
        }
        self.pending.take()
    }
}
