use std::fmt;

/// User-facing message sink for one read.
///
/// Recoverable problems are reported here as plain text, never raised or
/// returned as structured data; the caller decides where the messages go
/// (history panel, stderr, nowhere).
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Vec<String>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recoverable oddity worth telling the user about.
    pub fn warning(&mut self, msg: impl fmt::Display) {
        self.messages.push(format!("Warning: {msg}"));
    }

    /// A recoverable syntax problem in the file itself.
    pub fn format_error(&mut self, msg: impl fmt::Display) {
        self.messages.push(format!("Warning: mmp format error: {msg}"));
    }

    /// A problem in the reading machinery, not the file.
    pub fn bug_error(&mut self, msg: impl fmt::Display) {
        self.messages.push(format!("Bug: {msg}"));
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_by_kind() {
        let mut log = MessageLog::new();
        log.warning("one part");
        log.format_error("nothing in file");
        log.bug_error("splice failed");
        let msgs = log.messages();
        assert!(msgs[0].starts_with("Warning: one part"));
        assert!(msgs[1].starts_with("Warning: mmp format error:"));
        assert!(msgs[2].starts_with("Bug:"));
    }
}
