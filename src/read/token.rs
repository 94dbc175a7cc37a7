//! Splitting a record line into fields.
//!
//! A record is the keyword followed by whitespace-separated fields; a
//! parenthesized run is one field regardless of the spaces and commas
//! inside it (names, colors, vectors, quaternions all use this shape).

/// One field of a record line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A bare whitespace-delimited word.
    Word(&'a str),
    /// The contents of a parenthesized run, parens stripped.
    Group(&'a str),
}

/// The leading keyword of a line, or None for blank lines.
pub fn keyword(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}

/// Tokenizes the payload of a record line (everything after the keyword).
///
/// Nested parentheses stay inside one group token; an unterminated group
/// runs to the end of the line rather than failing, since per-field type
/// checks catch the damage later with better context. The scan walks char
/// boundaries, so multibyte text in names or skipped records stays intact.
pub fn tokenize(payload: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = payload.char_indices().peekable();
    while let Some(&(i, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '(' {
            chars.next();
            let start = i + 1;
            let mut depth = 1;
            let mut end = payload.len();
            for (j, c) in chars.by_ref() {
                match c {
                    '(' => depth += 1,
                    ')' => {
                        depth -= 1;
                        if depth == 0 {
                            end = j;
                            break;
                        }
                    }
                    _ => {}
                }
            }
            tokens.push(Token::Group(&payload[start..end]));
        } else {
            let start = i;
            let mut end = payload.len();
            while let Some(&(j, c)) = chars.peek() {
                if c == '(' || c.is_whitespace() {
                    end = j;
                    break;
                }
                chars.next();
            }
            tokens.push(Token::Word(&payload[start..end]));
        }
    }
    tokens
}
