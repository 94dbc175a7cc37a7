//! Codec for the display-name field of mmp records.
//!
//! Names are written as a parenthesized run right after the record
//! keyword, so literal parentheses (and the escape character itself) must
//! be percent-escaped.

/// Decodes a name field, inverting [`encode_name`] exactly.
///
/// `%25` must be unescaped last: doing it first would let a literal
/// "%2528" in the input decode twice.
pub fn decode_name(name: &str) -> String {
    name.replace("%28", "(")
        .replace("%29", ")")
        .replace("%25", "%")
}

/// Encodes a name for writing into a record's parenthesized field.
///
/// `%` is escaped first so the escape tokens introduced for parentheses
/// are not themselves re-escaped.
pub fn encode_name(name: &str) -> String {
    name.replace('%', "%25")
        .replace('(', "%28")
        .replace(')', "%29")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn decodes_escape_tokens() {
        assert_eq!(decode_name("a%28b%29c"), "a(b)c");
        assert_eq!(decode_name("50%25"), "50%");
        assert_eq!(decode_name("plain"), "plain");
    }

    #[test]
    fn percent_unescaped_last() {
        // "%2528" encodes the literal text "%28".
        assert_eq!(decode_name("%2528"), "%28");
        assert_eq!(encode_name("%28"), "%2528");
    }

    #[test]
    fn round_trips_tricky_names() {
        for name in ["(", ")", "%", "()%", "%()", "a(%25)b", "%%28%%"] {
            assert_eq!(decode_name(&encode_name(name)), name);
        }
    }

    proptest! {
        #[test]
        fn round_trips_any_name(name in r"[()%a-zA-Z0-9 ]{0,40}") {
            prop_assert_eq!(decode_name(&encode_name(&name)), name);
        }

        #[test]
        fn encoded_names_have_no_bare_parens(name in r"[()%a-z]{0,20}") {
            let enc = encode_name(&name);
            prop_assert!(!enc.contains('('));
            prop_assert!(!enc.contains(')'));
        }
    }
}
