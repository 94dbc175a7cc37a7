//! Field-extraction templates for record lines.
//!
//! Each record kind owns one or more ordered [`LinePattern`]s, one per
//! on-disk era, tried from most-complete to least; the first whose field
//! shape matches wins, and the capture count tells the handler which era
//! it got. Matching is prefix-style: tokens past the last field are left
//! for the handler (display suffixes, trailing id runs).

use super::name::decode_name;
use super::token::Token;

/// One typed field of a line pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Bare integer word.
    Int,
    /// Bare float word.
    Float,
    /// Parenthesized, percent-escaped display name.
    Name,
    /// Parenthesized `r, g, b` ints, scaled by 1/255.
    Color,
    /// Parenthesized integer triple in milli-units, scaled by 1/1000.
    MilliPos,
    /// Parenthesized float triple, unscaled.
    Triple,
    /// Parenthesized float quadruple (orientation quaternion).
    Quat,
    /// Parenthesized single integer.
    ParenInt,
    /// Parenthesized single float.
    ParenFloat,
    /// Run of integer ids consuming the rest of the line; must be last.
    IdList,
}

/// A captured, type-checked field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Name(String),
    Color([f64; 3]),
    Pos([f64; 3]),
    Triple([f64; 3]),
    Quat([f64; 4]),
    ParenInt(i64),
    ParenFloat(f64),
    Ids(Vec<u32>),
}

/// An ordered sequence of field extractors for one record era.
#[derive(Debug, Clone, Copy)]
pub struct LinePattern {
    pub fields: &'static [Field],
}

impl LinePattern {
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    /// Applies this pattern to the payload tokens, producing one value per
    /// field, or None if any field's shape or type check fails.
    pub fn apply(&self, tokens: &[Token<'_>]) -> Option<Vec<Value>> {
        let mut values = Vec::with_capacity(self.fields.len());
        let mut rest = tokens;
        for field in self.fields {
            match field {
                Field::IdList => {
                    let mut ids = Vec::with_capacity(rest.len());
                    for tok in rest {
                        let Token::Word(w) = tok else { return None };
                        ids.push(w.parse::<u32>().ok()?);
                    }
                    rest = &[];
                    values.push(Value::Ids(ids));
                }
                _ => {
                    let (tok, tail) = rest.split_first()?;
                    values.push(capture(*field, tok)?);
                    rest = tail;
                }
            }
        }
        Some(values)
    }
}

fn capture(field: Field, tok: &Token<'_>) -> Option<Value> {
    match (field, tok) {
        (Field::Int, Token::Word(w)) => w.parse().ok().map(Value::Int),
        (Field::Float, Token::Word(w)) => w.parse().ok().map(Value::Float),
        (Field::Name, Token::Group(g)) => Some(Value::Name(decode_name(g))),
        (Field::Color, Token::Group(g)) => {
            let [r, g_, b] = parse_numbers::<3>(g)?;
            in_byte_range(r, g_, b)?;
            Some(Value::Color([r / 255.0, g_ / 255.0, b / 255.0]))
        }
        (Field::MilliPos, Token::Group(g)) => {
            // positions are written as milli-unit integers
            for part in g.split(',') {
                part.trim().parse::<i64>().ok()?;
            }
            let [x, y, z] = parse_numbers::<3>(g)?;
            Some(Value::Pos([x / 1000.0, y / 1000.0, z / 1000.0]))
        }
        (Field::Triple, Token::Group(g)) => parse_numbers::<3>(g).map(Value::Triple),
        (Field::Quat, Token::Group(g)) => parse_numbers::<4>(g).map(Value::Quat),
        (Field::ParenInt, Token::Group(g)) => g.trim().parse().ok().map(Value::ParenInt),
        (Field::ParenFloat, Token::Group(g)) => g.trim().parse().ok().map(Value::ParenFloat),
        _ => None,
    }
}

fn parse_numbers<const N: usize>(group: &str) -> Option<[f64; N]> {
    let mut out = [0.0; N];
    let mut parts = group.split(',');
    for slot in &mut out {
        *slot = parts.next()?.trim().parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

fn in_byte_range(r: f64, g: f64, b: f64) -> Option<()> {
    for c in [r, g, b] {
        if !(0.0..=255.0).contains(&c) || c.fract() != 0.0 {
            return None;
        }
    }
    Some(())
}

/// Tries patterns in order, returning the first match.
pub fn first_match(patterns: &[LinePattern], tokens: &[Token<'_>]) -> Option<Vec<Value>> {
    patterns.iter().find_map(|p| p.apply(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::token::tokenize;

    #[test]
    fn atom_shape_matches_and_scales() {
        let pat = LinePattern::new(&[Field::Int, Field::ParenInt, Field::MilliPos]);
        let toks = tokenize("12 (6) (1000, -2500, 0) def");
        let vals = pat.apply(&toks).expect("matches");
        assert_eq!(
            vals,
            vec![
                Value::Int(12),
                Value::ParenInt(6),
                Value::Pos([1.0, -2.5, 0.0]),
            ]
        );
    }

    #[test]
    fn color_components_scale_by_255() {
        let pat = LinePattern::new(&[Field::Name, Field::Color]);
        let toks = tokenize("(motor A) (255, 0, 127)");
        let vals = pat.apply(&toks).expect("matches");
        match &vals[1] {
            Value::Color([r, g, b]) => {
                assert_eq!(*r, 1.0);
                assert_eq!(*g, 0.0);
                assert!((b - 127.0 / 255.0).abs() < 1e-12);
            }
            other => panic!("expected color, got {other:?}"),
        }
    }

    #[test]
    fn color_rejects_floats_and_out_of_range() {
        let pat = LinePattern::new(&[Field::Color]);
        assert!(pat.apply(&tokenize("(0.5, 0, 0)")).is_none());
        assert!(pat.apply(&tokenize("(300, 0, 0)")).is_none());
    }

    #[test]
    fn milli_pos_rejects_float_input() {
        let pat = LinePattern::new(&[Field::MilliPos]);
        assert!(pat.apply(&tokenize("(1.5, 2, 3)")).is_none());
        assert!(pat.apply(&tokenize("(1, 2, 3)")).is_some());
    }

    #[test]
    fn id_list_consumes_rest() {
        let pat = LinePattern::new(&[Field::Name, Field::Color, Field::IdList]);
        let toks = tokenize("(set) (0, 0, 0) 1 2 3");
        let vals = pat.apply(&toks).expect("matches");
        assert_eq!(vals[2], Value::Ids(vec![1, 2, 3]));
        // a non-integer in the run fails the whole pattern
        assert!(pat.apply(&tokenize("(set) (0, 0, 0) 1 x")).is_none());
    }

    #[test]
    fn prefix_matching_leaves_trailing_tokens() {
        let pat = LinePattern::new(&[Field::Int]);
        assert!(pat.apply(&tokenize("5 trailing junk")).is_some());
    }

    #[test]
    fn first_match_prefers_most_complete() {
        const NEW: LinePattern = LinePattern::new(&[Field::Name, Field::Quat, Field::ParenFloat]);
        const OLD: LinePattern = LinePattern::new(&[Field::Name, Field::Quat]);
        let toks = tokenize("(v) (1.0, 0.0, 0.0, 0.0) (10.0)");
        let vals = first_match(&[NEW, OLD], &toks).expect("matches");
        assert_eq!(vals.len(), 3);
        let toks_old = tokenize("(v) (1.0, 0.0, 0.0, 0.0)");
        let vals_old = first_match(&[NEW, OLD], &toks_old).expect("matches");
        assert_eq!(vals_old.len(), 2);
    }
}
