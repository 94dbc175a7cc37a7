//! Built-in record handlers, one module per family of record kinds.

pub mod atom;
pub mod chunk;
pub mod group;
pub mod jig;
pub mod misc;
pub mod motor;
pub mod plane;
pub mod view;

use super::dispatch::Record;
use super::name::decode_name;
use super::session::ReadSession;
use super::token::Token;

/// Pulls the leading parenthesized name off a record payload, decoding its
/// percent escapes. A missing or bare-word name is recovered with a warning
/// and a generated placeholder, and the rest of the payload is dropped
/// (a line that garbled its name can't be trusted past it).
pub(crate) fn take_name<'a>(
    session: &mut ReadSession,
    record: &'a Record<'_>,
    default: &str,
) -> (String, &'a [Token<'a>]) {
    match record.payload.split_first() {
        Some((Token::Group(raw), rest)) => (decode_name(raw), rest),
        _ => {
            session.warning(format!(
                "mmp record without a valid name field: {:?}",
                record.line
            ));
            (session.gensym(default), &[])
        }
    }
}
