use encoding_rs::{BIG5, UTF_8};
use log::debug;

use crate::config::DrawError;

/// The encoding a roster file was read with.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RosterEncoding {
    Utf8,
    /// Traditional Chinese legacy code page (cp950), the default of
    /// spreadsheet exports on Traditional Chinese Windows.
    Big5,
}

/// Decodes the raw content of a roster file.
///
/// UTF-8 is tried first and a leading byte-order mark is dropped. Content that
/// is not valid UTF-8 is decoded as Big5. Both decoders are strict: malformed
/// input is an error and never replaced.
pub fn decode_roster_bytes(bytes: &[u8]) -> Result<(String, RosterEncoding), DrawError> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return Ok((text.into_owned(), RosterEncoding::Utf8));
    }
    debug!(
        "decode_roster_bytes: {} bytes are not valid UTF-8, trying Big5",
        bytes.len()
    );
    match BIG5.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => Ok((text.into_owned(), RosterEncoding::Big5)),
        None => Err(DrawError::EncodingUnrecognized),
    }
}
