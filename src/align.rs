use crate::format::FormatSpec;
use crate::prelude::*;
use serde::Serialize;

/// Structural failures raised while laying a date string over a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum AlignmentError {
    #[display(fmt = "Date string does not have the number of separators the mask declares")]
    SeparatorCountMismatch,
    #[display(fmt = "Date string has a different character where the mask places a separator")]
    SeparatorPositionMismatch,
    #[display(fmt = "Field segment length does not match the mask")]
    SegmentLengthMismatch,
}

impl std::error::Error for AlignmentError {}

/// Splits `date` into field segments using the mask's separator sequence.
///
/// Each declared separator is located in order; the characters before it
/// form the preceding segment, and whatever follows the last separator is
/// the final one. Every segment is then length-checked against its mask
/// segment. The returned slices parallel `spec.segments()`.
///
/// All lengths are character counts, not byte counts, so multi-byte input
/// cannot split a code point.
pub(crate) fn split_segments<'a>(
    spec: &FormatSpec,
    date: &'a str,
) -> Result<Vec<&'a str>, AlignmentError> {
    let separators: Vec<char> = spec.separators().collect();
    let mut parts = Vec::with_capacity(spec.segments().len());
    let mut rest = date;

    for (segment, &separator) in spec.segments().iter().zip(&separators) {
        match rest.find(separator) {
            Some(at) => {
                parts.push(&rest[..at]);
                rest = &rest[at + separator.len_utf8()..];
            }
            None => {
                // The declared separator never shows up. Characters left
                // beyond the expected segment mean something else sits in
                // the separator's slot; otherwise the date ran out early.
                return Err(if rest.chars().count() > segment.pattern_len {
                    AlignmentError::SeparatorPositionMismatch
                } else {
                    AlignmentError::SeparatorCountMismatch
                });
            }
        }
    }

    // A declared separator character inside the trailing segment means the
    // date carries more separators than the mask declares.
    if separators.iter().any(|&c| rest.contains(c)) {
        return Err(AlignmentError::SeparatorCountMismatch);
    }
    parts.push(rest);

    for (part, segment) in parts.iter().zip(spec.segments()) {
        if !segment.date_len_ok(part.chars().count()) {
            return Err(AlignmentError::SegmentLengthMismatch);
        }
    }

    Ok(parts)
}
