use crate::catalog::FieldKind;
use crate::consts::{ANTE_MERIDIEM, NOON, POST_MERIDIEM};
use crate::format::FormatSpec;
use crate::prelude::*;

/// The am/pm/noon indicator read from a date string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum MeridiemReading {
    /// Morning, read from `am`
    #[display(fmt = "am")]
    AnteMeridiem,
    /// Afternoon, read from `pm`
    #[display(fmt = "pm")]
    PostMeridiem,
    /// Noon, read from the single character `m`
    #[display(fmt = "m")]
    Noon,
}

impl MeridiemReading {
    /// Reads a 1-2 character marker value. The comparison is exact:
    /// only lowercase `am`, `pm` and `m` are meridiem readings.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            ANTE_MERIDIEM => Some(Self::AnteMeridiem),
            POST_MERIDIEM => Some(Self::PostMeridiem),
            NOON => Some(Self::Noon),
            _ => None,
        }
    }
}

/// Field values pulled out of one date string, keyed by field kind.
///
/// Fields the mask does not declare stay absent; an absent field is never
/// conflated with an empty value. The map borrows from the date string and
/// is built fresh for every validation call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedFields<'a> {
    values: [Option<&'a str>; FieldKind::ALL.len()],
}

impl<'a> ExtractedFields<'a> {
    /// Returns the raw value of a field, or `None` if the mask did not
    /// declare it
    pub fn get(&self, kind: FieldKind) -> Option<&'a str> {
        self.values[kind.index()]
    }

    /// Returns true if the field was present in the mask
    pub fn contains(&self, kind: FieldKind) -> bool {
        self.get(kind).is_some()
    }

    /// Iterates over the present fields in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (FieldKind, &'a str)> + '_ {
        FieldKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|value| (kind, value)))
    }

    fn set(&mut self, kind: FieldKind, value: &'a str) {
        self.values[kind.index()] = Some(value);
    }
}

/// Slices each aligned segment into its field values.
///
/// The boundary inside a multi-field segment comes from the mask's own
/// field ordering, never from guessing at the date content: every field
/// takes exactly its pattern length, except the meridiem marker, whose
/// width is the segment's length surplus (one or two characters, already
/// bounded by alignment). Infallible once alignment has succeeded.
pub(crate) fn extract<'a>(spec: &FormatSpec, parts: &[&'a str]) -> ExtractedFields<'a> {
    let mut fields = ExtractedFields::default();

    for (part, segment) in parts.iter().zip(spec.segments()) {
        let mut rest = *part;
        for &kind in &segment.kinds {
            let width = if kind == FieldKind::MeridiemMarker {
                part.chars().count() + 2 - segment.pattern_len
            } else {
                kind.pattern_len()
            };
            let (value, tail) = split_at_chars(rest, width);
            fields.set(kind, value);
            rest = tail;
        }
    }

    fields
}

/// Splits after `n` characters, at a character boundary
fn split_at_chars(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((at, _)) => s.split_at(at),
        None => (s, ""),
    }
}
