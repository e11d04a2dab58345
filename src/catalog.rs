use crate::consts::{MERIDIEM_CHAR, PROTECTED};
use crate::prelude::*;
use serde::Serialize;

/// The closed set of fields a format mask can declare.
/// Each kind is denoted by a run of one repeated discriminator character
/// whose length selects the kind (e.g. `YYYY` vs `YY`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
pub enum FieldKind {
    /// Four-digit year (`YYYY`)
    #[display(fmt = "YYYY")]
    FourDigitYear,
    /// Two-digit year (`YY`)
    #[display(fmt = "YY")]
    TwoDigitYear,
    /// Three-letter month abbreviation (`MMM`)
    #[display(fmt = "MMM")]
    ThreeLetterMonth,
    /// Two-digit month (`MM`)
    #[display(fmt = "MM")]
    TwoDigitMonth,
    /// Three-digit day of the year (`DDD`)
    #[display(fmt = "DDD")]
    ThreeDigitDayOfYear,
    /// Two-digit day of the month (`DD`)
    #[display(fmt = "DD")]
    TwoDigitDayOfMonth,
    /// Two-digit hour (`hh`)
    #[display(fmt = "hh")]
    TwoDigitHour,
    /// Two-digit minute (`mm`)
    #[display(fmt = "mm")]
    TwoDigitMinute,
    /// Two-digit second (`ss`)
    #[display(fmt = "ss")]
    TwoDigitSecond,
    /// Single-digit tenth of a second (`t`)
    #[display(fmt = "t")]
    OneDigitTenth,
    /// Meridiem marker (`ii` in the mask; 1-2 characters in the date)
    #[display(fmt = "ii")]
    MeridiemMarker,
}

impl FieldKind {
    /// Every recognized kind, in catalog order.
    pub const ALL: [Self; 11] = [
        Self::FourDigitYear,
        Self::TwoDigitYear,
        Self::ThreeLetterMonth,
        Self::TwoDigitMonth,
        Self::ThreeDigitDayOfYear,
        Self::TwoDigitDayOfMonth,
        Self::TwoDigitHour,
        Self::TwoDigitMinute,
        Self::TwoDigitSecond,
        Self::OneDigitTenth,
        Self::MeridiemMarker,
    ];

    /// Returns the literal pattern that declares this field in a mask
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::FourDigitYear => "YYYY",
            Self::TwoDigitYear => "YY",
            Self::ThreeLetterMonth => "MMM",
            Self::TwoDigitMonth => "MM",
            Self::ThreeDigitDayOfYear => "DDD",
            Self::TwoDigitDayOfMonth => "DD",
            Self::TwoDigitHour => "hh",
            Self::TwoDigitMinute => "mm",
            Self::TwoDigitSecond => "ss",
            Self::OneDigitTenth => "t",
            Self::MeridiemMarker => "ii",
        }
    }

    /// Returns the character that denotes this field in a mask
    pub const fn discriminator(self) -> char {
        match self {
            Self::FourDigitYear | Self::TwoDigitYear => 'Y',
            Self::ThreeLetterMonth | Self::TwoDigitMonth => 'M',
            Self::ThreeDigitDayOfYear | Self::TwoDigitDayOfMonth => 'D',
            Self::TwoDigitHour => 'h',
            Self::TwoDigitMinute => 'm',
            Self::TwoDigitSecond => 's',
            Self::OneDigitTenth => 't',
            Self::MeridiemMarker => MERIDIEM_CHAR,
        }
    }

    /// Number of characters the pattern occupies in a mask
    #[inline]
    pub const fn pattern_len(self) -> usize {
        self.pattern().len()
    }

    /// Position of this kind in [`Self::ALL`], used as a map key
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Returns the kinds that share the given discriminator character.
/// The slice is empty for characters that denote no field at all.
pub fn kinds_by_discriminator(character: char) -> &'static [FieldKind] {
    match character {
        'Y' => &[FieldKind::FourDigitYear, FieldKind::TwoDigitYear],
        'M' => &[FieldKind::ThreeLetterMonth, FieldKind::TwoDigitMonth],
        'D' => &[FieldKind::ThreeDigitDayOfYear, FieldKind::TwoDigitDayOfMonth],
        'h' => &[FieldKind::TwoDigitHour],
        'm' => &[FieldKind::TwoDigitMinute],
        's' => &[FieldKind::TwoDigitSecond],
        't' => &[FieldKind::OneDigitTenth],
        MERIDIEM_CHAR => &[FieldKind::MeridiemMarker],
        _ => &[],
    }
}

/// Returns true if `character` is reserved as a field discriminator.
/// `i` is only reserved when the mask is compiled in 12-hour mode; in
/// 24-hour mode it is an ordinary separator character.
pub fn is_protected(character: char, twelve_hour: bool) -> bool {
    PROTECTED.contains(&character) || (twelve_hour && character == MERIDIEM_CHAR)
}

/// Resolves a run of `len` repeated `character`s to the kind it declares
pub(crate) fn kind_for_run(character: char, len: usize) -> Option<FieldKind> {
    kinds_by_discriminator(character)
        .iter()
        .copied()
        .find(|kind| kind.pattern_len() == len)
}
