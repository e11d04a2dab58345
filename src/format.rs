use crate::catalog::{self, FieldKind};
use crate::consts::MERIDIEM_CHAR;
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One entry of a parsed format mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatToken {
    /// A recognized field pattern, e.g. `YYYY`
    Field(FieldKind),
    /// A literal character that must appear identically in the date string
    Separator(char),
}

/// Structural errors raised while compiling a format mask.
/// These are fatal to the mask: no [`FormatSpec`] is produced.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
pub enum FormatError {
    #[display(fmt = "Format mask declares no fields")]
    EmptyFormat,
    #[display(fmt = "Unrecognized field pattern '{_0}'")]
    UnrecognizedFieldPattern(String),
    #[display(fmt = "Field '{_0}' collides with an earlier field of the same discriminator")]
    RepeatedField(FieldKind),
    #[display(fmt = "12-hour masks must declare both 'hh' and 'ii'")]
    MissingMeridiemHour,
    #[display(fmt = "'DD' requires a month field ('MM' or 'MMM')")]
    MissingMonthForDay,
    #[display(fmt = "'hh' combined with date fields requires a day field ('DD' or 'DDD')")]
    MissingDayForHour,
    #[display(fmt = "'mm' combined with coarser fields requires 'hh'")]
    MissingHourForMinute,
    #[display(fmt = "'ss' combined with coarser fields requires 'mm'")]
    MissingMinuteForSecond,
    #[display(fmt = "'t' combined with coarser fields requires 'ss'")]
    MissingSecondForTenth,
}

impl std::error::Error for FormatError {}

/// A run of consecutive fields between two separators (or the mask ends).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub(crate) struct Segment {
    /// Fields of the segment, in mask order
    pub(crate) kinds: Vec<FieldKind>,
    /// Total pattern length of the segment on the mask side
    pub(crate) pattern_len: usize,
}

impl Segment {
    pub(crate) fn has_meridiem(&self) -> bool {
        self.kinds.contains(&FieldKind::MeridiemMarker)
    }

    /// Returns true if a date-side segment of `len` characters fits this
    /// segment. The meridiem marker occupies two mask characters but only
    /// one or two date characters, so its segment may run one short.
    pub(crate) fn date_len_ok(&self, len: usize) -> bool {
        if self.has_meridiem() {
            len == self.pattern_len || len + 1 == self.pattern_len
        } else {
            len == self.pattern_len
        }
    }
}

/// A compiled, immutable date format mask.
///
/// Construction runs the full structural validation up front: parsing the
/// mask into field and separator tokens, then checking the legality rules
/// (fields present, recognized, unique, and dependency-complete). A value
/// of this type therefore always describes a well-formed mask, and can be
/// reused for any number of [`validate`](crate::validate) calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{raw}")]
#[serde(try_from = "RawFormat", into = "RawFormat")]
pub struct FormatSpec {
    raw: String,
    twelve_hour: bool,
    tokens: Vec<FormatToken>,
    segments: Vec<Segment>,
}

/// Serialized form of a [`FormatSpec`]: the raw mask plus the clock mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawFormat {
    format: String,
    #[serde(default)]
    twelve_hour: bool,
}

impl From<FormatSpec> for RawFormat {
    fn from(spec: FormatSpec) -> Self {
        Self {
            format: spec.raw,
            twelve_hour: spec.twelve_hour,
        }
    }
}

impl TryFrom<RawFormat> for FormatSpec {
    type Error = FormatError;

    fn try_from(raw: RawFormat) -> Result<Self, Self::Error> {
        Self::compile(&raw.format, raw.twelve_hour)
    }
}

impl FormatSpec {
    /// Compiles a raw format mask.
    ///
    /// No character of `raw` is ignored: every unprotected character,
    /// whitespace included, is a literal separator the date must repeat.
    ///
    /// # Errors
    /// Returns a [`FormatError`] if the mask violates any legality rule.
    pub fn compile(raw: &str, twelve_hour: bool) -> Result<Self, FormatError> {
        let tokens = parse_tokens(raw, twelve_hour)?;
        check_legality(&tokens, twelve_hour)?;
        let segments = build_segments(&tokens);
        Ok(Self {
            raw: raw.to_owned(),
            twelve_hour,
            tokens,
            segments,
        })
    }

    /// Returns the raw mask this spec was compiled from
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns true if the mask was compiled for the 12-hour clock
    #[inline]
    pub const fn twelve_hour(&self) -> bool {
        self.twelve_hour
    }

    /// Returns the parsed token sequence, in mask order
    pub fn tokens(&self) -> &[FormatToken] {
        &self.tokens
    }

    /// Separator characters of the mask, in order
    pub fn separators(&self) -> impl Iterator<Item = char> + '_ {
        self.tokens.iter().filter_map(|token| match token {
            FormatToken::Separator(c) => Some(*c),
            FormatToken::Field(_) => None,
        })
    }

    /// Field kinds of the mask, in order
    pub fn fields(&self) -> impl Iterator<Item = FieldKind> + '_ {
        self.tokens.iter().filter_map(|token| match token {
            FormatToken::Field(kind) => Some(*kind),
            FormatToken::Separator(_) => None,
        })
    }

    /// Returns true if the mask declares the given field
    pub fn has_field(&self, kind: FieldKind) -> bool {
        self.fields().any(|k| k == kind)
    }

    pub(crate) fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl FromStr for FormatSpec {
    type Err = FormatError;

    /// Compiles a 24-hour mask. 12-hour masks carry a flag the string
    /// alone cannot express; use [`FormatSpec::compile`] for those.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s, false)
    }
}

/// Scans the mask left to right. Consecutive identical protected
/// characters accumulate into one run that must match a catalog pattern
/// exactly; a protected run never spans two different characters, and
/// every unprotected character becomes its own separator token.
fn parse_tokens(raw: &str, twelve_hour: bool) -> Result<Vec<FormatToken>, FormatError> {
    let mut tokens = Vec::new();
    let mut chars = raw.chars().peekable();

    while let Some(character) = chars.next() {
        if !catalog::is_protected(character, twelve_hour) {
            tokens.push(FormatToken::Separator(character));
            continue;
        }

        let mut len = 1;
        while chars.peek() == Some(&character) {
            chars.next();
            len += 1;
        }

        match catalog::kind_for_run(character, len) {
            Some(kind) => tokens.push(FormatToken::Field(kind)),
            None => {
                return Err(FormatError::UnrecognizedFieldPattern(
                    character.to_string().repeat(len),
                ));
            }
        }
    }

    Ok(tokens)
}

/// Runs the legality rules over a parsed token sequence, in order,
/// stopping at the first violation.
fn check_legality(tokens: &[FormatToken], twelve_hour: bool) -> Result<(), FormatError> {
    let fields: Vec<FieldKind> = tokens
        .iter()
        .filter_map(|token| match token {
            FormatToken::Field(kind) => Some(*kind),
            FormatToken::Separator(_) => None,
        })
        .collect();

    // 1. At least one field.
    if fields.is_empty() {
        return Err(FormatError::EmptyFormat);
    }

    // 2. Recognized under the current mode. In 24-hour mode 'i' is not
    //    protected, so an 'ii' in the mask parses as two separator
    //    characters; diagnose it as an unrecognized field rather than
    //    letting it surface later as a puzzling separator mismatch.
    if !twelve_hour {
        let mut run = String::new();
        for token in tokens {
            match *token {
                FormatToken::Separator(c) if c == MERIDIEM_CHAR => run.push(c),
                _ => {
                    if !run.is_empty() {
                        return Err(FormatError::UnrecognizedFieldPattern(run));
                    }
                }
            }
        }
        if !run.is_empty() {
            return Err(FormatError::UnrecognizedFieldPattern(run));
        }
    }

    // 3. No two fields may share a discriminator: 'YYYY' next to 'YY'
    //    declares the year twice.
    let mut seen = Vec::with_capacity(fields.len());
    for &kind in &fields {
        let discriminator = kind.discriminator();
        if seen.contains(&discriminator) {
            return Err(FormatError::RepeatedField(kind));
        }
        seen.push(discriminator);
    }

    let has = |kind: FieldKind| fields.contains(&kind);
    let has_year = has(FieldKind::FourDigitYear) || has(FieldKind::TwoDigitYear);
    let has_month = has(FieldKind::ThreeLetterMonth) || has(FieldKind::TwoDigitMonth);
    let has_day = has(FieldKind::TwoDigitDayOfMonth) || has(FieldKind::ThreeDigitDayOfYear);

    // 4. The 12-hour clock needs both the hour and its marker.
    if twelve_hour && !(has(FieldKind::MeridiemMarker) && has(FieldKind::TwoDigitHour)) {
        return Err(FormatError::MissingMeridiemHour);
    }

    // 5. A day of the month is meaningless without a month. Day of the
    //    year ('DDD') carries its own context and is exempt.
    if has(FieldKind::TwoDigitDayOfMonth) && !has_month {
        return Err(FormatError::MissingMonthForDay);
    }

    // 6. Granularities must not skip a level once any coarser field is in
    //    play; a lone context-free field (just 'mm', say) stays legal.
    if has(FieldKind::TwoDigitHour) && (has_year || has_month) && !has_day {
        return Err(FormatError::MissingDayForHour);
    }
    if has(FieldKind::TwoDigitMinute)
        && (has_year || has_month || has_day)
        && !has(FieldKind::TwoDigitHour)
    {
        return Err(FormatError::MissingHourForMinute);
    }
    if has(FieldKind::TwoDigitSecond)
        && (has_year || has_month || has_day || has(FieldKind::TwoDigitHour))
        && !has(FieldKind::TwoDigitMinute)
    {
        return Err(FormatError::MissingMinuteForSecond);
    }
    if has(FieldKind::OneDigitTenth)
        && (has_year
            || has_month
            || has_day
            || has(FieldKind::TwoDigitHour)
            || has(FieldKind::TwoDigitMinute))
        && !has(FieldKind::TwoDigitSecond)
    {
        return Err(FormatError::MissingSecondForTenth);
    }

    Ok(())
}

/// Groups consecutive field tokens into segments; each separator closes
/// the current segment and opens the next, so a mask with n separators
/// always yields n + 1 segments (possibly empty at the edges).
fn build_segments(tokens: &[FormatToken]) -> Vec<Segment> {
    let mut segments = vec![Segment::default()];
    for token in tokens {
        match *token {
            FormatToken::Field(kind) => {
                if let Some(segment) = segments.last_mut() {
                    segment.kinds.push(kind);
                    segment.pattern_len += kind.pattern_len();
                }
            }
            FormatToken::Separator(_) => segments.push(Segment::default()),
        }
    }
    segments
}
