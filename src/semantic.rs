use crate::catalog::FieldKind;
use crate::consts::{
    DAYS_IN_LEAP_YEAR, DAYS_IN_MONTH, DAYS_IN_YEAR, FEBRUARY, FEBRUARY_DAYS_LEAP,
    LEAP_YEAR_CYCLE, MAX_HOUR_12, MAX_HOUR_24, MAX_MINUTE, MAX_MONTH, MAX_SECOND, MAX_TENTH,
    MONTH_ABBREVIATIONS, NOON_HOUR,
};
use crate::extract::{ExtractedFields, MeridiemReading};
use serde::Serialize;

/// A field value that failed its calendar or time-of-day range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
pub enum SemanticError {
    /// Year must be a positive number.
    #[error("year must be a positive number")]
    InvalidYear,
    /// Month must be 1-12 or a three-letter abbreviation.
    #[error("month must be 1-12 or a three-letter abbreviation")]
    InvalidMonth,
    /// Day is out of range for the resolved month and year.
    #[error("day is out of range for the resolved month and year")]
    InvalidDay,
    /// Hour is out of range for the clock mode.
    #[error("hour is out of range for the clock mode")]
    InvalidHour,
    /// Meridiem marker must read am, pm or m.
    #[error("meridiem marker must read am, pm or m")]
    InvalidMeridiem,
    /// Minutes must be 0-59.
    #[error("minutes must be 0-59")]
    InvalidMinute,
    /// Seconds must be 0-59.
    #[error("seconds must be 0-59")]
    InvalidSecond,
    /// Tenths of a second must be 0-9.
    #[error("tenths of a second must be 0-9")]
    InvalidTenth,
}

/// Simplified leap rule: every fourth year, with no century correction.
/// This is deliberate; do not swap in the Gregorian 100/400 exception.
pub const fn is_leap_year(year: u16) -> bool {
    year % LEAP_YEAR_CYCLE == 0
}

pub(crate) const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Cumulative day count through the end of `month`
fn days_through_month(year: u16, month: u8) -> u16 {
    (1..=month).map(|m| u16::from(days_in_month(year, m))).sum()
}

/// Year used for leap determination. An absent (or unreadable) year falls
/// back to 0, which the simplified rule counts as a leap year.
fn resolved_year(fields: &ExtractedFields<'_>) -> u16 {
    fields
        .get(FieldKind::TwoDigitYear)
        .or_else(|| fields.get(FieldKind::FourDigitYear))
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

/// Month number from either month form, if present and readable
fn resolved_month(fields: &ExtractedFields<'_>) -> Option<u8> {
    if let Some(value) = fields.get(FieldKind::ThreeLetterMonth) {
        return month_from_abbreviation(value);
    }
    fields
        .get(FieldKind::TwoDigitMonth)
        .and_then(|value| value.parse::<u8>().ok())
        .filter(|month| (1..=MAX_MONTH).contains(month))
}

fn month_from_abbreviation(value: &str) -> Option<u8> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|abbreviation| value.eq_ignore_ascii_case(abbreviation))
        .map(|index| index as u8 + 1)
}

pub(crate) fn check_year(fields: &ExtractedFields<'_>) -> Result<(), SemanticError> {
    for kind in [FieldKind::FourDigitYear, FieldKind::TwoDigitYear] {
        if let Some(value) = fields.get(kind) {
            let year: u16 = value.parse().map_err(|_| SemanticError::InvalidYear)?;
            if year == 0 {
                return Err(SemanticError::InvalidYear);
            }
        }
    }
    Ok(())
}

pub(crate) fn check_month(fields: &ExtractedFields<'_>) -> Result<(), SemanticError> {
    if let Some(value) = fields.get(FieldKind::ThreeLetterMonth) {
        month_from_abbreviation(value).ok_or(SemanticError::InvalidMonth)?;
    }
    if let Some(value) = fields.get(FieldKind::TwoDigitMonth) {
        let month: u8 = value.parse().map_err(|_| SemanticError::InvalidMonth)?;
        if !(1..=MAX_MONTH).contains(&month) {
            return Err(SemanticError::InvalidMonth);
        }
    }
    Ok(())
}

pub(crate) fn check_day(fields: &ExtractedFields<'_>) -> Result<(), SemanticError> {
    if let Some(value) = fields.get(FieldKind::TwoDigitDayOfMonth) {
        let day: u8 = value.parse().map_err(|_| SemanticError::InvalidDay)?;
        let year = resolved_year(fields);
        // With no month resolvable the widest bound applies; a month that
        // failed its own check reports separately.
        let bound = resolved_month(fields).map_or(31, |month| days_in_month(year, month));
        if !(1..=bound).contains(&day) {
            return Err(SemanticError::InvalidDay);
        }
    }

    if let Some(value) = fields.get(FieldKind::ThreeDigitDayOfYear) {
        let day: u16 = value.parse().map_err(|_| SemanticError::InvalidDay)?;
        let year = resolved_year(fields);
        let bound = match resolved_month(fields) {
            Some(month) => days_through_month(year, month),
            None if is_leap_year(year) => DAYS_IN_LEAP_YEAR,
            None => DAYS_IN_YEAR,
        };
        if !(1..=bound).contains(&day) {
            return Err(SemanticError::InvalidDay);
        }
    }

    Ok(())
}

pub(crate) fn check_hour(
    fields: &ExtractedFields<'_>,
    twelve_hour: bool,
) -> Result<(), SemanticError> {
    let Some(value) = fields.get(FieldKind::TwoDigitHour) else {
        return Ok(());
    };
    let hour: u8 = value.parse().map_err(|_| SemanticError::InvalidHour)?;

    if twelve_hour {
        let marker = fields
            .get(FieldKind::MeridiemMarker)
            .ok_or(SemanticError::InvalidMeridiem)?;
        let reading =
            MeridiemReading::from_marker(marker).ok_or(SemanticError::InvalidMeridiem)?;
        return match reading {
            MeridiemReading::Noon if hour == NOON_HOUR => Ok(()),
            MeridiemReading::Noon => Err(SemanticError::InvalidHour),
            MeridiemReading::AnteMeridiem | MeridiemReading::PostMeridiem => {
                if (1..=MAX_HOUR_12).contains(&hour) {
                    Ok(())
                } else {
                    Err(SemanticError::InvalidHour)
                }
            }
        };
    }

    // A marker cannot compile into a 24-hour mask.
    debug_assert!(!fields.contains(FieldKind::MeridiemMarker));
    if hour > MAX_HOUR_24 {
        return Err(SemanticError::InvalidHour);
    }
    Ok(())
}

pub(crate) fn check_minute(fields: &ExtractedFields<'_>) -> Result<(), SemanticError> {
    if let Some(value) = fields.get(FieldKind::TwoDigitMinute) {
        let minute: u8 = value.parse().map_err(|_| SemanticError::InvalidMinute)?;
        if minute > MAX_MINUTE {
            return Err(SemanticError::InvalidMinute);
        }
    }
    Ok(())
}

pub(crate) fn check_second(fields: &ExtractedFields<'_>) -> Result<(), SemanticError> {
    if let Some(value) = fields.get(FieldKind::TwoDigitSecond) {
        let second: u8 = value.parse().map_err(|_| SemanticError::InvalidSecond)?;
        if second > MAX_SECOND {
            return Err(SemanticError::InvalidSecond);
        }
    }
    Ok(())
}

pub(crate) fn check_tenth(fields: &ExtractedFields<'_>) -> Result<(), SemanticError> {
    if let Some(value) = fields.get(FieldKind::OneDigitTenth) {
        let tenth: u8 = value.parse().map_err(|_| SemanticError::InvalidTenth)?;
        if tenth > MAX_TENTH {
            return Err(SemanticError::InvalidTenth);
        }
    }
    Ok(())
}

/// Runs every applicable check, stopping at the first failure
pub(crate) fn check(
    fields: &ExtractedFields<'_>,
    twelve_hour: bool,
) -> Result<(), SemanticError> {
    check_year(fields)?;
    check_month(fields)?;
    check_day(fields)?;
    check_hour(fields, twelve_hour)?;
    check_minute(fields)?;
    check_second(fields)?;
    check_tenth(fields)
}

/// Runs every applicable check and collects every failure
pub(crate) fn check_all(fields: &ExtractedFields<'_>, twelve_hour: bool) -> Vec<SemanticError> {
    [
        check_year(fields),
        check_month(fields),
        check_day(fields),
        check_hour(fields, twelve_hour),
        check_minute(fields),
        check_second(fields),
        check_tenth(fields),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::split_segments;
    use crate::extract::extract;
    use crate::format::FormatSpec;

    fn fields_for<'a>(mask: &str, twelve_hour: bool, date: &'a str) -> ExtractedFields<'a> {
        let spec = FormatSpec::compile(mask, twelve_hour).unwrap();
        let parts = split_segments(&spec, date).unwrap();
        extract(&spec, &parts)
    }

    fn run(mask: &str, twelve_hour: bool, date: &str) -> Result<(), SemanticError> {
        check(&fields_for(mask, twelve_hour, date), twelve_hour)
    }

    #[test]
    fn test_is_leap_year_simplified_rule() {
        struct TestCase {
            year: u16,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2020,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            // The simplified rule has no century exception.
            TestCase {
                year: 1900,
                is_leap: true,
                description: "century year, still divisible by 4",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 4 (and 400)",
            },
            TestCase {
                year: 0,
                is_leap: true,
                description: "absent-year fallback",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_days_in_month() {
        for month in [1, 3, 5, 7, 8, 10, 12] {
            assert_eq!(days_in_month(2023, month), 31);
        }
        for month in [4, 6, 9, 11] {
            assert_eq!(days_in_month(2023, month), 30);
        }
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 29, "simplified rule, no century exception");
    }

    #[test]
    fn test_days_through_month() {
        assert_eq!(days_through_month(2023, 1), 31);
        assert_eq!(days_through_month(2023, 2), 59);
        assert_eq!(days_through_month(2024, 2), 60);
        assert_eq!(days_through_month(2023, 12), 365);
        assert_eq!(days_through_month(2024, 12), 366);
    }

    #[test]
    fn test_year_must_be_positive() {
        assert_eq!(run("YYYY", false, "2024"), Ok(()));
        assert_eq!(run("YYYY", false, "0001"), Ok(()));
        assert_eq!(run("YYYY", false, "0000"), Err(SemanticError::InvalidYear));
        assert_eq!(run("YY", false, "00"), Err(SemanticError::InvalidYear));
        assert_eq!(run("YYYY", false, "20A4"), Err(SemanticError::InvalidYear));
    }

    #[test]
    fn test_month_numeric_range() {
        assert_eq!(run("MM", false, "01"), Ok(()));
        assert_eq!(run("MM", false, "12"), Ok(()));
        assert_eq!(run("MM", false, "00"), Err(SemanticError::InvalidMonth));
        assert_eq!(run("MM", false, "13"), Err(SemanticError::InvalidMonth));
        assert_eq!(run("MM", false, "xx"), Err(SemanticError::InvalidMonth));
    }

    #[test]
    fn test_month_abbreviations_case_insensitive() {
        assert_eq!(run("MMM", false, "JAN"), Ok(()));
        assert_eq!(run("MMM", false, "dec"), Ok(()));
        assert_eq!(run("MMM", false, "Feb"), Ok(()));
        assert_eq!(run("MMM", false, "XXX"), Err(SemanticError::InvalidMonth));
        assert_eq!(run("MMM", false, "J4N"), Err(SemanticError::InvalidMonth));
    }

    #[test]
    fn test_day_of_month_bounds() {
        assert_eq!(run("YYYY-MM-DD", false, "2024-01-31"), Ok(()));
        assert_eq!(
            run("YYYY-MM-DD", false, "2024-04-31"),
            Err(SemanticError::InvalidDay)
        );
        assert_eq!(
            run("YYYY-MM-DD", false, "2024-01-00"),
            Err(SemanticError::InvalidDay)
        );
        assert_eq!(
            run("YYYY-MM-DD", false, "2024-01-3x"),
            Err(SemanticError::InvalidDay)
        );
    }

    #[test]
    fn test_leap_day_boundaries() {
        assert_eq!(run("YYYY-MM-DD", false, "2000-02-29"), Ok(()));
        assert_eq!(
            run("YYYY-MM-DD", false, "1999-02-29"),
            Err(SemanticError::InvalidDay)
        );
        assert_eq!(
            run("YYYY-MM-DD", false, "2000-02-30"),
            Err(SemanticError::InvalidDay)
        );
        // The simplified rule accepts the century year 1900.
        assert_eq!(run("YYYY-MM-DD", false, "1900-02-29"), Ok(()));
    }

    #[test]
    fn test_day_with_three_letter_month() {
        assert_eq!(run("DD-MMM-YYYY", false, "29-FEB-2000"), Ok(()));
        assert_eq!(run("DD-MMM-YYYY", false, "29-feb-2000"), Ok(()));
        assert_eq!(
            run("DD-MMM-YYYY", false, "30-FEB-2000"),
            Err(SemanticError::InvalidDay)
        );
        assert_eq!(run("DD-MMM-YYYY", false, "30-APR-2000"), Ok(()));
        assert_eq!(
            run("DD-MMM-YYYY", false, "31-APR-2000"),
            Err(SemanticError::InvalidDay)
        );
    }

    #[test]
    fn test_absent_year_counts_as_leap() {
        assert_eq!(run("MM-DD", false, "02-29"), Ok(()));
        assert_eq!(run("MM-DD", false, "02-30"), Err(SemanticError::InvalidDay));
    }

    #[test]
    fn test_day_of_year_full_year_bound() {
        assert_eq!(run("YYYY-DDD", false, "2024-366"), Ok(()));
        assert_eq!(
            run("YYYY-DDD", false, "2023-366"),
            Err(SemanticError::InvalidDay)
        );
        assert_eq!(run("YYYY-DDD", false, "2023-365"), Ok(()));
        assert_eq!(run("YYYY-DDD", false, "2023-001"), Ok(()));
        assert_eq!(
            run("YYYY-DDD", false, "2023-000"),
            Err(SemanticError::InvalidDay)
        );
    }

    #[test]
    fn test_day_of_year_bounded_by_month() {
        // Through February: 60 days in a leap year, 59 otherwise.
        assert_eq!(run("YYYY-MM-DDD", false, "2024-02-060"), Ok(()));
        assert_eq!(
            run("YYYY-MM-DDD", false, "2024-02-061"),
            Err(SemanticError::InvalidDay)
        );
        assert_eq!(
            run("YYYY-MM-DDD", false, "2023-02-060"),
            Err(SemanticError::InvalidDay)
        );
        assert_eq!(run("YYYY-MM-DDD", false, "2023-02-059"), Ok(()));
    }

    #[test]
    fn test_hour_24_range() {
        assert_eq!(run("hh", false, "00"), Ok(()));
        assert_eq!(run("hh", false, "23"), Ok(()));
        assert_eq!(run("hh", false, "24"), Err(SemanticError::InvalidHour));
        assert_eq!(run("hh", false, "x2"), Err(SemanticError::InvalidHour));
    }

    #[test]
    fn test_hour_12_range_and_meridiem() {
        assert_eq!(run("hhii", true, "01am"), Ok(()));
        assert_eq!(run("hhii", true, "12pm"), Ok(()));
        assert_eq!(run("hhii", true, "00am"), Err(SemanticError::InvalidHour));
        assert_eq!(run("hhii", true, "13pm"), Err(SemanticError::InvalidHour));
        assert_eq!(run("hhii", true, "05xx"), Err(SemanticError::InvalidMeridiem));
        assert_eq!(run("hhii", true, "05AM"), Err(SemanticError::InvalidMeridiem));
    }

    #[test]
    fn test_noon_forces_twelve() {
        assert_eq!(run("hhii", true, "12m"), Ok(()));
        assert_eq!(run("hhii", true, "11m"), Err(SemanticError::InvalidHour));
        assert_eq!(run("hhii", true, "01m"), Err(SemanticError::InvalidHour));
    }

    #[test]
    fn test_minute_second_tenth_ranges() {
        assert_eq!(run("mm", false, "00"), Ok(()));
        assert_eq!(run("mm", false, "59"), Ok(()));
        assert_eq!(run("mm", false, "60"), Err(SemanticError::InvalidMinute));
        assert_eq!(run("ss", false, "59"), Ok(()));
        assert_eq!(run("ss", false, "60"), Err(SemanticError::InvalidSecond));
        assert_eq!(run("ss", false, "x0"), Err(SemanticError::InvalidSecond));
        assert_eq!(run("t", false, "0"), Ok(()));
        assert_eq!(run("t", false, "9"), Ok(()));
        assert_eq!(run("t", false, "x"), Err(SemanticError::InvalidTenth));
    }

    #[test]
    fn test_check_all_collects_every_failure() {
        let fields = fields_for("MM-DD hh:mm", false, "13-41 27:61");
        let errors = check_all(&fields, false);
        assert_eq!(
            errors,
            vec![
                SemanticError::InvalidMonth,
                SemanticError::InvalidDay,
                SemanticError::InvalidHour,
                SemanticError::InvalidMinute,
            ]
        );
    }

    #[test]
    fn test_check_all_empty_for_valid_date() {
        let fields = fields_for("YYYY-MM-DD", false, "2024-01-05");
        assert!(check_all(&fields, false).is_empty());
    }
}
