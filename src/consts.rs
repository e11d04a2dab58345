/// Characters reserved as field discriminators in every clock mode
pub const PROTECTED: [char; 7] = ['Y', 'M', 'D', 'h', 'm', 's', 't'];

/// Discriminator for the meridiem marker, protected only in 12-hour mode
pub const MERIDIEM_CHAR: char = 'i';

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Fixed three-letter English month abbreviations, in month order.
/// Compared case-insensitively against `MMM` field values.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Days in a common year
pub const DAYS_IN_YEAR: u16 = 365;
/// Days in a leap year
pub const DAYS_IN_LEAP_YEAR: u16 = 366;

/// Maximum hour on a 24-hour clock
pub const MAX_HOUR_24: u8 = 23;
/// Maximum hour on a 12-hour clock
pub const MAX_HOUR_12: u8 = 12;
/// The hour the noon marker forces
pub const NOON_HOUR: u8 = 12;
/// Maximum minute value
pub const MAX_MINUTE: u8 = 59;
/// Maximum second value
pub const MAX_SECOND: u8 = 59;
/// Maximum tenth-of-second value
pub const MAX_TENTH: u8 = 9;

/// Marker value for ante meridiem
pub const ANTE_MERIDIEM: &str = "am";
/// Marker value for post meridiem
pub const POST_MERIDIEM: &str = "pm";
/// Marker value for noon
pub const NOON: &str = "m";

/// Leap year occurs every 4 years (simplified rule, no century correction)
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
