use time::format_description::BorrowedFormatItem;
use time::OffsetDateTime;

/// 12-hour clock with AM/PM suffix, e.g. `09:45 AM`.
const DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] =
    time::macros::format_description!("[hour repr:12]:[minute] [period]");

pub trait TimeSource: Send + 'static {
    fn now(&self) -> Result<OffsetDateTime, crate::error::Error>;
}

/// Wall-clock time in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTime;

impl TimeSource for LocalTime {
    fn now(&self) -> Result<OffsetDateTime, crate::error::Error> {
        OffsetDateTime::now_local().map_err(crate::error::Error::TimeOffset)
    }
}

pub fn format_time(time: &OffsetDateTime) -> Result<String, crate::error::Error> {
    time.format(DISPLAY_FORMAT)
        .map_err(crate::error::Error::TimeFormatting)
}

/// Time left until shortly after the next minute boundary.
pub fn until_next_minute(time: &OffsetDateTime) -> std::time::Duration {
    std::time::Duration::from_secs(61 - u64::from(time.second()))
}

#[cfg(test)]
pub struct FixedTime(pub OffsetDateTime);

#[cfg(test)]
impl TimeSource for FixedTime {
    fn now(&self) -> Result<OffsetDateTime, crate::error::Error> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::format_time;
    use super::until_next_minute;

    #[test]
    fn test_format_morning() {
        let s = format_time(&datetime!(2024-03-01 10:45:12 UTC)).unwrap();
        assert_eq!(s, "10:45 AM");
    }

    #[test]
    fn test_format_pads_hour() {
        let s = format_time(&datetime!(2024-03-01 21:05:00 UTC)).unwrap();
        assert_eq!(s, "09:05 PM");
    }

    #[test]
    fn test_format_midnight_and_noon() {
        assert_eq!(
            format_time(&datetime!(2024-03-01 00:00:00 UTC)).unwrap(),
            "12:00 AM"
        );
        assert_eq!(
            format_time(&datetime!(2024-03-01 12:30:00 UTC)).unwrap(),
            "12:30 PM"
        );
    }

    #[test]
    fn test_until_next_minute() {
        assert_eq!(
            until_next_minute(&datetime!(2024-03-01 10:45:00 UTC)).as_secs(),
            61
        );
        assert_eq!(
            until_next_minute(&datetime!(2024-03-01 10:45:59 UTC)).as_secs(),
            2
        );
    }
}
