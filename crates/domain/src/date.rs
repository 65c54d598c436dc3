use chrono::prelude::*;
use chrono::Duration;
use chrono_tz::Tz;

/// Parses a `YYYY-MM-DD` date. Single digit months and days are accepted.
pub fn parse_date(datestr: &str) -> anyhow::Result<NaiveDate> {
    let dates = datestr.split('-').collect::<Vec<_>>();
    if dates.len() != 3 {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }
    let (year, month, day) = match (
        dates[0].parse::<i32>(),
        dates[1].parse::<u32>(),
        dates[2].parse::<u32>(),
    ) {
        (Ok(year), Ok(month), Ok(day)) => (year, month, day),
        _ => return Err(anyhow::Error::msg(datestr.to_string())),
    };

    if !(1970..=2100).contains(&year) {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| anyhow::Error::msg(datestr.to_string()))
}

/// Interprets a wall clock time in the given timezone. Times that fall into
/// a DST gap are moved forward by one hour.
pub(crate) fn localize(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

/// The first and the last instant of `date` in the given timezone
pub fn day_bounds(date: NaiveDate, tz: &Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = localize(date.and_time(NaiveTime::MIN), tz)?;
    let end = localize(
        date.and_hms_micro_opt(23, 59, 59, 999_999)?,
        tz,
    )?;
    Some((start, end))
}

/// Parses the value sent by a `<input type="datetime-local">` element,
/// e.g. `2025-10-08T14:30`
pub fn parse_local_datetime(value: &str, tz: &Tz) -> anyhow::Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%dT%H:%M")?;
    localize(naive, tz).ok_or_else(|| anyhow::Error::msg(format!("Invalid local time: {}", value)))
}

pub fn format_local(dt: &DateTime<Utc>, tz: &Tz, fmt: &str) -> String {
    dt.with_timezone(tz).format(fmt).to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_accepts_valid_dates() {
        let valid_dates = vec![
            "2018-1-1",
            "2025-12-31",
            "2020-1-12",
            "2020-2-29",
            "2020-02-2",
            "2020-02-02",
            "2020-2-09",
        ];

        for date in &valid_dates {
            assert!(parse_date(date).is_ok());
        }
    }

    #[test]
    fn it_rejects_invalid_dates() {
        let invalid_dates = vec![
            "2018--1-1",
            "2020-1-32",
            "2020-2-30",
            "2020-0-1",
            "2020-1-0",
            "1969-1-1",
        ];

        for date in &invalid_dates {
            assert!(parse_date(date).is_err());
        }
    }

    #[test]
    fn day_bounds_in_utc() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 8).unwrap();
        let (start, end) = day_bounds(date, &Tz::UTC).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 10, 8, 0, 0, 0).unwrap());
        assert_eq!(
            end,
            Utc.with_ymd_and_hms(2025, 10, 8, 23, 59, 59).unwrap() + Duration::microseconds(999_999)
        );
    }

    #[test]
    fn day_bounds_respect_timezone() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let (start, _) = day_bounds(date, &Tz::America__Sao_Paulo).unwrap();
        // Sao Paulo is UTC-3 without DST
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 1, 15, 3, 0, 0).unwrap());
    }

    #[test]
    fn parses_datetime_local_input() {
        let dt = parse_local_datetime("2025-10-08T14:30", &Tz::Europe__Oslo).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 10, 8, 12, 30, 0).unwrap());
        assert!(parse_local_datetime("2025-10-08 14:30", &Tz::UTC).is_err());
    }

    #[test]
    fn formats_in_local_time() {
        let dt = Utc.with_ymd_and_hms(2025, 10, 8, 12, 30, 0).unwrap();
        assert_eq!(
            format_local(&dt, &Tz::Europe__Oslo, "%d/%m/%Y %H:%M"),
            "08/10/2025 14:30"
        );
    }
}
