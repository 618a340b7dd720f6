//! Hand-rolled date helpers for the archive page. The server speaks ISO
//! timestamps and expects the picked date back in the classic
//! `toUTCString` shape, so everything here works on plain (year, month, day)
//! triples.

const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Parses `yyyy-mm-dd`, with or without a trailing `T...` time part.
pub fn parse_iso_date(value: &str) -> Option<(i32, u32, u32)> {
    let date_part = value.split('T').next().unwrap_or(value);
    let parts: Vec<&str> = date_part.split('-').collect();
    if parts.len() != 3 {
        return None;
    }
    let year = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let day: u32 = parts[2].parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some((year, month, day))
}

/// Long display form for the date heading, e.g. "5th April 2021".
pub fn format_heading(timestamp: &str) -> String {
    let Some((year, month, day)) = parse_iso_date(timestamp) else {
        return timestamp.to_string();
    };
    let month_label = MONTHS_LONG[(month - 1) as usize];
    format!("{day}{} {month_label} {year}", ordinal_suffix(day))
}

/// Serializes a date the way `Date.toUTCString()` does at midnight, e.g.
/// "Mon, 05 Apr 2021 00:00:00 GMT". Used for both the query parameter and
/// the analytics label.
pub fn to_http_date(year: i32, month: u32, day: u32) -> String {
    let weekday = WEEKDAYS[weekday_index(year, month, day)];
    let month_label = MONTHS_SHORT[(month - 1) as usize];
    format!("{weekday}, {day:02} {month_label} {year} 00:00:00 GMT")
}

/// Convenience for ISO input straight off the date input.
pub fn http_date_from_iso(value: &str) -> Option<String> {
    let (year, month, day) = parse_iso_date(value)?;
    Some(to_http_date(year, month, day))
}

fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

// Sakamoto's method, 0 = Sunday.
fn weekday_index(year: i32, month: u32, day: u32) -> usize {
    const OFFSETS: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let y = if month < 3 { year - 1 } else { year };
    let index =
        (y + y / 4 - y / 100 + y / 400 + OFFSETS[(month - 1) as usize] + day as i32) % 7;
    index.rem_euclid(7) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_plain_iso_date() {
        assert_eq!(parse_iso_date("2021-04-05"), Some((2021, 4, 5)));
    }

    #[test]
    fn parses_iso_timestamp() {
        assert_eq!(parse_iso_date("2021-04-05T00:00:01"), Some((2021, 4, 5)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_iso_date(""), None);
        assert_eq!(parse_iso_date("05.04.2021"), None);
        assert_eq!(parse_iso_date("2021-13-01"), None);
    }

    #[test]
    fn formats_heading_with_ordinal() {
        assert_eq!(format_heading("2021-04-05T00:00:01"), "5th April 2021");
        assert_eq!(format_heading("2014-03-01"), "1st March 2014");
        assert_eq!(format_heading("2020-02-02"), "2nd February 2020");
        assert_eq!(format_heading("2019-12-23"), "23rd December 2019");
        assert_eq!(format_heading("2018-07-11"), "11th July 2018");
        assert_eq!(format_heading("2017-01-31"), "31st January 2017");
    }

    #[test]
    fn serializes_http_date_at_midnight() {
        assert_eq!(to_http_date(2021, 4, 5), "Mon, 05 Apr 2021 00:00:00 GMT");
        assert_eq!(to_http_date(2014, 3, 1), "Sat, 01 Mar 2014 00:00:00 GMT");
        assert_eq!(to_http_date(2000, 1, 1), "Sat, 01 Jan 2000 00:00:00 GMT");
    }

    #[test]
    fn http_date_from_iso_round_trips_the_picker_value() {
        assert_eq!(
            http_date_from_iso("2021-04-05").as_deref(),
            Some("Mon, 05 Apr 2021 00:00:00 GMT")
        );
        assert_eq!(http_date_from_iso("not-a-date"), None);
    }
}
