use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Weekday};

/// Accepted date layout, one per line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Count lines whose date falls on `weekday`.
///
/// Every line must hold a date, blank ones included; the first that does
/// not parse fails the whole count. A final line terminator is not a line.
pub fn count_weekday(content: &str, weekday: Weekday) -> Result<usize> {
    let mut count = 0;
    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        let date = NaiveDate::parse_from_str(line, DATE_FORMAT).with_context(|| {
            format!("line {}: {:?} is not a {} date", i + 1, line, DATE_FORMAT)
        })?;
        if date.weekday() == weekday {
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn all_wednesdays() {
        let input = "2024-01-03\n2024-01-10\n2024-01-17\n";
        assert_eq!(count_weekday(input, Weekday::Wed).unwrap(), 3);
    }

    #[test]
    fn mixed_days() {
        // Wed, Thu, Sun, Wed
        let input = "2024-01-03\n2024-01-04\n2024-01-07\n2024-02-28";
        assert_eq!(count_weekday(input, Weekday::Wed).unwrap(), 2);
    }

    #[test]
    fn empty_input_counts_zero() {
        assert_eq!(count_weekday("", Weekday::Wed).unwrap(), 0);
    }

    #[test]
    fn crlf_and_padding_tolerated() {
        assert_eq!(count_weekday("  2024-01-03 \r\n", Weekday::Wed).unwrap(), 1);
    }

    #[test]
    fn malformed_line_fails_whole_count() {
        let err =
            count_weekday("2024-01-03\nJan 10, 2024\n2024-01-17", Weekday::Wed).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn blank_line_fails_whole_count() {
        let err = count_weekday("2024-01-03\n\n2024-01-10\n", Weekday::Wed).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn trailing_newline_is_not_a_blank_line() {
        assert_eq!(count_weekday("2024-01-03\n", Weekday::Wed).unwrap(), 1);
    }

    #[test]
    fn impossible_date_fails() {
        assert!(count_weekday("2023-02-30", Weekday::Wed).is_err());
    }

    proptest! {
        #[test]
        fn matches_independent_count(offsets in prop::collection::vec(0i64..20_000, 0..50)) {
            let base = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
            let dates: Vec<NaiveDate> = offsets
                .iter()
                .map(|d| base + chrono::Duration::days(*d))
                .collect();
            let input = dates
                .iter()
                .map(|d| d.format(DATE_FORMAT).to_string())
                .collect::<Vec<_>>()
                .join("\n");
            let expected = dates.iter().filter(|d| d.weekday() == Weekday::Wed).count();
            prop_assert_eq!(count_weekday(&input, Weekday::Wed).unwrap(), expected);
        }
    }
}
