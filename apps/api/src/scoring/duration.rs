//! Experience-duration parsing: turns free-text CV duration strings into
//! fractional years. Recognizes "N years", "N months", numeric ranges with a
//! unit ("3-5 years" — scored at the midpoint), and bare calendar-year ranges
//! ("2019-2022" — scored as the elapsed years). Anything else is unparseable
//! and contributes zero at the call site.

/// Parses a duration string into fractional years. Returns `None` when the
/// string carries no recognizable duration.
pub fn parse_duration_years(raw: &str) -> Option<f64> {
    let s = raw.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    if let Some(years) = parse_year_range(&s) {
        return Some(years);
    }

    if let Some((lo, hi)) = parse_numeric_range(&s) {
        return unit_factor(&s).map(|factor| (lo + hi) / 2.0 * factor);
    }

    let value = first_number(&s)?;
    unit_factor(&s).map(|factor| value * factor)
}

/// "2019-2022" or "2019 - 2021": both sides are plausible calendar years and
/// no unit word is present. Scored as the elapsed span.
fn parse_year_range(s: &str) -> Option<f64> {
    if unit_factor(s).is_some() {
        return None;
    }
    let (left, right) = s.split_once('-')?;
    let start = parse_calendar_year(left.trim())?;
    let end = parse_calendar_year(right.trim())?;
    if end < start {
        return None;
    }
    Some((end - start) as f64)
}

fn parse_calendar_year(s: &str) -> Option<i32> {
    if s.len() != 4 || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year: i32 = s.parse().ok()?;
    (1900..=2100).contains(&year).then_some(year)
}

/// "3-5" (with a unit elsewhere in the string): a value range, scored at the
/// midpoint.
fn parse_numeric_range(s: &str) -> Option<(f64, f64)> {
    let (left, right) = s.split_once('-')?;
    let lo = first_number(left)?;
    let hi = first_number(right)?;
    (hi >= lo).then_some((lo, hi))
}

fn unit_factor(s: &str) -> Option<f64> {
    if s.contains("month") {
        Some(1.0 / 12.0)
    } else if s.contains("year") || s.contains("yr") {
        Some(1.0)
    } else {
        None
    }
}

/// Extracts the first decimal number in the string, if any.
fn first_number(s: &str) -> Option<f64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let number: String = s[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    number.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_years() {
        assert_eq!(parse_duration_years("3 years"), Some(3.0));
        assert_eq!(parse_duration_years("2.5 years"), Some(2.5));
        assert_eq!(parse_duration_years("1 yr"), Some(1.0));
    }

    #[test]
    fn test_months_convert_to_fractional_years() {
        assert_eq!(parse_duration_years("6 months"), Some(0.5));
        assert_eq!(parse_duration_years("18 months"), Some(1.5));
    }

    #[test]
    fn test_unit_range_takes_the_midpoint() {
        assert_eq!(parse_duration_years("3-5 years"), Some(4.0));
        assert_eq!(parse_duration_years("6-12 months"), Some(0.75));
    }

    #[test]
    fn test_calendar_year_range_takes_the_span() {
        assert_eq!(parse_duration_years("2019-2022"), Some(3.0));
        assert_eq!(parse_duration_years("2019 - 2021"), Some(2.0));
    }

    #[test]
    fn test_reversed_year_range_is_unparseable() {
        assert_eq!(parse_duration_years("2022-2019"), None);
    }

    #[test]
    fn test_garbage_is_unparseable() {
        assert_eq!(parse_duration_years(""), None);
        assert_eq!(parse_duration_years("internship"), None);
        assert_eq!(parse_duration_years("ongoing"), None);
        // A bare number carries no unit and stays ambiguous.
        assert_eq!(parse_duration_years("3"), None);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(parse_duration_years("  4 Years  "), Some(4.0));
    }
}
