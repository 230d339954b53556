use anyhow::{bail, Result};
use chrono::{Duration, NaiveDate, Utc};

// Parse a date bound like "7d" (days back from today) or "YYYY-MM-DD".
// Returns Some(date) on success; None if unparseable.
pub fn parse_date_str(s: &str) -> Option<NaiveDate> {
    // "7d" -> today - 7 days
    if let Some(stripped) = s.strip_suffix('d') {
        if let Ok(days) = stripped.parse::<i64>() {
            if days >= 0 {
                return Some(Utc::now().date_naive() - Duration::days(days));
            }
        }
    }
    // "YYYY-MM-DD"
    if let Ok(nd) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(nd);
    }
    None
}

// Helper for Option<String> inputs used by CLI flags like --since/--until
pub fn parse_date_opt(opt: &Option<String>) -> Result<Option<NaiveDate>> {
    let Some(s) = opt.as_ref() else { return Ok(None) };
    match parse_date_str(s) {
        Some(d) => Ok(Some(d)),
        None => bail!("Unrecognized date {:?}: use YYYY-MM-DD or a relative window like 7d", s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_date() {
        let d = parse_date_str("2024-05-01").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn parses_relative_window() {
        let d = parse_date_str("3d").unwrap();
        assert_eq!(d, Utc::now().date_naive() - Duration::days(3));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_date_str("yesterday").is_none());
        assert!(parse_date_str("-2d").is_none());
        assert!(parse_date_str("2024-13-40").is_none());
    }

    #[test]
    fn opt_helper_bails_with_friendly_error() {
        assert!(parse_date_opt(&Some("nope".to_string())).is_err());
        assert_eq!(parse_date_opt(&None).unwrap(), None);
        assert!(parse_date_opt(&Some("2024-05-01".to_string())).unwrap().is_some());
    }
}
