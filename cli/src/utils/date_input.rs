use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// A point in time typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput {
    Now,
    /// Offset from now, e.g. `+2h` or `-3d`
    Relative(Duration),
    Absolute(DateTime<Utc>),
}

impl DateInput {
    pub fn resolve(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            DateInput::Now => now,
            DateInput::Relative(offset) => now + *offset,
            DateInput::Absolute(ts) => *ts,
        }
    }
}

const NAIVE_FORMATS: [&str; 3] = ["%d/%m/%y %H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

impl FromStr for DateInput {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("now") {
            return Ok(Self::Now);
        }

        if let Some(offset) = parse_offset(s) {
            return Ok(Self::Relative(offset));
        }

        if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::Absolute(ts.with_timezone(&Utc)));
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
            .map(|naive| Self::Absolute(naive.and_utc()))
            .ok_or_else(|| anyhow::anyhow!("Invalid date: {} (try 'now', '+2h' or '18/03/25 10:30')", s))
    }
}

fn parse_offset(s: &str) -> Option<Duration> {
    let sign = match s.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };

    let body = &s[1..];
    let unit = body.chars().last()?;
    let amount: i64 = body[..body.len() - unit.len_utf8()].parse().ok()?;

    let offset = match unit {
        'm' => Duration::minutes(amount),
        'h' => Duration::hours(amount),
        'd' => Duration::days(amount),
        'w' => Duration::weeks(amount),
        _ => return None,
    };
    Some(offset * sign)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_relative_and_keyword_inputs() {
        let now: DateTime<Utc> = "2025-03-18T10:00:00Z".parse().unwrap();

        assert_eq!("now".parse::<DateInput>().unwrap().resolve(now), now);
        assert_eq!(
            "+2h".parse::<DateInput>().unwrap().resolve(now),
            now + Duration::hours(2)
        );
        assert_eq!(
            "-3d".parse::<DateInput>().unwrap().resolve(now),
            now - Duration::days(3)
        );
    }

    #[test]
    fn test_absolute_inputs() {
        let expected: DateTime<Utc> = "2025-03-18T10:30:00Z".parse().unwrap();

        for input in [
            "2025-03-18T10:30:00Z",
            "2025-03-18T12:30:00+02:00",
            "18/03/25 10:30",
            "2025-03-18 10:30",
        ] {
            assert_eq!(
                input.parse::<DateInput>().unwrap(),
                DateInput::Absolute(expected),
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("tomorrow-ish".parse::<DateInput>().is_err());
        assert!("+5y".parse::<DateInput>().is_err());
        assert!("+h".parse::<DateInput>().is_err());
    }
}
