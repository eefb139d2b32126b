//! # Temporal Validators
//!
//! `DateTime` normalizes every accepted input to UTC with a `Z` suffix,
//! truncated to seconds: `YYYY-MM-DDTHH:MM:SSZ`. Offsets are converted, not
//! rejected. `Date` normalizes to a calendar date `YYYY-MM-DD`; a full
//! timestamp is accepted and reduced to its UTC date.

use chrono::{DateTime as ChronoDateTime, NaiveDate, Timelike, Utc};

use argcheck_core::{CheckError, CheckResult, TypeCatalog, TypeValidator, Value};

/// A calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Date;

/// An instant in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTime;

impl TypeValidator for Date {
    fn construct(&self, raw: &Value, _catalog: &TypeCatalog) -> CheckResult<Value> {
        let s = raw
            .as_str()
            .ok_or_else(|| CheckError::constraint("Date", "Date must be a string"))?;
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Value::from(date.format("%Y-%m-%d").to_string()));
        }
        let dt = parse_rfc3339(s).map_err(|e| {
            CheckError::constraint("Date", format!("Invalid date {s:?}: {e}"))
        })?;
        Ok(Value::from(dt.date_naive().format("%Y-%m-%d").to_string()))
    }
}

impl TypeValidator for DateTime {
    fn construct(&self, raw: &Value, _catalog: &TypeCatalog) -> CheckResult<Value> {
        let dt = match raw {
            Value::String(s) => parse_rfc3339(s).map_err(|e| {
                CheckError::constraint("DateTime", format!("Invalid RFC 3339 timestamp {s:?}: {e}"))
            })?,
            Value::Number(_) => {
                let secs = raw.as_i64().ok_or_else(|| {
                    CheckError::constraint("DateTime", "DateTime epoch seconds must be an integer")
                })?;
                ChronoDateTime::<Utc>::from_timestamp(secs, 0).ok_or_else(|| {
                    CheckError::constraint("DateTime", format!("Invalid Unix timestamp: {secs}"))
                })?
            }
            _ => {
                return Err(CheckError::constraint(
                    "DateTime",
                    "DateTime must be an RFC 3339 string or epoch seconds",
                ))
            }
        };
        Ok(Value::from(to_iso8601(dt)))
    }
}

fn parse_rfc3339(s: &str) -> Result<ChronoDateTime<Utc>, chrono::ParseError> {
    ChronoDateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

fn to_iso8601(dt: ChronoDateTime<Utc>) -> String {
    dt.with_nanosecond(0)
        .unwrap_or(dt)
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}
