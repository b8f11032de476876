//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handlers never read environment variables; the binaries
//! resolve them here and share the result behind an `Arc`.

use crate::constants::{DEFAULT_CLINIC_LABEL, DEFAULT_UTC_OFFSET};
use crate::{CoreError, CoreResult};
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use receita_types::NonEmptyText;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    utc_offset: FixedOffset,
    clinic_label: NonEmptyText,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfig` if `clinic_label` is blank.
    pub fn new(utc_offset: FixedOffset, clinic_label: impl AsRef<str>) -> CoreResult<Self> {
        let clinic_label = NonEmptyText::new(clinic_label)
            .map_err(|_| CoreError::InvalidConfig("clinic label cannot be empty".into()))?;

        Ok(Self {
            utc_offset,
            clinic_label,
        })
    }

    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    pub fn clinic_label(&self) -> &str {
        self.clinic_label.as_str()
    }

    /// The current calendar date at the clinic.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.utc_offset).date_naive()
    }
}

impl CoreConfig {
    /// Configuration with Brasília time and the stock clinic heading.
    pub fn brasilia() -> CoreResult<Self> {
        Self::new(brasilia_offset(), DEFAULT_CLINIC_LABEL)
    }
}

fn brasilia_offset() -> FixedOffset {
    parse_utc_offset(DEFAULT_UTC_OFFSET).unwrap_or_else(|_| Utc.fix())
}

/// Resolve the clinic UTC offset from an optional environment value.
///
/// Blank or missing values fall back to Brasília time.
///
/// # Errors
///
/// Returns `CoreError::InvalidConfig` if the value is present but cannot be parsed.
pub fn utc_offset_from_env_value(value: Option<String>) -> CoreResult<FixedOffset> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        Some(v) => parse_utc_offset(&v),
        None => Ok(brasilia_offset()),
    }
}

/// Resolve the fallback clinic heading from an optional environment value.
pub fn clinic_label_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CLINIC_LABEL.to_string())
}

/// Parse `±HH:MM`, `±HHMM` or `±H` into a fixed offset.
///
/// # Errors
///
/// Returns `CoreError::InvalidConfig` for anything else, or for offsets outside ±14 hours.
pub fn parse_utc_offset(value: &str) -> CoreResult<FixedOffset> {
    let invalid = || CoreError::InvalidConfig(format!("invalid UTC offset: {value:?}"));

    let (sign, rest) = match value.as_bytes().first() {
        Some(b'-') => (-1, &value[1..]),
        Some(b'+') => (1, &value[1..]),
        _ => (1, value),
    };

    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return Err(invalid());
    }

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };

    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 14 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_offset_forms() {
        assert_eq!(parse_utc_offset("-03:00").unwrap().local_minus_utc(), -3 * 3600);
        assert_eq!(parse_utc_offset("-0300").unwrap().local_minus_utc(), -3 * 3600);
        assert_eq!(parse_utc_offset("-3").unwrap().local_minus_utc(), -3 * 3600);
        assert_eq!(parse_utc_offset("+05:30").unwrap().local_minus_utc(), 5 * 3600 + 1800);
        assert_eq!(parse_utc_offset("0").unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn rejects_malformed_offsets() {
        for bad in ["", "-", "abc", "-03:xx", "+15:00", "-03:75", "--3"] {
            assert!(
                matches!(parse_utc_offset(bad), Err(CoreError::InvalidConfig(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn env_value_defaults_to_brasilia() {
        let offset = utc_offset_from_env_value(None).unwrap();
        assert_eq!(offset.local_minus_utc(), -3 * 3600);
        let offset = utc_offset_from_env_value(Some("  ".into())).unwrap();
        assert_eq!(offset.local_minus_utc(), -3 * 3600);
    }

    #[test]
    fn clinic_label_falls_back_when_blank() {
        assert_eq!(clinic_label_from_env_value(Some(" ".into())), DEFAULT_CLINIC_LABEL);
        assert_eq!(
            clinic_label_from_env_value(Some("Clínica São Lucas".into())),
            "Clínica São Lucas"
        );
    }

    #[test]
    fn config_rejects_blank_clinic_label() {
        let offset = parse_utc_offset("-03:00").unwrap();
        assert!(matches!(
            CoreConfig::new(offset, "   "),
            Err(CoreError::InvalidConfig(_))
        ));
    }
}
