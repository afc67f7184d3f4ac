//! Counter configuration.
//!
//! [`Settings`] carries an optional step and an optional ceiling. The same
//! type serves two roles: initial configuration passed to
//! [`Incrementor::with_settings`](crate::counter::Incrementor::with_settings),
//! and the payload of a reconfiguration via
//! [`Incrementor::apply_settings`](crate::counter::Incrementor::apply_settings).
//! An unset field means "leave unchanged" (or "use the default" at
//! construction time).
//!
//! With the `json` feature enabled, settings can be parsed from the JSON
//! shape a configuration file would hold:
//!
//! ```rust,ignore
//! let settings = Settings::from_json_str(r#"{"step": 2, "ceiling": 1000}"#)?;
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::CounterError;

/// Step used when none is configured.
pub const DEFAULT_STEP: i64 = 1;

/// Ceiling used when none is configured. Effectively "never wrap".
pub const DEFAULT_CEILING: i64 = i64::MAX;

/// Optional step and ceiling for constructing or reconfiguring a counter.
///
/// # Examples
///
/// ```rust
/// use incrementator::settings::Settings;
///
/// let settings = Settings::new().with_step(2).with_ceiling(100);
/// assert_eq!(settings.step, Some(2));
/// assert_eq!(settings.ceiling, Some(100));
/// assert!(settings.validate().is_ok());
///
/// assert!(Settings::new().with_step(-1).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Settings {
    /// New increment step, if supplied. Must be `>= 0`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub step: Option<i64>,
    /// New wraparound ceiling (inclusive), if supplied. Must be `>= 0`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ceiling: Option<i64>,
}

impl Settings {
    /// Creates empty settings: nothing supplied, nothing changes.
    pub const fn new() -> Self {
        Self {
            step: None,
            ceiling: None,
        }
    }

    /// Sets the step, returning `self` for method chaining.
    pub const fn with_step(self, step: i64) -> Self {
        Self {
            step: Some(step),
            ..self
        }
    }

    /// Sets the ceiling, returning `self` for method chaining.
    pub const fn with_ceiling(self, ceiling: i64) -> Self {
        Self {
            ceiling: Some(ceiling),
            ..self
        }
    }

    /// Returns `true` if neither field is supplied.
    pub const fn is_empty(&self) -> bool {
        self.step.is_none() && self.ceiling.is_none()
    }

    /// Validates all supplied fields without applying anything.
    ///
    /// Checks every field before reporting, so callers can rely on
    /// "validate all, then mutate" to keep reconfiguration all-or-nothing.
    pub fn validate(&self) -> Result<(), CounterError> {
        if let Some(step) = self.step {
            if step < 0 {
                return Err(CounterError::InvalidArgument {
                    field: "step",
                    value: step,
                });
            }
        }
        if let Some(ceiling) = self.ceiling {
            if ceiling < 0 {
                return Err(CounterError::InvalidArgument {
                    field: "ceiling",
                    value: ceiling,
                });
            }
        }
        Ok(())
    }

    /// Parses settings from a JSON document.
    ///
    /// Absent keys stay unset. The parsed settings are not validated; call
    /// [`validate`](Self::validate) or let the counter do it.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let settings = Settings::new();
        assert!(settings.is_empty());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_builder_chaining() {
        let settings = Settings::new().with_step(3).with_ceiling(9);
        assert_eq!(settings.step, Some(3));
        assert_eq!(settings.ceiling, Some(9));
        assert!(!settings.is_empty());
    }

    #[test]
    fn test_validate_accepts_zero() {
        assert!(Settings::new()
            .with_step(0)
            .with_ceiling(0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_step() {
        let err = Settings::new().with_step(-2).validate().unwrap_err();
        assert!(matches!(
            err,
            CounterError::InvalidArgument {
                field: "step",
                value: -2
            }
        ));
    }

    #[test]
    fn test_validate_rejects_negative_ceiling() {
        let err = Settings::new().with_ceiling(-1).validate().unwrap_err();
        assert!(matches!(
            err,
            CounterError::InvalidArgument {
                field: "ceiling",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_settings_validate() {
        assert!(Settings::new().validate().is_ok());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_from_json_full() {
        let settings =
            Settings::from_json_str(r#"{"step": 2, "ceiling": 1000}"#).unwrap();
        assert_eq!(settings, Settings::new().with_step(2).with_ceiling(1000));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json_str(r#"{"step": 5}"#).unwrap();
        assert_eq!(settings.step, Some(5));
        assert_eq!(settings.ceiling, None);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_from_json_empty_object() {
        let settings = Settings::from_json_str("{}").unwrap();
        assert!(settings.is_empty());
    }
}
