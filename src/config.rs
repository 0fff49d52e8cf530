//! Static calendar configuration.
//!
//! The holiday list and target date are compiled-in constants; they are
//! carried in an explicit immutable [`CalendarConfig`] passed into the
//! server rather than read from module-level globals, so tests can run the
//! same code against arbitrary calendars.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::{parse_date, HolidaySet};
use crate::error::Result;

/// Built-in holiday list (YYYY-MM-DD).
const HOLIDAYS: &[&str] = &[
    "2025-10-12", // Nossa Senhora Aparecida
    "2025-10-13", // Dia dos Professores
    "2025-11-02", // Finados
    "2025-11-15", // Proclamação da República
    "2025-11-20", // Consciência Negra
    "2025-11-21",
    "2025-12-08",
];

/// Last school day of the term.
const TARGET: &str = "2025-12-18";

/// A class schedule that meets only on certain weekdays.
///
/// `key` is the field name emitted in the `/api/dias` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSchedule {
    pub key: String,
    pub weekdays: Vec<Weekday>,
}

impl ClassSchedule {
    pub fn new(key: impl Into<String>, weekdays: Vec<Weekday>) -> Self {
        Self {
            key: key.into(),
            weekdays,
        }
    }
}

/// Immutable calendar configuration shared across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub holidays: HolidaySet,
    pub target: NaiveDate,
    pub schedules: Vec<ClassSchedule>,
}

impl CalendarConfig {
    /// Build the configuration from the compiled-in literals.
    ///
    /// Fails only if a holiday or target literal is malformed, which is a
    /// fatal startup error.
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            holidays: HolidaySet::from_strs(HOLIDAYS)?,
            target: parse_date(TARGET)?,
            schedules: vec![
                ClassSchedule::new("seg_ter", vec![Weekday::Mon, Weekday::Tue]),
                ClassSchedule::new("qui_sex", vec![Weekday::Thu, Weekday::Fri]),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_parses() {
        let config = CalendarConfig::builtin().unwrap();
        assert_eq!(config.holidays.len(), 7);
        assert_eq!(config.target, NaiveDate::from_ymd_opt(2025, 12, 18).unwrap());
        assert_eq!(config.schedules.len(), 2);
        assert_eq!(config.schedules[0].key, "seg_ter");
        assert_eq!(config.schedules[1].key, "qui_sex");
    }
}
