//! Employee (candidate) model.
//!
//! Employees are the pool a generation run draws from. The record here is
//! immutable input; per-run counters live in
//! [`crate::engine::WorkloadTracker`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An employee who can be assigned to shifts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Role this employee works (matched against `Shift::required_role`).
    pub role: String,
    /// Skills held (e.g., "triage", "forklift").
    pub skills: HashSet<String>,
    /// Shift types this employee prefers (e.g., "day", "night").
    pub preferred_shift_types: HashSet<String>,
    /// Dates the employee has declared available.
    pub available_dates: HashSet<NaiveDate>,
    /// Dates the employee is explicitly unavailable (overrides availability).
    pub unavailable_dates: HashSet<NaiveDate>,
    /// Weekly assignment cap.
    pub max_shifts_per_week: u32,
}

impl Employee {
    /// Creates an employee with no skills, preferences, or availability.
    pub fn new(id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            role: role.into(),
            skills: HashSet::new(),
            preferred_shift_types: HashSet::new(),
            available_dates: HashSet::new(),
            unavailable_dates: HashSet::new(),
            max_shifts_per_week: 5,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.insert(skill.into());
        self
    }

    /// Adds a preferred shift type.
    pub fn with_preferred_type(mut self, shift_type: impl Into<String>) -> Self {
        self.preferred_shift_types.insert(shift_type.into());
        self
    }

    /// Marks a date available.
    pub fn with_available_date(mut self, date: NaiveDate) -> Self {
        self.available_dates.insert(date);
        self
    }

    /// Marks a date range (inclusive) available.
    pub fn with_available_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        let mut d = from;
        while d <= to {
            self.available_dates.insert(d);
            match d.succ_opt() {
                Some(next) => d = next,
                None => break,
            }
        }
        self
    }

    /// Marks a date unavailable.
    pub fn with_unavailable_date(mut self, date: NaiveDate) -> Self {
        self.unavailable_dates.insert(date);
        self
    }

    /// Sets the weekly assignment cap.
    pub fn with_max_shifts_per_week(mut self, max: u32) -> Self {
        self.max_shifts_per_week = max;
        self
    }

    /// Whether the employee can work the given date.
    ///
    /// Requires the date to be declared available and not declared
    /// unavailable; the unavailable set wins on conflict.
    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        self.available_dates.contains(&date) && !self.unavailable_dates.contains(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_availability() {
        let e = Employee::new("E1", "nurse")
            .with_available_date(date(1))
            .with_available_date(date(2))
            .with_unavailable_date(date(2));
        assert!(e.is_available_on(date(1)));
        assert!(!e.is_available_on(date(2))); // Unavailable overrides
        assert!(!e.is_available_on(date(3))); // Never declared
    }

    #[test]
    fn test_available_range() {
        let e = Employee::new("E1", "nurse").with_available_range(date(1), date(5));
        for d in 1..=5 {
            assert!(e.is_available_on(date(d)), "day {d} should be available");
        }
        assert!(!e.is_available_on(date(6)));
    }

    #[test]
    fn test_available_range_single_day() {
        let e = Employee::new("E1", "nurse").with_available_range(date(3), date(3));
        assert!(e.is_available_on(date(3)));
        assert!(!e.is_available_on(date(4)));
    }

    #[test]
    fn test_builder() {
        let e = Employee::new("E1", "nurse")
            .with_name("Kim")
            .with_skill("triage")
            .with_preferred_type("night")
            .with_max_shifts_per_week(4);
        assert_eq!(e.name, "Kim");
        assert!(e.skills.contains("triage"));
        assert!(e.preferred_shift_types.contains("night"));
        assert_eq!(e.max_shifts_per_week, 4);
    }
}
