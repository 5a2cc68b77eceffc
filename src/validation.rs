//! Input validation for generation runs.
//!
//! Checks structural integrity of shifts and employees before any
//! assignment work begins. Detects:
//! - Duplicate IDs
//! - Empty shift time windows (start == end)
//! - Missing required roles
//! - Zero weekly shift capacity
//!
//! All problems are collected and reported together; the engine treats a
//! non-empty error list as fatal to the run.

use crate::models::{Employee, Shift};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A shift's start and end times are equal.
    EmptyTimeWindow,
    /// A shift has no required role.
    MissingRole,
    /// An employee's weekly cap is zero; they can never be assigned.
    ZeroWeeklyCapacity,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the inputs of a generation run.
///
/// Checks:
/// 1. No duplicate shift IDs
/// 2. No duplicate employee IDs
/// 3. Every shift has a non-empty required role
/// 4. No shift has an empty time window (start == end is ambiguous
///    between zero-length and a full 24h wrap, so it is rejected)
/// 5. Every employee has a weekly capacity of at least one shift
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(shifts: &[Shift], employees: &[Employee]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut shift_ids = HashSet::new();
    for shift in shifts {
        if !shift_ids.insert(shift.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate shift ID: {}", shift.id),
            ));
        }
        if shift.required_role.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingRole,
                format!("Shift '{}' has no required role", shift.id),
            ));
        }
        if shift.start_time == shift.end_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyTimeWindow,
                format!(
                    "Shift '{}' starts and ends at {}",
                    shift.id, shift.start_time
                ),
            ));
        }
    }

    let mut employee_ids = HashSet::new();
    for employee in employees {
        if !employee_ids.insert(employee.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate employee ID: {}", employee.id),
            ));
        }
        if employee.max_shifts_per_week == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroWeeklyCapacity,
                format!("Employee '{}' has max_shifts_per_week = 0", employee.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn time(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn sample_shifts() -> Vec<Shift> {
        vec![
            Shift::new("S1", date(), time(9), time(17), "nurse"),
            Shift::new("S2", date(), time(17), time(1), "nurse"),
        ]
    }

    fn sample_employees() -> Vec<Employee> {
        vec![
            Employee::new("E1", "nurse").with_available_date(date()),
            Employee::new("E2", "nurse").with_available_date(date()),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_shifts(), &sample_employees()).is_ok());
    }

    #[test]
    fn test_empty_inputs_ok() {
        // Empty problem is structurally valid; the run just produces zeros.
        assert!(validate_input(&[], &[]).is_ok());
    }

    #[test]
    fn test_duplicate_shift_id() {
        let shifts = vec![
            Shift::new("S1", date(), time(9), time(17), "nurse"),
            Shift::new("S1", date(), time(17), time(23), "nurse"),
        ];
        let errors = validate_input(&shifts, &sample_employees()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("shift")));
    }

    #[test]
    fn test_duplicate_employee_id() {
        let employees = vec![Employee::new("E1", "nurse"), Employee::new("E1", "clerk")];
        let errors = validate_input(&sample_shifts(), &employees).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("employee")));
    }

    #[test]
    fn test_empty_time_window() {
        let shifts = vec![Shift::new("S1", date(), time(9), time(9), "nurse")];
        let errors = validate_input(&shifts, &sample_employees()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyTimeWindow));
    }

    #[test]
    fn test_missing_role() {
        let shifts = vec![Shift::new("S1", date(), time(9), time(17), "")];
        let errors = validate_input(&shifts, &sample_employees()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MissingRole));
    }

    #[test]
    fn test_zero_weekly_capacity() {
        let employees = vec![Employee::new("E1", "nurse").with_max_shifts_per_week(0)];
        let errors = validate_input(&sample_shifts(), &employees).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::ZeroWeeklyCapacity));
    }

    #[test]
    fn test_multiple_errors() {
        let shifts = vec![Shift::new("S1", date(), time(9), time(9), "")];
        let employees = vec![Employee::new("E1", "nurse").with_max_shifts_per_week(0)];
        let errors = validate_input(&shifts, &employees).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
