//! Shift (demand) model.
//!
//! A shift is one unit of staffing demand: a role needed at a site on a
//! calendar date between two clock times. Shifts are immutable inputs to
//! one generation run.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A shift to be filled.
///
/// Overnight shifts are expressed with `end_time <= start_time`; the
/// duration wraps past midnight (see [`Shift::duration_hours`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    /// Unique shift identifier.
    pub id: String,
    /// Owning organization.
    pub organization_id: String,
    /// Owning department.
    pub department_id: String,
    /// Calendar date of the shift.
    pub date: NaiveDate,
    /// Clock time the shift starts.
    pub start_time: NaiveTime,
    /// Clock time the shift ends. `<= start_time` means overnight.
    pub end_time: NaiveTime,
    /// Role the assignee must hold (e.g., "nurse", "cashier").
    pub required_role: String,
    /// Skill the assignee should hold. `None` = no skill requirement.
    pub required_skill: Option<String>,
    /// Shift classification matched against employee preferences
    /// (e.g., "day", "evening", "night").
    pub shift_type: String,
    /// Urgency tier used for processing order.
    pub priority: ShiftPriority,
}

/// Urgency tier of a shift.
///
/// Lower rank = processed earlier by the assignment engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftPriority {
    /// Must be filled first (e.g., statutory minimum staffing).
    Critical,
    /// Fill before normal demand.
    High,
    /// Regular demand.
    #[default]
    Normal,
    /// Fill if capacity remains.
    Low,
}

impl ShiftPriority {
    /// Processing rank: `Critical` = 0 … `Low` = 3.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Normal => 2,
            Self::Low => 3,
        }
    }
}

impl Shift {
    /// Creates a shift with normal priority and no skill requirement.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        required_role: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            organization_id: String::new(),
            department_id: String::new(),
            date,
            start_time,
            end_time,
            required_role: required_role.into(),
            required_skill: None,
            shift_type: String::new(),
            priority: ShiftPriority::Normal,
        }
    }

    /// Sets the organization scope.
    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = organization_id.into();
        self
    }

    /// Sets the department scope.
    pub fn with_department(mut self, department_id: impl Into<String>) -> Self {
        self.department_id = department_id.into();
        self
    }

    /// Sets the required skill.
    pub fn with_required_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skill = Some(skill.into());
        self
    }

    /// Sets the shift type.
    pub fn with_shift_type(mut self, shift_type: impl Into<String>) -> Self {
        self.shift_type = shift_type.into();
        self
    }

    /// Sets the priority tier.
    pub fn with_priority(mut self, priority: ShiftPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Shift length in hours.
    ///
    /// `end_time <= start_time` wraps past midnight, so a 22:00–06:00
    /// shift is 8 hours, not −16.
    pub fn duration_hours(&self) -> f64 {
        span_hours(self.start_time, self.end_time)
    }
}

/// Hours between two clock times, wrapping past midnight when
/// `end <= start`.
pub fn span_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    let s = start.signed_duration_since(NaiveTime::MIN).num_minutes();
    let e = end.signed_duration_since(NaiveTime::MIN).num_minutes();
    let mut minutes = e - s;
    if minutes <= 0 {
        minutes += 24 * 60;
    }
    minutes as f64 / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_priority_rank_order() {
        assert_eq!(ShiftPriority::Critical.rank(), 0);
        assert_eq!(ShiftPriority::High.rank(), 1);
        assert_eq!(ShiftPriority::Normal.rank(), 2);
        assert_eq!(ShiftPriority::Low.rank(), 3);
    }

    #[test]
    fn test_duration_day_shift() {
        let s = Shift::new("S1", date(1), time(9, 0), time(17, 0), "nurse");
        assert!((s.duration_hours() - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_duration_half_hour() {
        let s = Shift::new("S1", date(1), time(9, 0), time(13, 30), "nurse");
        assert!((s.duration_hours() - 4.5).abs() < 1e-10);
    }

    #[test]
    fn test_duration_overnight() {
        let s = Shift::new("S1", date(1), time(22, 0), time(6, 0), "guard");
        assert!((s.duration_hours() - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_builder() {
        let s = Shift::new("S1", date(1), time(9, 0), time(17, 0), "nurse")
            .with_organization("org-1")
            .with_department("icu")
            .with_required_skill("triage")
            .with_shift_type("day")
            .with_priority(ShiftPriority::Critical);
        assert_eq!(s.organization_id, "org-1");
        assert_eq!(s.department_id, "icu");
        assert_eq!(s.required_skill.as_deref(), Some("triage"));
        assert_eq!(s.shift_type, "day");
        assert_eq!(s.priority, ShiftPriority::Critical);
    }

    #[test]
    fn test_priority_serde_lowercase() {
        let json = serde_json::to_string(&ShiftPriority::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let back: ShiftPriority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(back, ShiftPriority::Low);
    }
}
