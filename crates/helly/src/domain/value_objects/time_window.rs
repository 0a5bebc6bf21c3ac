//! TimeWindow - Optional inclusive bounds on feedback timestamps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Inclusive `[from, to]` window; a missing bound imposes no constraint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl TimeWindow {
    /// Create a window, rejecting `from > to`
    pub fn new(
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Self, DomainError> {
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(DomainError::validation(format!(
                    "time window start {} is after end {}",
                    f.to_rfc3339(),
                    t.to_rfc3339()
                )));
            }
        }
        Ok(Self { from, to })
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Whether `at` falls inside the window (bounds inclusive)
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        self.from.map_or(true, |f| *at >= f) && self.to.map_or(true, |t| *at <= t)
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let window = TimeWindow::new(Some(at(1)), Some(at(3))).unwrap();
        assert!(window.contains(&at(1)));
        assert!(window.contains(&at(2)));
        assert!(window.contains(&at(3)));
        assert!(!window.contains(&at(4)));
    }

    #[test]
    fn test_open_ended() {
        let window = TimeWindow::new(Some(at(2)), None).unwrap();
        assert!(!window.contains(&at(1)));
        assert!(window.contains(&at(28)));
        assert!(TimeWindow::unbounded().contains(&at(1)));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let err = TimeWindow::new(Some(at(3)), Some(at(1))).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
