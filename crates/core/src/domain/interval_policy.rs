// Interval Policy - maintenance status of one tracked item
//
// Both thresholds are strict `>` and are checked in order: overdue first,
// then upcoming. `delta == interval` is therefore UPCOMING (remaining 0) and
// `delta == 0.9 * interval` is still OK.

use serde::{Deserialize, Serialize};

/// Maintenance status of a tracked item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceStatus {
    NeverServiced,
    Overdue,
    Upcoming,
    Ok,
}

impl MaintenanceStatus {
    /// Statuses shown when the caller does not ask for everything
    pub fn requires_attention(self) -> bool {
        !matches!(self, MaintenanceStatus::Ok)
    }
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaintenanceStatus::NeverServiced => write!(f, "NEVER_SERVICED"),
            MaintenanceStatus::Overdue => write!(f, "OVERDUE"),
            MaintenanceStatus::Upcoming => write!(f, "UPCOMING"),
            MaintenanceStatus::Ok => write!(f, "OK"),
        }
    }
}

/// Status plus the distance that explains it (at most one is set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub status: MaintenanceStatus,
    pub overdue_km: Option<i64>,
    pub remaining_km: Option<i64>,
}

impl Classification {
    fn bare(status: MaintenanceStatus) -> Self {
        Self {
            status,
            overdue_km: None,
            remaining_km: None,
        }
    }
}

/// Classify a tracked item against the vehicle's current odometer
///
/// The 90% threshold is compared in integers (`10 * delta > 9 * interval`),
/// which is exactly `delta > 0.9 * interval` without float rounding.
pub fn classify(
    current_odometer: i64,
    last_service_odometer: Option<i64>,
    effective_interval: i64,
) -> Classification {
    let Some(last) = last_service_odometer else {
        return Classification::bare(MaintenanceStatus::NeverServiced);
    };

    let delta = current_odometer - last;

    if delta > effective_interval {
        Classification {
            status: MaintenanceStatus::Overdue,
            overdue_km: Some(delta - effective_interval),
            remaining_km: None,
        }
    } else if i128::from(delta) * 10 > i128::from(effective_interval) * 9 {
        Classification {
            status: MaintenanceStatus::Upcoming,
            overdue_km: None,
            remaining_km: Some(effective_interval - delta),
        }
    } else {
        Classification::bare(MaintenanceStatus::Ok)
    }
}

/// Degree of lateness; positive means overdue. None for never-serviced items.
pub fn lateness(
    current_odometer: i64,
    last_service_odometer: Option<i64>,
    effective_interval: i64,
) -> Option<i64> {
    last_service_odometer.map(|last| (current_odometer - last) - effective_interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_serviced_has_no_distances() {
        for odometer in [0, 1, 50_000, 1_000_000] {
            let c = classify(odometer, None, 10_000);
            assert_eq!(c.status, MaintenanceStatus::NeverServiced);
            assert!(c.overdue_km.is_none());
            assert!(c.remaining_km.is_none());
        }
    }

    #[test]
    fn test_overdue_reports_excess() {
        // vehicle at 50000, interval 10000, last at 35000
        let c = classify(50_000, Some(35_000), 10_000);
        assert_eq!(c.status, MaintenanceStatus::Overdue);
        assert_eq!(c.overdue_km, Some(5_000));
        assert!(c.remaining_km.is_none());
    }

    #[test]
    fn test_exactly_ninety_percent_is_ok() {
        // delta 27000 == 0.9 * 30000, strict comparison keeps it OK
        let c = classify(50_000, Some(23_000), 30_000);
        assert_eq!(c.status, MaintenanceStatus::Ok);
        assert!(c.overdue_km.is_none());
        assert!(c.remaining_km.is_none());
    }

    #[test]
    fn test_one_km_past_ninety_percent_is_upcoming() {
        let c = classify(50_001, Some(23_000), 30_000);
        assert_eq!(c.status, MaintenanceStatus::Upcoming);
        assert_eq!(c.remaining_km, Some(2_999));
    }

    #[test]
    fn test_exactly_at_interval_is_upcoming_not_overdue() {
        let c = classify(20_000, Some(10_000), 10_000);
        assert_eq!(c.status, MaintenanceStatus::Upcoming);
        assert_eq!(c.remaining_km, Some(0));
        assert!(c.overdue_km.is_none());
    }

    #[test]
    fn test_one_km_past_interval_is_overdue() {
        let c = classify(20_001, Some(10_000), 10_000);
        assert_eq!(c.status, MaintenanceStatus::Overdue);
        assert_eq!(c.overdue_km, Some(1));
    }

    #[test]
    fn test_odometer_behind_checkpoint_is_ok() {
        let c = classify(9_000, Some(10_000), 10_000);
        assert_eq!(c.status, MaintenanceStatus::Ok);
    }

    #[test]
    fn test_ninety_percent_with_odd_interval() {
        // 0.9 * 15 = 13.5
        assert_eq!(classify(13, Some(0), 15).status, MaintenanceStatus::Ok);
        assert_eq!(classify(14, Some(0), 15).status, MaintenanceStatus::Upcoming);
    }

    #[test]
    fn test_property_grid_matches_definition() {
        let interval = 1_000;
        for delta in -50..=1_200_i64 {
            let c = classify(10_000 + delta, Some(10_000), interval);
            if delta > interval {
                assert_eq!(c.status, MaintenanceStatus::Overdue, "delta {delta}");
                assert_eq!(c.overdue_km, Some(delta - interval));
            } else if (delta as f64) > 0.9 * interval as f64 {
                assert_eq!(c.status, MaintenanceStatus::Upcoming, "delta {delta}");
                assert_eq!(c.remaining_km, Some(interval - delta));
            } else {
                assert_eq!(c.status, MaintenanceStatus::Ok, "delta {delta}");
            }
        }
    }

    #[test]
    fn test_lateness() {
        assert_eq!(lateness(50_000, Some(35_000), 10_000), Some(5_000));
        assert_eq!(lateness(40_000, Some(35_000), 10_000), Some(-5_000));
        assert_eq!(lateness(40_000, None, 10_000), None);
    }
}
