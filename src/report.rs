use serde::{Deserialize, Serialize};

use crate::diagnostics::{BUTTONS_PARTIALLY_TESTED, DiagnosticSession, Tier, drift_tier};
use crate::drift::DriftDetector;

/// One frame's tier snapshot across all three categories. Cheap to
/// compare, so the monitor only reprints when something changed.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub drift: Tier,
    pub buttons: Tier,
    pub triggers: Tier,
}

impl DiagnosticReport {
    pub fn capture(detector: &DriftDetector, session: &DiagnosticSession) -> Self {
        Self {
            drift: drift_tier(detector.max_magnitude()),
            buttons: session.button_tier(),
            triggers: session.trigger_tier(),
        }
    }

    pub fn overall(&self) -> &'static str {
        let tiers = [self.drift, self.buttons, self.triggers];
        if tiers.contains(&Tier::Critical) {
            "Hardware faults detected. See the category details above."
        } else if tiers.contains(&Tier::Warning) {
            "Some issues detected. Keep testing or check the details above."
        } else if tiers.contains(&Tier::Pending) {
            "Testing in progress. Press every button and pull both triggers fully."
        } else {
            "Gamepad is working perfectly. All sticks, buttons and triggers check out."
        }
    }
}

pub fn drift_explanation(tier: Tier) -> &'static str {
    match tier {
        Tier::Good => "No stick drift detected. Both sticks rest at center.",
        Tier::Warning => {
            "Slight off-center movement detected. May worsen over time; \
             keep the sticks clean and avoid excessive force."
        }
        Tier::Critical => {
            "Sticks are moving without input. Likely worn sensors or debris \
             inside the controller; clean with compressed air, recalibrate, \
             or consider repair."
        }
        Tier::Pending => "Waiting for stick readings.",
    }
}

pub fn button_explanation(tier: Tier, total_presses: u32) -> &'static str {
    match tier {
        Tier::Good => "All tested buttons respond correctly.",
        Tier::Warning => match total_presses > BUTTONS_PARTIALLY_TESTED {
            true => "Testing in progress. Press each button a few more times for a full diagnosis.",
            false => {
                "Not enough presses recorded yet. Work through every button systematically."
            }
        },
        Tier::Critical => {
            "A button is reporting constantly pressed. Dirt under the cap, a \
             worn mechanism or liquid damage; clean around the button or have \
             it repaired."
        }
        Tier::Pending => "Press buttons to start the test.",
    }
}

pub fn trigger_explanation(tier: Tier) -> &'static str {
    match tier {
        Tier::Good => "Full trigger range detected on at least one pull.",
        Tier::Warning => {
            "Triggers never reached a full pull. Possible debris, worn springs \
             or a calibration issue."
        }
        Tier::Critical => {
            "Severely limited trigger range. The mechanism is likely damaged; \
             analog control is mostly lost."
        }
        Tier::Pending => "Pull both triggers fully to test their range.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::StickSide;
    use crate::math_ops::Vector;
    use std::time::Instant;

    fn fresh_report() -> DiagnosticReport {
        DiagnosticReport::capture(&DriftDetector::new(), &DiagnosticSession::new())
    }

    #[test]
    fn test_fresh_session_is_pending_except_drift() {
        let report = fresh_report();
        assert_eq!(report.drift, Tier::Good);
        assert_eq!(report.buttons, Tier::Pending);
        assert_eq!(report.triggers, Tier::Pending);
    }

    #[test]
    fn test_capture_tracks_stick_displacement() {
        let mut detector = DriftDetector::new();
        detector.sample(StickSide::Left, Vector::new(0.4, 0.0), Instant::now());

        let report = DiagnosticReport::capture(&detector, &DiagnosticSession::new());
        assert_eq!(report.drift, Tier::Critical);
    }

    #[test]
    fn test_overall_prefers_worst_tier() {
        let mut report = fresh_report();
        report.buttons = Tier::Warning;
        report.triggers = Tier::Critical;
        assert!(report.overall().contains("Hardware faults"));

        report.triggers = Tier::Good;
        assert!(report.overall().contains("Some issues"));

        report.buttons = Tier::Good;
        report.triggers = Tier::Pending;
        assert!(report.overall().contains("Testing in progress"));

        report.triggers = Tier::Good;
        assert!(report.overall().contains("working perfectly"));
    }

    #[test]
    fn test_button_explanation_distinguishes_warning_bands() {
        let in_progress = button_explanation(Tier::Warning, 30);
        let incomplete = button_explanation(Tier::Warning, 5);
        assert_ne!(in_progress, incomplete);
    }

    #[test]
    fn test_reports_compare_by_value() {
        assert_eq!(fresh_report(), fresh_report());
    }
}
