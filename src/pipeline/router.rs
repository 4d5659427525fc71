//! Routing between the two terminal action paths.

/// Next stage selected for a classified ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The standard logging path.
    Standard,
    /// The high-priority escalation path.
    Escalate,
}

/// Select the next stage for a normalized severity.
///
/// Pure function with no failure modes: only "HIGH" (case-insensitive)
/// escalates. Everything else — "MEDIUM", "LOW", "UNKNOWN", "ERROR", empty or
/// garbage strings — falls to the standard logging path, so a classification
/// or transport error can never silently page anyone.
pub fn route(severity: &str) -> Route {
    if severity.eq_ignore_ascii_case("HIGH") {
        Route::Escalate
    } else {
        Route::Standard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_escalates_across_casings() {
        for severity in ["HIGH", "High", "high", "hIgH"] {
            assert_eq!(route(severity), Route::Escalate, "severity `{severity}` should escalate");
        }
    }

    #[test]
    fn test_everything_else_falls_to_logging() {
        for severity in ["MEDIUM", "Low", "UNKNOWN", "Error", "", "HIGHER", " high", "garbage"] {
            assert_eq!(route(severity), Route::Standard, "severity `{severity}` should log");
        }
    }

    #[test]
    fn test_route_matches_uppercase_comparison() {
        for severity in ["high", "Medium", "LOW", "Error", "", "Päging", "HIGH "] {
            let expected = if severity.to_uppercase() == "HIGH" { Route::Escalate } else { Route::Standard };
            assert_eq!(route(severity), expected);
        }
    }
}
