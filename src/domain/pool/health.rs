use std::fmt;

/// Advisory level derived from the number of active prompts left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolHealth {
    Urgent,
    Critical,
    Low,
    Healthy,
}

impl PoolHealth {
    pub const CRITICAL_BELOW: u64 = 5;
    pub const LOW_BELOW: u64 = 8;

    pub const fn from_active_count(active: u64) -> Self {
        if active == 0 {
            Self::Urgent
        } else if active < Self::CRITICAL_BELOW {
            Self::Critical
        } else if active < Self::LOW_BELOW {
            Self::Low
        } else {
            Self::Healthy
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::Critical => "critical",
            Self::Low => "low",
            Self::Healthy => "healthy",
        }
    }

    pub fn recommended_action(self, active: u64) -> String {
        match self {
            Self::Urgent => {
                "URGENT: the anonymous pool is empty. Collect new prompts before the next issue."
                    .to_string()
            }
            Self::Critical => format!(
                "CRITICAL: only {active} anonymous prompts left. Ask contributors for more this week."
            ),
            Self::Low => format!(
                "LOW: {active} anonymous prompts left. Consider a call for submissions."
            ),
            Self::Healthy => format!("Healthy: {active} anonymous prompts available."),
        }
    }
}

impl fmt::Display for PoolHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(PoolHealth::from_active_count(0), PoolHealth::Urgent);
        assert_eq!(PoolHealth::from_active_count(1), PoolHealth::Critical);
        assert_eq!(PoolHealth::from_active_count(4), PoolHealth::Critical);
        assert_eq!(PoolHealth::from_active_count(5), PoolHealth::Low);
        assert_eq!(PoolHealth::from_active_count(7), PoolHealth::Low);
        assert_eq!(PoolHealth::from_active_count(8), PoolHealth::Healthy);
    }

    #[test]
    fn empty_pool_action_is_marked_urgent() {
        assert!(PoolHealth::Urgent.recommended_action(0).starts_with("URGENT"));
    }
}
