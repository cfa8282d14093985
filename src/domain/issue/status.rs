use crate::domain::errors::{DomainError, DomainResult};
use std::{fmt, str::FromStr};

/// Lifecycle of a publication issue. Moves strictly forward one step at a
/// time; there is no way back from `Published`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IssueStatus {
    Draft,
    Assigning,
    InProgress,
    Ready,
    Published,
}

impl IssueStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Assigning => "assigning",
            Self::InProgress => "in_progress",
            Self::Ready => "ready",
            Self::Published => "published",
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Draft => Some(Self::Assigning),
            Self::Assigning => Some(Self::InProgress),
            Self::InProgress => Some(Self::Ready),
            Self::Ready => Some(Self::Published),
            Self::Published => None,
        }
    }

    /// Validate a move to `target`. Requesting the current state is accepted
    /// as a no-op; skipping a state or moving backwards is rejected.
    pub fn transition_to(self, target: Self) -> DomainResult<Self> {
        if self == target || self.next() == Some(target) {
            return Ok(target);
        }
        Err(DomainError::Validation(format!(
            "status: cannot move issue from {self} to {target}"
        )))
    }
}

impl FromStr for IssueStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "assigning" => Ok(Self::Assigning),
            "in_progress" => Ok(Self::InProgress),
            "ready" => Ok(Self::Ready),
            "published" => Ok(Self::Published),
            other => Err(DomainError::Validation(format!(
                "status: unknown issue status '{other}'"
            ))),
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_forward_one_step_at_a_time() {
        let mut status = IssueStatus::Draft;
        while let Some(next) = status.next() {
            status = status.transition_to(next).unwrap();
        }
        assert_eq!(status, IssueStatus::Published);
    }

    #[test]
    fn rejects_skips_and_reversals() {
        assert!(IssueStatus::Draft.transition_to(IssueStatus::Ready).is_err());
        assert!(IssueStatus::Published.transition_to(IssueStatus::Draft).is_err());
        assert!(IssueStatus::Ready.transition_to(IssueStatus::InProgress).is_err());
    }

    #[test]
    fn same_state_is_a_no_op() {
        assert_eq!(
            IssueStatus::Ready.transition_to(IssueStatus::Ready).unwrap(),
            IssueStatus::Ready
        );
    }

    #[test]
    fn parses_storage_representation() {
        for status in [
            IssueStatus::Draft,
            IssueStatus::Assigning,
            IssueStatus::InProgress,
            IssueStatus::Ready,
            IssueStatus::Published,
        ] {
            assert_eq!(status.as_str().parse::<IssueStatus>().unwrap(), status);
        }
        assert!("archived".parse::<IssueStatus>().is_err());
    }
}
