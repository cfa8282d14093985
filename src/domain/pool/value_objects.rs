use crate::domain::errors::{DomainError, DomainResult};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolPromptId(pub i64);

impl PoolPromptId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("pool prompt id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<PoolPromptId> for i64 {
    fn from(value: PoolPromptId) -> Self {
        value.0
    }
}

impl fmt::Display for PoolPromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WellnessTopic {
    MentalHealth,
    PhysicalHealth,
    WorkLifeBalance,
    StressManagement,
    Mindfulness,
}

impl WellnessTopic {
    pub const ALL: [Self; 5] = [
        Self::MentalHealth,
        Self::PhysicalHealth,
        Self::WorkLifeBalance,
        Self::StressManagement,
        Self::Mindfulness,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MentalHealth => "mental_health",
            Self::PhysicalHealth => "physical_health",
            Self::WorkLifeBalance => "work_life_balance",
            Self::StressManagement => "stress_management",
            Self::Mindfulness => "mindfulness",
        }
    }
}

impl FromStr for WellnessTopic {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|topic| topic.as_str() == normalized)
            .ok_or_else(|| {
                let expected: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
                DomainError::Validation(format!(
                    "category: invalid wellness category '{s}' (expected one of {})",
                    expected.join(", ")
                ))
            })
    }
}

impl fmt::Display for WellnessTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolPromptStatus {
    Active,
    Used,
    Archived,
}

impl PoolPromptStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Used => "used",
            Self::Archived => "archived",
        }
    }
}

impl FromStr for PoolPromptStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "used" => Ok(Self::Used),
            "archived" => Ok(Self::Archived),
            other => Err(DomainError::Validation(format!(
                "status: unknown pool prompt status '{other}'"
            ))),
        }
    }
}
