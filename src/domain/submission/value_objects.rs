use crate::domain::errors::{DomainError, DomainResult};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionId(pub i64);

impl SubmissionId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("submission id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<SubmissionId> for i64 {
    fn from(value: SubmissionId) -> Self {
        value.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessedResultId(pub i64);

impl ProcessedResultId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("processed result id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ProcessedResultId> for i64 {
    fn from(value: ProcessedResultId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionText(String);

impl SubmissionText {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("text: submission cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Named transformation the content generator applies to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformationProfile {
    Feature,
    Interview,
    Wellness,
    General,
}

impl TransformationProfile {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Interview => "interview",
            Self::Wellness => "wellness",
            Self::General => "general",
        }
    }
}

impl FromStr for TransformationProfile {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feature" => Ok(Self::Feature),
            "interview" => Ok(Self::Interview),
            "wellness" => Ok(Self::Wellness),
            "general" => Ok(Self::General),
            other => Err(DomainError::Validation(format!(
                "profile: unknown transformation profile '{other}'"
            ))),
        }
    }
}

impl fmt::Display for TransformationProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessingStatus {
    Pending,
    Processing,
    Success,
    Failed,
    Retry,
}

impl ProcessingStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Retry => "retry",
        }
    }
}

impl FromStr for ProcessingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            "retry" => Ok(Self::Retry),
            other => Err(DomainError::Validation(format!(
                "processing_status: unknown value '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
