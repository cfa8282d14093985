// src/domain/category.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::submission::TransformationProfile;
use std::{fmt, str::FromStr};

/// Kind of content a person can be assigned or a prompt can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentCategory {
    Feature,
    Interview,
    TeamSpotlight,
    TechTip,
    Wellness,
    General,
}

impl ContentCategory {
    pub const ALL: [Self; 6] = [
        Self::Feature,
        Self::Interview,
        Self::TeamSpotlight,
        Self::TechTip,
        Self::Wellness,
        Self::General,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Interview => "interview",
            Self::TeamSpotlight => "team_spotlight",
            Self::TechTip => "tech_tip",
            Self::Wellness => "wellness",
            Self::General => "general",
        }
    }

    /// Transformation profile the content generator applies to submissions
    /// written for this category.
    pub const fn profile(self) -> TransformationProfile {
        match self {
            Self::Feature | Self::TeamSpotlight => TransformationProfile::Feature,
            Self::Interview => TransformationProfile::Interview,
            Self::Wellness => TransformationProfile::Wellness,
            Self::TechTip | Self::General => TransformationProfile::General,
        }
    }

    pub fn parse(value: &str) -> DomainResult<Self> {
        value.parse()
    }
}

impl FromStr for ContentCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| {
                let expected: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
                DomainError::Validation(format!(
                    "category: invalid content category '{s}' (expected one of {})",
                    expected.join(", ")
                ))
            })
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
