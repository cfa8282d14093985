use crate::application::ports::messaging::MessagingGateway;
use crate::domain::assignment::PersonId;

pub const PLACEHOLDER_NAME: &str = "Team Member";
pub const PLACEHOLDER_DEPARTMENT: &str = "General";
pub const ANONYMOUS_NAME: &str = "Anonymous";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDetails {
    pub name: String,
    pub department: String,
}

impl AuthorDetails {
    fn placeholder() -> Self {
        Self {
            name: PLACEHOLDER_NAME.to_string(),
            department: PLACEHOLDER_DEPARTMENT.to_string(),
        }
    }
}

/// Best-effort author lookup. Never fails: missing or unreachable profiles
/// degrade to placeholder values.
pub async fn author_details(
    messaging: &dyn MessagingGateway,
    author: Option<&PersonId>,
) -> AuthorDetails {
    let Some(author) = author else {
        return AuthorDetails {
            name: ANONYMOUS_NAME.to_string(),
            department: PLACEHOLDER_DEPARTMENT.to_string(),
        };
    };

    match messaging.resolve_user_profile(author.as_str()).await {
        Ok(profile) => {
            let fallback = AuthorDetails::placeholder();
            AuthorDetails {
                name: non_blank(profile.display_name).unwrap_or(fallback.name),
                department: non_blank(profile.title).unwrap_or(fallback.department),
            }
        }
        Err(err) => {
            tracing::warn!(%author, error = %err, "author enrichment failed, using placeholders");
            AuthorDetails::placeholder()
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
