//! Error types
//!
//! `ArnError` and `TagsError` are the library's typed failures; the binary
//! wraps them in `anyhow` and renders them with [`describe_error`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArnError {
    #[error("unexpected number of components in arn - expected 6, got {found}")]
    MissingComponents { found: usize },

    #[error("arn must start with \"arn\", got {found:?}")]
    InvalidPrefix { found: String },
}

#[derive(Debug, Error)]
pub enum TagsError {
    /// The tagging API call itself failed. Passed through untouched.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),

    #[error("tagging API returned no response")]
    EmptyResponse,

    #[error("malformed tag data for resource {resource}: {reason}")]
    MalformedData { resource: String, reason: String },

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl TagsError {
    pub(crate) fn malformed(resource: &str, reason: &str) -> Self {
        TagsError::MalformedData {
            resource: resource.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Format an AWS / tagfinder error for display
/// Maps common failure signatures to a short actionable message
pub fn describe_error(error: &anyhow::Error) -> String {
    if let Some(TagsError::Config(message)) = error.downcast_ref::<TagsError>() {
        return format!("Configuration problem: {}", message);
    }

    let error_str = format!("{:#}", error);

    if error_str.contains("AccessDenied") {
        return "Permission denied. Check that your IAM identity allows tag:GetResources."
            .to_string();
    }
    if error_str.contains("ExpiredToken") {
        return "AWS credentials have expired. Refresh your session and try again.".to_string();
    }
    if error_str.contains("UnrecognizedClient") || error_str.contains("InvalidClientTokenId") {
        return "AWS credentials were rejected. Check your profile or access keys.".to_string();
    }
    if error_str.contains("no credentials") || error_str.contains("NoCredentials") {
        return "No AWS credentials found. Configure a profile or export AWS_ACCESS_KEY_ID."
            .to_string();
    }
    if error_str.contains("Throttl") {
        return "Rate limit exceeded. Please try again later.".to_string();
    }
    if error_str.contains("InvalidParameter") {
        return "Invalid request. Check your tag and service filters.".to_string();
    }
    if error_str.contains("dispatch failure") || error_str.contains("timed out") {
        return "Could not reach the tagging API. Check your network connection and region."
            .to_string();
    }

    error_str
}
