//! Classification of failed API responses into user-facing errors.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;

/// Header GitHub uses to report the remaining request quota.
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// A non-2xx response from the release-hosting API.
///
/// Every variant is a plain fetch failure; none is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP 429, or 403 with an exhausted quota
    RateLimited(StatusCode),
    /// HTTP 401
    Unauthorized(StatusCode),
    /// HTTP 403 with quota left
    Forbidden(StatusCode),
    /// HTTP 404
    NotFound(StatusCode),
    /// Any other non-success status
    Status(StatusCode),
}

impl ApiError {
    /// Classifies a failed response from its status and headers.
    pub fn from_response(status: StatusCode, headers: &HeaderMap) -> Self {
        let quota_exhausted = headers
            .get(RATE_LIMIT_REMAINING)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim() == "0");

        match status {
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited(status),
            StatusCode::FORBIDDEN if quota_exhausted => ApiError::RateLimited(status),
            StatusCode::FORBIDDEN => ApiError::Forbidden(status),
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(status),
            StatusCode::NOT_FOUND => ApiError::NotFound(status),
            _ => ApiError::Status(status),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::RateLimited(s)
            | ApiError::Unauthorized(s)
            | ApiError::Forbidden(s)
            | ApiError::NotFound(s)
            | ApiError::Status(s) => *s,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GitHub API request failed: {}", self.status())?;
        match self {
            ApiError::RateLimited(_) => write!(
                f,
                " (rate limit exceeded; try again later or set GITHUB_TOKEN)"
            ),
            ApiError::Unauthorized(_) => write!(f, " (check your GITHUB_TOKEN)"),
            ApiError::Forbidden(_) => write!(f, " (access forbidden)"),
            ApiError::NotFound(_) | ApiError::Status(_) => Ok(()),
        }
    }
}

impl std::error::Error for ApiError {}
