use reqwest::StatusCode;

/// Classification of transport failures for retry logic
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRetryableError {
    /// Errors that should be retried (5xx server errors, network issues)
    Retryable(String),
    /// Rate limiting errors (429, rate-limited 403, RATE_LIMITED envelopes) - retryable with backoff
    RateLimit,
    /// Client errors that should not be retried (4xx except rate limits, undecodable bodies)
    NonRetryable(String),
}

impl ApiRetryableError {
    /// Convert a reqwest error to the appropriate retry category
    pub fn from_reqwest_error(error: reqwest::Error) -> Self {
        tracing::debug!("Raw reqwest error: {:?}", error);

        if error.is_timeout() || error.is_connect() || error.is_request() {
            let error_msg = format!("HTTP layer error: {}", error);
            tracing::warn!("HTTP layer error - will retry: {}", error_msg);
            Self::Retryable(error_msg)
        } else if error.is_decode() {
            let error_msg = format!("Response decoding error: {}", error);
            tracing::error!("Response decoding error - not retryable: {}", error_msg);
            Self::NonRetryable(error_msg)
        } else if error.is_builder() {
            let error_msg = format!("Request construction error: {}", error);
            tracing::error!("Request construction error - not retryable: {}", error_msg);
            Self::NonRetryable(error_msg)
        } else {
            let error_msg = format!("Unknown error type: {}", error);
            tracing::error!(
                "Unknown error type - treating as non-retryable: {}",
                error_msg
            );
            Self::NonRetryable(error_msg)
        }
    }

    /// Classify an HTTP status that did not come with a GraphQL error envelope.
    ///
    /// Returns `None` for success statuses.
    pub fn from_status(status: StatusCode, body: &str) -> Option<Self> {
        if status.is_success() {
            return None;
        }

        let detailed_error = format!(
            "GitHub API error - Status: {}, Body: {}",
            status.as_u16(),
            body
        );

        let result = match status.as_u16() {
            429 => {
                tracing::warn!("Rate limit (429) detected for GitHub API request");
                Self::RateLimit
            }
            403 if body.contains("rate limit") => {
                tracing::warn!("Rate limit (403) detected for GitHub API request: {}", body);
                Self::RateLimit
            }
            500..=599 => {
                tracing::warn!("Server error - will retry: {}", detailed_error);
                Self::Retryable(detailed_error)
            }
            _ => {
                tracing::error!("Non-retryable client error: {}", detailed_error);
                Self::NonRetryable(detailed_error)
            }
        };
        Some(result)
    }
}

impl std::fmt::Display for ApiRetryableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Retryable(msg) => write!(f, "Retryable error: {}", msg),
            Self::RateLimit => write!(f, "Rate limit error"),
            Self::NonRetryable(msg) => write!(f, "Non-retryable error: {}", msg),
        }
    }
}

impl std::error::Error for ApiRetryableError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ApiRetryableError::from_status(StatusCode::OK, ""), None);
        assert_eq!(
            ApiRetryableError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            Some(ApiRetryableError::RateLimit)
        );
        assert_eq!(
            ApiRetryableError::from_status(
                StatusCode::FORBIDDEN,
                r#"{"message":"API rate limit exceeded"}"#
            ),
            Some(ApiRetryableError::RateLimit)
        );
        assert!(matches!(
            ApiRetryableError::from_status(StatusCode::BAD_GATEWAY, ""),
            Some(ApiRetryableError::Retryable(_))
        ));
        assert!(matches!(
            ApiRetryableError::from_status(StatusCode::UNAUTHORIZED, "Bad credentials"),
            Some(ApiRetryableError::NonRetryable(_))
        ));
    }
}
