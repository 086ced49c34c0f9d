use crate::error::{GRAPHQL_FALLBACK_MESSAGE, StatsError, USER_NOT_FOUND_FALLBACK_MESSAGE};
use crate::github::graphql::graphql_types::{GraphQLError, GraphQLResponse};

/// Upstream type marker for unresolvable users
pub const NOT_FOUND_ERROR_TYPE: &str = "NOT_FOUND";

/// Width at which upstream messages are wrapped before the first line is kept
pub const ERROR_MESSAGE_WIDTH: usize = 90;

const FULL_WIDTH_COMMA: char = '，';

/// Gates a raw GraphQL response before any of its fields are read.
///
/// Returns `Ok(())` when the response carries no error envelope, otherwise the
/// classified error for its first entry.
pub fn check_graphql_response<R>(response: &GraphQLResponse<R>) -> Result<(), StatsError> {
    match response.errors.as_deref() {
        Some(errors) if !errors.is_empty() => {
            tracing::error!("GraphQL response carried errors: {:?}", errors);
            Err(classify_graphql_errors(errors, &response.status_text))
        }
        _ => Ok(()),
    }
}

/// Classifies a non-empty GraphQL error envelope by its first entry.
///
/// # Arguments
///
/// * `errors` - The error entries of the envelope
/// * `status_text` - Status text of the HTTP response, used as the error code
///   of message-bearing errors
pub fn classify_graphql_errors(errors: &[GraphQLError], status_text: &str) -> StatsError {
    let Some(first) = errors.first() else {
        return StatsError::GraphQL(GRAPHQL_FALLBACK_MESSAGE.to_string());
    };
    let message = first.message.as_deref().filter(|m| !m.is_empty());

    if first.error_type.as_deref() == Some(NOT_FOUND_ERROR_TYPE) {
        tracing::info!("GraphQL user not found: {:?}", message);
        return StatsError::UserNotFound(
            message.unwrap_or(USER_NOT_FOUND_FALLBACK_MESSAGE).to_string(),
        );
    }

    match message {
        Some(message) => StatsError::GraphQLMessage {
            message: first_wrapped_line(message, ERROR_MESSAGE_WIDTH),
            code: status_text.to_string(),
        },
        None => StatsError::GraphQL(GRAPHQL_FALLBACK_MESSAGE.to_string()),
    }
}

/// First line of `text` word-wrapped at `width`, suffixed with `...` when the
/// text did not fit on one line.
///
/// Text containing full-width commas is split on them instead of on width.
pub fn first_wrapped_line(text: &str, width: usize) -> String {
    let lines: Vec<String> = if text.contains(FULL_WIDTH_COMMA) {
        text.split(FULL_WIDTH_COMMA).map(str::to_string).collect()
    } else {
        wrap_words(text, width)
    };

    let mut first = lines
        .first()
        .map(|line| line.trim().to_string())
        .unwrap_or_default();
    if lines.len() > 1 {
        first.push_str("...");
    }
    first
}

fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
