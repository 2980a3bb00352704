use rmcp::ErrorData as McpError;
use serde_json::json;

/// Every failure mode of the fetch pipeline.
///
/// The `fetch` tool never propagates these to the protocol layer; it renders
/// them through [`FetchServerError::to_envelope`] on its single-string
/// channel. The `From<FetchServerError> for McpError` conversion exists for
/// the prompt path, where the protocol has a structured error slot.
#[derive(Debug, thiserror::Error)]
pub enum FetchServerError {
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
    #[error("Failed to fetch {url}: {message}")]
    FetchError { url: String, message: String },
    #[error("Failed to fetch {url} - status code {status}")]
    HttpError { url: String, status: u16 },
    #[error("HTTP client error: {message}")]
    ClientError { message: String },
    #[error("{message}")]
    RobotsForbidden { url: String, message: String },
    #[error("{message}")]
    RobotsDisallowed { url: String, message: String },
    #[error("{message}")]
    InvalidParams { message: String },
}

impl FetchServerError {
    /// Render the error on the tool's textual channel.
    pub fn to_envelope(&self) -> String {
        format!("<error>{self}</error>")
    }
}

// Error codes
const ERROR_INVALID_URL: &str = "invalid_url";
const ERROR_FETCH_ERROR: &str = "fetch_error";
const ERROR_HTTP_ERROR: &str = "http_error";
const ERROR_CLIENT_ERROR: &str = "client_error";
const ERROR_ROBOTS_FORBIDDEN: &str = "robots_forbidden";
const ERROR_ROBOTS_DISALLOWED: &str = "robots_disallowed";
const ERROR_INVALID_PARAMS: &str = "invalid_params";

impl From<FetchServerError> for McpError {
    fn from(err: FetchServerError) -> Self {
        match err {
            FetchServerError::InvalidUrl { url } => {
                McpError::invalid_params(ERROR_INVALID_URL, Some(json!({ "url": url })))
            }
            FetchServerError::FetchError { url, message } => McpError::internal_error(
                ERROR_FETCH_ERROR,
                Some(json!({ "url": url, "message": message })),
            ),
            FetchServerError::HttpError { url, status } => McpError::internal_error(
                ERROR_HTTP_ERROR,
                Some(json!({ "url": url, "status": status })),
            ),
            FetchServerError::ClientError { message } => {
                McpError::internal_error(ERROR_CLIENT_ERROR, Some(json!({ "message": message })))
            }
            FetchServerError::RobotsForbidden { url, message } => McpError::internal_error(
                ERROR_ROBOTS_FORBIDDEN,
                Some(json!({ "url": url, "message": message })),
            ),
            FetchServerError::RobotsDisallowed { url, message } => McpError::internal_error(
                ERROR_ROBOTS_DISALLOWED,
                Some(json!({ "url": url, "message": message })),
            ),
            FetchServerError::InvalidParams { message } => {
                McpError::invalid_params(ERROR_INVALID_PARAMS, Some(json!({ "message": message })))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_wraps_display() {
        let err = FetchServerError::HttpError {
            url: "http://example.com/".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_envelope(),
            "<error>Failed to fetch http://example.com/ - status code 404</error>"
        );
    }

    #[test]
    fn invalid_params_envelope_is_bare_message() {
        let err = FetchServerError::InvalidParams {
            message: "URL is required".to_string(),
        };
        assert_eq!(err.to_envelope(), "<error>URL is required</error>");
    }
}
