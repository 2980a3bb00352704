use crate::errors::FetchServerError;
use reqwest::{Client, Proxy};
use std::time::Duration;

/// Build a reqwest client with an optional proxy.
///
/// Bounded timeout and redirect count; the fetch pipeline itself never
/// retries, so a hung connection must not hang the tool call.
pub fn build_client(proxy_url: Option<&str>) -> Result<Client, FetchServerError> {
    let mut builder = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .redirect(reqwest::redirect::Policy::limited(10));

    if let Some(proxy_url) = proxy_url {
        let proxy = Proxy::all(proxy_url).map_err(|e| FetchServerError::ClientError {
            message: format!("invalid proxy URL {proxy_url}: {e}"),
        })?;
        builder = builder.proxy(proxy);
    }

    builder.build().map_err(|e| FetchServerError::ClientError {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_without_proxy() {
        assert!(build_client(None).is_ok());
    }

    #[test]
    fn builds_with_valid_proxy() {
        assert!(build_client(Some("http://proxy:8080")).is_ok());
    }

    #[test]
    fn rejects_malformed_proxy() {
        let err = build_client(Some("not a proxy url")).unwrap_err();
        assert!(matches!(err, FetchServerError::ClientError { .. }));
    }
}
