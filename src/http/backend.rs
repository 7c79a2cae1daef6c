use crate::config::ClientConfig;
use crate::http::{error::HttpError, request::HttpRequest};
use ::http::{HeaderMap, HeaderName, HeaderValue};
use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

/// What a backend hands back once the server has answered
///
/// The body read is kept separate from the exchange itself: a response whose body
/// could not be drained still has a status and headers.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// The fully read body, or the reason reading it failed
    pub body: Result<Bytes, String>,
}

/// Trait for HTTP backends that handle the actual network communication
///
/// Implementations return `Err` only when no response was obtained:
/// [`HttpError::ConnectionFailure`] for transport failures,
/// [`HttpError::InvalidUri`] when the target cannot be parsed and
/// [`HttpError::InvalidRequest`] when the request cannot be built. Status codes are
/// never turned into errors here.
///
/// # Examples
///
/// ```
/// use simplehttp::http::{HttpBackend, HttpError, HttpRequest, RawResponse};
/// use async_trait::async_trait;
///
/// struct Teapot;
///
/// #[async_trait]
/// impl HttpBackend for Teapot {
///     async fn send(&self, _req: &HttpRequest) -> Result<RawResponse, HttpError> {
///         Ok(RawResponse {
///             status: 418,
///             headers: http::HeaderMap::new(),
///             body: Ok(bytes::Bytes::from_static(b"short and stout")),
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait HttpBackend {
    async fn send(&self, req: &HttpRequest) -> Result<RawResponse, HttpError>;
}

/// Production backend built on `reqwest`
///
/// Holds one `reqwest::Client`; redirects are disabled so the caller sees 3xx
/// responses as they are.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a backend from a [`ClientConfig`]
    ///
    /// Fails with [`HttpError::InvalidRequest`] if a default header is not a valid
    /// HTTP header or the underlying client cannot be created.
    pub fn from_config(config: &ClientConfig) -> Result<Self, HttpError> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                warn!(header = %name, error = %e, "invalid default header name");
                HttpError::InvalidRequest
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                warn!(header = %name, error = %e, "invalid default header value");
                HttpError::InvalidRequest
            })?;
            default_headers.insert(name, value);
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(default_headers)
            .redirect(reqwest::redirect::Policy::none());
        if !config.system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder.build().map_err(|e| {
            warn!(error = %e, "failed to build reqwest client");
            HttpError::InvalidRequest
        })?;
        Ok(Self { client })
    }

    /// Wrap an already configured `reqwest::Client`
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestBackend {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default()).unwrap_or_else(|_| {
            warn!("falling back to a stock reqwest client");
            Self::with_client(reqwest::Client::default())
        })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, req: &HttpRequest) -> Result<RawResponse, HttpError> {
        let url = reqwest::Url::parse(&req.url).map_err(|e| {
            debug!(url = %req.url, error = %e, "rejecting unparseable URI");
            HttpError::InvalidUri
        })?;

        let resp = self
            .client
            .request(req.method.clone(), url)
            .headers(req.headers.clone())
            .body(req.body.clone().unwrap_or_default())
            .send()
            .await
            .map_err(|e| classify_send_error(&req.url, &e))?;

        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.bytes().await.map_err(|e| e.to_string());
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

fn classify_send_error(url: &str, err: &reqwest::Error) -> HttpError {
    if err.is_builder() || err.is_body() {
        debug!(url = %url, error = %err, "request could not be built");
        HttpError::InvalidRequest
    } else {
        debug!(url = %url, error = %err, "no response received");
        HttpError::ConnectionFailure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_rejects_bad_default_header() {
        let config = ClientConfig::builder()
            .default_header("bad header", "value")
            .build();
        assert_eq!(
            ReqwestBackend::from_config(&config).unwrap_err(),
            HttpError::InvalidRequest
        );
    }

    #[test]
    fn test_from_config_accepts_valid_headers() {
        let config = ClientConfig::builder()
            .default_header("X-Client", "simplehttp")
            .build();
        assert!(ReqwestBackend::from_config(&config).is_ok());
    }
}
