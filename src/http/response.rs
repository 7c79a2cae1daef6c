use crate::http::error::HttpError;
use bytes::Bytes;
use std::collections::HashMap;

/// Response header mapping, one value per name
///
/// Names are as reported by the transport (lowercase for `reqwest`). When a header
/// repeats, the first value is kept.
pub type Headers = HashMap<String, String>;

/// The outcome of a single request
///
/// Every call produces exactly one envelope. On a transport failure only `error`
/// is set. Once a response has been received, `status` and `headers` are always
/// present and `body` carries the full body, including for error statuses.
///
/// # Examples
///
/// ```
/// use simplehttp::http::{HttpError, HttpResponse};
///
/// let failed = HttpResponse::failure(HttpError::ConnectionFailure);
/// assert_eq!(failed.error, Some(HttpError::ConnectionFailure));
/// assert!(failed.status.is_none());
/// assert!(failed.headers.is_none());
/// assert!(failed.body.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HttpResponse {
    pub error: Option<HttpError>,
    /// HTTP status code, absent when no response was received
    pub status: Option<u16>,
    pub headers: Option<Headers>,
    pub body: Option<Bytes>,
}

impl HttpResponse {
    /// An envelope for a request that never produced a response
    pub fn failure(error: HttpError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// True when a response arrived and no error was classified
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.status.is_some()
    }

    /// Look up a header ignoring ASCII case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref().and_then(|headers| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        })
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// The body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|body| String::from_utf8_lossy(body).into_owned())
    }

    /// Parse the body as JSON
    ///
    /// A missing or malformed body is reported as
    /// [`HttpError::FailedParsingResponse`].
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, HttpError> {
        let body = self.body.as_ref().ok_or(HttpError::FailedParsingResponse)?;
        serde_json::from_slice(body).map_err(|_| HttpError::FailedParsingResponse)
    }

    /// Split into the `(error, status, headers, body)` tuple
    pub fn into_parts(
        self,
    ) -> (
        Option<HttpError>,
        Option<u16>,
        Option<Headers>,
        Option<Bytes>,
    ) {
        (self.error, self.status, self.headers, self.body)
    }
}
