use crate::http::{error::HttpError, resource::Resource};
use ::http::{HeaderMap, HeaderName, HeaderValue, Method};
use bytes::Bytes;

/// Builder for a single outgoing request against a [`Resource`]
///
/// Headers are applied by plain key assignment in the order they are given, so a
/// later value for the same name replaces an earlier one. An invalid header name or
/// value does not panic; it is remembered and reported by [`build`](Self::build)
/// as [`HttpError::InvalidRequest`].
///
/// # Examples
///
/// ```
/// use simplehttp::http::{RequestBuilder, Resource};
/// use http::Method;
///
/// let resource = Resource::new("https", "httpbin.org").with_path("/post");
/// let request = RequestBuilder::new(Method::POST, &resource)
///     .header("Content-Type", "text/plain")
///     .body("hello")
///     .build()?;
///
/// assert_eq!(request.url, "https://httpbin.org/post");
/// assert_eq!(request.headers.get("content-type").unwrap(), "text/plain");
/// # Ok::<(), simplehttp::http::HttpError>(())
/// ```
#[derive(Debug)]
pub struct RequestBuilder {
    url: String,
    method: Method,
    headers: HeaderMap,
    body: Option<Bytes>,
    error: Option<HttpError>,
}

impl RequestBuilder {
    pub fn new(method: Method, resource: &Resource) -> Self {
        Self {
            url: resource.uri(),
            method,
            headers: HeaderMap::new(),
            body: None,
            error: None,
        }
    }

    /// Assign a header, replacing any earlier value under the same name
    pub fn header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        match (
            HeaderName::from_bytes(key.as_ref().as_bytes()),
            HeaderValue::from_str(value.as_ref()),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => {
                self.error.get_or_insert(HttpError::InvalidRequest);
            }
        }
        self
    }

    /// Assign several headers in iteration order
    pub fn headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        headers
            .into_iter()
            .fold(self, |builder, (key, value)| builder.header(key, value))
    }

    /// Set the request body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the request body when one is given
    pub fn maybe_body(mut self, body: Option<Bytes>) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> Result<HttpRequest, HttpError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(HttpRequest {
            url: self.url,
            method: self.method,
            headers: self.headers,
            body: self.body,
        })
    }
}

/// A fully assembled request, handed to an [`HttpBackend`](super::HttpBackend)
#[derive(Debug, PartialEq, Clone)]
pub struct HttpRequest {
    /// Target URI rendered from the resource
    pub url: String,
    pub method: Method,
    pub headers: HeaderMap,
    /// `None` means an empty body is sent
    pub body: Option<Bytes>,
}

impl HttpRequest {
    pub fn builder(method: Method, resource: &Resource) -> RequestBuilder {
        RequestBuilder::new(method, resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource() -> Resource {
        Resource::new("http", "example.com").with_port("8080").with_path("/api")
    }

    #[test]
    fn test_builder_targets_resource_uri() {
        let req = HttpRequest::builder(Method::GET, &resource()).build().unwrap();
        assert_eq!(req.url, "http://example.com:8080/api");
        assert_eq!(req.method, Method::GET);
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn test_later_header_overwrites_earlier() {
        let req = HttpRequest::builder(Method::GET, &resource())
            .headers([("X-Token", "first"), ("x-token", "second")])
            .build()
            .unwrap();
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.headers.get("x-token").unwrap(), "second");
    }

    #[test]
    fn test_invalid_header_name_is_invalid_request() {
        let result = HttpRequest::builder(Method::GET, &resource())
            .header("bad header", "v")
            .build();
        assert_eq!(result.unwrap_err(), HttpError::InvalidRequest);
    }

    #[test]
    fn test_invalid_header_value_is_invalid_request() {
        let result = HttpRequest::builder(Method::GET, &resource())
            .header("x-ok", "line\nbreak")
            .build();
        assert_eq!(result.unwrap_err(), HttpError::InvalidRequest);
    }

    #[test]
    fn test_body_is_kept_as_bytes() {
        let req = HttpRequest::builder(Method::PUT, &resource())
            .body(vec![0u8, 159, 146, 150])
            .build()
            .unwrap();
        assert_eq!(req.body.as_deref(), Some(&[0u8, 159, 146, 150][..]));

        let req = HttpRequest::builder(Method::POST, &resource())
            .maybe_body(None)
            .build()
            .unwrap();
        assert!(req.body.is_none());
    }
}
