use crate::http::{
    backend::{HttpBackend, RawResponse},
    error::HttpError,
    request::HttpRequest,
    resource::Resource,
    response::{Headers, HttpResponse},
    utils::collect_headers,
};
use crate::KeyValuePairs;
use ::http::Method;
use bytes::Bytes;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Convenience facade over an [`HttpBackend`]
///
/// Each verb helper builds a request for a [`Resource`], hands it to the backend and
/// folds the outcome into an [`HttpResponse`] envelope. The helpers never return
/// `Err`: every failure lands in the envelope's `error` slot. No retry is attempted.
///
/// # Examples
///
/// ```no_run
/// use simplehttp::http::{Client, HttpError, ReqwestBackend, Resource};
///
/// # async fn example() {
/// let client = Client::new(ReqwestBackend::new());
/// let httpbin = Resource::new("https", "httpbin.org");
///
/// let response = client.get(&httpbin.with_path_appended("/get"), &[]).await;
/// match response.error {
///     None => println!("{}", response.text().unwrap_or_default()),
///     Some(HttpError::NotFound) => println!("no such resource"),
///     Some(err) => println!("request failed: {err}"),
/// }
/// # }
/// ```
pub struct Client<B: HttpBackend + Send + Sync> {
    backend: Arc<B>,
}

impl<B: HttpBackend + Send + Sync> Clone for Client<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: HttpBackend + Send + Sync> Client<B> {
    /// Constructs a new Client with the given backend
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Send a GET request
    pub async fn get(&self, resource: &Resource, headers: &[(String, String)]) -> HttpResponse {
        self.send(Method::GET, resource, headers, None).await
    }

    /// Send a PUT request with an optional body
    pub async fn put(
        &self,
        resource: &Resource,
        headers: &[(String, String)],
        body: Option<Bytes>,
    ) -> HttpResponse {
        self.send(Method::PUT, resource, headers, body).await
    }

    /// Send a POST request with an optional body
    pub async fn post(
        &self,
        resource: &Resource,
        headers: &[(String, String)],
        body: Option<Bytes>,
    ) -> HttpResponse {
        self.send(Method::POST, resource, headers, body).await
    }

    /// Send a DELETE request
    pub async fn delete(&self, resource: &Resource, headers: &[(String, String)]) -> HttpResponse {
        self.send(Method::DELETE, resource, headers, None).await
    }

    /// Send a HEAD request
    pub async fn head(&self, resource: &Resource, headers: &[(String, String)]) -> HttpResponse {
        self.send(Method::HEAD, resource, headers, None).await
    }

    /// Send a request with any method
    ///
    /// Headers are assigned in order, so a later duplicate name overwrites an earlier
    /// one. A missing body is sent as an empty body.
    pub async fn send(
        &self,
        method: Method,
        resource: &Resource,
        headers: &[(String, String)],
        body: Option<Bytes>,
    ) -> HttpResponse {
        let request = match HttpRequest::builder(method, resource)
            .headers(headers.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .maybe_body(body)
            .build()
        {
            Ok(request) => request,
            Err(err) => {
                error!(target_uri = %resource, error = %err, "request rejected before sending");
                return HttpResponse::failure(err);
            }
        };

        debug!("Sending {} request to {}", request.method, request.url);
        handle_response(self.backend.send(&request).await)
    }

    /// Send a request to a raw URI string
    ///
    /// An unparseable URI, or one whose scheme is not http/https, yields
    /// [`HttpError::InvalidUri`] without touching the network.
    pub async fn send_url(
        &self,
        method: Method,
        url: &str,
        headers: &[(String, String)],
        body: Option<Bytes>,
    ) -> HttpResponse {
        match url.parse::<Resource>() {
            Ok(resource) => self.send(method, &resource, headers, body).await,
            Err(err) => {
                error!(url = %url, error = %err, "request rejected before sending");
                HttpResponse::failure(err)
            }
        }
    }

    pub async fn get_url(&self, url: &str, headers: &[(String, String)]) -> HttpResponse {
        self.send_url(Method::GET, url, headers, None).await
    }

    pub async fn put_url(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: Option<Bytes>,
    ) -> HttpResponse {
        self.send_url(Method::PUT, url, headers, body).await
    }

    pub async fn post_url(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: Option<Bytes>,
    ) -> HttpResponse {
        self.send_url(Method::POST, url, headers, body).await
    }

    pub async fn delete_url(&self, url: &str, headers: &[(String, String)]) -> HttpResponse {
        self.send_url(Method::DELETE, url, headers, None).await
    }

    pub async fn head_url(&self, url: &str, headers: &[(String, String)]) -> HttpResponse {
        self.send_url(Method::HEAD, url, headers, None).await
    }
}

impl<B: HttpBackend + Send + Sync + 'static> Client<B> {
    /// Run a request on the tokio runtime and hand its outcome to `callback`
    ///
    /// The callback receives `(error, status, headers, body)` and runs exactly once,
    /// on a runtime worker. Must be called from within a tokio runtime.
    pub fn send_with_callback<F>(
        &self,
        method: Method,
        resource: Resource,
        headers: KeyValuePairs,
        body: Option<Bytes>,
        callback: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(Option<HttpError>, Option<u16>, Option<Headers>, Option<Bytes>) + Send + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move {
            let (error, status, headers, body) = client
                .send(method, &resource, &headers, body)
                .await
                .into_parts();
            callback(error, status, headers, body);
        })
    }
}

/// Fold a backend outcome into an envelope
fn handle_response(result: Result<RawResponse, HttpError>) -> HttpResponse {
    let raw = match result {
        Ok(raw) => raw,
        Err(err) => {
            error!(error = %err, "no response received");
            return HttpResponse::failure(err);
        }
    };

    let headers = collect_headers(&raw.headers);
    let body = match raw.body {
        Ok(body) => body,
        Err(reason) => {
            error!(status = raw.status, reason = %reason, "failed reading response body");
            return HttpResponse {
                error: Some(HttpError::FailedParsingResponse),
                status: Some(raw.status),
                headers: Some(headers),
                body: None,
            };
        }
    };

    let error = HttpError::from_status(raw.status);
    if let Some(err) = error {
        error!(status = raw.status, "{err}");
        debug!(body = %String::from_utf8_lossy(&body), "error response body");
    }

    HttpResponse {
        error,
        status: Some(raw.status),
        headers: Some(headers),
        body: Some(body),
    }
}
