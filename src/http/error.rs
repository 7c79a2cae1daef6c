use thiserror::Error;

/// Failure kinds reported in the error slot of an [`HttpResponse`](super::HttpResponse)
///
/// The set is closed: transport failures (`ConnectionFailure`, `InvalidUri`,
/// `InvalidRequest`), a body read failure (`FailedParsingResponse`), and the
/// HTTP-semantic classes derived from the status code. All 1xx, 2xx and 3xx
/// statuses are success and produce no error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum HttpError {
    /// The connection could not be established or no response was received
    #[error("connection failure")]
    ConnectionFailure,
    /// The target URI could not be parsed
    #[error("invalid URI")]
    InvalidUri,
    /// The request could not be built or sent
    #[error("invalid request")]
    InvalidRequest,
    /// A response arrived but its body could not be read
    #[error("failed parsing response")]
    FailedParsingResponse,
    /// HTTP 401
    #[error("unauthorized")]
    Unauthorized,
    /// HTTP 404
    #[error("not found")]
    NotFound,
    /// Any other 4xx or 5xx status
    #[error("server error")]
    ServerError,
}

impl HttpError {
    /// Classify a status code
    ///
    /// Returns `None` for anything outside 400..=599.
    ///
    /// # Examples
    ///
    /// ```
    /// use simplehttp::http::HttpError;
    ///
    /// assert_eq!(HttpError::from_status(200), None);
    /// assert_eq!(HttpError::from_status(302), None);
    /// assert_eq!(HttpError::from_status(401), Some(HttpError::Unauthorized));
    /// assert_eq!(HttpError::from_status(404), Some(HttpError::NotFound));
    /// assert_eq!(HttpError::from_status(418), Some(HttpError::ServerError));
    /// ```
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            401 => Some(HttpError::Unauthorized),
            404 => Some(HttpError::NotFound),
            400..=599 => Some(HttpError::ServerError),
            _ => None,
        }
    }

    /// Stable numeric code for the error kind
    ///
    /// Transport-side kinds use small integers, HTTP-semantic kinds use the
    /// status they stand for (`ServerError` is 500).
    pub fn code(&self) -> u16 {
        match self {
            HttpError::ConnectionFailure => 1,
            HttpError::InvalidUri => 2,
            HttpError::InvalidRequest => 3,
            HttpError::FailedParsingResponse => 4,
            HttpError::Unauthorized => 401,
            HttpError::NotFound => 404,
            HttpError::ServerError => 500,
        }
    }

    /// True for kinds that were derived from an HTTP status
    pub fn is_status(&self) -> bool {
        matches!(
            self,
            HttpError::Unauthorized | HttpError::NotFound | HttpError::ServerError
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_boundaries() {
        assert_eq!(HttpError::from_status(100), None);
        assert_eq!(HttpError::from_status(204), None);
        assert_eq!(HttpError::from_status(399), None);
        assert_eq!(HttpError::from_status(400), Some(HttpError::ServerError));
        assert_eq!(HttpError::from_status(403), Some(HttpError::ServerError));
        assert_eq!(HttpError::from_status(500), Some(HttpError::ServerError));
        assert_eq!(HttpError::from_status(599), Some(HttpError::ServerError));
        assert_eq!(HttpError::from_status(600), None);
    }

    #[test]
    fn test_codes() {
        assert_eq!(HttpError::ConnectionFailure.code(), 1);
        assert_eq!(HttpError::FailedParsingResponse.code(), 4);
        assert_eq!(HttpError::Unauthorized.code(), 401);
        assert_eq!(HttpError::NotFound.code(), 404);
        assert_eq!(HttpError::ServerError.code(), 500);
    }

    #[test]
    fn test_display() {
        assert_eq!(HttpError::NotFound.to_string(), "not found");
        assert_eq!(HttpError::ConnectionFailure.to_string(), "connection failure");
        assert!(HttpError::Unauthorized.is_status());
        assert!(!HttpError::InvalidUri.is_status());
    }
}
