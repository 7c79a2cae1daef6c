use crate::http::response::Headers;
use ::http::HeaderMap;

/// Guess a request `Content-Type` from a file name
///
/// Knows `.txt`, `.jpg` and `.png`; anything else gets `otherwise`.
///
/// # Examples
///
/// ```
/// use simplehttp::http::content_type_for_filename;
///
/// assert_eq!(content_type_for_filename("photo.png", "text/plain"), "image/png");
/// assert_eq!(content_type_for_filename("body.json", "application/json"), "application/json");
/// ```
pub fn content_type_for_filename<'a>(file_name: &str, otherwise: &'a str) -> &'a str {
    if file_name.ends_with(".txt") {
        "text/plain"
    } else if file_name.ends_with(".jpg") {
        "image/jpeg"
    } else if file_name.ends_with(".png") {
        "image/png"
    } else {
        otherwise
    }
}

/// Flatten a transport header map into a name -> value mapping
///
/// The first value of a repeated header wins. Values that are not valid UTF-8 are
/// converted lossily.
pub fn collect_headers(headers: &HeaderMap) -> Headers {
    let mut out = Headers::with_capacity(headers.keys_len());
    for (name, value) in headers {
        out.entry(name.as_str().to_string())
            .or_insert_with(|| String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    out
}
