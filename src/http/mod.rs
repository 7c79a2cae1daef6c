pub mod backend;
pub mod client;
pub mod error;
pub mod request;
pub mod resource;
pub mod response;
pub mod utils;

pub use backend::{HttpBackend, RawResponse, ReqwestBackend};
pub use client::Client;
pub use error::HttpError;
pub use request::{HttpRequest, RequestBuilder};
pub use resource::Resource;
pub use response::{Headers, HttpResponse};
pub use utils::{collect_headers, content_type_for_filename};
