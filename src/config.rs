//! Client configuration.

/// Settings applied to every request sent through a [`ReqwestBackend`](crate::http::ReqwestBackend)
///
/// Redirects are never followed, so 3xx statuses reach the caller unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// Headers sent with every request; per-call headers with the same name win
    pub default_headers: Vec<(String, String)>,
    /// Honour proxy settings from the environment (`HTTP_PROXY`, `NO_PROXY`, ...)
    pub system_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("simplehttp/{}", env!("CARGO_PKG_VERSION")),
            default_headers: Vec::new(),
            system_proxy: true,
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Add a header sent with every request.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.push((name.into(), value.into()));
        self
    }

    pub fn system_proxy(mut self, enable: bool) -> Self {
        self.config.system_proxy = enable;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
