use std::time::Duration;

/// Configuration for a websocket connection or listener.
#[derive(Clone, Debug)]
pub struct WebsocketConfig {
    /// The url scheme connections are rendered with.
    pub scheme: &'static str,

    /// Capacity of the internal send queues.
    pub max_send_queue: usize,

    /// How long a request waits for its response before failing with
    /// [`WebsocketError::RequestTimeout`](crate::WebsocketError). `None`
    /// waits until the response arrives or the connection closes.
    pub default_request_timeout: Option<Duration>,
}

impl WebsocketConfig {
    /// Builder-style scheme setter.
    pub fn scheme(mut self, scheme: &'static str) -> Self {
        self.scheme = scheme;
        self
    }

    /// Builder-style send queue setter.
    pub fn max_send_queue(mut self, max_send_queue: usize) -> Self {
        self.max_send_queue = max_send_queue;
        self
    }

    /// Builder-style request timeout setter.
    pub fn default_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_request_timeout = timeout;
        self
    }
}

impl Default for WebsocketConfig {
    fn default() -> Self {
        WebsocketConfig {
            scheme: "ws",
            max_send_queue: 32,
            default_request_timeout: None,
        }
    }
}
