//! # API crate: HTTP transport for the clinic dashboard
//!
//! Implements [`board::Gateway`] with `reqwest` so the engine can talk to the
//! backend gateway from the browser (and from native tests).
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`HttpGateway`] | Base URL + `reqwest::Client`; maps transport failures to `FetchError::Network`, non-2xx answers to `FetchError::Server` with the body's `detail`/`error` message |
//! | [`Client`] | The resource client every frontend uses |

mod gateway;

pub use gateway::HttpGateway;

pub use board::{DashboardConfig, FetchError, Me, Role};

/// [`board::ResourceClient`] bound to the HTTP transport.
pub type Client = board::ResourceClient<HttpGateway>;

/// Build a client for the configured gateway.
pub fn client(config: &DashboardConfig) -> Client {
    board::ResourceClient::new(HttpGateway::from_config(config))
}
