//! Shared dashboard context: the HTTP client, the loaded config and the
//! notice list.

use api::{Client, DashboardConfig};
use dioxus::prelude::*;

use crate::notices::Notices;

/// The resource client provided by [`DashboardProvider`].
pub fn use_client() -> Client {
    use_context::<Client>()
}

pub fn use_config() -> DashboardConfig {
    use_context::<DashboardConfig>()
}

/// Wrap the app with this component to make the client, config and notices
/// available to every view.
#[component]
pub fn DashboardProvider(config: DashboardConfig, children: Element) -> Element {
    use_context_provider(|| {
        tracing::debug!(base_url = %config.gateway.base_url, "creating gateway client");
        api::client(&config)
    });
    use_context_provider(|| config);
    let notices = use_signal(Notices::default);
    use_context_provider(|| notices);

    rsx! {
        {children}
    }
}
