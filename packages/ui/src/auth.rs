//! Session guard and logout for the dashboard pages.

use board::session::{authorize, logout};
use board::{Me, Role};
use dioxus::prelude::*;

use crate::provider::{use_client, use_config};

/// Where the role check stands for the current page.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Checking,
    Ready(Me),
    Denied,
}

/// The session checked by the nearest [`SessionGuard`].
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// Navigate the whole page away. Used on denial and logout.
pub fn redirect(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url) {
                tracing::error!("Failed to redirect to {url}: {e:?}");
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::info!("redirect to {url}");
    }
}

/// Renders its children only for a session with `role`. Anyone else is
/// sent to the configured home page.
#[component]
pub fn SessionGuard(role: Role, children: Element) -> Element {
    let client = use_client();
    let home = use_config().session.home_url;
    let mut session = use_signal(|| SessionState::Checking);
    use_context_provider(|| session);

    let _ = use_resource(move || {
        let client = client.clone();
        let home = home.clone();
        async move {
            match authorize(&client, role).await {
                Ok(me) => session.set(SessionState::Ready(me)),
                Err(e) => {
                    tracing::warn!("Access denied: {e}");
                    session.set(SessionState::Denied);
                    redirect(&home);
                }
            }
        }
    });

    match session() {
        SessionState::Ready(_) => rsx! {
            {children}
        },
        SessionState::Checking => rsx! {
            div { class: "session-status", "Checking your session..." }
        },
        SessionState::Denied => rsx! {
            div { class: "session-status", "Redirecting..." }
        },
    }
}

/// Ends the session and returns home, even when the request fails.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let client = use_client();
    let home = use_config().session.home_url;
    let mut session = use_session();

    let onclick = move |_| {
        let client = client.clone();
        let home = home.clone();
        async move {
            logout(&client).await;
            session.set(SessionState::Denied);
            redirect(&home);
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
