use board::Portal;
use dioxus::prelude::*;

use crate::auth::{use_session, SessionState};
use crate::views::DashboardView;

/// The portal for whoever [`SessionGuard`](crate::SessionGuard) let through.
#[component]
pub fn PortalDashboard(view: Option<String>) -> Element {
    let session = use_session();
    let SessionState::Ready(me) = session() else {
        return rsx! {};
    };
    let Some(portal) = Portal::for_session(me.role, &me.user_id) else {
        return rsx! {
            div { class: "screen-status", "This account has no dashboard." }
        };
    };
    let key = view.clone().unwrap_or_default();

    rsx! {
        DashboardView {
            key: "{key}",
            portal: portal,
            me: me,
            initial: view,
        }
    }
}
