use board::Role;
use dioxus::prelude::*;
use ui::views::PortalDashboard;
use ui::SessionGuard;

#[component]
pub fn AdminPortal() -> Element {
    rsx! {
        SessionGuard {
            role: Role::Admin,
            PortalDashboard { view: None::<String> }
        }
    }
}

/// `/admin/:view`, e.g. `/admin/users` or `/admin/verification-queue`.
#[component]
pub fn AdminPortalView(view: String) -> Element {
    rsx! {
        SessionGuard {
            role: Role::Admin,
            PortalDashboard { view: Some(view) }
        }
    }
}

/// `/admin/reports/customer`, the older address of the reports view.
#[component]
pub fn AdminCustomerReports() -> Element {
    rsx! {
        AdminPortalView { view: "reports/customer".to_string() }
    }
}
