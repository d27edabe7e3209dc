use board::Role;
use dioxus::prelude::*;
use ui::views::PortalDashboard;
use ui::SessionGuard;

/// Appointments of the signed-in dentist.
#[component]
pub fn DentistPortal() -> Element {
    rsx! {
        SessionGuard {
            role: Role::Dentist,
            PortalDashboard { view: None::<String> }
        }
    }
}
