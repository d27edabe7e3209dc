//! Views, portals and the per-view state the controller owns.

use std::fmt;

use crate::filter::EntityKind;
use crate::models::Role;

/// Rows shown per page in every paginated listing.
pub const PAGE_SIZE: usize = 10;

/// A dashboard section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Dashboard,
    Users,
    Clinics,
    Dentists,
    Appointments,
    Reports,
    VerificationQueue,
}

impl View {
    pub const ALL: [View; 7] = [
        View::Dashboard,
        View::Users,
        View::Clinics,
        View::Dentists,
        View::Appointments,
        View::Reports,
        View::VerificationQueue,
    ];

    /// Stable identifier used in navigation links.
    pub fn slug(self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Users => "users",
            View::Clinics => "clinics",
            View::Dentists => "dentists",
            View::Appointments => "appointments",
            View::Reports => "reports",
            View::VerificationQueue => "verification-queue",
        }
    }

    /// Page heading.
    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Users => "User Management",
            View::Clinics => "Clinic Management",
            View::Dentists => "Dentist Management",
            View::Appointments => "Appointments",
            View::Reports => "Customer Reports",
            View::VerificationQueue => "Verification Queue",
        }
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Users => "Users",
            View::Clinics => "Clinics",
            View::Dentists => "Dentists",
            View::Appointments => "Appointments",
            View::Reports => "Reports",
            View::VerificationQueue => "Verification",
        }
    }

    /// Parse an external view name. `reports/customer` is accepted as an
    /// alias for the reports view; names are matched case-insensitively.
    pub fn parse(name: &str) -> Option<View> {
        let name = name.trim().trim_matches('/').to_ascii_lowercase();
        match name.as_str() {
            "reports/customer" => Some(View::Reports),
            other => View::ALL.into_iter().find(|view| view.slug() == other),
        }
    }

    /// Whether the view is a filtered, paginated flat list.
    pub fn is_listing(self) -> bool {
        self.entity().is_some()
    }

    /// The record type listed by this view, if it is a listing.
    pub fn entity(self) -> Option<EntityKind> {
        match self {
            View::Users => Some(EntityKind::User),
            View::Clinics => Some(EntityKind::Clinic),
            View::Dentists => Some(EntityKind::Dentist),
            View::Appointments => Some(EntityKind::Appointment),
            View::Reports => Some(EntityKind::Report),
            View::Dashboard | View::VerificationQueue => None,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Which dashboard the controller drives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Portal {
    /// Every view, backed by `/api/admin/*`.
    Admin,
    /// Only the signed-in dentist's appointments.
    Dentist { dentist_id: String },
}

impl Portal {
    pub fn views(&self) -> &'static [View] {
        match self {
            Portal::Admin => &View::ALL,
            Portal::Dentist { .. } => &[View::Appointments],
        }
    }

    /// The view opened right after sign-in.
    pub fn home(&self) -> View {
        match self {
            Portal::Admin => View::Dashboard,
            Portal::Dentist { .. } => View::Appointments,
        }
    }

    pub fn allows(&self, view: View) -> bool {
        self.views().contains(&view)
    }

    pub fn required_role(&self) -> Role {
        match self {
            Portal::Admin => Role::Admin,
            Portal::Dentist { .. } => Role::Dentist,
        }
    }

    /// Build the portal a session with `role` is entitled to.
    pub fn for_session(role: Role, user_id: &str) -> Option<Portal> {
        match role {
            Role::Admin => Some(Portal::Admin),
            Role::Dentist => Some(Portal::Dentist {
                dentist_id: user_id.to_string(),
            }),
            Role::Customer | Role::Unknown => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Portal::Admin => "Admin Console",
            Portal::Dentist { .. } => "Dentist Dashboard",
        }
    }
}

/// Active view, page and search term.
///
/// Fields are private so the page can only move through the controller,
/// which keeps it inside `[1, total_pages]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    active_view: View,
    page: usize,
    search_term: String,
}

impl ViewState {
    pub fn new(view: View) -> Self {
        Self {
            active_view: view,
            page: 1,
            search_term: String::new(),
        }
    }

    pub fn view(&self) -> View {
        self.active_view
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub(crate) fn reset(&mut self, view: View) {
        *self = ViewState::new(view);
    }

    pub(crate) fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub(crate) fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slugs_and_alias() {
        for view in View::ALL {
            assert_eq!(View::parse(view.slug()), Some(view));
        }
        assert_eq!(View::parse("reports/customer"), Some(View::Reports));
        assert_eq!(View::parse("Users"), Some(View::Users));
        assert_eq!(View::parse("billing"), None);
        assert_eq!(View::parse(""), None);
    }

    #[test]
    fn test_listing_views() {
        assert!(!View::Dashboard.is_listing());
        assert!(!View::VerificationQueue.is_listing());
        assert!(View::Users.is_listing());
        assert_eq!(View::Reports.entity(), Some(EntityKind::Report));
    }

    #[test]
    fn test_portal_scoping() {
        let dentist = Portal::for_session(Role::Dentist, "d-9").unwrap();
        assert_eq!(
            dentist,
            Portal::Dentist {
                dentist_id: "d-9".into()
            }
        );
        assert_eq!(dentist.home(), View::Appointments);
        assert!(!dentist.allows(View::Users));
        assert!(Portal::Admin.allows(View::VerificationQueue));
        assert!(Portal::for_session(Role::Customer, "c-1").is_none());
    }

    #[test]
    fn test_search_resets_page() {
        let mut state = ViewState::new(View::Users);
        state.set_page(3);
        assert_eq!(state.page(), 3);
        state.set_search_term("smith");
        assert_eq!(state.page(), 1);
        assert_eq!(state.search_term(), "smith");
        state.reset(View::Clinics);
        assert_eq!(state, ViewState::new(View::Clinics));
    }
}
