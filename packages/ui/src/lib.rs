//! Shared UI for the clinic dashboards.
//!
//! | Module | Contents |
//! |---|---|
//! | `provider` | client, config and notice context |
//! | `auth` | session guard and logout |
//! | `table`, `pagination`, `search_box` | listing widgets |
//! | `confirm_dialog`, `edit_dialog` | modal dialogs |
//! | `views` | the portal page |

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const DASHBOARD_CSS: Asset = asset!("/assets/dashboard.css");

mod provider;
pub use provider::{use_client, use_config, DashboardProvider};

mod auth;
pub use auth::{redirect, use_session, LogoutButton, SessionGuard, SessionState};

pub mod notices;
pub use notices::{push_notice, use_notices, NoticeLevel, NoticeList, Notices};

mod navbar;
pub use navbar::PortalNav;

mod table;
pub use table::DataTable;

mod pagination;
pub use pagination::PaginationBar;

mod search_box;
pub use search_box::SearchBox;

mod confirm_dialog;
pub use confirm_dialog::ConfirmDialog;

mod edit_dialog;
pub use edit_dialog::EditDialog;

pub mod views;
