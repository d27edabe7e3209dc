use dioxus::prelude::*;

use api::DashboardConfig;
use ui::DashboardProvider;
use views::{AdminCustomerReports, AdminPortal, AdminPortalView, DentistPortal};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/admin")]
    AdminPortal {},
    #[route("/admin/reports/customer")]
    AdminCustomerReports {},
    #[route("/admin/:view")]
    AdminPortalView { view: String },
    #[route("/dentist")]
    DentistPortal {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Settings baked in at build time.
const CONFIG_TOML: &str = include_str!("../dashboard.toml");

fn load_config() -> DashboardConfig {
    let config = match DashboardConfig::from_toml(CONFIG_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid {}: {e}; using defaults", DashboardConfig::filename());
            DashboardConfig::default()
        }
    };
    match option_env!("CLINIC_GATEWAY_URL") {
        Some(url) => config.with_base_url(url),
        None => config,
    }
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ui::DASHBOARD_CSS }

        DashboardProvider {
            config: config,
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to `/admin`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::AdminPortal {});
    rsx! {}
}
