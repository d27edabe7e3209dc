use board::{Portal, View};
use dioxus::prelude::*;

use crate::icons::{
    FaCalendarCheck, FaCircleCheck, FaFlag, FaGauge, FaHospital, FaUserDoctor, FaUsers,
};
use crate::Icon;

fn nav_icon(view: View) -> Element {
    match view {
        View::Dashboard => rsx! { Icon { icon: FaGauge, width: 14, height: 14 } },
        View::Users => rsx! { Icon { icon: FaUsers, width: 14, height: 14 } },
        View::Clinics => rsx! { Icon { icon: FaHospital, width: 14, height: 14 } },
        View::Dentists => rsx! { Icon { icon: FaUserDoctor, width: 14, height: 14 } },
        View::Appointments => rsx! { Icon { icon: FaCalendarCheck, width: 14, height: 14 } },
        View::Reports => rsx! { Icon { icon: FaFlag, width: 14, height: 14 } },
        View::VerificationQueue => rsx! { Icon { icon: FaCircleCheck, width: 14, height: 14 } },
    }
}

/// Side navigation listing the views of a portal. No link is highlighted
/// when `active` is `None`. `children` go in the footer (user name, logout).
#[component]
pub fn PortalNav(
    portal: Portal,
    active: Option<View>,
    on_select: EventHandler<View>,
    children: Element,
) -> Element {
    rsx! {
        aside {
            class: "portal-nav",
            div { class: "portal-nav-title", "{portal.title()}" }
            ul {
                for view in portal.views().iter().copied() {
                    li {
                        key: "{view.slug()}",
                        a {
                            class: if active == Some(view) { "nav-link active" } else { "nav-link" },
                            href: "#",
                            "data-view": view.slug(),
                            onclick: move |evt: Event<MouseData>| {
                                evt.prevent_default();
                                on_select.call(view);
                            },
                            {nav_icon(view)}
                            span { "{view.nav_label()}" }
                        }
                    }
                }
            }
            div {
                class: "portal-nav-footer",
                {children}
            }
        }
    }
}
