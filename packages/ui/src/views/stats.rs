use board::render::DashboardScreen;
use board::View;
use dioxus::prelude::*;

/// Counter cards on the admin dashboard. Cards with a link open their view.
#[component]
pub fn StatCards(screen: DashboardScreen, greeting: String, on_open: EventHandler<View>) -> Element {
    rsx! {
        p { class: "dashboard-greeting", "{greeting}" }
        div {
            class: "stat-grid",
            for card in screen.cards.into_iter() {
                div {
                    key: "{card.label}",
                    class: "stat-card {card.tone.class()}",
                    div { class: "stat-label", "{card.label}" }
                    div { class: "stat-value", "{card.value}" }
                    if let Some(view) = card.link {
                        button {
                            class: "stat-link",
                            onclick: move |_| on_open.call(view),
                            "View details"
                        }
                    }
                }
            }
        }
    }
}
