use dioxus::prelude::*;

use crate::views::ModalOverlay;

/// Yes/no question shown before any mutating action.
#[component]
pub fn ConfirmDialog(
    message: String,
    on_accept: EventHandler<()>,
    on_decline: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay {
            on_close: move |_| on_decline.call(()),
            div {
                class: "dialog",
                h2 { class: "dialog-title", "Please confirm" }
                p { class: "dialog-message", "{message}" }
                div {
                    class: "dialog-actions",
                    button {
                        class: "btn tone-neutral",
                        onclick: move |_| on_decline.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn tone-primary",
                        "data-role": "confirm",
                        onclick: move |_| on_accept.call(()),
                        "Confirm"
                    }
                }
            }
        }
    }
}
