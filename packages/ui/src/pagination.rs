use board::paging::{PageLink, Pagination};
use dioxus::prelude::*;

fn page_link(link: PageLink, on_page: EventHandler<usize>) -> Element {
    match link {
        PageLink::Page { number, current } => rsx! {
            button {
                class: if current { "page-link current" } else { "page-link" },
                "aria-current": if current { "page" } else { "false" },
                onclick: move |_| on_page.call(number),
                "{number}"
            }
        },
        PageLink::Gap => rsx! {
            span { class: "page-gap", "…" }
        },
    }
}

/// Previous / numbered / next controls with a "Showing x-y of n" summary.
#[component]
pub fn PaginationBar(pagination: Pagination, on_page: EventHandler<usize>) -> Element {
    let page = pagination.page;

    rsx! {
        nav {
            class: "pagination",
            span { class: "pagination-summary", "{pagination.summary()}" }
            if pagination.total_pages > 1 {
                div {
                    class: "pagination-links",
                    button {
                        class: "page-link",
                        disabled: !pagination.has_previous(),
                        onclick: move |_| on_page.call(page.saturating_sub(1)),
                        "Previous"
                    }
                    for link in pagination.pages() {
                        {page_link(link, on_page)}
                    }
                    button {
                        class: "page-link",
                        disabled: !pagination.has_next(),
                        onclick: move |_| on_page.call(page + 1),
                        "Next"
                    }
                }
            }
        }
    }
}
