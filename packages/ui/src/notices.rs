use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub timestamp: String,
    pub level: NoticeLevel,
    pub message: String,
}

/// Feedback from actions and saves, newest last.
#[derive(Clone, Debug, Default)]
pub struct Notices {
    pub entries: Vec<Notice>,
    next_id: u64,
}

/// Entries kept on screen at once.
const MAX_NOTICES: usize = 5;

pub fn use_notices() -> Signal<Notices> {
    use_context::<Signal<Notices>>()
}

pub fn push_notice(notices: &mut Signal<Notices>, level: NoticeLevel, message: &str) {
    let timestamp = current_time();
    let mut notices = notices.write();
    let id = notices.next_id;
    notices.next_id += 1;
    notices.entries.push(Notice {
        id,
        timestamp,
        level,
        message: message.to_string(),
    });
    if notices.entries.len() > MAX_NOTICES {
        notices.entries.remove(0);
    }
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    "00:00:00".to_string()
}

#[component]
pub fn NoticeList() -> Element {
    let mut notices = use_notices();
    let entries = notices().entries.clone();

    if entries.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "notice-list",
            for entry in entries.into_iter().rev() {
                div {
                    key: "{entry.id}",
                    class: match entry.level {
                        NoticeLevel::Error => "notice error",
                        NoticeLevel::Success => "notice success",
                        NoticeLevel::Info => "notice info",
                    },
                    span { class: "notice-time", "{entry.timestamp}" }
                    span { class: "notice-message", "{entry.message}" }
                    button {
                        class: "notice-dismiss",
                        title: "Dismiss",
                        onclick: move |_| notices.write().entries.retain(|n| n.id != entry.id),
                        "×"
                    }
                }
            }
        }
    }
}
