//! The portal page: navigation, the active screen and the dialogs.
//!
//! State lives in three signals. The controller holds the view and its data,
//! `pending` holds an action waiting for confirmation and `editor` holds the
//! edit dialog. Async work never holds a signal write across an await: each
//! helper takes what it needs, awaits, then writes the result back.

use api::Client;
use board::actions::{dispatch, execute};
use board::edit::{load_form, save};
use board::render::{ListScreen, QueueScreen};
use board::{
    Command, Controller, Dispatch, EditSession, EditTarget, FieldValue, LoadTicket, Me,
    PendingAction, Portal, Screen, View,
};
use dioxus::prelude::*;

use crate::confirm_dialog::ConfirmDialog;
use crate::edit_dialog::EditDialog;
use crate::icons::FaArrowsRotate;
use crate::navbar::PortalNav;
use crate::notices::{push_notice, use_notices, NoticeLevel, NoticeList, Notices};
use crate::pagination::PaginationBar;
use crate::provider::use_client;
use crate::search_box::SearchBox;
use crate::table::DataTable;
use crate::views::StatCards;
use crate::{Icon, LogoutButton};

fn run_load(mut controller: Signal<Controller>, client: Client, ticket: LoadTicket) {
    spawn(async move {
        let result = ticket.fetch(&client).await;
        if let Err(e) = &result {
            tracing::error!(view = %ticket.view(), "load failed: {e}");
        }
        controller.write().apply(&ticket, result);
    });
}

fn open_view(mut controller: Signal<Controller>, client: Client, view: View) {
    let ticket = controller.write().set_view(view);
    if let Some(ticket) = ticket {
        run_load(controller, client, ticket);
    }
}

fn reload(mut controller: Signal<Controller>, client: Client) {
    let ticket = controller.write().reload();
    if let Some(ticket) = ticket {
        run_load(controller, client, ticket);
    }
}

fn run_action(
    controller: Signal<Controller>,
    mut notices: Signal<Notices>,
    client: Client,
    pending: PendingAction,
) {
    let confirmed = pending.accept();
    spawn(async move {
        match execute(&client, confirmed).await {
            Ok(notice) => {
                push_notice(&mut notices, NoticeLevel::Success, &notice);
                reload(controller, client);
            }
            Err(e) => push_notice(&mut notices, NoticeLevel::Error, &e.to_string()),
        }
    });
}

fn open_editor(mut editor: Signal<EditSession>, client: Client, target: EditTarget) {
    editor.set(EditSession::open(target.clone()));
    spawn(async move {
        let result = load_form(&client, &target).await;
        editor.write().loaded(&target, result);
    });
}

fn save_editor(
    mut editor: Signal<EditSession>,
    controller: Signal<Controller>,
    mut notices: Signal<Notices>,
    client: Client,
) {
    let Some(target) = editor.read().target() else {
        return;
    };
    let mutations = editor.write().begin_save();
    let Some(mutations) = mutations else {
        return;
    };
    spawn(async move {
        let result = save(&client, &mutations).await;
        let failure = result.as_ref().err().map(|e| e.to_string());
        let outcome = editor.write().saved(&target, result);
        if outcome.succeeded() {
            push_notice(
                &mut notices,
                NoticeLevel::Success,
                &format!("{} updated.", target.label()),
            );
            reload(controller, client);
        } else if let Some(message) = failure {
            push_notice(&mut notices, NoticeLevel::Error, &message);
        }
    });
}

fn list_view(
    screen: ListScreen,
    on_search: EventHandler<String>,
    on_page: EventHandler<usize>,
    on_command: EventHandler<Command>,
) -> Element {
    rsx! {
        div {
            class: "list-toolbar",
            SearchBox {
                value: screen.search_term,
                on_input: on_search,
            }
        }
        DataTable { table: screen.table, on_command: on_command }
        PaginationBar {
            pagination: screen.pagination,
            on_page: on_page,
        }
    }
}

fn queue_view(screen: QueueScreen, on_command: EventHandler<Command>) -> Element {
    rsx! {
        section {
            class: "queue-section",
            h2 { "Pending dentists" }
            DataTable { table: screen.dentists, on_command: on_command }
        }
        section {
            class: "queue-section",
            h2 { "Pending clinics" }
            DataTable { table: screen.clinics, on_command: on_command }
        }
    }
}

struct ScreenHandlers {
    open: EventHandler<View>,
    retry: EventHandler<()>,
    search: EventHandler<String>,
    page: EventHandler<usize>,
    command: EventHandler<Command>,
}

fn screen_view(screen: Screen, greeting: String, handlers: ScreenHandlers) -> Element {
    match screen {
        Screen::Loading => rsx! {
            div { class: "screen-status", "Loading..." }
        },
        Screen::Failed { message } => rsx! {
            div {
                class: "alert alert-error",
                span { "{message}" }
                button {
                    class: "btn btn-sm tone-neutral",
                    onclick: move |_| handlers.retry.call(()),
                    "Retry"
                }
            }
        },
        Screen::NotFound { name } => rsx! {
            div { class: "screen-status", "Page not found: {name}" }
        },
        Screen::Dashboard(cards) => rsx! {
            StatCards { screen: cards, greeting: greeting, on_open: handlers.open }
        },
        Screen::Queue(queue) => queue_view(queue, handlers.command),
        Screen::List(list) => list_view(list, handlers.search, handlers.page, handlers.command),
    }
}

/// One portal. `initial` is the view named in the URL, if any; without it
/// the portal's home view opens.
#[component]
pub fn DashboardView(portal: Portal, me: Me, initial: Option<String>) -> Element {
    let client = use_client();
    let notices = use_notices();

    let mut first_ticket = None;
    let mut controller = use_signal(|| {
        let mut controller = Controller::new(portal.clone());
        first_ticket = match initial.as_deref() {
            Some(name) => controller.handle(name),
            None => {
                let home = controller.portal().home();
                controller.set_view(home)
            }
        };
        controller
    });
    let mut pending = use_signal(|| None::<PendingAction>);
    let mut editor = use_signal(EditSession::default);

    let first_client = client.clone();
    use_hook(move || {
        if let Some(ticket) = first_ticket {
            run_load(controller, first_client, ticket);
        }
    });

    let shown = controller.read().shown();
    let heading = controller.read().heading();
    let screen = controller.read().screen();
    let greeting = format!("Welcome back, {}", me.display_name());

    let handlers = ScreenHandlers {
        open: {
            let client = client.clone();
            EventHandler::new(move |view: View| open_view(controller, client.clone(), view))
        },
        retry: {
            let client = client.clone();
            EventHandler::new(move |_: ()| reload(controller, client.clone()))
        },
        search: EventHandler::new(move |term: String| controller.write().set_search_term(&term)),
        page: EventHandler::new(move |page: usize| {
            controller.write().set_page(page);
        }),
        command: {
            let client = client.clone();
            EventHandler::new(move |command: Command| match dispatch(command) {
                Dispatch::Confirm(action) => pending.set(Some(action)),
                Dispatch::OpenEditor(target) => open_editor(editor, client.clone(), target),
            })
        },
    };

    let nav_client = client.clone();
    let refresh_client = client.clone();
    let accept_client = client.clone();
    let save_client = client.clone();

    rsx! {
        div {
            class: "dashboard-shell",
            PortalNav {
                portal: portal.clone(),
                active: shown,
                on_select: move |view| open_view(controller, nav_client.clone(), view),
                div { class: "nav-user", "{me.display_name()}" }
                LogoutButton { class: "btn btn-sm tone-neutral" }
            }
            main {
                class: "dashboard-main",
                header {
                    class: "dashboard-header",
                    h1 { "{heading}" }
                    button {
                        class: "btn btn-sm tone-neutral",
                        title: "Refresh",
                        onclick: move |_| reload(controller, refresh_client.clone()),
                        Icon { icon: FaArrowsRotate, width: 14, height: 14 }
                    }
                }
                NoticeList {}
                {screen_view(screen, greeting, handlers)}
            }
            {pending().map(|action| rsx! {
                ConfirmDialog {
                    message: action.prompt(),
                    on_accept: move |_| {
                        let taken = pending.write().take();
                        if let Some(action) = taken {
                            run_action(controller, notices, accept_client.clone(), action);
                        }
                    },
                    on_decline: move |_| {
                        let taken = pending.write().take();
                        if let Some(action) = taken {
                            action.decline();
                        }
                    },
                }
            })}
            if editor.read().is_open() {
                EditDialog {
                    session: editor(),
                    on_change: move |(key, value): (&'static str, FieldValue)| {
                        editor.write().set_field(key, value);
                    },
                    on_save: move |_| save_editor(editor, controller, notices, save_client.clone()),
                    on_close: move |_| editor.write().close(),
                }
            }
        }
    }
}
