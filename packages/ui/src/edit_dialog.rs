use board::edit::{FieldValue, FormField, InputKind};
use board::EditSession;
use dioxus::prelude::*;

use crate::views::ModalOverlay;

fn field_view(
    field: &FormField,
    disabled: bool,
    on_change: EventHandler<(&'static str, FieldValue)>,
) -> Element {
    let key = field.key;
    let id = format!("edit-{key}");
    let locked = disabled || field.readonly;
    let text = field.text_value().to_string();
    let on_text = move |evt: FormEvent| on_change.call((key, FieldValue::Text(evt.value())));

    let input = match &field.input {
        InputKind::Checkbox => {
            let checked = matches!(field.value, FieldValue::Flag(true));
            return rsx! {
                div {
                    class: "form-check",
                    input {
                        id: "{id}",
                        r#type: "checkbox",
                        checked: checked,
                        disabled: locked,
                        onchange: move |evt: FormEvent| {
                            on_change.call((key, FieldValue::Flag(evt.checked())))
                        },
                    }
                    label { r#for: "{id}", "{field.label}" }
                }
            };
        }
        InputKind::Select(options) => rsx! {
            select {
                id: "{id}",
                value: "{text}",
                disabled: locked,
                onchange: on_text,
                for option in options.iter() {
                    option {
                        value: "{option.value}",
                        selected: option.value == text,
                        "{option.label}"
                    }
                }
            }
        },
        InputKind::TextArea => rsx! {
            textarea {
                id: "{id}",
                rows: "3",
                value: "{text}",
                readonly: locked,
                oninput: on_text,
            }
        },
        kind => rsx! {
            input {
                id: "{id}",
                r#type: kind.html_type(),
                value: "{text}",
                readonly: locked,
                required: field.required,
                oninput: on_text,
            }
        },
    };

    rsx! {
        div {
            class: "form-field",
            label {
                r#for: "{id}",
                "{field.label}"
                if field.required {
                    span { class: "required", " *" }
                }
            }
            {input}
            if let Some(hint) = field.hint {
                small { class: "form-hint", "{hint}" }
            }
        }
    }
}

/// The edit dialog for whatever state `session` is in.
#[component]
pub fn EditDialog(
    session: EditSession,
    on_change: EventHandler<(&'static str, FieldValue)>,
    on_save: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    let title = session
        .target()
        .map(|target| target.title())
        .unwrap_or_default();
    let saving = matches!(session, EditSession::Saving { .. });
    let can_save = matches!(session, EditSession::Open { .. });

    let body = match &session {
        EditSession::Closed => return rsx! {},
        EditSession::Loading { .. } => rsx! {
            div { class: "dialog-loading", "Loading..." }
        },
        EditSession::LoadFailed { message, .. } => rsx! {
            div { class: "alert alert-error", "{message}" }
        },
        EditSession::Open { form, error } => rsx! {
            if let Some(error) = error {
                div { class: "alert alert-error", "{error}" }
            }
            for field in form.fields().iter() {
                {field_view(field, false, on_change)}
            }
        },
        EditSession::Saving { form } => rsx! {
            for field in form.fields().iter() {
                {field_view(field, true, on_change)}
            }
        },
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            div {
                class: "dialog dialog-wide",
                h2 { class: "dialog-title", "{title}" }
                form {
                    class: "edit-form",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        on_save.call(());
                    },
                    {body}
                }
                div {
                    class: "dialog-actions",
                    button {
                        class: "btn tone-neutral",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                    button {
                        class: "btn tone-primary",
                        "data-role": "save",
                        disabled: !can_save,
                        onclick: move |_| on_save.call(()),
                        if saving { "Saving..." } else { "Save changes" }
                    }
                }
            }
        }
    }
}
