use board::render::{Cell, Control, RecordRow, Row, Table};
use board::Command;
use dioxus::prelude::*;

fn cell_view(cell: &Cell) -> Element {
    match cell {
        Cell::Text(text) => rsx! {
            td { "{text}" }
        },
        Cell::Stacked {
            primary,
            secondary,
            strong,
        } => rsx! {
            td {
                div { class: if *strong { "cell-primary strong" } else { "cell-primary" }, "{primary}" }
                div { class: "cell-secondary", "{secondary}" }
            }
        },
        Cell::Badge { label, tone } => rsx! {
            td {
                span { class: "badge {tone.class()}", "{label}" }
            }
        },
    }
}

fn control_button(control: &Control, record_id: &str, on_command: EventHandler<Command>) -> Element {
    let command = control.command.clone();
    rsx! {
        button {
            class: "btn btn-sm {control.tone.class()}",
            "data-role": control.role().as_str(),
            "data-id": "{record_id}",
            disabled: control.disabled,
            onclick: move |_| on_command.call(command.clone()),
            "{control.label}"
        }
    }
}

fn record_view(row: &RecordRow, on_command: EventHandler<Command>) -> Element {
    rsx! {
        tr {
            key: "{row.id}",
            for cell in row.cells.iter() {
                {cell_view(cell)}
            }
            td {
                class: "actions",
                for control in row.controls.iter() {
                    {control_button(control, &row.id, on_command)}
                }
            }
        }
    }
}

fn row_view(row: &Row, on_command: EventHandler<Command>) -> Element {
    match row {
        Row::Record(record) => record_view(record, on_command),
        Row::Empty { colspan, message } => rsx! {
            tr {
                td { class: "empty-row", colspan: "{colspan}", "{message}" }
            }
        },
    }
}

/// A rendered [`Table`]. Every control click is reported through
/// `on_command`.
#[component]
pub fn DataTable(table: Table, on_command: EventHandler<Command>) -> Element {
    rsx! {
        div {
            class: "table-wrap",
            table {
                class: "data-table",
                thead {
                    tr {
                        for column in table.columns.iter() {
                            th { "{column}" }
                        }
                    }
                }
                tbody {
                    for row in table.rows.iter() {
                        {row_view(row, on_command)}
                    }
                }
            }
        }
    }
}
