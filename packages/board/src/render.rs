//! # Markup models
//!
//! Pure functions from records to [`Table`]s and [`Screen`]s. Nothing here
//! touches the network or the controller; the UI crate turns these models
//! into elements and routes every [`Control`] back through
//! [`dispatch`](crate::actions::dispatch).
//!
//! | Function | Columns | Controls |
//! |----------|---------|----------|
//! | [`users_table`] | ID, Name, Phone, Role, Joined | Edit, Delete (disabled for `ADMIN`) |
//! | [`clinics_table`] | ID, Clinic, Address, Phone, Status | Approve (unverified), Delete |
//! | [`dentists_table`] | ID, Dentist, Specialization, Experience, Status | Approve (unverified), Edit, Delete |
//! | [`appointments_table`] | ID, Date, Customer, Dentist, Clinic, Services, Status | Edit, Delete (admin) / Confirm, Cancel (dentist, pending) |
//! | [`reports_table`] | ID, Reason, Reporter, Reported, Status, Created | Resolve, Dismiss (pending) |
//! | [`queue_dentists_table`], [`queue_clinics_table`] | name, registration details | Approve, Reject |

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::actions::{Command, ControlRole};
use crate::edit::EditTarget;
use crate::gateway::Resource;
use crate::models::{
    Appointment, Clinic, DashboardStats, Dentist, Report, Role, User, VerificationQueue,
    VerifyKind,
};
use crate::paging::Pagination;
use crate::view::{Portal, View};

pub const NO_RESULTS: &str = "No results found.";

/// Colour family of a badge or button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Primary,
    Info,
    Success,
    Warning,
    Danger,
}

impl Tone {
    pub fn class(self) -> &'static str {
        match self {
            Tone::Neutral => "tone-neutral",
            Tone::Primary => "tone-primary",
            Tone::Info => "tone-info",
            Tone::Success => "tone-success",
            Tone::Warning => "tone-warning",
            Tone::Danger => "tone-danger",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    /// A main line with a muted line underneath (name over email).
    Stacked {
        primary: String,
        secondary: String,
        strong: bool,
    },
    Badge {
        label: String,
        tone: Tone,
    },
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    fn opt(value: Option<&str>) -> Self {
        Cell::Text(or_dash(value))
    }
}

/// A button in the actions column.
#[derive(Clone, Debug, PartialEq)]
pub struct Control {
    pub label: &'static str,
    pub command: Command,
    pub tone: Tone,
    pub disabled: bool,
}

impl Control {
    fn new(label: &'static str, tone: Tone, command: Command) -> Self {
        Self {
            label,
            command,
            tone,
            disabled: false,
        }
    }

    fn disabled_if(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn role(&self) -> ControlRole {
        self.command.role()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordRow {
    pub id: String,
    pub cells: Vec<Cell>,
    pub controls: Vec<Control>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Row {
    Record(RecordRow),
    /// Placeholder spanning every column.
    Empty { colspan: usize, message: String },
}

/// Header plus rows. The last column is always the actions column.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Row>,
}

impl Table {
    fn build<R>(
        columns: Vec<&'static str>,
        records: &[&R],
        empty: &str,
        row: impl Fn(&R) -> RecordRow,
    ) -> Self {
        let rows = if records.is_empty() {
            vec![Row::Empty {
                colspan: columns.len(),
                message: empty.to_string(),
            }]
        } else {
            records.iter().map(|record| Row::Record(row(record))).collect()
        };
        Table { columns, rows }
    }

    pub fn record_rows(&self) -> impl Iterator<Item = &RecordRow> {
        self.rows.iter().filter_map(|row| match row {
            Row::Record(record) => Some(record),
            Row::Empty { .. } => None,
        })
    }
}

fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => "-".to_string(),
    }
}

fn non_empty_or_dash(value: String) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value
    }
}

/// `dd/mm/yyyy HH:MM` for timestamps, `dd/mm/yyyy` for plain dates, and the
/// raw text when it cannot be parsed.
pub fn format_datetime(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return "-".to_string();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }
    for pattern in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format("%d/%m/%Y %H:%M").to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

pub fn role_badge(role: Role) -> Cell {
    let tone = match role {
        Role::Admin => Tone::Danger,
        Role::Dentist => Tone::Info,
        Role::Customer => Tone::Primary,
        Role::Unknown => Tone::Neutral,
    };
    Cell::Badge {
        label: role.as_str().to_string(),
        tone,
    }
}

pub fn status_badge(status: Option<&str>) -> Cell {
    let label = or_dash(status);
    let tone = match label.to_ascii_lowercase().as_str() {
        "pending" => Tone::Warning,
        "confirmed" | "resolved" | "verified" => Tone::Success,
        "completed" => Tone::Info,
        "cancelled" | "canceled" | "dismissed" => Tone::Danger,
        _ => Tone::Neutral,
    };
    Cell::Badge { label, tone }
}

fn verified_badge(verified: bool) -> Cell {
    if verified {
        Cell::Badge {
            label: "Verified".to_string(),
            tone: Tone::Success,
        }
    } else {
        Cell::Badge {
            label: "Pending".to_string(),
            tone: Tone::Warning,
        }
    }
}

fn approve(kind: VerifyKind, id: &str) -> Control {
    Control::new(
        "Approve",
        Tone::Success,
        Command::Approve {
            kind,
            id: id.to_string(),
        },
    )
}

fn delete(resource: Resource, id: &str) -> Control {
    Control::new(
        "Delete",
        Tone::Danger,
        Command::Delete {
            resource,
            id: id.to_string(),
        },
    )
}

/// Deleting a pending registration.
fn reject(resource: Resource, id: &str) -> Control {
    Control {
        label: "Reject",
        ..delete(resource, id)
    }
}

fn edit(target: EditTarget) -> Control {
    Control::new("Edit", Tone::Primary, Command::Edit(target))
}

pub fn users_table(users: &[&User]) -> Table {
    Table::build(
        vec!["ID", "Name", "Phone", "Role", "Joined", "Actions"],
        users,
        NO_RESULTS,
        |user| RecordRow {
            id: user.user_id.clone(),
            cells: vec![
                Cell::text(&user.user_id),
                Cell::Stacked {
                    primary: non_empty_or_dash(user.full_name()),
                    secondary: or_dash(user.email.as_deref()),
                    strong: true,
                },
                Cell::opt(user.phone_number.as_deref()),
                role_badge(user.role),
                Cell::text(format_datetime(user.created_at.as_deref())),
            ],
            controls: vec![
                edit(EditTarget::User(user.user_id.clone())),
                delete(Resource::User, &user.user_id).disabled_if(user.role == Role::Admin),
            ],
        },
    )
}

pub fn clinics_table(clinics: &[&Clinic]) -> Table {
    Table::build(
        vec!["ID", "Clinic", "Address", "Phone", "Status", "Actions"],
        clinics,
        NO_RESULTS,
        |clinic| {
            let mut controls = Vec::new();
            if !clinic.is_verified {
                controls.push(approve(VerifyKind::Clinic, &clinic.clinic_id));
            }
            controls.push(delete(Resource::Clinic, &clinic.clinic_id));
            RecordRow {
                id: clinic.clinic_id.clone(),
                cells: vec![
                    Cell::text(&clinic.clinic_id),
                    Cell::Stacked {
                        primary: or_dash(clinic.name.as_deref()),
                        secondary: or_dash(clinic.email.as_deref()),
                        strong: true,
                    },
                    Cell::opt(clinic.address.as_deref()),
                    Cell::opt(clinic.phone_number.as_deref()),
                    verified_badge(clinic.is_verified),
                ],
                controls,
            }
        },
    )
}

fn experience(years: Option<u32>) -> String {
    match years {
        Some(1) => "1 year".to_string(),
        Some(n) => format!("{n} years"),
        None => "-".to_string(),
    }
}

pub fn dentists_table(dentists: &[&Dentist]) -> Table {
    Table::build(
        vec!["ID", "Dentist", "Specialization", "Experience", "Status", "Actions"],
        dentists,
        NO_RESULTS,
        |dentist| {
            let mut controls = Vec::new();
            if !dentist.is_verified {
                controls.push(approve(VerifyKind::Dentist, &dentist.user_id));
            }
            controls.push(edit(EditTarget::Dentist(dentist.user_id.clone())));
            controls.push(delete(Resource::User, &dentist.user_id));
            RecordRow {
                id: dentist.user_id.clone(),
                cells: vec![
                    Cell::text(&dentist.user_id),
                    Cell::Stacked {
                        primary: non_empty_or_dash(dentist.full_name()),
                        secondary: or_dash(dentist.email.as_deref()),
                        strong: true,
                    },
                    Cell::opt(dentist.specialization.as_deref()),
                    Cell::text(experience(dentist.years_of_exp)),
                    verified_badge(dentist.is_verified),
                ],
                controls,
            }
        },
    )
}

/// Admins see every appointment with edit/delete; a dentist only sees their
/// own and may confirm or cancel the pending ones.
pub fn appointments_table(appointments: &[&Appointment], portal: &Portal) -> Table {
    let admin = matches!(portal, Portal::Admin);
    let columns = if admin {
        vec!["ID", "Date", "Customer", "Dentist", "Clinic", "Services", "Status", "Actions"]
    } else {
        vec!["ID", "Date", "Customer", "Clinic", "Services", "Status", "Actions"]
    };
    Table::build(columns, appointments, NO_RESULTS, |appt| {
        let id = &appt.appointment_id;
        let mut cells = vec![
            Cell::text(id),
            Cell::text(format_datetime(appt.appointment_datetime.as_deref())),
            Cell::text(non_empty_or_dash(appt.customer_name())),
        ];
        if admin {
            cells.push(Cell::text(non_empty_or_dash(appt.dentist_name())));
        }
        cells.extend([
            Cell::opt(appt.clinic_name.as_deref()),
            Cell::text(non_empty_or_dash(appt.service_names())),
            status_badge(appt.status.as_deref()),
        ]);

        let controls = if admin {
            vec![
                edit(EditTarget::Appointment(id.clone())),
                delete(Resource::Appointment, id),
            ]
        } else if appt.is_pending() {
            vec![
                Control::new(
                    "Confirm",
                    Tone::Success,
                    Command::ConfirmAppointment { id: id.clone() },
                ),
                Control::new(
                    "Cancel",
                    Tone::Danger,
                    Command::CancelAppointment { id: id.clone() },
                ),
            ]
        } else {
            Vec::new()
        };
        RecordRow {
            id: id.clone(),
            cells,
            controls,
        }
    })
}

pub fn reports_table(reports: &[&Report]) -> Table {
    Table::build(
        vec!["ID", "Reason", "Reporter", "Reported", "Status", "Created", "Actions"],
        reports,
        NO_RESULTS,
        |report| {
            let controls = if report.is_pending() {
                vec![
                    Control::new(
                        "Resolve",
                        Tone::Success,
                        Command::Resolve {
                            report_id: report.report_id.clone(),
                        },
                    ),
                    Control::new(
                        "Dismiss",
                        Tone::Neutral,
                        Command::Dismiss {
                            report_id: report.report_id.clone(),
                        },
                    ),
                ]
            } else {
                Vec::new()
            };
            RecordRow {
                id: report.report_id.clone(),
                cells: vec![
                    Cell::text(&report.report_id),
                    Cell::opt(report.reason.as_deref()),
                    Cell::opt(report.reporter_id.as_deref()),
                    Cell::opt(report.reported_id()),
                    status_badge(report.status.as_deref()),
                    Cell::text(format_datetime(report.created_at.as_deref())),
                ],
                controls,
            }
        },
    )
}

pub fn queue_dentists_table(dentists: &[&Dentist]) -> Table {
    Table::build(
        vec!["Dentist", "License", "Specialization", "Actions"],
        dentists,
        "No pending dentists.",
        |dentist| RecordRow {
            id: dentist.user_id.clone(),
            cells: vec![
                Cell::Stacked {
                    primary: non_empty_or_dash(dentist.full_name()),
                    secondary: or_dash(dentist.email.as_deref()),
                    strong: true,
                },
                Cell::opt(dentist.license_num.as_deref()),
                Cell::opt(dentist.specialization.as_deref()),
            ],
            controls: vec![
                approve(VerifyKind::Dentist, &dentist.user_id),
                reject(Resource::User, &dentist.user_id),
            ],
        },
    )
}

pub fn queue_clinics_table(clinics: &[&Clinic]) -> Table {
    Table::build(
        vec!["Clinic", "Address", "Phone", "Actions"],
        clinics,
        "No pending clinics.",
        |clinic| RecordRow {
            id: clinic.clinic_id.clone(),
            cells: vec![
                Cell::Stacked {
                    primary: or_dash(clinic.name.as_deref()),
                    secondary: or_dash(clinic.email.as_deref()),
                    strong: true,
                },
                Cell::opt(clinic.address.as_deref()),
                Cell::opt(clinic.phone_number.as_deref()),
            ],
            controls: vec![
                approve(VerifyKind::Clinic, &clinic.clinic_id),
                reject(Resource::Clinic, &clinic.clinic_id),
            ],
        },
    )
}

/// One counter on the dashboard. `link` opens the related view.
#[derive(Clone, Debug, PartialEq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: u64,
    pub tone: Tone,
    pub link: Option<View>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardScreen {
    pub cards: Vec<StatCard>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueueScreen {
    pub dentists: Table,
    pub clinics: Table,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListScreen {
    pub view: View,
    pub table: Table,
    pub pagination: Pagination,
    pub search_term: String,
}

/// What the content area shows.
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Loading,
    Failed { message: String },
    NotFound { name: String },
    Dashboard(DashboardScreen),
    Queue(QueueScreen),
    List(ListScreen),
}

/// `None` while the stats are still loading.
pub fn dashboard(stats: Option<&DashboardStats>) -> Screen {
    let Some(stats) = stats else {
        return Screen::Loading;
    };
    Screen::Dashboard(DashboardScreen {
        cards: vec![
            StatCard {
                label: "Total users",
                value: stats.total_users,
                tone: Tone::Primary,
                link: Some(View::Users),
            },
            StatCard {
                label: "Dentists",
                value: stats.total_dentists,
                tone: Tone::Info,
                link: Some(View::Dentists),
            },
            StatCard {
                label: "Pending bookings",
                value: stats.pending_bookings,
                tone: Tone::Warning,
                link: Some(View::Appointments),
            },
            StatCard {
                label: "Pending verifications",
                value: stats.pending_verifications,
                tone: Tone::Success,
                link: Some(View::VerificationQueue),
            },
            StatCard {
                label: "New reports",
                value: stats.new_reports,
                tone: Tone::Danger,
                link: Some(View::Reports),
            },
        ],
    })
}

/// `None` while the queue is still loading.
pub fn verification_queue(queue: Option<&VerificationQueue>) -> Screen {
    let Some(queue) = queue else {
        return Screen::Loading;
    };
    let dentists: Vec<&Dentist> = queue.pending_dentists.iter().collect();
    let clinics: Vec<&Clinic> = queue.pending_clinics.iter().collect();
    Screen::Queue(QueueScreen {
        dentists: queue_dentists_table(&dentists),
        clinics: queue_clinics_table(&clinics),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(id: &str, role: &str) -> User {
        serde_json::from_value(json!({
            "user_id": id,
            "first_name": "Lan",
            "last_name": "Pham",
            "email": format!("{id}@clinic.vn"),
            "role": role,
            "created_at": "2025-03-04T08:05:00"
        }))
        .unwrap()
    }

    #[test]
    fn test_admin_delete_is_disabled() {
        let admin = user("u1", "ADMIN");
        let customer = user("u2", "CUSTOMER");
        let table = users_table(&[&admin, &customer]);

        let rows: Vec<&RecordRow> = table.record_rows().collect();
        let delete_of = |row: &RecordRow| {
            row.controls
                .iter()
                .find(|c| c.role() == ControlRole::Delete)
                .cloned()
                .unwrap()
        };
        assert!(delete_of(rows[0]).disabled);
        assert!(!delete_of(rows[1]).disabled);
        assert_eq!(rows[0].cells[4], Cell::Text("04/03/2025 08:05".into()));
    }

    #[test]
    fn test_empty_list_is_one_spanning_row() {
        let table = clinics_table(&[]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(
            table.rows[0],
            Row::Empty {
                colspan: table.columns.len(),
                message: NO_RESULTS.to_string()
            }
        );

        let appts = appointments_table(&[], &Portal::Admin);
        assert_eq!(appts.rows.len(), 1);
        assert!(matches!(appts.rows[0], Row::Empty { colspan: 8, .. }));
    }

    #[test]
    fn test_approve_only_for_unverified() {
        let clinics: Vec<Clinic> = serde_json::from_value(json!([
            {"clinic_id": 1, "name": "A", "is_verified": true},
            {"clinic_id": 2, "name": "B", "is_verified": 0}
        ]))
        .unwrap();
        let refs: Vec<&Clinic> = clinics.iter().collect();
        let table = clinics_table(&refs);
        let roles: Vec<Vec<ControlRole>> = table
            .record_rows()
            .map(|row| row.controls.iter().map(Control::role).collect())
            .collect();
        assert_eq!(roles[0], vec![ControlRole::Delete]);
        assert_eq!(roles[1], vec![ControlRole::Approve, ControlRole::Delete]);
    }

    #[test]
    fn test_dentist_and_queue_rows_can_be_removed() {
        let dentists: Vec<Dentist> = serde_json::from_value(json!([
            {"user_id": "d1", "first_name": "Minh", "is_verified": 0}
        ]))
        .unwrap();
        let clinics: Vec<Clinic> = serde_json::from_value(json!([
            {"clinic_id": 7, "name": "Smile", "is_verified": 0}
        ]))
        .unwrap();
        let dentist_refs: Vec<&Dentist> = dentists.iter().collect();
        let clinic_refs: Vec<&Clinic> = clinics.iter().collect();

        let roles = |table: &Table| -> Vec<ControlRole> {
            table.record_rows().next().unwrap().controls.iter().map(Control::role).collect()
        };
        assert_eq!(
            roles(&dentists_table(&dentist_refs)),
            vec![ControlRole::Approve, ControlRole::Edit, ControlRole::Delete]
        );
        assert_eq!(
            roles(&queue_dentists_table(&dentist_refs)),
            vec![ControlRole::Approve, ControlRole::Delete]
        );

        let queue = queue_clinics_table(&clinic_refs);
        let reject = &queue.record_rows().next().unwrap().controls[1];
        assert_eq!(reject.label, "Reject");
        assert_eq!(
            reject.command,
            Command::Delete {
                resource: Resource::Clinic,
                id: "7".into()
            }
        );
    }

    #[test]
    fn test_report_controls_only_while_pending() {
        let reports: Vec<Report> = serde_json::from_value(json!([
            {"report_id": "r1", "status": "Pending"},
            {"report_id": "r2", "status": "Resolved"}
        ]))
        .unwrap();
        let refs: Vec<&Report> = reports.iter().collect();
        let table = reports_table(&refs);
        let rows: Vec<&RecordRow> = table.record_rows().collect();
        assert_eq!(rows[0].controls.len(), 2);
        assert!(rows[1].controls.is_empty());
        assert_eq!(
            rows[1].cells[4],
            Cell::Badge {
                label: "Resolved".into(),
                tone: Tone::Success
            }
        );
    }

    #[test]
    fn test_dentist_portal_appointment_controls() {
        let appts: Vec<Appointment> = serde_json::from_value(json!([
            {"appointment_id": 1, "status": "Pending"},
            {"appointment_id": 2, "status": "Confirmed"}
        ]))
        .unwrap();
        let refs: Vec<&Appointment> = appts.iter().collect();
        let portal = Portal::Dentist {
            dentist_id: "d1".into(),
        };
        let table = appointments_table(&refs, &portal);
        assert!(!table.columns.contains(&"Dentist"));
        let rows: Vec<&RecordRow> = table.record_rows().collect();
        let roles: Vec<ControlRole> = rows[0].controls.iter().map(Control::role).collect();
        assert_eq!(roles, vec![ControlRole::Confirm, ControlRole::Cancel]);
        assert!(rows[1].controls.is_empty());
    }

    #[test]
    fn test_structured_screens_wait_for_data() {
        assert_eq!(dashboard(None), Screen::Loading);
        assert_eq!(verification_queue(None), Screen::Loading);

        let Screen::Queue(queue) = verification_queue(Some(&VerificationQueue::default())) else {
            panic!("expected queue screen");
        };
        assert_eq!(
            queue.dentists.rows,
            vec![Row::Empty {
                colspan: 4,
                message: "No pending dentists.".into()
            }]
        );
        let Screen::Dashboard(screen) = dashboard(Some(&DashboardStats {
            total_users: 3,
            ..Default::default()
        })) else {
            panic!("expected dashboard screen");
        };
        assert_eq!(screen.cards[0].value, 3);
    }

    #[test]
    fn test_format_datetime_fallbacks() {
        assert_eq!(format_datetime(Some("2025-11-03 09:30:00")), "03/11/2025 09:30");
        assert_eq!(format_datetime(Some("2025-11-03T09:30:00Z")), "03/11/2025 09:30");
        assert_eq!(format_datetime(Some("1999-01-31")), "31/01/1999");
        assert_eq!(format_datetime(Some("tomorrow")), "tomorrow");
        assert_eq!(format_datetime(None), "-");
    }
}
