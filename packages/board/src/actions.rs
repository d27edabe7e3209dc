//! # Action dispatcher
//!
//! Every control in a table carries a [`Command`]. The UI hands it to
//! [`dispatch`], which either opens an editor or returns a
//! [`PendingAction`] that must be accepted before anything is sent.
//!
//! ```text
//! control click ─▶ dispatch ─┬─▶ OpenEditor(target)
//!                            └─▶ Confirm(pending) ─┬─ decline ─▶ nothing
//!                                                  └─ accept ──▶ execute ─▶ reload
//! ```
//!
//! [`Confirmed`] can only be produced by [`PendingAction::accept`], so a
//! mutating request is impossible without an explicit confirmation.

use tracing::{error, info};

use crate::client::ResourceClient;
use crate::controller::Controller;
use crate::edit::EditTarget;
use crate::error::FetchError;
use crate::gateway::{Endpoint, Gateway, Method, Mutation, Resource};
use crate::models::VerifyKind;

/// Identifier attached to each control (`data-role` in the markup).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlRole {
    Edit,
    Delete,
    Approve,
    Resolve,
    Dismiss,
    Confirm,
    Cancel,
    Save,
}

impl ControlRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlRole::Edit => "edit",
            ControlRole::Delete => "delete",
            ControlRole::Approve => "approve",
            ControlRole::Resolve => "resolve",
            ControlRole::Dismiss => "dismiss",
            ControlRole::Confirm => "confirm",
            ControlRole::Cancel => "cancel",
            ControlRole::Save => "save",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Approve { kind: VerifyKind, id: String },
    Delete { resource: Resource, id: String },
    Resolve { report_id: String },
    Dismiss { report_id: String },
    ConfirmAppointment { id: String },
    CancelAppointment { id: String },
    Edit(EditTarget),
}

impl Command {
    pub fn role(&self) -> ControlRole {
        match self {
            Command::Approve { .. } => ControlRole::Approve,
            Command::Delete { .. } => ControlRole::Delete,
            Command::Resolve { .. } => ControlRole::Resolve,
            Command::Dismiss { .. } => ControlRole::Dismiss,
            Command::ConfirmAppointment { .. } => ControlRole::Confirm,
            Command::CancelAppointment { .. } => ControlRole::Cancel,
            Command::Edit(_) => ControlRole::Edit,
        }
    }

    /// The record the command targets.
    pub fn id(&self) -> &str {
        match self {
            Command::Approve { id, .. }
            | Command::Delete { id, .. }
            | Command::ConfirmAppointment { id }
            | Command::CancelAppointment { id } => id,
            Command::Resolve { report_id } | Command::Dismiss { report_id } => report_id,
            Command::Edit(target) => target.id(),
        }
    }

    /// Question shown before a mutating command runs.
    pub fn prompt(&self) -> String {
        match self {
            Command::Approve { kind, id } => {
                format!("Approve {} with ID {id}?", kind.as_str())
            }
            Command::Delete { resource, id } => format!(
                "Permanently delete {} {id}? This cannot be undone.",
                resource.label().to_lowercase()
            ),
            Command::Resolve { report_id } => format!("Mark report {report_id} as resolved?"),
            Command::Dismiss { report_id } => format!("Dismiss report {report_id}?"),
            Command::ConfirmAppointment { id } => format!("Confirm appointment {id}?"),
            Command::CancelAppointment { id } => format!("Cancel appointment {id}?"),
            Command::Edit(target) => format!("Edit {}?", target.label()),
        }
    }

    /// Notice shown after the command succeeded.
    pub fn success_notice(&self) -> String {
        match self {
            Command::Approve { kind, id } => format!("{} {id} has been verified.", kind.label()),
            Command::Delete { resource, id } => {
                format!("{} {id} has been deleted.", resource.label())
            }
            Command::Resolve { report_id } => format!("Report {report_id} resolved."),
            Command::Dismiss { report_id } => format!("Report {report_id} dismissed."),
            Command::ConfirmAppointment { id } => format!("Appointment {id} confirmed."),
            Command::CancelAppointment { id } => format!("Appointment {id} cancelled."),
            Command::Edit(target) => format!("{} updated.", target.label()),
        }
    }

    /// The request this command sends, `None` for [`Command::Edit`].
    pub fn mutation(&self) -> Option<Mutation> {
        let mutation = match self {
            Command::Approve { kind, id } => {
                Mutation::new(Method::Post, Endpoint::Approve { kind: *kind, id })
            }
            Command::Delete { resource, id } => Mutation::new(
                Method::Delete,
                Endpoint::Record {
                    resource: *resource,
                    id,
                },
            ),
            Command::Resolve { report_id } => {
                Mutation::new(Method::Post, Endpoint::ResolveReport(report_id))
            }
            Command::Dismiss { report_id } => {
                Mutation::new(Method::Post, Endpoint::DismissReport(report_id))
            }
            Command::ConfirmAppointment { id } => {
                Mutation::new(Method::Patch, Endpoint::ConfirmAppointment(id))
            }
            Command::CancelAppointment { id } => {
                Mutation::new(Method::Patch, Endpoint::CancelAppointment(id))
            }
            Command::Edit(_) => return None,
        };
        Some(mutation)
    }
}

/// A mutating command waiting for the user's answer.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingAction {
    command: Command,
}

impl PendingAction {
    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn prompt(&self) -> String {
        self.command.prompt()
    }

    pub fn accept(self) -> Confirmed {
        Confirmed(self)
    }

    /// Declining sends nothing and changes nothing.
    pub fn decline(self) {
        info!(role = self.command.role().as_str(), id = self.command.id(), "action declined");
    }
}

/// Proof that the user accepted a [`PendingAction`].
#[derive(Clone, Debug, PartialEq)]
pub struct Confirmed(PendingAction);

impl Confirmed {
    pub fn command(&self) -> &Command {
        &self.0.command
    }
}

/// Outcome of [`dispatch`].
#[derive(Clone, Debug, PartialEq)]
pub enum Dispatch {
    Confirm(PendingAction),
    OpenEditor(EditTarget),
}

/// Route a control's command. Never touches the network.
pub fn dispatch(command: Command) -> Dispatch {
    match command {
        Command::Edit(target) => Dispatch::OpenEditor(target),
        command => Dispatch::Confirm(PendingAction { command }),
    }
}

/// Send an accepted action. Returns the success notice.
pub async fn execute<G: Gateway>(
    client: &ResourceClient<G>,
    confirmed: Confirmed,
) -> Result<String, FetchError> {
    let Confirmed(PendingAction { command }) = confirmed;
    let result = match command.mutation() {
        Some(mutation) => client.mutate(&mutation).await.map(|_| ()),
        None => Ok(()),
    };
    match result {
        Ok(()) => {
            info!(role = command.role().as_str(), id = command.id(), "action succeeded");
            Ok(command.success_notice())
        }
        Err(e) => {
            error!(role = command.role().as_str(), id = command.id(), "action failed: {e}");
            Err(e)
        }
    }
}

/// [`execute`], then reload the controller on success. On failure the
/// controller is left untouched.
pub async fn perform<G: Gateway>(
    controller: &mut Controller,
    client: &ResourceClient<G>,
    confirmed: Confirmed,
) -> Result<String, FetchError> {
    let notice = execute(client, confirmed).await?;
    controller.refresh(client).await;
    Ok(notice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGateway;
    use crate::view::{Portal, View};
    use serde_json::json;

    fn pending(command: Command) -> PendingAction {
        match dispatch(command) {
            Dispatch::Confirm(pending) => pending,
            other => panic!("expected a confirmation, got {other:?}"),
        }
    }

    #[test]
    fn test_edit_opens_editor() {
        let target = EditTarget::User("u1".into());
        assert_eq!(
            dispatch(Command::Edit(target.clone())),
            Dispatch::OpenEditor(target)
        );
    }

    #[tokio::test]
    async fn test_decline_sends_nothing() {
        let gateway = MemoryGateway::new();
        gateway.respond(Method::Get, "/api/admin/users", json!([]));
        let client = ResourceClient::new(gateway.clone());
        let mut controller = Controller::new(Portal::Admin);
        controller.open(&client, View::Users).await;
        let before = controller.screen();
        let calls = gateway.call_count();

        let action = pending(Command::Delete {
            resource: Resource::User,
            id: "u2".into(),
        });
        assert!(action.prompt().contains("u2"));
        action.decline();

        assert_eq!(gateway.call_count(), calls);
        assert_eq!(gateway.mutation_count(), 0);
        assert_eq!(controller.screen(), before);
    }

    #[tokio::test]
    async fn test_accepted_approve_posts_then_reloads() {
        let gateway = MemoryGateway::new();
        gateway.respond(
            Method::Get,
            "/api/admin/verification-queue",
            json!({"pending_dentists": [], "pending_clinics": []}),
        );
        gateway.respond(Method::Post, "/api/admin/approve/dentist/d4", json!({"message": "ok"}));
        let client = ResourceClient::new(gateway.clone());
        let mut controller = Controller::new(Portal::Admin);
        controller.open(&client, View::VerificationQueue).await;

        let action = pending(Command::Approve {
            kind: VerifyKind::Dentist,
            id: "d4".into(),
        });
        let notice = perform(&mut controller, &client, action.accept())
            .await
            .unwrap();
        assert_eq!(notice, "Dentist d4 has been verified.");

        let calls = gateway.calls();
        let paths: Vec<(Method, &str)> =
            calls.iter().map(|c| (c.method, c.path.as_str())).collect();
        assert_eq!(
            paths,
            vec![
                (Method::Get, "/api/admin/verification-queue"),
                (Method::Post, "/api/admin/approve/dentist/d4"),
                (Method::Get, "/api/admin/verification-queue"),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_action_keeps_state_and_reports_message() {
        let gateway = MemoryGateway::new();
        gateway.respond(Method::Get, "/api/admin/reports/customer", json!([]));
        gateway.fail(
            Method::Post,
            "/api/admin/reports/r1/resolve",
            FetchError::from_response(404, r#"{"detail": "Report not found"}"#),
        );
        let client = ResourceClient::new(gateway.clone());
        let mut controller = Controller::new(Portal::Admin);
        controller.open(&client, View::Reports).await;
        let before = controller.screen();

        let action = pending(Command::Resolve {
            report_id: "r1".into(),
        });
        let err = perform(&mut controller, &client, action.accept())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Report not found");
        assert_eq!(controller.screen(), before);
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn test_dentist_confirm_uses_patch() {
        let gateway = MemoryGateway::new();
        gateway.respond(Method::Patch, "/api/appointments/a9/confirm", json!({}));
        let client = ResourceClient::new(gateway.clone());

        let action = pending(Command::ConfirmAppointment { id: "a9".into() });
        let notice = execute(&client, action.accept()).await.unwrap();
        assert_eq!(notice, "Appointment a9 confirmed.");
        assert_eq!(gateway.calls()[0].method, Method::Patch);
    }

    #[test]
    fn test_roles_cover_every_command() {
        let commands = [
            (
                Command::Delete {
                    resource: Resource::Clinic,
                    id: "1".into(),
                },
                "delete",
            ),
            (Command::Dismiss { report_id: "r".into() }, "dismiss"),
            (Command::CancelAppointment { id: "a".into() }, "cancel"),
            (Command::Edit(EditTarget::Dentist("d".into())), "edit"),
        ];
        for (command, role) in commands {
            assert_eq!(command.role().as_str(), role);
        }
    }
}
