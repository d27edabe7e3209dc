//! # Edit dialog
//!
//! [`EditSession`] walks `Closed → Loading → Open → Saving → Closed`, falling
//! back to `Open` with an inline error when validation or the save fails, and
//! to `LoadFailed` when the record cannot be fetched.
//!
//! Each form keeps its inputs as a list of [`FormField`]s the UI renders
//! generically, and builds its own save requests:
//!
//! | Form | Loads | Saves |
//! |------|-------|-------|
//! | [`UserForm`] | `GET /users/{id}` | `PUT /users/{id}`, then `POST /users/ban\|unban/{id}` for customers |
//! | [`DentistForm`] | `GET /users/{id}` | `PUT /dentists/{id}` |
//! | [`AppointmentForm`] | appointment, dentists and clinics concurrently | `PUT /appointments/{id}` |

use std::fmt;

use futures::future::try_join3;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::client::ResourceClient;
use crate::error::{FetchError, ValidationError};
use crate::gateway::{Endpoint, Gateway, Method, Mutation, Resource};
use crate::models::{Appointment, Clinic, Dentist, Role, UserDetail};

pub const MIN_PASSWORD_LEN: usize = 6;

pub const APPOINTMENT_STATUSES: [&str; 4] = ["Pending", "Confirmed", "Completed", "Cancelled"];

/// The record an edit dialog is for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EditTarget {
    User(String),
    Dentist(String),
    Appointment(String),
}

impl EditTarget {
    pub fn id(&self) -> &str {
        match self {
            EditTarget::User(id) | EditTarget::Dentist(id) | EditTarget::Appointment(id) => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            EditTarget::User(_) => "User",
            EditTarget::Dentist(_) => "Dentist",
            EditTarget::Appointment(_) => "Appointment",
        }
    }

    /// "User u1", "Appointment 7".
    pub fn label(&self) -> String {
        format!("{} {}", self.kind(), self.id())
    }

    pub fn title(&self) -> String {
        format!("Edit {}: {}", self.kind(), self.id())
    }
}

impl fmt::Display for EditTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    fn same(value: &str) -> Self {
        Self::new(value, value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Date,
    DateTime,
    Number,
    Password,
    TextArea,
    Select(Vec<SelectOption>),
    Checkbox,
}

impl InputKind {
    /// HTML `type` attribute for `<input>` kinds.
    pub fn html_type(&self) -> &'static str {
        match self {
            InputKind::Email => "email",
            InputKind::Tel => "tel",
            InputKind::Date => "date",
            InputKind::DateTime => "datetime-local",
            InputKind::Number => "number",
            InputKind::Password => "password",
            InputKind::Checkbox => "checkbox",
            InputKind::Text | InputKind::TextArea | InputKind::Select(_) => "text",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub value: FieldValue,
    pub readonly: bool,
    pub required: bool,
    pub hint: Option<&'static str>,
}

impl FormField {
    fn new(key: &'static str, label: &'static str, input: InputKind, value: FieldValue) -> Self {
        Self {
            key,
            label,
            input,
            value,
            readonly: false,
            required: false,
            hint: None,
        }
    }

    fn input(key: &'static str, label: &'static str, input: InputKind, value: Option<&str>) -> Self {
        Self::new(
            key,
            label,
            input,
            FieldValue::Text(value.unwrap_or_default().to_string()),
        )
    }

    fn text(key: &'static str, label: &'static str, value: Option<&str>) -> Self {
        Self::input(key, label, InputKind::Text, value)
    }

    fn checkbox(key: &'static str, label: &'static str, checked: bool) -> Self {
        Self::new(key, label, InputKind::Checkbox, FieldValue::Flag(checked))
    }

    fn select(
        key: &'static str,
        label: &'static str,
        options: Vec<SelectOption>,
        value: Option<&str>,
    ) -> Self {
        Self::input(key, label, InputKind::Select(options), value)
    }

    fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn text_value(&self) -> &str {
        match &self.value {
            FieldValue::Text(text) => text,
            FieldValue::Flag(_) => "",
        }
    }
}

/// The inputs of one form, addressed by key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fields(Vec<FormField>);

impl Fields {
    pub fn iter(&self) -> std::slice::Iter<'_, FormField> {
        self.0.iter()
    }

    pub fn get(&self, key: &str) -> Option<&FormField> {
        self.0.iter().find(|field| field.key == key)
    }

    pub fn text(&self, key: &str) -> &str {
        self.get(key).map(FormField::text_value).unwrap_or_default()
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(
            self.get(key).map(|field| &field.value),
            Some(FieldValue::Flag(true))
        )
    }

    /// Update an editable field. Readonly fields and mismatched value kinds
    /// are left alone.
    pub fn set(&mut self, key: &str, value: FieldValue) -> bool {
        let Some(field) = self.0.iter_mut().find(|field| field.key == key) else {
            return false;
        };
        let compatible = matches!(
            (&field.value, &value),
            (FieldValue::Text(_), FieldValue::Text(_)) | (FieldValue::Flag(_), FieldValue::Flag(_))
        );
        if field.readonly || !compatible {
            return false;
        }
        field.value = value;
        true
    }

    /// Trimmed text, `null` when blank.
    fn nullable(&self, key: &str) -> Value {
        match self.text(key).trim() {
            "" => Value::Null,
            text => Value::String(text.to_string()),
        }
    }

    /// Every field marked required must be non-blank.
    fn check_required(&self) -> Result<(), ValidationError> {
        match self
            .iter()
            .find(|field| field.required && field.text_value().trim().is_empty())
        {
            Some(field) => Err(ValidationError::Required { field: field.label }),
            None => Ok(()),
        }
    }
}

/// `2024-05-01T00:00:00` → `2024-05-01`.
fn date_part(raw: Option<&str>) -> Option<&str> {
    raw.map(|raw| raw.split(['T', ' ']).next().unwrap_or(raw))
}

/// `2024-05-01 09:30:00` → `2024-05-01T09:30`, the shape of a
/// `datetime-local` input.
fn datetime_input(raw: Option<&str>) -> Option<String> {
    raw.map(|raw| {
        let normalized = raw.trim().replacen(' ', "T", 1);
        normalized.chars().take(16).collect()
    })
}

fn gender_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("", "-- Select --"),
        SelectOption::same("Male"),
        SelectOption::same("Female"),
        SelectOption::same("Other"),
    ]
}

fn role_options() -> Vec<SelectOption> {
    [Role::Customer, Role::Dentist, Role::Admin]
        .into_iter()
        .map(|role| SelectOption::same(role.as_str()))
        .collect()
}

/// Full account editor for any user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserForm {
    id: String,
    fields: Fields,
}

impl UserForm {
    pub fn from_detail(user: &UserDetail) -> Self {
        let role = match user.role {
            Role::Unknown => Role::Customer,
            known => known,
        };
        let mut fields = vec![
            FormField::text("user_id", "User ID", Some(user.user_id.as_str())).readonly(),
            FormField::input("email", "Email", InputKind::Email, user.email.as_deref()).required(),
            FormField::input("phone_number", "Phone number", InputKind::Tel, user.phone_number.as_deref()),
            FormField::text("first_name", "First name", user.first_name.as_deref()),
            FormField::text("middle_name", "Middle name", user.middle_name.as_deref()),
            FormField::text("last_name", "Last name", user.last_name.as_deref()),
            FormField::select("gender", "Gender", gender_options(), user.gender.as_deref()),
            FormField::input(
                "date_of_birth",
                "Date of birth",
                InputKind::Date,
                date_part(user.date_of_birth.as_deref()),
            ),
            FormField::input("address", "Address", InputKind::TextArea, user.address.as_deref()),
            FormField::select("role", "Role", role_options(), Some(role.as_str())),
            FormField::input("new_password", "New password", InputKind::Password, None)
                .hint("Leave blank to keep the current password. At least 6 characters."),
            FormField::input("confirm_password", "Confirm password", InputKind::Password, None),
        ];
        if let (Role::Customer, Some(details)) = (user.role, &user.details) {
            fields.push(FormField::checkbox("ban_status", "Ban this user", details.ban_status));
        }
        Self {
            id: user.user_id.clone(),
            fields: Fields(fields),
        }
    }

    fn validate_password(&self) -> Result<Option<&str>, ValidationError> {
        let password = self.fields.text("new_password");
        let confirm = self.fields.text("confirm_password");
        if password.is_empty() && confirm.is_empty() {
            return Ok(None);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        if password != confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(Some(password))
    }

    pub fn mutations(&self) -> Result<Vec<Mutation>, ValidationError> {
        self.fields.check_required()?;
        let password = self.validate_password()?;

        let mut body = Map::new();
        body.insert("email".into(), json!(self.fields.text("email").trim()));
        for key in [
            "phone_number",
            "first_name",
            "middle_name",
            "last_name",
            "gender",
            "date_of_birth",
            "address",
        ] {
            body.insert(key.into(), self.fields.nullable(key));
        }
        body.insert("role".into(), json!(self.fields.text("role")));
        if let Some(password) = password {
            body.insert("new_password".into(), json!(password));
        }

        let mut mutations = vec![Mutation::new(
            Method::Put,
            Endpoint::Record {
                resource: Resource::User,
                id: &self.id,
            },
        )
        .with_body(Value::Object(body))];
        if self.fields.get("ban_status").is_some() {
            let endpoint = if self.fields.flag("ban_status") {
                Endpoint::BanUser(&self.id)
            } else {
                Endpoint::UnbanUser(&self.id)
            };
            mutations.push(Mutation::new(Method::Post, endpoint));
        }
        Ok(mutations)
    }
}

/// Professional profile editor for dentists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DentistForm {
    id: String,
    fields: Fields,
}

impl DentistForm {
    pub fn from_detail(user: &UserDetail) -> Self {
        let details = user.details.clone().unwrap_or_default();
        let years = details.years_of_exp.unwrap_or(0).to_string();
        let fields = vec![
            FormField::text("user_id", "User ID", Some(user.user_id.as_str())).readonly(),
            FormField::input("email", "Email", InputKind::Email, user.email.as_deref()).readonly(),
            FormField::text("first_name", "First name", user.first_name.as_deref()).required(),
            FormField::text("last_name", "Last name", user.last_name.as_deref()).required(),
            FormField::input("phone_number", "Phone number", InputKind::Tel, user.phone_number.as_deref())
                .required(),
            FormField::text("specialization", "Specialization", details.specialization.as_deref()),
            FormField::input("years_of_exp", "Years of experience", InputKind::Number, Some(years.as_str())),
            FormField::input("bio", "Bio", InputKind::TextArea, details.bio.as_deref()),
            FormField::checkbox("is_verified", "Verified", details.is_verified),
        ];
        Self {
            id: user.user_id.clone(),
            fields: Fields(fields),
        }
    }

    pub fn mutations(&self) -> Result<Vec<Mutation>, ValidationError> {
        self.fields.check_required()?;
        let years: u32 = self
            .fields
            .text("years_of_exp")
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidNumber {
                field: "Years of experience",
            })?;
        let body = json!({
            "first_name": self.fields.text("first_name").trim(),
            "last_name": self.fields.text("last_name").trim(),
            "phone_number": self.fields.text("phone_number").trim(),
            "specialization": self.fields.nullable("specialization"),
            "years_of_exp": years,
            "bio": self.fields.nullable("bio"),
            "is_verified": self.fields.flag("is_verified"),
        });
        Ok(vec![Mutation::new(
            Method::Put,
            Endpoint::Record {
                resource: Resource::Dentist,
                id: &self.id,
            },
        )
        .with_body(body)])
    }
}

/// Reassign or reschedule an appointment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppointmentForm {
    id: String,
    fields: Fields,
}

impl AppointmentForm {
    pub fn new(appointment: &Appointment, dentists: &[Dentist], clinics: &[Clinic]) -> Self {
        let blank = || SelectOption::new("", "-- Select --");
        let dentist_options = std::iter::once(blank())
            .chain(dentists.iter().map(|d| {
                let name = d.full_name();
                let label = if name.is_empty() { d.user_id.clone() } else { name };
                SelectOption::new(d.user_id.clone(), label)
            }))
            .collect();
        let clinic_options = std::iter::once(blank())
            .chain(clinics.iter().map(|c| {
                SelectOption::new(
                    c.clinic_id.clone(),
                    c.name.clone().unwrap_or_else(|| c.clinic_id.clone()),
                )
            }))
            .collect();
        let status_options = APPOINTMENT_STATUSES
            .into_iter()
            .map(SelectOption::same)
            .collect();
        let datetime = datetime_input(appointment.appointment_datetime.as_deref());
        let customer = appointment.customer_name();

        let fields = vec![
            FormField::text("appointment_id", "Appointment ID", Some(appointment.appointment_id.as_str()))
                .readonly(),
            FormField::text("customer", "Customer", Some(customer.as_str())).readonly(),
            FormField::select(
                "dentist_id",
                "Dentist",
                dentist_options,
                appointment.dentist_id.as_deref(),
            )
            .required(),
            FormField::select(
                "clinic_id",
                "Clinic",
                clinic_options,
                appointment.clinic_id.as_deref(),
            )
            .required(),
            FormField::input(
                "appointment_datetime",
                "Date and time",
                InputKind::DateTime,
                datetime.as_deref(),
            )
            .required(),
            FormField::select("status", "Status", status_options, appointment.status.as_deref())
                .required(),
        ];
        Self {
            id: appointment.appointment_id.clone(),
            fields: Fields(fields),
        }
    }

    pub fn mutations(&self) -> Result<Vec<Mutation>, ValidationError> {
        self.fields.check_required()?;
        let body = json!({
            "dentist_id": self.fields.text("dentist_id"),
            "clinic_id": self.fields.text("clinic_id"),
            "appointment_datetime": self.fields.text("appointment_datetime").trim(),
            "status": self.fields.text("status"),
        });
        Ok(vec![Mutation::new(
            Method::Put,
            Endpoint::Record {
                resource: Resource::Appointment,
                id: &self.id,
            },
        )
        .with_body(body)])
    }
}

/// A loaded form of any kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditForm {
    User(UserForm),
    Dentist(DentistForm),
    Appointment(AppointmentForm),
}

impl EditForm {
    pub fn target(&self) -> EditTarget {
        match self {
            EditForm::User(form) => EditTarget::User(form.id.clone()),
            EditForm::Dentist(form) => EditTarget::Dentist(form.id.clone()),
            EditForm::Appointment(form) => EditTarget::Appointment(form.id.clone()),
        }
    }

    pub fn fields(&self) -> &Fields {
        match self {
            EditForm::User(form) => &form.fields,
            EditForm::Dentist(form) => &form.fields,
            EditForm::Appointment(form) => &form.fields,
        }
    }

    fn fields_mut(&mut self) -> &mut Fields {
        match self {
            EditForm::User(form) => &mut form.fields,
            EditForm::Dentist(form) => &mut form.fields,
            EditForm::Appointment(form) => &mut form.fields,
        }
    }

    pub fn set(&mut self, key: &str, value: FieldValue) -> bool {
        self.fields_mut().set(key, value)
    }

    /// Validate and build the save requests, in the order they must be sent.
    pub fn mutations(&self) -> Result<Vec<Mutation>, ValidationError> {
        match self {
            EditForm::User(form) => form.mutations(),
            EditForm::Dentist(form) => form.mutations(),
            EditForm::Appointment(form) => form.mutations(),
        }
    }
}

/// State of the edit dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Closed,
    Loading {
        target: EditTarget,
    },
    Open {
        form: EditForm,
        error: Option<String>,
    },
    Saving {
        form: EditForm,
    },
    LoadFailed {
        target: EditTarget,
        message: String,
    },
}

impl EditSession {
    pub fn open(target: EditTarget) -> Self {
        debug!(%target, "opening editor");
        EditSession::Loading { target }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, EditSession::Closed)
    }

    pub fn target(&self) -> Option<EditTarget> {
        match self {
            EditSession::Closed => None,
            EditSession::Loading { target } | EditSession::LoadFailed { target, .. } => {
                Some(target.clone())
            }
            EditSession::Open { form, .. } | EditSession::Saving { form } => Some(form.target()),
        }
    }

    pub fn close(&mut self) {
        *self = EditSession::Closed;
    }

    /// Deliver the record load. Ignored unless the dialog is still loading
    /// the same target.
    pub fn loaded(&mut self, target: &EditTarget, result: Result<EditForm, FetchError>) -> bool {
        match self {
            EditSession::Loading { target: current } if current == target => {}
            _ => {
                warn!(%target, "discarding form load for a closed dialog");
                return false;
            }
        }
        *self = match result {
            Ok(form) => EditSession::Open { form, error: None },
            Err(e) => EditSession::LoadFailed {
                target: target.clone(),
                message: e.to_string(),
            },
        };
        true
    }

    pub fn set_field(&mut self, key: &str, value: FieldValue) -> bool {
        match self {
            EditSession::Open { form, .. } => form.set(key, value),
            _ => false,
        }
    }

    /// Validate the open form. On success the dialog moves to `Saving` and
    /// the requests to send are returned; a validation error is shown inline
    /// and nothing is sent.
    pub fn begin_save(&mut self) -> Option<Vec<Mutation>> {
        let EditSession::Open { form, error } = self else {
            return None;
        };
        match form.mutations() {
            Ok(mutations) => {
                let form = form.clone();
                *self = EditSession::Saving { form };
                Some(mutations)
            }
            Err(invalid) => {
                *error = Some(invalid.to_string());
                None
            }
        }
    }

    /// Deliver the save outcome. Success closes the dialog; failure reopens
    /// the form with the server's message. A dialog closed or retargeted
    /// while saving is left alone, but the outcome still reports whether the
    /// server accepted the change.
    pub fn saved(&mut self, target: &EditTarget, result: Result<(), FetchError>) -> SaveOutcome {
        let form = match self {
            EditSession::Saving { form } if &form.target() == target => form.clone(),
            _ => {
                warn!(%target, "save finished after the dialog was closed");
                return SaveOutcome::Detached {
                    succeeded: result.is_ok(),
                };
            }
        };
        match result {
            Ok(()) => {
                *self = EditSession::Closed;
                SaveOutcome::Applied
            }
            Err(e) => {
                *self = EditSession::Open {
                    form,
                    error: Some(e.to_string()),
                };
                SaveOutcome::Reopened
            }
        }
    }
}

/// What [`EditSession::saved`] did with a save result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Saved; the dialog closed.
    Applied,
    /// Rejected; the form is open again with the error.
    Reopened,
    /// The dialog was gone by the time the result arrived.
    Detached { succeeded: bool },
}

impl SaveOutcome {
    /// The server accepted the change, so the list is stale.
    pub fn succeeded(self) -> bool {
        matches!(self, SaveOutcome::Applied | SaveOutcome::Detached { succeeded: true })
    }
}

/// Fetch what the form for `target` needs. The appointment form loads its
/// record and both option lists concurrently and fails on the first error.
pub async fn load_form<G: Gateway>(
    client: &ResourceClient<G>,
    target: &EditTarget,
) -> Result<EditForm, FetchError> {
    match target {
        EditTarget::User(id) => {
            let user = client.user(id).await?;
            Ok(EditForm::User(UserForm::from_detail(&user)))
        }
        EditTarget::Dentist(id) => {
            let user = client.user(id).await?;
            Ok(EditForm::Dentist(DentistForm::from_detail(&user)))
        }
        EditTarget::Appointment(id) => {
            let (appointment, dentists, clinics) =
                try_join3(client.appointment(id), client.dentists(), client.clinics()).await?;
            Ok(EditForm::Appointment(AppointmentForm::new(
                &appointment,
                &dentists,
                &clinics,
            )))
        }
    }
}

/// Send the save requests in order, stopping at the first failure.
pub async fn save<G: Gateway>(
    client: &ResourceClient<G>,
    mutations: &[Mutation],
) -> Result<(), FetchError> {
    for mutation in mutations {
        client.mutate(mutation).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGateway;

    fn customer_detail() -> UserDetail {
        serde_json::from_value(json!({
            "user_id": "u5",
            "email": "lan@clinic.vn",
            "first_name": "Lan",
            "middle_name": "",
            "date_of_birth": "1990-04-12T00:00:00",
            "role": "CUSTOMER",
            "details": {"ban_status": 0}
        }))
        .unwrap()
    }

    fn open_user_form() -> EditSession {
        let target = EditTarget::User("u5".into());
        let mut session = EditSession::open(target.clone());
        let form = EditForm::User(UserForm::from_detail(&customer_detail()));
        assert!(session.loaded(&target, Ok(form)));
        session
    }

    #[test]
    fn test_user_payload_nulls_blanks_and_omits_empty_password() {
        let form = UserForm::from_detail(&customer_detail());
        assert_eq!(form.fields.text("date_of_birth"), "1990-04-12");

        let mutations = form.mutations().unwrap();
        assert_eq!(mutations.len(), 2);
        assert_eq!(mutations[0].method, Method::Put);
        assert_eq!(mutations[0].path, "/api/admin/users/u5");
        let body = mutations[0].body.as_ref().unwrap();
        assert_eq!(body["email"], "lan@clinic.vn");
        assert_eq!(body["middle_name"], Value::Null);
        assert_eq!(body["role"], "CUSTOMER");
        assert!(body.get("new_password").is_none());
        assert_eq!(mutations[1].path, "/api/admin/users/unban/u5");
    }

    #[test]
    fn test_ban_toggle_only_for_customers() {
        let mut admin = customer_detail();
        admin.role = Role::Admin;
        let form = UserForm::from_detail(&admin);
        assert!(form.fields.get("ban_status").is_none());
        assert_eq!(form.mutations().unwrap().len(), 1);

        let mut form = UserForm::from_detail(&customer_detail());
        assert!(form.fields.set("ban_status", FieldValue::Flag(true)));
        let mutations = form.mutations().unwrap();
        assert_eq!(mutations[1].path, "/api/admin/users/ban/u5");
    }

    #[test]
    fn test_validation_blocks_save() {
        let mut session = open_user_form();
        session.set_field("new_password", FieldValue::Text("abc".into()));
        session.set_field("confirm_password", FieldValue::Text("abc".into()));
        assert!(session.begin_save().is_none());
        let EditSession::Open { error, .. } = &session else {
            panic!("form should stay open");
        };
        assert_eq!(error.as_deref(), Some("Password must be at least 6 characters"));

        session.set_field("new_password", FieldValue::Text("secret1".into()));
        assert!(session.begin_save().is_none());
        assert!(matches!(
            &session,
            EditSession::Open { error: Some(e), .. } if e == "Passwords do not match"
        ));

        session.set_field("confirm_password", FieldValue::Text("secret1".into()));
        session.set_field("email", FieldValue::Text("  ".into()));
        assert!(session.begin_save().is_none());
        assert!(matches!(
            &session,
            EditSession::Open { error: Some(e), .. } if e == "Email is required"
        ));

        session.set_field("email", FieldValue::Text("new@clinic.vn".into()));
        let mutations = session.begin_save().unwrap();
        assert_eq!(mutations[0].body.as_ref().unwrap()["new_password"], "secret1");
        assert!(matches!(session, EditSession::Saving { .. }));
    }

    #[test]
    fn test_readonly_fields_cannot_change() {
        let mut session = open_user_form();
        assert!(!session.set_field("user_id", FieldValue::Text("hijack".into())));
        assert!(!session.set_field("email", FieldValue::Flag(true)));
        assert!(!session.set_field("missing", FieldValue::Text("x".into())));
    }

    #[test]
    fn test_dentist_years_must_be_a_number() {
        let detail: UserDetail = serde_json::from_value(json!({
            "user_id": "d2",
            "email": "minh@clinic.vn",
            "first_name": "Minh",
            "last_name": "Tran",
            "phone_number": "0901",
            "role": "DENTIST",
            "details": {"specialization": "Orthodontics", "years_of_exp": 4, "is_verified": 1}
        }))
        .unwrap();
        let mut form = EditForm::Dentist(DentistForm::from_detail(&detail));
        assert_eq!(form.fields().text("years_of_exp"), "4");
        assert!(form.fields().flag("is_verified"));

        form.set("years_of_exp", FieldValue::Text("-2".into()));
        assert_eq!(
            form.mutations().unwrap_err(),
            ValidationError::InvalidNumber {
                field: "Years of experience"
            }
        );

        form.set("years_of_exp", FieldValue::Text("7".into()));
        let mutations = form.mutations().unwrap();
        assert_eq!(mutations[0].path, "/api/admin/dentists/d2");
        let body = mutations[0].body.as_ref().unwrap();
        assert_eq!(body["years_of_exp"], 7);
        assert_eq!(body["is_verified"], true);
    }

    #[test]
    fn test_stale_form_load_is_discarded() {
        let first = EditTarget::User("u1".into());
        let second = EditTarget::User("u5".into());
        let mut session = EditSession::open(first.clone());
        assert_eq!(session.target(), Some(first.clone()));
        session = EditSession::open(second.clone());

        let form = EditForm::User(UserForm::from_detail(&customer_detail()));
        assert!(!session.loaded(&first, Ok(form.clone())));
        assert!(matches!(session, EditSession::Loading { .. }));

        session.close();
        assert!(!session.loaded(&second, Ok(form)));
        assert_eq!(session, EditSession::Closed);
    }

    #[tokio::test]
    async fn test_appointment_form_loads_concurrently() {
        let gateway = MemoryGateway::new();
        gateway.respond(
            Method::Get,
            "/api/admin/appointments/a1",
            json!({
                "appointment_id": "a1",
                "appointment_datetime": "2025-06-01 14:30:00",
                "status": "Pending",
                "dentist_id": "d1",
                "clinic_id": "c1",
                "cust_first": "An"
            }),
        );
        gateway.respond(
            Method::Get,
            "/api/admin/dentists",
            json!([{"user_id": "d1", "first_name": "Minh", "last_name": "Tran"}]),
        );
        gateway.respond(
            Method::Get,
            "/api/admin/clinics",
            json!([{"clinic_id": "c1", "name": "Saigon Smile"}]),
        );
        gateway.respond(Method::Put, "/api/admin/appointments/a1", json!({"message": "ok"}));
        let client = ResourceClient::new(gateway.clone());
        let target = EditTarget::Appointment("a1".into());

        let form = load_form(&client, &target).await.unwrap();
        assert_eq!(gateway.call_count(), 3);
        assert_eq!(form.fields().text("appointment_datetime"), "2025-06-01T14:30");
        assert_eq!(form.fields().text("customer"), "An");
        let Some(FormField {
            input: InputKind::Select(options),
            ..
        }) = form.fields().get("dentist_id")
        else {
            panic!("dentist select missing");
        };
        assert_eq!(options[1], SelectOption::new("d1", "Minh Tran"));

        let mutations = form.mutations().unwrap();
        save(&client, &mutations).await.unwrap();
        let put = &gateway.calls()[3];
        assert_eq!(put.path, "/api/admin/appointments/a1");
        assert_eq!(put.body.as_ref().unwrap()["clinic_id"], "c1");
    }

    #[tokio::test]
    async fn test_appointment_form_fails_fast() {
        let gateway = MemoryGateway::new();
        gateway.respond(Method::Get, "/api/admin/appointments/a1", json!({"appointment_id": "a1"}));
        gateway.respond(Method::Get, "/api/admin/dentists", json!([]));
        gateway.fail(
            Method::Get,
            "/api/admin/clinics",
            FetchError::Network("connection reset".into()),
        );
        let client = ResourceClient::new(gateway);
        let target = EditTarget::Appointment("a1".into());

        let mut session = EditSession::open(target.clone());
        let result = load_form(&client, &target).await;
        assert!(session.loaded(&target, result));
        assert_eq!(
            session,
            EditSession::LoadFailed {
                target,
                message: "Cannot load data: connection reset".into()
            }
        );
    }

    #[tokio::test]
    async fn test_save_stops_at_first_failure_and_reopens() {
        let gateway = MemoryGateway::new();
        gateway.fail(
            Method::Put,
            "/api/admin/users/u5",
            FetchError::from_response(400, r#"{"detail": "Email already in use"}"#),
        );
        let client = ResourceClient::new(gateway.clone());
        let target = EditTarget::User("u5".into());
        let mut session = open_user_form();

        let mutations = session.begin_save().unwrap();
        let result = save(&client, &mutations).await;
        assert_eq!(session.saved(&target, result), SaveOutcome::Reopened);

        assert_eq!(gateway.call_count(), 1);
        assert!(matches!(
            &session,
            EditSession::Open { error: Some(e), .. } if e == "Email already in use"
        ));
    }

    #[tokio::test]
    async fn test_successful_save_closes() {
        let gateway = MemoryGateway::new();
        gateway.respond(Method::Put, "/api/admin/users/u5", json!({"message": "ok"}));
        gateway.respond(Method::Post, "/api/admin/users/unban/u5", json!({"message": "ok"}));
        let client = ResourceClient::new(gateway.clone());
        let target = EditTarget::User("u5".into());
        let mut session = open_user_form();

        let mutations = session.begin_save().unwrap();
        let result = save(&client, &mutations).await;
        assert_eq!(session.saved(&target, result), SaveOutcome::Applied);
        assert_eq!(session, EditSession::Closed);
        assert_eq!(gateway.mutation_count(), 2);
    }

    #[tokio::test]
    async fn test_save_finishing_after_close_still_reports_success() {
        let gateway = MemoryGateway::new();
        gateway.respond(Method::Put, "/api/admin/users/u5", json!({"message": "ok"}));
        gateway.respond(Method::Post, "/api/admin/users/unban/u5", json!({"message": "ok"}));
        let client = ResourceClient::new(gateway.clone());
        let target = EditTarget::User("u5".into());
        let mut session = open_user_form();

        let mutations = session.begin_save().unwrap();
        session.close();
        let result = save(&client, &mutations).await;
        let outcome = session.saved(&target, result);

        assert_eq!(outcome, SaveOutcome::Detached { succeeded: true });
        assert!(outcome.succeeded());
        assert_eq!(session, EditSession::Closed);
        assert_eq!(gateway.mutation_count(), 2);

        let failed = session.saved(&target, Err(FetchError::Network("offline".into())));
        assert_eq!(failed, SaveOutcome::Detached { succeeded: false });
        assert!(!failed.succeeded());
        assert!(!SaveOutcome::Reopened.succeeded());
    }
}
