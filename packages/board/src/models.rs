//! # Records returned by the gateway
//!
//! Every list view works on one of the record types below. They are
//! `Serialize + Deserialize` so the UI can keep them in signals and tests can
//! build them from JSON literals.
//!
//! | Struct | Id field | Source endpoint |
//! |--------|----------|-----------------|
//! | [`User`] | `user_id` | `GET /api/admin/users` |
//! | [`UserDetail`] | `user_id` | `GET /api/admin/users/{id}` |
//! | [`Clinic`] | `clinic_id` | `GET /api/admin/clinics` |
//! | [`Dentist`] | `user_id` | `GET /api/admin/dentists` |
//! | [`Appointment`] | `appointment_id` | `GET /api/admin/appointments` |
//! | [`Report`] | `report_id` | `GET /api/admin/reports/customer` |
//!
//! [`DashboardStats`] and [`VerificationQueue`] are the two structured payloads
//! that bypass filtering and pagination. [`Dataset`] wraps whichever of these
//! the active view loaded.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::de;
use crate::view::View;

/// Account role as reported by the session service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Dentist,
    Customer,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Dentist => "DENTIST",
            Role::Customer => "CUSTOMER",
            Role::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which kind of record an approval targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyKind {
    Dentist,
    Clinic,
}

impl VerifyKind {
    /// Path segment used by `/approve/{type}/{id}`.
    pub fn as_str(self) -> &'static str {
        match self {
            VerifyKind::Dentist => "dentist",
            VerifyKind::Clinic => "clinic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VerifyKind::Dentist => "Dentist",
            VerifyKind::Clinic => "Clinic",
        }
    }
}

/// Join the present parts of a name with single spaces.
pub(crate) fn join_name(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One row of the users listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "de::id")]
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "de::nullable")]
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        join_name(&[self.first_name.as_deref(), self.last_name.as_deref()])
    }
}

/// Role-specific columns attached to a user detail.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserExtras {
    #[serde(default, deserialize_with = "de::flag")]
    pub ban_status: bool,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub years_of_exp: Option<u32>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_verified: bool,
}

/// Full user record used to populate the edit forms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserDetail {
    #[serde(deserialize_with = "de::id")]
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "de::nullable")]
    pub role: Role,
    #[serde(default)]
    pub details: Option<UserExtras>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clinic {
    #[serde(deserialize_with = "de::id")]
    pub clinic_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_verified: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dentist {
    #[serde(deserialize_with = "de::id")]
    pub user_id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub years_of_exp: Option<u32>,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_verified: bool,
    #[serde(default)]
    pub license_num: Option<String>,
}

impl Dentist {
    pub fn full_name(&self) -> String {
        join_name(&[self.first_name.as_deref(), self.last_name.as_deref()])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(deserialize_with = "de::id")]
    pub appointment_id: String,
    #[serde(default)]
    pub appointment_datetime: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub customer_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub dentist_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub clinic_id: Option<String>,
    #[serde(default)]
    pub cust_first: Option<String>,
    #[serde(default)]
    pub cust_last: Option<String>,
    #[serde(default)]
    pub dent_first: Option<String>,
    #[serde(default)]
    pub dent_last: Option<String>,
    #[serde(default, alias = "clinic")]
    pub clinic_name: Option<String>,
    #[serde(default, deserialize_with = "de::names")]
    pub services: Vec<String>,
}

impl Appointment {
    pub fn customer_name(&self) -> String {
        join_name(&[self.cust_first.as_deref(), self.cust_last.as_deref()])
    }

    pub fn dentist_name(&self) -> String {
        join_name(&[self.dent_first.as_deref(), self.dent_last.as_deref()])
    }

    pub fn service_names(&self) -> String {
        self.services.join(", ")
    }

    pub fn is_pending(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|status| status.eq_ignore_ascii_case("pending"))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(deserialize_with = "de::id")]
    pub report_id: String,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub reporter_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub reported_user_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub reported_clinic_id: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Report {
    /// The reported party: a user if present, otherwise a clinic.
    pub fn reported_id(&self) -> Option<&str> {
        self.reported_user_id
            .as_deref()
            .or(self.reported_clinic_id.as_deref())
    }

    pub fn is_pending(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|status| status.eq_ignore_ascii_case("pending"))
    }
}

/// Headline counters for the admin dashboard.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "de::nullable")]
    pub total_users: u64,
    #[serde(default, deserialize_with = "de::nullable")]
    pub total_dentists: u64,
    #[serde(default, deserialize_with = "de::nullable")]
    pub pending_bookings: u64,
    #[serde(default, deserialize_with = "de::nullable")]
    pub pending_verifications: u64,
    #[serde(default, deserialize_with = "de::nullable")]
    pub new_reports: u64,
}

/// Dentists and clinics awaiting approval.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationQueue {
    #[serde(default, deserialize_with = "de::nullable")]
    pub pending_dentists: Vec<Dentist>,
    #[serde(default, deserialize_with = "de::nullable")]
    pub pending_clinics: Vec<Clinic>,
}

/// The payload loaded for the active view.
///
/// Replaced wholesale on every load; never mutated in place.
#[derive(Clone, Debug, PartialEq)]
pub enum Dataset {
    Dashboard(DashboardStats),
    Users(Vec<User>),
    Clinics(Vec<Clinic>),
    Dentists(Vec<Dentist>),
    Appointments(Vec<Appointment>),
    Reports(Vec<Report>),
    VerificationQueue(VerificationQueue),
}

impl Dataset {
    pub fn view(&self) -> View {
        match self {
            Dataset::Dashboard(_) => View::Dashboard,
            Dataset::Users(_) => View::Users,
            Dataset::Clinics(_) => View::Clinics,
            Dataset::Dentists(_) => View::Dentists,
            Dataset::Appointments(_) => View::Appointments,
            Dataset::Reports(_) => View::Reports,
            Dataset::VerificationQueue(_) => View::VerificationQueue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_ids_and_int_flags() {
        let clinic: Clinic = serde_json::from_value(json!({
            "clinic_id": 42,
            "name": "Smile Dental",
            "is_verified": 1
        }))
        .unwrap();
        assert_eq!(clinic.clinic_id, "42");
        assert!(clinic.is_verified);
        assert!(clinic.address.is_none());

        let dentist: Dentist = serde_json::from_value(json!({
            "user_id": "d-1",
            "is_verified": null,
            "years_of_exp": null
        }))
        .unwrap();
        assert!(!dentist.is_verified);
        assert!(dentist.years_of_exp.is_none());
    }

    #[test]
    fn test_unknown_role_does_not_fail() {
        let user: User = serde_json::from_value(json!({
            "user_id": "u1",
            "role": "SUPPORT"
        }))
        .unwrap();
        assert_eq!(user.role, Role::Unknown);

        let user: User = serde_json::from_value(json!({"user_id": "u2", "role": null})).unwrap();
        assert_eq!(user.role, Role::Unknown);
    }

    #[test]
    fn test_appointment_services_and_names() {
        let appt: Appointment = serde_json::from_value(json!({
            "appointment_id": 7,
            "status": "Pending",
            "cust_first": "An",
            "cust_last": null,
            "dent_first": "Minh",
            "dent_last": "Tran",
            "clinic": "Saigon Smile",
            "services": [{"name": "Cleaning"}, "Whitening", 3]
        }))
        .unwrap();
        assert_eq!(appt.appointment_id, "7");
        assert_eq!(appt.customer_name(), "An");
        assert_eq!(appt.dentist_name(), "Minh Tran");
        assert_eq!(appt.clinic_name.as_deref(), Some("Saigon Smile"));
        assert_eq!(appt.service_names(), "Cleaning, Whitening");
        assert!(appt.is_pending());
    }

    #[test]
    fn test_stats_and_queue_tolerate_nulls() {
        let stats: DashboardStats =
            serde_json::from_value(json!({"total_users": 12, "pending_bookings": null})).unwrap();
        assert_eq!(stats.total_users, 12);
        assert_eq!(stats.pending_bookings, 0);
        assert_eq!(stats.new_reports, 0);

        let queue: VerificationQueue =
            serde_json::from_value(json!({"pending_dentists": null})).unwrap();
        assert!(queue.pending_dentists.is_empty());
        assert!(queue.pending_clinics.is_empty());
    }

    #[test]
    fn test_report_reported_id_prefers_user() {
        let report: Report = serde_json::from_value(json!({
            "report_id": "rep2",
            "reported_clinic_id": "clinic1",
            "status": "Pending"
        }))
        .unwrap();
        assert_eq!(report.reported_id(), Some("clinic1"));
        assert!(report.is_pending());
    }
}
