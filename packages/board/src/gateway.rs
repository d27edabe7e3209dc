//! The seam between the engine and the network.
//!
//! [`Gateway`] carries one JSON request and one JSON answer. The
//! engine builds paths from [`Endpoint`] so every URL the dashboard touches is
//! listed in one place.

use std::fmt;
use std::future::Future;

use serde_json::Value;

use crate::error::FetchError;
use crate::models::VerifyKind;
use crate::view::View;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport used by [`ResourceClient`](crate::ResourceClient).
///
/// `path` is absolute (`/api/...`); the implementation prefixes its base URL.
/// A 2xx answer with an empty body yields [`Value::Null`].
pub trait Gateway {
    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> impl Future<Output = Result<Value, FetchError>>;
}

/// Admin collections addressable by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    User,
    Clinic,
    Dentist,
    Appointment,
}

impl Resource {
    pub fn collection(self) -> &'static str {
        match self {
            Resource::User => "users",
            Resource::Clinic => "clinics",
            Resource::Dentist => "dentists",
            Resource::Appointment => "appointments",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Resource::User => "User",
            Resource::Clinic => "Clinic",
            Resource::Dentist => "Dentist",
            Resource::Appointment => "Appointment",
        }
    }
}

const ADMIN: &str = "/api/admin";
const AUTH: &str = "/api/auth";
const APPOINTMENTS: &str = "/api/appointments";

/// Every backend route the dashboard calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Me,
    Logout,
    /// The admin collection behind a view.
    Listing(View),
    DentistAppointments { dentist_id: &'a str },
    Record { resource: Resource, id: &'a str },
    Approve { kind: VerifyKind, id: &'a str },
    ResolveReport(&'a str),
    DismissReport(&'a str),
    BanUser(&'a str),
    UnbanUser(&'a str),
    ConfirmAppointment(&'a str),
    CancelAppointment(&'a str),
}

impl Endpoint<'_> {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Me => format!("{AUTH}/me"),
            Endpoint::Logout => format!("{AUTH}/logout"),
            Endpoint::Listing(view) => match view {
                View::Dashboard => format!("{ADMIN}/dashboard-stats"),
                View::Reports => format!("{ADMIN}/reports/customer"),
                other => format!("{ADMIN}/{}", other.slug()),
            },
            Endpoint::DentistAppointments { dentist_id } => {
                format!("{APPOINTMENTS}/dentist/{dentist_id}")
            }
            Endpoint::Record { resource, id } => {
                format!("{ADMIN}/{}/{id}", resource.collection())
            }
            Endpoint::Approve { kind, id } => format!("{ADMIN}/approve/{}/{id}", kind.as_str()),
            Endpoint::ResolveReport(id) => format!("{ADMIN}/reports/{id}/resolve"),
            Endpoint::DismissReport(id) => format!("{ADMIN}/reports/{id}/dismiss"),
            Endpoint::BanUser(id) => format!("{ADMIN}/users/ban/{id}"),
            Endpoint::UnbanUser(id) => format!("{ADMIN}/users/unban/{id}"),
            Endpoint::ConfirmAppointment(id) => format!("{APPOINTMENTS}/{id}/confirm"),
            Endpoint::CancelAppointment(id) => format!("{APPOINTMENTS}/{id}/cancel"),
        }
    }
}

/// A prepared state-changing request.
#[derive(Clone, Debug, PartialEq)]
pub struct Mutation {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl Mutation {
    pub fn new(method: Method, endpoint: Endpoint<'_>) -> Self {
        Self {
            method,
            path: endpoint.path(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_paths() {
        assert_eq!(Endpoint::Listing(View::Dashboard).path(), "/api/admin/dashboard-stats");
        assert_eq!(Endpoint::Listing(View::Users).path(), "/api/admin/users");
        assert_eq!(Endpoint::Listing(View::Reports).path(), "/api/admin/reports/customer");
        assert_eq!(
            Endpoint::Listing(View::VerificationQueue).path(),
            "/api/admin/verification-queue"
        );
        assert_eq!(
            Endpoint::DentistAppointments { dentist_id: "d1" }.path(),
            "/api/appointments/dentist/d1"
        );
    }

    #[test]
    fn test_action_paths() {
        let approve = Endpoint::Approve {
            kind: VerifyKind::Clinic,
            id: "c9",
        };
        assert_eq!(approve.path(), "/api/admin/approve/clinic/c9");
        assert_eq!(Endpoint::ResolveReport("r1").path(), "/api/admin/reports/r1/resolve");
        assert_eq!(Endpoint::UnbanUser("u1").path(), "/api/admin/users/unban/u1");
        assert_eq!(
            Endpoint::CancelAppointment("a3").path(),
            "/api/appointments/a3/cancel"
        );
        let delete = Mutation::new(
            Method::Delete,
            Endpoint::Record {
                resource: Resource::Clinic,
                id: "7",
            },
        );
        assert_eq!(delete.path, "/api/admin/clinics/7");
        assert!(delete.body.is_none());
    }
}
