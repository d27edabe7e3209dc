//! Typed access to the backend collections.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::FetchError;
use crate::gateway::{Endpoint, Gateway, Method, Mutation, Resource};
use crate::models::{Appointment, Clinic, Dataset, Dentist, UserDetail};
use crate::session::Me;
use crate::view::{Portal, View};

/// Wraps a [`Gateway`] and decodes its JSON into records.
#[derive(Clone, Debug, Default)]
pub struct ResourceClient<G> {
    gateway: G,
}

impl<G: Gateway> ResourceClient<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint<'_>) -> Result<T, FetchError> {
        let path = endpoint.path();
        let value = self.gateway.request(Method::Get, &path, None).await?;
        serde_json::from_value(value).map_err(|e| {
            FetchError::Decode(format!("{path}: {e}"))
        })
    }

    /// Fetch the dataset behind `view` for this portal.
    pub async fn load(&self, portal: &Portal, view: View) -> Result<Dataset, FetchError> {
        debug!(%view, "fetching dataset");
        let endpoint = match portal {
            Portal::Admin => Endpoint::Listing(view),
            Portal::Dentist { dentist_id } => Endpoint::DentistAppointments { dentist_id },
        };
        let dataset = match view {
            View::Dashboard => Dataset::Dashboard(self.get(endpoint).await?),
            View::Users => Dataset::Users(self.get(endpoint).await?),
            View::Clinics => Dataset::Clinics(self.get(endpoint).await?),
            View::Dentists => Dataset::Dentists(self.get(endpoint).await?),
            View::Appointments => Dataset::Appointments(self.get(endpoint).await?),
            View::Reports => Dataset::Reports(self.get(endpoint).await?),
            View::VerificationQueue => Dataset::VerificationQueue(self.get(endpoint).await?),
        };
        Ok(dataset)
    }

    pub async fn user(&self, id: &str) -> Result<UserDetail, FetchError> {
        self.get(Endpoint::Record {
            resource: Resource::User,
            id,
        })
        .await
    }

    pub async fn appointment(&self, id: &str) -> Result<Appointment, FetchError> {
        self.get(Endpoint::Record {
            resource: Resource::Appointment,
            id,
        })
        .await
    }

    pub async fn dentists(&self) -> Result<Vec<Dentist>, FetchError> {
        self.get(Endpoint::Listing(View::Dentists)).await
    }

    pub async fn clinics(&self) -> Result<Vec<Clinic>, FetchError> {
        self.get(Endpoint::Listing(View::Clinics)).await
    }

    pub async fn me(&self) -> Result<Me, FetchError> {
        self.get(Endpoint::Me).await
    }

    pub async fn logout(&self) -> Result<(), FetchError> {
        self.gateway
            .request(Method::Post, &Endpoint::Logout.path(), None)
            .await
            .map(|_| ())
    }

    pub async fn mutate(&self, mutation: &Mutation) -> Result<Value, FetchError> {
        debug!(method = %mutation.method, path = %mutation.path, "sending mutation");
        self.gateway
            .request(mutation.method, &mutation.path, mutation.body.as_ref())
            .await
    }
}
