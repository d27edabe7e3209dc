mod admin;
pub use admin::{AdminCustomerReports, AdminPortal, AdminPortalView};

mod dentist;
pub use dentist::DentistPortal;
