//! # board: the clinic dashboard list-view engine
//!
//! Everything here is UI-agnostic and runs the same on wasm and native.
//!
//! | Module | Role |
//! |--------|------|
//! | [`client`] | [`ResourceClient`] decodes gateway JSON into records |
//! | [`filter`] | per-entity search predicates |
//! | [`paging`] | page arithmetic |
//! | [`controller`] | [`Controller`]: view state, loads, stale-result guard |
//! | [`render`] | pure table and screen models |
//! | [`actions`] | control dispatch and confirmed mutations |
//! | [`edit`] | edit dialog state machine and forms |
//! | [`session`] | `/me` role check and logout |
//! | [`config`] | `dashboard.toml` |

pub mod actions;
pub mod client;
pub mod config;
pub mod controller;
pub mod edit;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod models;
pub mod paging;
pub mod render;
pub mod session;
pub mod view;

mod de;
mod memory;
pub use memory::{Call, MemoryGateway};

pub use actions::{dispatch, execute, perform, Command, Confirmed, ControlRole, Dispatch, PendingAction};
pub use client::ResourceClient;
pub use config::DashboardConfig;
pub use controller::{Controller, Load, LoadTicket};
pub use edit::{EditForm, EditSession, EditTarget, FieldValue, SaveOutcome};
pub use error::{AuthError, FetchError, ValidationError};
pub use gateway::{Endpoint, Gateway, Method, Mutation, Resource};
pub use models::{Dataset, Role};
pub use render::Screen;
pub use session::Me;
pub use view::{Portal, View, ViewState, PAGE_SIZE};
