//! The list view controller.
//!
//! [`Controller`] owns the view state and the loaded dataset. Loads are split
//! in two so the UI can run the fetch on its own executor:
//!
//! 1. [`Controller::set_view`] / [`Controller::reload`] update the state and
//!    hand out a [`LoadTicket`] stamped with a fresh generation.
//! 2. The caller awaits [`LoadTicket::fetch`] and passes the result back to
//!    [`Controller::apply`], which drops it if a newer load has started since.
//!
//! [`Controller::open`] and [`Controller::refresh`] chain both steps for
//! callers that can hold the controller across an await.

use tracing::{debug, warn};

use crate::client::ResourceClient;
use crate::error::FetchError;
use crate::filter::{filter, Entity, Predicate};
use crate::gateway::Gateway;
use crate::models::Dataset;
use crate::paging::{self, page_slice, Pagination};
use crate::render::{self, ListScreen, Screen, Table};
use crate::view::{Portal, View, ViewState};

/// Where the active view's data stands.
#[derive(Clone, Debug, PartialEq)]
pub enum Load {
    Pending,
    Ready(Dataset),
    Failed(String),
    /// The requested view does not exist in this portal.
    Unknown(String),
}

/// A load in flight. Only the most recently issued ticket is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    view: View,
    portal: Portal,
}

impl LoadTicket {
    pub fn view(&self) -> View {
        self.view
    }

    pub async fn fetch<G: Gateway>(
        &self,
        client: &ResourceClient<G>,
    ) -> Result<Dataset, FetchError> {
        client.load(&self.portal, self.view).await
    }
}

#[derive(Clone, Debug)]
pub struct Controller {
    portal: Portal,
    state: ViewState,
    load: Load,
    generation: u64,
}

impl Controller {
    pub fn new(portal: Portal) -> Self {
        let home = portal.home();
        Self {
            portal,
            state: ViewState::new(home),
            load: Load::Pending,
            generation: 0,
        }
    }

    pub fn portal(&self) -> &Portal {
        &self.portal
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self) -> View {
        self.state.view()
    }

    pub fn load(&self) -> &Load {
        &self.load
    }

    /// The view on screen, or `None` while a "page not found" is shown.
    pub fn shown(&self) -> Option<View> {
        match self.load {
            Load::Unknown(_) => None,
            _ => Some(self.state.view()),
        }
    }

    /// Header text for the content area.
    pub fn heading(&self) -> &'static str {
        self.shown().map_or("Page not found", View::title)
    }

    fn ticket(&mut self) -> LoadTicket {
        self.generation += 1;
        self.load = Load::Pending;
        LoadTicket {
            generation: self.generation,
            view: self.state.view(),
            portal: self.portal.clone(),
        }
    }

    /// Switch views: page back to 1, search cleared, dataset dropped.
    pub fn set_view(&mut self, view: View) -> Option<LoadTicket> {
        if !self.portal.allows(view) {
            self.not_found(view.slug());
            return None;
        }
        debug!(%view, "switching view");
        self.state.reset(view);
        Some(self.ticket())
    }

    /// Open a view by its external name (`reports/customer` included).
    pub fn handle(&mut self, name: &str) -> Option<LoadTicket> {
        match View::parse(name) {
            Some(view) => self.set_view(view),
            None => {
                self.not_found(name);
                None
            }
        }
    }

    fn not_found(&mut self, name: &str) {
        warn!(name, "unknown view");
        // Any load still in flight belongs to the previous view.
        self.generation += 1;
        self.load = Load::Unknown(name.to_string());
    }

    /// Re-fetch the active view, keeping page and search term.
    pub fn reload(&mut self) -> Option<LoadTicket> {
        if matches!(self.load, Load::Unknown(_)) {
            return None;
        }
        debug!(view = %self.state.view(), page = self.state.page(), "reloading");
        Some(self.ticket())
    }

    /// Store the outcome of a load. Returns `false` when the ticket is stale
    /// and the result was discarded.
    pub fn apply(&mut self, ticket: &LoadTicket, result: Result<Dataset, FetchError>) -> bool {
        if ticket.generation != self.generation {
            warn!(
                view = %ticket.view,
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale load"
            );
            return false;
        }
        match result {
            Ok(dataset) => {
                self.load = Load::Ready(dataset);
                let page = paging::clamp_page(self.state.page(), self.total_pages());
                self.state.set_page(page);
            }
            Err(e) => {
                warn!(view = %ticket.view, "load failed: {e}");
                self.load = Load::Failed(e.to_string());
            }
        }
        true
    }

    /// Update the search term and go back to page 1. No network.
    pub fn set_search_term(&mut self, term: &str) {
        self.state.set_search_term(term);
    }

    /// Move to `page` if it exists; out-of-range requests are ignored.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages() {
            self.state.set_page(page);
            true
        } else {
            false
        }
    }

    /// Number of records surviving the search term.
    pub fn filtered_len(&self) -> usize {
        let Load::Ready(dataset) = &self.load else {
            return 0;
        };
        let predicate = Predicate::for_view(dataset.view());
        let term = self.state.search_term();
        match dataset {
            Dataset::Users(records) => filter(records, predicate, term).len(),
            Dataset::Clinics(records) => filter(records, predicate, term).len(),
            Dataset::Dentists(records) => filter(records, predicate, term).len(),
            Dataset::Appointments(records) => filter(records, predicate, term).len(),
            Dataset::Reports(records) => filter(records, predicate, term).len(),
            Dataset::Dashboard(_) | Dataset::VerificationQueue(_) => 0,
        }
    }

    pub fn total_pages(&self) -> usize {
        paging::total_pages(self.filtered_len())
    }

    fn list<R: Entity>(&self, records: &[R], table: impl Fn(&[&R]) -> Table) -> Screen {
        let view = self.state.view();
        let filtered = filter(records, Predicate::for_view(view), self.state.search_term());
        let pagination = Pagination::new(self.state.page(), filtered.len());
        Screen::List(ListScreen {
            view,
            table: table(page_slice(&filtered, pagination.page)),
            pagination,
            search_term: self.state.search_term().to_string(),
        })
    }

    /// Derive what to draw from the current state.
    pub fn screen(&self) -> Screen {
        match &self.load {
            Load::Pending => Screen::Loading,
            Load::Failed(message) => Screen::Failed {
                message: message.clone(),
            },
            Load::Unknown(name) => Screen::NotFound { name: name.clone() },
            Load::Ready(dataset) => match dataset {
                Dataset::Dashboard(stats) => render::dashboard(Some(stats)),
                Dataset::VerificationQueue(queue) => render::verification_queue(Some(queue)),
                Dataset::Users(records) => self.list(records, render::users_table),
                Dataset::Clinics(records) => self.list(records, render::clinics_table),
                Dataset::Dentists(records) => self.list(records, render::dentists_table),
                Dataset::Appointments(records) => self.list(records, |slice| {
                    render::appointments_table(slice, &self.portal)
                }),
                Dataset::Reports(records) => self.list(records, render::reports_table),
            },
        }
    }

    /// [`set_view`](Self::set_view) followed by the fetch.
    pub async fn open<G: Gateway>(&mut self, client: &ResourceClient<G>, view: View) -> bool {
        match self.set_view(view) {
            Some(ticket) => {
                let result = ticket.fetch(client).await;
                self.apply(&ticket, result)
            }
            None => false,
        }
    }

    /// [`reload`](Self::reload) followed by the fetch.
    pub async fn refresh<G: Gateway>(&mut self, client: &ResourceClient<G>) -> bool {
        match self.reload() {
            Some(ticket) => {
                let result = ticket.fetch(client).await;
                self.apply(&ticket, result)
            }
            None => false,
        }
    }
}
