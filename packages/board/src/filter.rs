//! Free-text search over the loaded records.
//!
//! Each record type lists its searchable fields through [`Entity`]. A
//! [`Predicate`] is resolved from the view (or an external view name) and
//! OR-combines a case-insensitive substring test across those fields. Missing
//! fields never match and never fail.

use std::borrow::Cow;

use crate::models::{Appointment, Clinic, Dentist, Report, User};
use crate::view::View;

/// Record type behind a listing view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Clinic,
    Dentist,
    Appointment,
    Report,
}

/// A record that can be listed, searched and acted on.
pub trait Entity {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    /// Values tested against the search term, `None` for absent columns.
    fn search_fields(&self) -> Vec<Option<Cow<'_, str>>>;

    /// `lower_term` must already be lowercase.
    fn matches(&self, lower_term: &str) -> bool {
        self.search_fields()
            .into_iter()
            .flatten()
            .any(|value| value.to_lowercase().contains(lower_term))
    }
}

fn field(value: &Option<String>) -> Option<Cow<'_, str>> {
    value.as_deref().map(Cow::Borrowed)
}

fn owned(value: String) -> Option<Cow<'static, str>> {
    (!value.is_empty()).then_some(Cow::Owned(value))
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> &str {
        &self.user_id
    }

    fn search_fields(&self) -> Vec<Option<Cow<'_, str>>> {
        vec![
            field(&self.first_name),
            field(&self.last_name),
            field(&self.email),
            Some(Cow::Borrowed(self.user_id.as_str())),
            field(&self.phone_number),
            Some(Cow::Borrowed(self.role.as_str())),
        ]
    }
}

impl Entity for Clinic {
    const KIND: EntityKind = EntityKind::Clinic;

    fn id(&self) -> &str {
        &self.clinic_id
    }

    fn search_fields(&self) -> Vec<Option<Cow<'_, str>>> {
        vec![
            field(&self.name),
            field(&self.address),
            field(&self.email),
            Some(Cow::Borrowed(self.clinic_id.as_str())),
        ]
    }
}

impl Entity for Dentist {
    const KIND: EntityKind = EntityKind::Dentist;

    fn id(&self) -> &str {
        &self.user_id
    }

    fn search_fields(&self) -> Vec<Option<Cow<'_, str>>> {
        vec![
            field(&self.first_name),
            field(&self.last_name),
            field(&self.email),
            field(&self.specialization),
            Some(Cow::Borrowed(self.user_id.as_str())),
        ]
    }
}

impl Entity for Appointment {
    const KIND: EntityKind = EntityKind::Appointment;

    fn id(&self) -> &str {
        &self.appointment_id
    }

    fn search_fields(&self) -> Vec<Option<Cow<'_, str>>> {
        vec![
            field(&self.cust_first),
            field(&self.cust_last),
            field(&self.dent_first),
            field(&self.dent_last),
            field(&self.clinic_name),
            owned(self.service_names()),
            field(&self.status),
        ]
    }
}

impl Entity for Report {
    const KIND: EntityKind = EntityKind::Report;

    fn id(&self) -> &str {
        &self.report_id
    }

    fn search_fields(&self) -> Vec<Option<Cow<'_, str>>> {
        vec![
            field(&self.reason),
            field(&self.status),
            field(&self.reporter_id),
            self.reported_id().map(Cow::Borrowed),
        ]
    }
}

/// The search test for one view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Predicate {
    /// Views without searchable records, and unknown view names.
    MatchAll,
    Fields(EntityKind),
}

impl Predicate {
    pub fn for_view(view: View) -> Self {
        view.entity().map_or(Predicate::MatchAll, Predicate::Fields)
    }

    /// Unknown names yield [`Predicate::MatchAll`].
    pub fn for_name(name: &str) -> Self {
        View::parse(name).map_or(Predicate::MatchAll, Predicate::for_view)
    }

    pub fn test<R: Entity>(&self, record: &R, lower_term: &str) -> bool {
        match self {
            Predicate::MatchAll => true,
            Predicate::Fields(kind) => {
                debug_assert_eq!(*kind, R::KIND, "predicate applied to the wrong record type");
                record.matches(lower_term)
            }
        }
    }
}

/// Records matching `term`, in their original order.
///
/// Only the empty term keeps every record. Whitespace is part of the term.
pub fn filter<'a, R: Entity>(records: &'a [R], predicate: Predicate, term: &str) -> Vec<&'a R> {
    let lower = term.to_lowercase();
    if lower.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| predicate.test(*record, &lower))
        .collect()
}
