//! Result view state and its reducer.
//!
//! Presentation layers hold a [`ViewState`], feed user actions through
//! [`reduce`], and render only from [`ViewState::derived`]. The working list
//! is rebuilt from the full list on every source, filter, or sort change.

use serde::Serialize;

use crate::cafe::{CafeRecord, Coordinates, SortKey, Specialty};
use crate::distance::apply_reference;
use crate::pipeline::{filter_by_specialty, sort_cafes, summarize, total_pages, Page, Summary};

/// Something the user should be told about the current result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// Geocoding returned no match; showing the default area instead.
    LookupNotFound { query: String },
    /// Geocoding failed outright; showing the default area instead.
    LookupFailed { query: String },
    /// Device location could not be obtained; distances are omitted.
    LocationUnavailable { reason: String },
    /// The place search backend failed; showing the default area instead.
    SearchFailed,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::LookupNotFound { query } => {
                write!(f, "no location found for \"{query}\"; showing the default area")
            }
            Notice::LookupFailed { query } => {
                write!(f, "could not look up \"{query}\"; showing the default area")
            }
            Notice::LocationUnavailable { reason } => {
                write!(f, "current location unavailable ({reason}); distances omitted")
            }
            Notice::SearchFailed => write!(f, "place search failed; showing the default area"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    /// A search finished. Replaces the full list wholesale.
    ResultsLoaded {
        cafes: Vec<CafeRecord>,
        reference: Option<Coordinates>,
        notice: Option<Notice>,
    },
    SpecialtyChanged(Option<Specialty>),
    SortChanged(SortKey),
    PageRequested(usize),
    /// The reference location is no longer trusted; drop all distances.
    ReferenceLost,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    cafes: Vec<CafeRecord>,
    filtered: Vec<CafeRecord>,
    reference: Option<Coordinates>,
    specialty: Option<Specialty>,
    sort: SortKey,
    page: usize,
    notice: Option<Notice>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            cafes: Vec::new(),
            filtered: Vec::new(),
            reference: None,
            specialty: None,
            sort: SortKey::default(),
            page: 1,
            notice: None,
        }
    }
}

impl ViewState {
    /// The full, unfiltered result set.
    #[must_use]
    pub fn cafes(&self) -> &[CafeRecord] {
        &self.cafes
    }

    /// The filtered and sorted working list.
    #[must_use]
    pub fn filtered(&self) -> &[CafeRecord] {
        &self.filtered
    }

    #[must_use]
    pub fn reference(&self) -> Option<Coordinates> {
        self.reference
    }

    #[must_use]
    pub fn specialty(&self) -> Option<Specialty> {
        self.specialty
    }

    #[must_use]
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Everything a presentation layer needs to draw the current state.
    #[must_use]
    pub fn derived(&self) -> ResultView {
        ResultView {
            page: Page::from_results(&self.filtered, self.page),
            summary: summarize(&self.filtered),
            current_page: self.page,
            total_pages: total_pages(self.filtered.len()),
            reference: self.reference,
            specialty: self.specialty,
            sort: self.sort,
            distance_sort_available: self.reference.is_some(),
            notice: self.notice.clone(),
        }
    }

    fn rebuild(mut self) -> Self {
        let filtered = filter_by_specialty(&self.cafes, self.specialty);
        self.filtered = sort_cafes(filtered, self.sort);
        self
    }
}

/// Render-ready projection of a [`ViewState`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub page: Page,
    pub summary: Summary,
    pub current_page: usize,
    pub total_pages: usize,
    pub reference: Option<Coordinates>,
    pub specialty: Option<Specialty>,
    pub sort: SortKey,
    /// `false` when no reference location is set; distance sort then keeps
    /// the filtered order, so front ends should disable the option.
    pub distance_sort_available: bool,
    pub notice: Option<Notice>,
}

/// Apply one user or system action to the view state.
#[must_use]
pub fn reduce(state: ViewState, action: Action) -> ViewState {
    match action {
        Action::ResultsLoaded {
            cafes,
            reference,
            notice,
        } => ViewState {
            cafes: apply_reference(cafes, reference),
            filtered: Vec::new(),
            reference,
            page: 1,
            notice,
            ..state
        }
        .rebuild(),
        Action::SpecialtyChanged(specialty) => ViewState {
            specialty,
            page: 1,
            ..state
        }
        .rebuild(),
        Action::SortChanged(sort) => ViewState {
            sort,
            page: 1,
            ..state
        }
        .rebuild(),
        Action::PageRequested(requested) => {
            let last = total_pages(state.filtered.len()).max(1);
            ViewState {
                page: requested.clamp(1, last),
                ..state
            }
        }
        Action::ReferenceLost => {
            let cafes = apply_reference(state.cafes, None);
            ViewState {
                cafes,
                filtered: Vec::new(),
                reference: None,
                ..state
            }
            .rebuild()
        }
    }
}
