//! Filter, sort, paginate, and summarize stages over an in-memory cafe list.
//!
//! Each stage is a pure function of its inputs. The working list is always
//! rebuilt from the full list rather than patched in place:
//!
//! ```text
//! cafes ──filter_by_specialty──▶ filtered ──sort_cafes──▶ sorted ──paginate──▶ page
//!                                    │
//!                                    └──summarize──▶ Summary
//! ```

use serde::Serialize;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::cafe::{CafeRecord, SortKey, Specialty};

/// Cards per results page.
pub const PAGE_SIZE: usize = 9;

/// Keep only records whose specialty matches `selector`, preserving order.
/// `None` keeps everything.
#[must_use]
pub fn filter_by_specialty(cafes: &[CafeRecord], selector: Option<Specialty>) -> Vec<CafeRecord> {
    match selector {
        Some(wanted) => cafes
            .iter()
            .filter(|c| c.specialty() == wanted)
            .cloned()
            .collect(),
        None => cafes.to_vec(),
    }
}

/// Stable sort by `key`.
///
/// - `Distance`: ascending. Leaves the order untouched unless every record
///   carries a distance, i.e. a reference location is set.
/// - `Name`: ascending, case-insensitive.
/// - `Rating`: descending.
#[must_use]
pub fn sort_cafes(mut cafes: Vec<CafeRecord>, key: SortKey) -> Vec<CafeRecord> {
    match key {
        SortKey::Distance => {
            if cafes.iter().all(|c| c.distance_km().is_some()) {
                cafes.sort_by(|a, b| {
                    let da = a.distance_km().unwrap_or(f64::INFINITY);
                    let db = b.distance_km().unwrap_or(f64::INFINITY);
                    da.total_cmp(&db)
                });
            }
        }
        SortKey::Name => {
            cafes.sort_by_cached_key(|c| (name_key(c.name()), c.name().trim().to_string()));
        }
        SortKey::Rating => cafes.sort_by(|a, b| b.rating().total_cmp(&a.rating())),
    }
    cafes
}

/// Accent- and case-folded collation key: "Éclair" files under E, not after
/// Z. Leading articles are kept, so "The Roasted Bean" sorts under T.
fn name_key(name: &str) -> String {
    name.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Number of pages needed for `count` results. Zero results means zero pages.
#[must_use]
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// The 1-indexed `page` of `cafes`, clipped to list bounds.
///
/// Page 0 and pages past the end yield an empty slice; clamping is the
/// caller's job.
#[must_use]
pub fn paginate(cafes: &[CafeRecord], page: usize) -> &[CafeRecord] {
    let Some(zero_based) = page.checked_sub(1) else {
        return &[];
    };
    let start = zero_based.saturating_mul(PAGE_SIZE);
    if start >= cafes.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(cafes.len());
    &cafes[start..end]
}

/// One rendered page of results, or the empty-state signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Page {
    /// The filtered list has no results at all.
    Empty,
    Items {
        items: Vec<CafeRecord>,
        page: usize,
        total_pages: usize,
    },
}

impl Page {
    /// Build the view of `page` over an already filtered and sorted list.
    #[must_use]
    pub fn from_results(sorted: &[CafeRecord], page: usize) -> Self {
        if sorted.is_empty() {
            return Page::Empty;
        }
        Page::Items {
            items: paginate(sorted, page).to_vec(),
            page,
            total_pages: total_pages(sorted.len()),
        }
    }

    #[must_use]
    pub fn items(&self) -> &[CafeRecord] {
        match self {
            Page::Empty => &[],
            Page::Items { items, .. } => items,
        }
    }

    #[must_use]
    pub fn is_empty_state(&self) -> bool {
        matches!(self, Page::Empty)
    }
}

/// Statistics over the filtered (not paginated) list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    /// Mean rating rounded to one decimal; `0.0` for an empty list.
    pub average_rating: f64,
    /// Records known to be open. Unknown status is never counted.
    pub open_count: usize,
}

#[must_use]
pub fn summarize(filtered: &[CafeRecord]) -> Summary {
    let count = filtered.len();
    let open_count = filtered
        .iter()
        .filter(|c| c.is_open() == Some(true))
        .count();

    let average_rating = if count == 0 {
        0.0
    } else {
        let total: f64 = filtered.iter().map(CafeRecord::rating).sum();
        #[allow(clippy::cast_precision_loss)]
        let mean = total / count as f64;
        (mean * 10.0).round() / 10.0
    };

    Summary {
        count,
        average_rating,
        open_count,
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
