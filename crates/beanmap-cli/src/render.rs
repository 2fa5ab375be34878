//! Plain-text and JSON rendering of a [`ResultView`].

use std::fmt::{self, Write as _};

use beanmap_core::{CafeRecord, Page, ResultView};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct JsonView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_name: Option<&'a str>,
    #[serde(flatten)]
    pub view: &'a ResultView,
}

pub fn open_label(cafe: &CafeRecord) -> &'static str {
    match cafe.is_open() {
        Some(true) => "open",
        Some(false) => "closed",
        None => "hours unknown",
    }
}

fn render_card(out: &mut String, index: usize, cafe: &CafeRecord) -> fmt::Result {
    write!(
        out,
        "{index:>3}. {}  [{}]  {:.1}/5  {}",
        cafe.name(),
        cafe.specialty(),
        cafe.rating(),
        open_label(cafe)
    )?;
    if let Some(d) = cafe.distance_km() {
        write!(out, "  {d:.1} km")?;
    }
    out.push('\n');

    let details: Vec<&str> = [cafe.address(), cafe.hours(), cafe.phone()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !details.is_empty() {
        writeln!(out, "     {}", details.join(" | "))?;
    }
    if !cafe.description().is_empty() {
        writeln!(out, "     {}", cafe.description())?;
    }
    Ok(())
}

/// Render the current page, summary, and any notice as terminal text.
///
/// # Errors
///
/// Propagates [`fmt::Error`] from the underlying writes.
pub fn render_text(view: &ResultView, place_name: Option<&str>) -> Result<String, fmt::Error> {
    let mut out = String::new();

    if let Some(notice) = &view.notice {
        writeln!(out, "note: {notice}")?;
    }
    match (place_name, view.reference) {
        (Some(name), _) => writeln!(out, "Results near {name}")?,
        (None, Some(reference)) => writeln!(out, "Results near {reference}")?,
        (None, None) => {}
    }

    let filter = view
        .specialty
        .map_or_else(|| "all".to_string(), |s| s.to_string());
    writeln!(out, "filter: {filter}  sort: {}", view.sort)?;
    if !view.distance_sort_available {
        out.push_str("(no reference location; distance sort keeps list order)\n");
    }
    out.push('\n');

    match &view.page {
        Page::Empty => {
            out.push_str("No cafes match the current filter. Try another specialty or search area.\n");
            return Ok(out);
        }
        Page::Items { items, page, .. } => {
            let offset = page.saturating_sub(1) * beanmap_core::PAGE_SIZE;
            for (i, cafe) in items.iter().enumerate() {
                render_card(&mut out, offset + i + 1, cafe)?;
            }
            if items.is_empty() {
                out.push_str("(no results on this page)\n");
            }
        }
    }

    writeln!(
        out,
        "\n{} places  avg rating {:.1}  {} open now",
        view.summary.count, view.summary.average_rating, view.summary.open_count
    )?;
    writeln!(out, "page {}/{}", view.current_page, view.total_pages)?;
    Ok(out)
}
