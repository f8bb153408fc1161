//! # Query Pipeline
//!
//! Pure functions turning (records, state) into a [`ViewResult`]:
//!
//! ```text
//! records ─▶ filter ─▶ sort ─▶ paginate ─▶ ViewResult
//! ```
//!
//! Every run starts again from the full record set; there is no incremental
//! recomputation. Nothing here allocates beyond the filtered reference list
//! and the cloned page, and nothing here can fail.

use crate::model::Record;
use crate::state::{FilterState, ViewResult};

pub mod category;
pub mod filter;
pub mod paginate;
pub mod sort;

pub use category::{CategoryRule, CategoryTable};

/// Runs the whole pipeline. The returned page is already clamped into range.
pub fn evaluate(records: &[Record], state: &FilterState, categories: &CategoryTable) -> ViewResult {
    let mut matched = filter::filter_records(records, state, categories);
    sort::sort_records(&mut matched, state.sort_key());

    let page_size = state.page_size();
    let total_matches = matched.len();
    let total_pages = paginate::total_pages(total_matches, page_size);
    let page = paginate::clamp_page(state.page(), total_pages);

    let records = paginate::page_slice(&matched, page, page_size)
        .iter()
        .map(|record| (*record).clone())
        .collect();

    ViewResult {
        records,
        total_matches,
        total_pages,
        page,
        page_size,
    }
}
