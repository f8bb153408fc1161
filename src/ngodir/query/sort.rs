use crate::model::Record;
use crate::state::SortKey;
use std::cmp::Ordering;

/// Orders records in place. Always stable: equal keys keep input order.
pub fn sort_records(records: &mut [&Record], key: SortKey) {
    match key {
        SortKey::Name => records.sort_by(|a, b| collate(&a.name, &b.name)),
        SortKey::Location => records.sort_by(|a, b| collate(&a.location, &b.location)),
        SortKey::Region => records.sort_by(|a, b| {
            collate(
                a.region.as_deref().unwrap_or(""),
                b.region.as_deref().unwrap_or(""),
            )
        }),
        SortKey::ServiceCount => records.sort_by(|a, b| b.services.len().cmp(&a.services.len())),
    }
}

/// Case-folded comparison first; among case variants lowercase sorts first.
///
/// Folding is by code point, so accented letters sort after `z` rather than
/// next to their base letter.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
