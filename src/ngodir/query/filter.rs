//! Record filtering.
//!
//! Predicate groups are combined with AND; within a facet group a record
//! needs only one selected tag. Every predicate is total: absent optional
//! fields simply fail to match.

use super::category::CategoryTable;
use crate::model::Record;
use crate::state::{Category, FacetGroup, FilterState, RegionFilter};

/// Returns the records passing every active predicate, in input order.
pub fn filter_records<'a>(
    records: &'a [Record],
    state: &FilterState,
    categories: &CategoryTable,
) -> Vec<&'a Record> {
    let needle = state.search_text().to_lowercase();

    records
        .iter()
        .filter(|record| matches_search(record, &needle))
        .filter(|record| matches_region(record, state.region()))
        .filter(|record| matches_region_choices(record, state.region_choices()))
        .filter(|record| state.facets().matches(record))
        .filter(|record| matches_category(record, state.category(), categories))
        .filter(|record| !state.flagged_only() || record.is_flagged)
        .collect()
}

/// `needle` must already be lowercased; empty matches everything.
pub fn matches_search(record: &Record, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let hit = |text: &str| text.to_lowercase().contains(needle);

    hit(&record.name)
        || hit(&record.description)
        || hit(&record.location)
        || record.services.iter().any(|service| hit(service))
}

pub fn matches_region(record: &Record, region: &RegionFilter) -> bool {
    match region {
        RegionFilter::All => true,
        RegionFilter::Only(wanted) => record.region.as_deref() == Some(wanted.as_str()),
    }
}

/// Multi-select regions. Records without a region are never hidden here.
pub fn matches_region_choices(record: &Record, choices: &FacetGroup) -> bool {
    match &record.region {
        Some(region) => choices.matches(std::slice::from_ref(region)),
        None => true,
    }
}

/// Unmapped category names match nothing.
pub fn matches_category(record: &Record, category: &Category, table: &CategoryTable) -> bool {
    match category {
        Category::All => true,
        Category::Named(name) => table.get(name).is_some_and(|rule| rule.matches(record)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Facet;
    use crate::state::FacetSelections;

    fn records() -> Vec<Record> {
        vec![
            Record::new("1", "Legal Aid Collective")
                .with_location("Hyderabad")
                .with_region("Telangana")
                .with_services(["Legal"])
                .with_focus_groups(["women"]),
            Record::new("2", "Care Network")
                .with_description("Legal help and clinics")
                .with_location("Delhi")
                .with_region("Delhi")
                .with_services(["Legal", "Healthcare"])
                .with_focus_groups(["transgender"])
                .flagged(true),
            Record::new("3", "Open Doors")
                .with_services(["Housing"])
                .with_focus_groups(["women", "transgender"]),
        ]
    }

    fn state_for(records: &[Record]) -> FilterState {
        let services = records.iter().flat_map(|r| r.services.clone());
        let groups = records.iter().flat_map(|r| r.focus_groups.clone());
        let regions = records.iter().filter_map(|r| r.region.clone());
        FilterState::defaults(
            FacetSelections::new(FacetGroup::new(services), FacetGroup::new(groups)),
            6,
        )
        .with_region_choices(regions)
    }

    fn ids(matched: &[&Record]) -> Vec<String> {
        matched.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn default_state_keeps_everything() {
        let records = records();
        let state = state_for(&records);
        let out = filter_records(&records, &state, &CategoryTable::default());
        assert_eq!(ids(&out), ["1", "2", "3"]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let records = records();
        let mut state = state_for(&records);
        state.set_search_text("LEGAL");
        let out = filter_records(&records, &state, &CategoryTable::default());
        assert_eq!(ids(&out), ["1", "2"]);

        state.set_search_text("housing");
        let out = filter_records(&records, &state, &CategoryTable::default());
        assert_eq!(ids(&out), ["3"]);
    }

    #[test]
    fn region_filter_skips_records_without_region() {
        let records = records();
        let mut state = state_for(&records);
        state.set_region(RegionFilter::Only("Delhi".into()));
        let out = filter_records(&records, &state, &CategoryTable::default());
        assert_eq!(ids(&out), ["2"]);
    }

    #[test]
    fn region_choices_keep_records_without_region() {
        let records = records();
        let table = CategoryTable::default();
        let mut state = state_for(&records);

        state.toggle_region("Telangana");
        assert_eq!(ids(&filter_records(&records, &state, &table)), ["2", "3"]);

        state.select_regions(["Telangana", "Delhi"]);
        assert_eq!(ids(&filter_records(&records, &state, &table)), ["1", "2", "3"]);

        state.clear_regions();
        assert_eq!(filter_records(&records, &state, &table).len(), 3);
    }

    #[test]
    fn search_text_is_not_trimmed() {
        let records = records();
        let table = CategoryTable::default();
        let mut state = state_for(&records);

        state.set_search_text("doors");
        assert_eq!(ids(&filter_records(&records, &state, &table)), ["3"]);
        state.set_search_text("doors ");
        assert!(filter_records(&records, &state, &table).is_empty());
        state.set_search_text("aid ");
        assert_eq!(ids(&filter_records(&records, &state, &table)), ["1"]);
        state.set_search_text("   ");
        assert!(filter_records(&records, &state, &table).is_empty());
    }

    #[test]
    fn category_requires_mapped_service() {
        let records = records();
        let table = CategoryTable::default();
        let mut state = state_for(&records);

        state.set_category(Category::Named("healthcare".into()));
        assert_eq!(ids(&filter_records(&records, &state, &table)), ["2"]);

        state.set_category(Category::Named("legal".into()));
        assert_eq!(ids(&filter_records(&records, &state, &table)), ["1", "2"]);
    }

    #[test]
    fn unmapped_category_matches_nothing() {
        let records = records();
        let mut state = state_for(&records);
        state.set_category(Category::Named("astronomy".into()));
        assert!(filter_records(&records, &state, &CategoryTable::default()).is_empty());
    }

    #[test]
    fn facet_groups_or_within_and_across() {
        let records = records();
        let table = CategoryTable::default();
        let mut state = state_for(&records);

        state.select_facet_only(Facet::Services, ["Housing", "Healthcare"]);
        assert_eq!(ids(&filter_records(&records, &state, &table)), ["2", "3"]);

        state.select_facet_only(Facet::FocusGroups, ["women"]);
        assert_eq!(ids(&filter_records(&records, &state, &table)), ["3"]);
    }

    #[test]
    fn empty_facet_selection_is_not_empty_result() {
        let records = records();
        let mut state = state_for(&records);
        state.clear_facet(Facet::Services);
        state.clear_facet(Facet::FocusGroups);
        let out = filter_records(&records, &state, &CategoryTable::default());
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn flagged_only_keeps_flagged_records() {
        let records = records();
        let mut state = state_for(&records);
        state.set_flagged_only(true);
        let out = filter_records(&records, &state, &CategoryTable::default());
        assert_eq!(ids(&out), ["2"]);
    }

    #[test]
    fn sparse_records_do_not_fail_search() {
        let records = vec![Record::new("x", "Bare")];
        let mut state = state_for(&records);
        state.set_search_text("delhi");
        assert!(filter_records(&records, &state, &CategoryTable::default()).is_empty());
    }
}
