//! # Directory Store
//!
//! Owns the canonical record set and the [`FilterState`] that queries it.
//!
//! ```text
//! Uninitialized ──load()──▶ Loaded ──(mutate state, recompute)*
//! ```
//!
//! `Loaded` is reached at most once per session: there is no hot reload of
//! the base records. Until then every recompute yields an empty view.

use crate::config::DirectoryConfig;
use crate::error::{DirectoryError, Result};
use crate::model::{Facet, Record, RecordId};
use crate::query::{self, CategoryTable};
use crate::source::SourceData;
use crate::state::{FacetGroup, FacetSelections, FilterState, ViewResult};
use std::collections::BTreeSet;

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Uninitialized,
    Loaded(LoadedSet),
}

#[derive(Debug)]
struct LoadedSet {
    records: Vec<Record>,
    regions: Vec<String>,
}

/// Facet vocabularies imposed by configuration instead of derived from data.
#[derive(Debug, Clone, Default)]
pub struct FixedFacets {
    pub services: Option<Vec<String>>,
    pub focus_groups: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct Directory {
    phase: Phase,
    state: FilterState,
    categories: CategoryTable,
    fixed: FixedFacets,
}

impl Directory {
    pub fn new(page_size: usize, categories: CategoryTable, fixed: FixedFacets) -> Self {
        Self {
            phase: Phase::Uninitialized,
            state: FilterState::defaults(FacetSelections::empty(), page_size),
            categories,
            fixed,
        }
    }

    pub fn from_config(config: &DirectoryConfig) -> Self {
        Self::new(
            config.page_size,
            config.categories.clone(),
            FixedFacets {
                services: config.services.clone(),
                focus_groups: config.focus_groups.clone(),
            },
        )
    }

    /// Installs the record set. Accepted once; the state restarts from defaults.
    pub fn load(&mut self, data: SourceData) -> Result<()> {
        if self.is_loaded() {
            return Err(DirectoryError::AlreadyLoaded);
        }
        crate::source::normalize::check_unique(&data.records)?;

        let services = match &self.fixed.services {
            Some(values) => FacetGroup::new(values.clone()),
            None => FacetGroup::new(
                data.records
                    .iter()
                    .flat_map(|r| r.services.iter().cloned())
                    .chain(data.declared_services.iter().cloned()),
            ),
        };
        let focus_groups = match &self.fixed.focus_groups {
            Some(values) => FacetGroup::new(values.clone()),
            None => FacetGroup::new(
                data.records
                    .iter()
                    .flat_map(|r| r.focus_groups.iter().cloned()),
            ),
        };

        let regions: BTreeSet<String> = data
            .records
            .iter()
            .filter_map(|r| r.region.clone())
            .collect();

        self.state = FilterState::defaults(
            FacetSelections::new(services, focus_groups),
            self.state.page_size(),
        )
        .with_region_choices(regions.iter().cloned());
        self.phase = Phase::Loaded(LoadedSet {
            records: data.records,
            regions: regions.into_iter().collect(),
        });
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.phase, Phase::Loaded(_))
    }

    pub fn records(&self) -> &[Record] {
        match &self.phase {
            Phase::Loaded(set) => &set.records,
            Phase::Uninitialized => &[],
        }
    }

    pub fn record(&self, id: &RecordId) -> Option<&Record> {
        self.records().iter().find(|r| &r.id == id)
    }

    /// Distinct regions present in the records, sorted.
    pub fn regions(&self) -> &[String] {
        match &self.phase {
            Phase::Loaded(set) => &set.regions,
            Phase::Uninitialized => &[],
        }
    }

    /// Regions whose name contains `text`, ignoring case; empty text lists all.
    pub fn regions_matching(&self, text: &str) -> Vec<&str> {
        let needle = text.to_lowercase();
        self.regions()
            .iter()
            .filter(|region| region.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    pub fn facet_values(&self, facet: Facet) -> &[String] {
        self.state.facets().group(facet).values()
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FilterState {
        &mut self.state
    }

    /// Filter, sort and paginate from the full record set.
    ///
    /// A page left out of range by the last mutation is written back as 1.
    pub fn recompute(&mut self) -> ViewResult {
        let Phase::Loaded(set) = &self.phase else {
            return ViewResult::empty(self.state.page_size());
        };

        let view = query::evaluate(&set.records, &self.state, &self.categories);
        if view.page != self.state.page() {
            tracing::debug!(
                requested = self.state.page(),
                total_pages = view.total_pages,
                "page out of range, back to first page"
            );
            self.state.set_page(view.page);
        }
        tracing::debug!(
            matches = view.total_matches,
            page = view.page,
            pages = view.total_pages,
            "recomputed view"
        );
        view
    }

    /// Back to default filters; the record set stays as loaded.
    pub fn reset(&mut self) -> ViewResult {
        self.state.reset();
        self.recompute()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::fixtures::SourceFixture;
    use crate::state::RegionFilter;

    fn loaded(count: usize) -> Directory {
        let mut directory = Directory::new(6, CategoryTable::default(), FixedFacets::default());
        let records = SourceFixture::new().with_records(count).records().to_vec();
        directory.load(SourceData::from_records(records)).unwrap();
        directory
    }

    #[test]
    fn uninitialized_directory_yields_empty_view() {
        let mut directory =
            Directory::new(6, CategoryTable::default(), FixedFacets::default());
        let view = directory.recompute();
        assert!(view.is_empty());
        assert!(directory.regions().is_empty());
    }

    #[test]
    fn loads_only_once() {
        let mut directory = loaded(2);
        let err = directory.load(SourceData::default()).unwrap_err();
        assert!(matches!(err, DirectoryError::AlreadyLoaded));
        assert_eq!(directory.records().len(), 2);
    }

    #[test]
    fn tightening_filter_returns_to_first_page() {
        let mut directory = loaded(15);
        directory.state_mut().set_page(3);
        let view = directory.recompute();
        assert_eq!(view.page, 3);
        assert_eq!(view.total_pages, 3);

        directory.state_mut().set_search_text("Org 15");
        let view = directory.recompute();
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.page, 1);
        assert_eq!(directory.state().page(), 1);
    }

    #[test]
    fn stale_page_is_written_back() {
        let mut directory = loaded(4);
        directory.state_mut().set_page(5);
        directory.recompute();
        assert_eq!(directory.state().page(), 1);
    }

    #[test]
    fn derives_vocabularies_from_records() {
        let mut directory = Directory::new(6, CategoryTable::default(), FixedFacets::default());
        let records = vec![
            Record::new("1", "A")
                .with_region("Kerala")
                .with_services(["Legal"]),
            Record::new("2", "B")
                .with_region("Delhi")
                .with_services(["Housing", "legal"]),
        ];
        directory
            .load(SourceData {
                records,
                declared_services: vec!["Education".to_string()],
            })
            .unwrap();

        assert_eq!(directory.regions(), ["Delhi".to_string(), "Kerala".to_string()]);
        assert_eq!(
            directory.facet_values(Facet::Services),
            ["Education".to_string(), "Housing".to_string(), "Legal".to_string()]
        );
    }

    #[test]
    fn region_list_search_and_choices() {
        let mut directory = Directory::new(6, CategoryTable::default(), FixedFacets::default());
        directory
            .load(SourceData::from_records(vec![
                Record::new("1", "A").with_region("Tamil Nadu"),
                Record::new("2", "B").with_region("Nagaland"),
                Record::new("3", "C").with_region("Delhi"),
                Record::new("4", "D"),
            ]))
            .unwrap();

        assert_eq!(directory.regions_matching("NA"), ["Nagaland", "Tamil Nadu"]);
        assert_eq!(directory.regions_matching("").len(), 3);
        assert!(directory.regions_matching("goa").is_empty());

        assert_eq!(directory.state().region_choices().selected_count(), 3);
        directory.state_mut().select_regions(["Delhi"]);
        let view = directory.recompute();
        assert_eq!(view.total_matches, 2);
    }

    #[test]
    fn fixed_facets_override_data() {
        let fixed = FixedFacets {
            services: Some(vec!["Housing".to_string()]),
            focus_groups: None,
        };
        let mut directory = Directory::new(6, CategoryTable::default(), fixed);
        directory
            .load(SourceData::from_records(vec![
                Record::new("1", "A").with_services(["Legal"])
            ]))
            .unwrap();
        assert_eq!(directory.facet_values(Facet::Services), ["Housing".to_string()]);
    }

    #[test]
    fn reset_keeps_records() {
        let mut directory = loaded(8);
        directory
            .state_mut()
            .set_region(RegionFilter::Only("Nowhere".into()));
        assert!(directory.recompute().is_empty());

        let view = directory.reset();
        assert_eq!(view.total_matches, 8);
        assert_eq!(directory.records().len(), 8);
    }
}
