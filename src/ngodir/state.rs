//! # Query State
//!
//! [`FilterState`] is the single owned object holding every query parameter
//! that drives the pipeline. UI event handlers are its only mutators, and
//! every mutation except [`FilterState::set_page`] sends the user back to
//! page 1.
//!
//! [`ViewResult`] is the derived output of one pipeline run. It is never
//! stored; the directory rebuilds it from (records, state) on every change.

use crate::error::{DirectoryError, Result};
use crate::model::{Facet, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionFilter {
    #[default]
    All,
    Only(String),
}

impl RegionFilter {
    /// Parses user input; empty text and "all" both mean no constraint.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() || input.eq_ignore_ascii_case("all") {
            RegionFilter::All
        } else {
            RegionFilter::Only(input.to_string())
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[default]
    All,
    Named(String),
}

impl Category {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() || input.eq_ignore_ascii_case("all") {
            Category::All
        } else {
            Category::Named(input.to_lowercase())
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::All => f.write_str("all"),
            Category::Named(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    Location,
    Region,
    ServiceCount,
}

impl SortKey {
    pub fn name(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Location => "location",
            SortKey::Region => "region",
            SortKey::ServiceCount => "services",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "location" => Ok(SortKey::Location),
            "region" | "state" => Ok(SortKey::Region),
            "services" | "service-count" | "service_count" => Ok(SortKey::ServiceCount),
            other => Err(DirectoryError::Config(format!("unknown sort key '{}'", other))),
        }
    }
}

/// Selection state of one facet group.
///
/// Values are kept for display; membership checks are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetGroup {
    values: Vec<String>,
    selected: BTreeSet<String>,
}

fn key(value: &str) -> String {
    value.trim().to_lowercase()
}

impl FacetGroup {
    /// Builds a group with every value selected.
    pub fn new<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let mut values: Vec<String> = values
            .into_iter()
            .map(Into::into)
            .filter(|v| !v.trim().is_empty() && seen.insert(key(v)))
            .collect();
        values.sort_by_key(|v| key(v));
        let selected = seen;
        Self { values, selected }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.contains(&key(value))
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Flips one value; returns whether it is selected afterwards.
    pub fn toggle(&mut self, value: &str) -> bool {
        let k = key(value);
        if self.selected.remove(&k) {
            false
        } else {
            self.selected.insert(k);
            true
        }
    }

    pub fn select_only<I, T>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.selected = values.into_iter().map(|v| key(v.as_ref())).collect();
    }

    pub fn select_all(&mut self) {
        self.selected = self.values.iter().map(|v| key(v)).collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// No selections, or every known value selected: the group filters nothing.
    pub fn is_unconstrained(&self) -> bool {
        self.selected.is_empty() || self.values.iter().all(|v| self.selected.contains(&key(v)))
    }

    /// OR within the group: any tag among the selected values passes.
    pub fn matches(&self, tags: &[String]) -> bool {
        if self.is_unconstrained() {
            return true;
        }
        tags.iter().any(|tag| self.selected.contains(&key(tag)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetSelections {
    services: FacetGroup,
    focus_groups: FacetGroup,
}

impl FacetSelections {
    pub fn new(services: FacetGroup, focus_groups: FacetGroup) -> Self {
        Self {
            services,
            focus_groups,
        }
    }

    pub fn empty() -> Self {
        Self::new(
            FacetGroup::new(Vec::<String>::new()),
            FacetGroup::new(Vec::<String>::new()),
        )
    }

    pub fn group(&self, facet: Facet) -> &FacetGroup {
        match facet {
            Facet::Services => &self.services,
            Facet::FocusGroups => &self.focus_groups,
        }
    }

    pub fn group_mut(&mut self, facet: Facet) -> &mut FacetGroup {
        match facet {
            Facet::Services => &mut self.services,
            Facet::FocusGroups => &mut self.focus_groups,
        }
    }

    /// AND across groups.
    pub fn matches(&self, record: &Record) -> bool {
        Facet::all()
            .iter()
            .all(|facet| self.group(*facet).matches(record.tags(*facet)))
    }

    fn select_all(&mut self) {
        self.services.select_all();
        self.focus_groups.select_all();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    search_text: String,
    region: RegionFilter,
    facets: FacetSelections,
    regions: FacetGroup,
    flagged_only: bool,
    category: Category,
    sort_key: SortKey,
    page: usize,
    page_size: usize,
}

impl FilterState {
    /// Initial state: everything visible, sorted by name, first page.
    pub fn defaults(facets: FacetSelections, page_size: usize) -> Self {
        let mut state = Self {
            search_text: String::new(),
            region: RegionFilter::All,
            facets,
            regions: FacetGroup::new(Vec::<String>::new()),
            flagged_only: false,
            category: Category::All,
            sort_key: SortKey::Name,
            page: 1,
            page_size: page_size.max(1),
        };
        state.facets.select_all();
        state
    }

    /// Installs the multi-select region choices, all of them selected.
    pub fn with_region_choices<I, T>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.regions = FacetGroup::new(regions);
        self
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn region(&self) -> &RegionFilter {
        &self.region
    }

    pub fn facets(&self) -> &FacetSelections {
        &self.facets
    }

    /// Multi-select region group; independent of [`FilterState::region`].
    pub fn region_choices(&self) -> &FacetGroup {
        &self.regions
    }

    pub fn flagged_only(&self) -> bool {
        self.flagged_only
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
    }

    pub fn set_region(&mut self, region: RegionFilter) {
        self.region = region;
        self.page = 1;
    }

    pub fn toggle_region(&mut self, region: &str) -> bool {
        self.page = 1;
        self.regions.toggle(region)
    }

    pub fn select_regions<I, T>(&mut self, regions: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.regions.select_only(regions);
        self.page = 1;
    }

    pub fn clear_regions(&mut self) {
        self.regions.clear();
        self.page = 1;
    }

    pub fn toggle_facet(&mut self, facet: Facet, value: &str) -> bool {
        self.page = 1;
        self.facets.group_mut(facet).toggle(value)
    }

    pub fn select_facet_only<I, T>(&mut self, facet: Facet, values: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.facets.group_mut(facet).select_only(values);
        self.page = 1;
    }

    pub fn clear_facet(&mut self, facet: Facet) {
        self.facets.group_mut(facet).clear();
        self.page = 1;
    }

    pub fn set_flagged_only(&mut self, flagged_only: bool) {
        self.flagged_only = flagged_only;
        self.page = 1;
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.page = 1;
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.sort_key = sort_key;
        self.page = 1;
    }

    /// The only mutation that keeps the user on a page other than 1.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn reset(&mut self) {
        let facets = self.facets.clone();
        let mut regions = self.regions.clone();
        regions.select_all();
        *self = Self::defaults(facets, self.page_size);
        self.regions = regions;
    }
}

/// One page of matches plus the counts a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewResult {
    pub records: Vec<Record>,
    pub total_matches: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

impl ViewResult {
    pub fn empty(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            total_matches: 0,
            total_pages: 0,
            page: 1,
            page_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_matches == 0
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}
