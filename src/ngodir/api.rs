//! # API Facade
//!
//! The API layer is a **thin facade** over the directory store. It is the single
//! entry point for every UI, whatever it renders to.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Loads** the record set once from its [`DataSource`], falling back to the
//!   built-in sample set (or nothing) when the source fails
//! - **Maps user events** 1:1 onto [`FilterState`] mutations, each followed by a
//!   recompute
//! - **Debounces** typed search text so a burst of keystrokes runs the
//!   pipeline once
//! - **Returns structured types** ([`ViewResult`], [`LoadReport`])
//!
//! ## What the API Does NOT Do
//!
//! - **Query logic**: That belongs in `query/*.rs`
//! - **I/O beyond the source**: No stdout, stderr, or formatting
//! - **Retries**: A failed load is reported once and never retried
//!
//! ## Generic Over DataSource
//!
//! `DirectoryApi<S: DataSource>` is generic over where records come from:
//! - Production: `DirectoryApi<FileSource>`
//! - Testing: `DirectoryApi<InMemorySource>`

use crate::config::DirectoryConfig;
use crate::debounce::Debouncer;
use crate::directory::Directory;
use crate::error::{DirectoryError, Result};
use crate::model::{Facet, Record, RecordId};
use crate::query::CategoryTable;
use crate::source::{sample, DataSource, SourceData};
use crate::state::{Category, FilterState, RegionFilter, SortKey, ViewResult};
use std::time::Instant;

/// What to show when the source cannot be loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fallback {
    #[default]
    Sample,
    Empty,
}

/// Outcome of the one-time load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub origin: String,
    pub records: usize,
    pub fallback: bool,
    pub error: Option<String>,
}

impl LoadReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Discrete input from a user surface. Each maps to exactly one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    SearchChanged(String),
    FacetToggled { facet: Facet, value: String },
    FacetSelected { facet: Facet, values: Vec<String> },
    FacetCleared(Facet),
    CategorySelected(Category),
    RegionSelected(RegionFilter),
    RegionToggled(String),
    RegionsSelected(Vec<String>),
    RegionsCleared,
    FlaggedToggled(bool),
    SortChanged(SortKey),
    PageRequested(usize),
    ResetRequested,
}

/// The main API facade for directory operations.
pub struct DirectoryApi<S: DataSource> {
    source: S,
    directory: Directory,
    search: Debouncer<String>,
    fallback: Fallback,
    report: Option<LoadReport>,
}

impl<S: DataSource> DirectoryApi<S> {
    pub fn new(source: S, config: &DirectoryConfig) -> Self {
        Self {
            source,
            directory: Directory::from_config(config),
            search: Debouncer::new(config.search_delay()),
            fallback: Fallback::default(),
            report: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Reads the source once. A failing source is not an error here: the
    /// fallback set is installed and the failure travels in the report.
    pub fn load(&mut self) -> Result<&LoadReport> {
        if self.directory.is_loaded() {
            return Err(DirectoryError::AlreadyLoaded);
        }

        let origin = self.source.describe();
        let report = match self.source.load() {
            Ok(data) => {
                let records = data.records.len();
                self.directory.load(data)?;
                tracing::info!(%origin, records, "directory loaded");
                LoadReport {
                    origin,
                    records,
                    fallback: false,
                    error: None,
                }
            }
            Err(err) => {
                tracing::warn!(%origin, error = %err, "could not load directory, using fallback");
                let data = match self.fallback {
                    Fallback::Sample => SourceData::from_records(sample::sample_records()),
                    Fallback::Empty => SourceData::default(),
                };
                let records = data.records.len();
                self.directory.load(data)?;
                LoadReport {
                    origin,
                    records,
                    fallback: true,
                    error: Some(err.to_string()),
                }
            }
        };

        Ok(self.report.insert(report))
    }

    pub fn load_report(&self) -> Option<&LoadReport> {
        self.report.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.directory.is_loaded()
    }

    /// Applies one event and recomputes the view.
    pub fn apply(&mut self, event: UserEvent) -> ViewResult {
        tracing::debug!(?event, "applying event");
        let state = self.directory.state_mut();
        match event {
            UserEvent::SearchChanged(text) => {
                self.search.cancel();
                state.set_search_text(text);
            }
            UserEvent::FacetToggled { facet, value } => {
                state.toggle_facet(facet, &value);
            }
            UserEvent::FacetSelected { facet, values } => state.select_facet_only(facet, values),
            UserEvent::FacetCleared(facet) => state.clear_facet(facet),
            UserEvent::CategorySelected(category) => state.set_category(category),
            UserEvent::RegionSelected(region) => state.set_region(region),
            UserEvent::RegionToggled(region) => {
                state.toggle_region(&region);
            }
            UserEvent::RegionsSelected(regions) => state.select_regions(regions),
            UserEvent::RegionsCleared => state.clear_regions(),
            UserEvent::FlaggedToggled(on) => state.set_flagged_only(on),
            UserEvent::SortChanged(key) => state.set_sort_key(key),
            UserEvent::PageRequested(page) => state.set_page(page),
            UserEvent::ResetRequested => {
                self.search.cancel();
                state.reset();
            }
        }
        self.directory.recompute()
    }

    /// Records a keystroke's worth of search text without recomputing.
    ///
    /// Returns the debounce generation; a later call supersedes this one.
    pub fn type_search(&mut self, text: impl Into<String>, now: Instant) -> u64 {
        self.search.push(text.into(), now)
    }

    /// Commits typed search text whose quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<ViewResult> {
        let text = self.search.poll(now)?;
        tracing::debug!(%text, "debounced search committed");
        Some(self.apply(UserEvent::SearchChanged(text)))
    }

    /// Commits typed search text immediately, e.g. on Enter.
    pub fn flush_search(&mut self) -> Option<ViewResult> {
        let text = self.search.flush()?;
        Some(self.apply(UserEvent::SearchChanged(text)))
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// The view for the current state, without changing it.
    pub fn view(&mut self) -> ViewResult {
        self.directory.recompute()
    }

    pub fn state(&self) -> &FilterState {
        self.directory.state()
    }

    pub fn record(&self, id: &str) -> Result<&Record> {
        self.directory
            .record(&RecordId::from(id))
            .ok_or_else(|| DirectoryError::RecordNotFound(id.to_string()))
    }

    pub fn regions(&self) -> &[String] {
        self.directory.regions()
    }

    pub fn regions_matching(&self, text: &str) -> Vec<&str> {
        self.directory.regions_matching(text)
    }

    pub fn facet_values(&self, facet: Facet) -> &[String] {
        self.directory.facet_values(facet)
    }

    pub fn categories(&self) -> &CategoryTable {
        self.directory.categories()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::fixtures::SourceFixture;
    use crate::source::memory::InMemorySource;
    use std::time::Duration;

    fn api(count: usize) -> DirectoryApi<InMemorySource> {
        let source = SourceFixture::new().with_records(count).build();
        let mut api = DirectoryApi::new(source, &DirectoryConfig::default());
        api.load().unwrap();
        api
    }

    #[test]
    fn loads_from_source() {
        let api = api(3);
        let report = api.load_report().unwrap();
        assert!(report.is_ok());
        assert!(!report.fallback);
        assert_eq!(report.records, 3);
        assert_eq!(report.origin, "memory");
    }

    #[test]
    fn second_load_is_rejected() {
        let mut api = api(1);
        assert!(matches!(api.load(), Err(DirectoryError::AlreadyLoaded)));
    }

    #[test]
    fn failing_source_falls_back_to_sample() {
        let mut api = DirectoryApi::new(
            InMemorySource::failing("offline"),
            &DirectoryConfig::default(),
        );
        let report = api.load().unwrap().clone();
        assert!(report.fallback);
        assert_eq!(report.records, 10);
        assert!(report.error.unwrap().contains("offline"));
        assert_eq!(api.view().total_matches, 10);
    }

    #[test]
    fn failing_source_can_fall_back_to_nothing() {
        let mut api = DirectoryApi::new(
            InMemorySource::failing("offline"),
            &DirectoryConfig::default(),
        )
        .with_fallback(Fallback::Empty);
        assert_eq!(api.load().unwrap().records, 0);
        assert!(api.view().is_empty());
    }

    #[test]
    fn events_drive_the_view() {
        let mut api = api(13);
        let view = api.apply(UserEvent::PageRequested(3));
        assert_eq!(view.page, 3);
        assert_eq!(view.records.len(), 1);

        let view = api.apply(UserEvent::SortChanged(SortKey::Location));
        assert_eq!(view.page, 1);
    }

    #[test]
    fn typed_search_is_debounced() {
        let mut api = api(12);
        let start = Instant::now();
        api.type_search("Org", start);
        api.type_search("Org 1", start + Duration::from_millis(100));

        assert!(api.tick(start + Duration::from_millis(300)).is_none());
        assert_eq!(api.state().search_text(), "");

        let view = api.tick(start + Duration::from_millis(400)).unwrap();
        assert_eq!(api.state().search_text(), "Org 1");
        // Org 1, Org 10, Org 11, Org 12
        assert_eq!(view.total_matches, 4);
        assert!(api.tick(start + Duration::from_millis(900)).is_none());
    }

    #[test]
    fn flush_commits_pending_search_at_once() {
        let mut api = api(12);
        let start = Instant::now();
        assert!(api.flush_search().is_none());

        api.type_search("Org 1", start);
        assert_eq!(
            api.search_deadline(),
            Some(start + Duration::from_millis(300))
        );
        let view = api.flush_search().unwrap();
        assert_eq!(view.total_matches, 4);
        assert_eq!(api.search_deadline(), None);
        assert!(api.tick(start + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn region_events_use_multi_select() {
        let mut api = DirectoryApi::new(
            InMemorySource::new(sample::sample_records()),
            &DirectoryConfig::default(),
        );
        api.load().unwrap();

        let view = api.apply(UserEvent::RegionsSelected(vec![
            "Delhi".into(),
            "Kerala".into(),
            "Gujarat".into(),
        ]));
        assert_eq!(view.total_matches, 2);

        let view = api.apply(UserEvent::RegionToggled("Gujarat".into()));
        assert_eq!(view.total_matches, 1);

        let view = api.apply(UserEvent::RegionsCleared);
        assert_eq!(view.total_matches, 10);
        assert_eq!(api.regions_matching("pradesh"), ["Uttar Pradesh"]);
    }

    #[test]
    fn reset_drops_pending_search() {
        let mut api = api(4);
        let start = Instant::now();
        api.type_search("zzz", start);
        api.apply(UserEvent::ResetRequested);
        assert!(api.tick(start + Duration::from_secs(1)).is_none());
        assert_eq!(api.view().total_matches, 4);
    }

    #[test]
    fn unknown_record_is_reported() {
        let api = api(2);
        assert_eq!(api.record("org-2").unwrap().name, "Org 2");
        assert!(matches!(
            api.record("missing"),
            Err(DirectoryError::RecordNotFound(_))
        ));
    }
}
