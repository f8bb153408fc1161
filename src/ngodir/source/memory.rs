use super::{normalize, DataSource, SourceData};
use crate::error::{DirectoryError, Result};
use crate::model::Record;

/// Serves a fixed record set; optionally fails every load.
pub struct InMemorySource {
    data: SourceData,
    failure: Option<String>,
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InMemorySource {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            data: SourceData::from_records(records),
            failure: None,
        }
    }

    pub fn with_declared_services<I, T>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.data.declared_services = services.into_iter().map(Into::into).collect();
        self
    }

    /// A source whose every load reports `message` as a malformed source.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            data: SourceData::default(),
            failure: Some(message.into()),
        }
    }
}

impl DataSource for InMemorySource {
    fn load(&self) -> Result<SourceData> {
        if let Some(message) = &self.failure {
            return Err(DirectoryError::MalformedSource(message.clone()));
        }
        normalize::check_unique(&self.data.records)?;
        Ok(self.data.clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct SourceFixture {
        records: Vec<Record>,
    }

    impl Default for SourceFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SourceFixture {
        pub fn new() -> Self {
            Self {
                records: Vec::new(),
            }
        }

        /// Adds `count` plain records named "Org 1", "Org 2", ...
        pub fn with_records(mut self, count: usize) -> Self {
            let start = self.records.len();
            for i in start..start + count {
                let n = i + 1;
                self.records.push(
                    Record::new(format!("org-{}", n), format!("Org {}", n))
                        .with_location(format!("{} Main Road", n))
                        .with_services(["Community"]),
                );
            }
            self
        }

        pub fn with_record(mut self, record: Record) -> Self {
            self.records.push(record);
            self
        }

        pub fn records(&self) -> &[Record] {
            &self.records
        }

        pub fn build(self) -> InMemorySource {
            InMemorySource::new(self.records)
        }
    }
}
