use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable record identifier, unique within a loaded record set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Contact {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none()
    }
}

/// One directory entry in its canonical, normalized shape.
///
/// Records never change after load; every source format is converted to this
/// shape by `source::normalize` before it reaches the query pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub location: String,
    pub region: Option<String>,
    pub services: Vec<String>,
    pub focus_groups: Vec<String>,
    pub is_flagged: bool,
    #[serde(default)]
    pub contact: Contact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            location: String::new(),
            region: None,
            services: Vec::new(),
            focus_groups: Vec::new(),
            is_flagged: false,
            contact: Contact::default(),
            image: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_services<I, T>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.services = services.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_focus_groups<I, T>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.focus_groups = groups.into_iter().map(Into::into).collect();
        self
    }

    pub fn flagged(mut self, is_flagged: bool) -> Self {
        self.is_flagged = is_flagged;
        self
    }

    pub fn with_contact(mut self, phone: Option<String>, email: Option<String>) -> Self {
        self.contact = Contact { phone, email };
        self
    }

    /// Tags of the given facet group, in display order.
    pub fn tags(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Services => &self.services,
            Facet::FocusGroups => &self.focus_groups,
        }
    }
}

/// A multi-valued attribute group that can be narrowed by selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Services,
    FocusGroups,
}

impl Facet {
    pub fn all() -> &'static [Facet] {
        &[Facet::Services, Facet::FocusGroups]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Facet::Services => "services",
            Facet::FocusGroups => "focus-groups",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Facet {
    type Err = crate::error::DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "services" | "service" => Ok(Facet::Services),
            "focus-groups" | "focus_groups" | "focus" | "gender" => Ok(Facet::FocusGroups),
            other => Err(crate::error::DirectoryError::UnknownFacet(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_facet_aliases() {
        assert_eq!("Services".parse::<Facet>().unwrap(), Facet::Services);
        assert_eq!("focus".parse::<Facet>().unwrap(), Facet::FocusGroups);
        assert!("colour".parse::<Facet>().is_err());
    }

    #[test]
    fn tags_follow_facet() {
        let record = Record::new("1", "Haven")
            .with_services(["Housing"])
            .with_focus_groups(["women"]);
        assert_eq!(record.tags(Facet::Services), ["Housing".to_string()]);
        assert_eq!(record.tags(Facet::FocusGroups), ["women".to_string()]);
    }
}
