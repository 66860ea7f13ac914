use std::fmt;

use serde::{Deserialize, Serialize};

use super::source_page::SourcePage;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupName(String);

impl GroupName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Which model class a group is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    Primary,
    Secondary,
}

impl ModelTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Primary => "primary",
            ModelTier::Secondary => "secondary",
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pages uploaded together under one name; extracted as one unit.
#[derive(Debug, Clone)]
pub struct SourceGroup {
    pub name: GroupName,
    pub tier: ModelTier,
    pages: Vec<SourcePage>,
}

impl SourceGroup {
    pub fn new(name: impl Into<GroupName>, tier: ModelTier) -> Self {
        Self {
            name: name.into(),
            tier,
            pages: Vec::new(),
        }
    }

    pub fn with_pages(mut self, pages: Vec<SourcePage>) -> Self {
        for page in pages {
            self.push_page(page);
        }
        self
    }

    /// Keeps upload order; pages that declare an index are placed by it.
    pub fn push_page(&mut self, page: SourcePage) {
        self.pages.push(page);
        self.pages
            .sort_by_key(|p| p.index().map_or(u64::MAX, u64::from));
    }

    pub fn pages(&self) -> &[SourcePage] {
        &self.pages
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn clear(&mut self) {
        self.pages.clear();
    }
}

impl From<String> for GroupName {
    fn from(value: String) -> Self {
        Self(value)
    }
}
