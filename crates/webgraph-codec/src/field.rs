//! Field names shared by every document kind.
//!
//! Not every document carries every field; see [`crate::codec`] for which
//! kinds write which fields.

/// Names of fields in a graph document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    Id,
    /// Record kind discriminator
    Type,
    Lru,
    Url,
    CrawlerTs,
    Depth,
    Error,
    HttpStatus,
    Status,
    FullPrecision,
    IsNode,
    Tag,
    Regexp,
    Name,
    Homepage,
    Startpage,
    Source,
    Target,
    Weight,
    DateCreated,
    DateModified,
}

impl FieldName {
    pub const ALL: [FieldName; 21] = [
        FieldName::Id,
        FieldName::Type,
        FieldName::Lru,
        FieldName::Url,
        FieldName::CrawlerTs,
        FieldName::Depth,
        FieldName::Error,
        FieldName::HttpStatus,
        FieldName::Status,
        FieldName::FullPrecision,
        FieldName::IsNode,
        FieldName::Tag,
        FieldName::Regexp,
        FieldName::Name,
        FieldName::Homepage,
        FieldName::Startpage,
        FieldName::Source,
        FieldName::Target,
        FieldName::Weight,
        FieldName::DateCreated,
        FieldName::DateModified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Id => "ID",
            FieldName::Type => "TYPE",
            FieldName::Lru => "LRU",
            FieldName::Url => "URL",
            FieldName::CrawlerTs => "CRAWLERTS",
            FieldName::Depth => "DEPTH",
            FieldName::Error => "ERROR",
            FieldName::HttpStatus => "HTTPSTATUS",
            FieldName::Status => "STATUS",
            FieldName::FullPrecision => "FULLPREC",
            FieldName::IsNode => "IS_NODE",
            FieldName::Tag => "TAG",
            FieldName::Regexp => "REGEXP",
            FieldName::Name => "NAME",
            FieldName::Homepage => "HOMEPAGE",
            FieldName::Startpage => "STARTPAGE",
            FieldName::Source => "SOURCE",
            FieldName::Target => "TARGET",
            FieldName::Weight => "WEIGHT",
            FieldName::DateCreated => "DATECREA",
            FieldName::DateModified => "DATEMODIF",
        }
    }

    /// Parse from string, returning None for unknown fields.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == s)
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown field: {}", s))
    }
}
