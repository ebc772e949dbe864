//! Web entity status.

use serde::{Deserialize, Serialize};

/// Curation status of a web entity within a corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WebEntityStatus {
    Undecided,
    In,
    Out,
    /// Found by the crawler but never reviewed
    #[default]
    Discovered,
}

impl WebEntityStatus {
    pub const ALL: [WebEntityStatus; 4] = [
        WebEntityStatus::Undecided,
        WebEntityStatus::In,
        WebEntityStatus::Out,
        WebEntityStatus::Discovered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WebEntityStatus::Undecided => "UNDECIDED",
            WebEntityStatus::In => "IN",
            WebEntityStatus::Out => "OUT",
            WebEntityStatus::Discovered => "DISCOVERED",
        }
    }

    /// Match `status` case-insensitively against the known names.
    ///
    /// Anything else, including empty or absent input, is `Discovered`.
    pub fn normalize(status: Option<&str>) -> Self {
        let Some(status) = status.filter(|s| !s.is_empty()) else {
            return WebEntityStatus::Discovered;
        };
        Self::ALL
            .into_iter()
            .find(|known| status.eq_ignore_ascii_case(known.as_str()))
            .unwrap_or(WebEntityStatus::Discovered)
    }
}

/// Normalized status name for arbitrary input.
pub fn normalize_status(status: Option<&str>) -> &'static str {
    WebEntityStatus::normalize(status).as_str()
}

impl std::fmt::Display for WebEntityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for WebEntityStatus {
    fn from(status: &str) -> Self {
        Self::normalize(Some(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_is_case_insensitive() {
        assert_eq!(normalize_status(Some("in")), "IN");
        assert_eq!(normalize_status(Some("IN")), "IN");
        assert_eq!(normalize_status(Some("Out")), "OUT");
        assert_eq!(normalize_status(Some("undecided")), "UNDECIDED");
    }

    #[test]
    fn test_normalize_falls_back_to_discovered() {
        assert_eq!(normalize_status(Some("bogus")), "DISCOVERED");
        assert_eq!(normalize_status(Some("")), "DISCOVERED");
        assert_eq!(normalize_status(None), "DISCOVERED");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["in", "OUT", "Undecided", "discovered", "bogus", "", " in "] {
            let once = normalize_status(Some(input));
            assert_eq!(normalize_status(Some(once)), once, "input {input:?}");
        }
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&WebEntityStatus::Undecided).unwrap();
        assert_eq!(json, "\"UNDECIDED\"");
        let back: WebEntityStatus = serde_json::from_str("\"OUT\"").unwrap();
        assert_eq!(back, WebEntityStatus::Out);
    }
}
