//! LRU utilities.
//!
//! An LRU is a URL decomposed into typed stems separated by `|`, ordered from
//! the most significant part to the least:
//!
//! ```text
//! s:http|t:8080|h:fr|h:sciencespo|h:medialab|p:projets|p:hyphe|q:lang=fr|f:top|
//! ```
//!
//! Stem prefixes: `s` scheme, `t` port, `h` host part (TLD first), `p` path
//! segment, `q` query, `f` fragment.

const STEM_SEPARATOR: char = '|';

/// Rebuild the URL an LRU was derived from.
///
/// Unknown stems are ignored. Missing scheme falls back to `http`.
pub fn revert_lru(lru: &str) -> String {
    let mut scheme: Option<&str> = None;
    let mut port: Option<&str> = None;
    let mut hosts: Vec<&str> = Vec::new();
    let mut path: Vec<&str> = Vec::new();
    let mut query: Option<&str> = None;
    let mut fragment: Option<&str> = None;

    for stem in lru.split(STEM_SEPARATOR).filter(|s| !s.is_empty()) {
        let Some((kind, value)) = stem.split_once(':') else {
            continue;
        };
        match kind.trim() {
            "s" => scheme = Some(value),
            "t" => port = Some(value),
            "h" => hosts.push(value),
            "p" => path.push(value),
            "q" => query = Some(value),
            "f" => fragment = Some(value),
            _ => {}
        }
    }

    let mut url = String::with_capacity(lru.len());
    url.push_str(scheme.unwrap_or("http"));
    url.push_str("://");
    let host: Vec<&str> = hosts.into_iter().rev().collect();
    url.push_str(&host.join("."));
    if let Some(port) = port.filter(|p| !p.is_empty()) {
        url.push(':');
        url.push_str(port);
    }
    if !path.is_empty() {
        url.push('/');
        url.push_str(&path.join("/"));
    }
    if let Some(query) = query {
        url.push('?');
        url.push_str(query);
    }
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revert_simple_host() {
        assert_eq!(
            revert_lru("s:http|h:fr|h:sciencespo|h:www|"),
            "http://www.sciencespo.fr"
        );
    }

    #[test]
    fn test_revert_full_url() {
        let lru = "s:https|t:8080|h:fr|h:sciencespo|h:medialab|p:projets|p:hyphe|q:lang=fr|f:top|";
        assert_eq!(
            revert_lru(lru),
            "https://medialab.sciencespo.fr:8080/projets/hyphe?lang=fr#top"
        );
    }

    #[test]
    fn test_revert_without_scheme() {
        assert_eq!(revert_lru("h:com|h:example"), "http://example.com");
    }

    #[test]
    fn test_revert_ignores_unknown_stems() {
        assert_eq!(
            revert_lru("s:http|x:junk|h:org|h:rust-lang|garbage|"),
            "http://rust-lang.org"
        );
    }
}
