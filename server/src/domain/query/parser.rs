//! Query language parser
//!
//! Parses the compact `field=value` mini-language:
//!
//! - `Ticker='NVDA'`, `name="Apple Inc"` - quoted values (may contain spaces)
//! - `symbol=NVDA sector=Technology` - bare values separated by `,`, `&` or whitespace
//! - `apple` - no `field=value` token at all, matched as free text
//!
//! Quoted tokens are read first and take precedence over bare tokens for the
//! same canonical field. Malformed tokens are ignored, never reported.
//!
//! Quoted keys are Unicode word characters, so `café='Le Monde'` is a
//! structured token for the unrecognized field `café`.

use std::sync::OnceLock;

use regex::Regex;

use super::types::{Field, FilterMap};

fn quoted_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(\w+)\s*=\s*(?:"([^"]+)"|'([^']+)')"#).expect("Invalid regex")
    })
}

fn is_separator(c: char) -> bool {
    c == ',' || c == '&' || c.is_whitespace()
}

/// Parse a query string into filters.
///
/// Empty or whitespace-only input yields an empty map (no filtering).
pub fn parse_filters(query: &str) -> FilterMap {
    let mut filters = FilterMap::new();
    let input = query.trim();
    if input.is_empty() {
        return filters;
    }

    let mut structured = false;

    // 1. Quoted tokens
    for caps in quoted_token_re().captures_iter(input) {
        let value = caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str());
        if let (Some(key), Some(value)) = (caps.get(1), value) {
            structured = true;
            filters.insert_if_absent(Field::canonicalize(key.as_str()), value);
        }
    }

    // 2. Bare tokens in what is left
    let remaining = quoted_token_re().replace_all(input, " ");
    for token in remaining.split(is_separator).filter(|t| !t.is_empty()) {
        let Some((key, rest)) = token.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        structured = true;

        let value = rest.split('=').next().unwrap_or_default().trim();
        if value.is_empty() {
            continue;
        }
        filters.insert_if_absent(Field::canonicalize(key), value);
    }

    // 3. Free-text fallback
    if !structured && filters.is_empty() {
        filters.insert_if_absent(Field::FreeText, input);
    }

    tracing::trace!(query = %input, filters = ?filters, "Parsed query filters");
    filters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(parse_filters("").is_empty());
        assert!(parse_filters("   ").is_empty());
        assert!(parse_filters("\t\n").is_empty());
    }

    #[test]
    fn test_bare_alias() {
        let filters = parse_filters("symbol=NVDA");
        assert_eq!(filters.get(&Field::Ticker), Some("NVDA"));
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn test_quoted_single() {
        let filters = parse_filters("Ticker='NVDA'");
        assert_eq!(filters.get(&Field::Ticker), Some("NVDA"));
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn test_quoted_double_with_spaces() {
        let filters = parse_filters(r#"name="Apple Inc" sector=Technology"#);
        assert_eq!(filters.get(&Field::Name), Some("Apple Inc"));
        assert_eq!(filters.get(&Field::Sector), Some("Technology"));
        assert_eq!(filters.len(), 2);
    }

    #[test]
    fn test_quoted_wins_over_bare() {
        let filters = parse_filters("symbol=AAPL ticker='NVDA'");
        assert_eq!(filters.get(&Field::Ticker), Some("NVDA"));

        let filters = parse_filters("ticker='NVDA' symbol=AAPL");
        assert_eq!(filters.get(&Field::Ticker), Some("NVDA"));
    }

    #[test]
    fn test_bare_first_writer_wins() {
        let filters = parse_filters("symbol=NVDA ticker=AAPL");
        assert_eq!(filters.get(&Field::Ticker), Some("NVDA"));
    }

    #[test]
    fn test_separators() {
        let filters = parse_filters("symbol=NVDA,sector=Technology&cap=4T");
        assert_eq!(filters.get(&Field::Ticker), Some("NVDA"));
        assert_eq!(filters.get(&Field::Sector), Some("Technology"));
        assert_eq!(filters.get(&Field::MarketCap), Some("4T"));

        let filters = parse_filters("symbol=NVDA ,, &  setor=Tech");
        assert_eq!(filters.len(), 2);
    }

    #[test]
    fn test_free_text() {
        let filters = parse_filters("apple");
        assert_eq!(filters.free_text(), Some("apple"));
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn test_free_text_is_trimmed_whole_input() {
        let filters = parse_filters("  apple inc  ");
        assert_eq!(filters.free_text(), Some("apple inc"));
    }

    #[test]
    fn test_unknown_field_passes_through() {
        let filters = parse_filters("Exchange=NASDAQ");
        assert_eq!(
            filters.get(&Field::Other("Exchange".to_string())),
            Some("NASDAQ")
        );
        assert!(filters.free_text().is_none());
    }

    #[test]
    fn test_quoted_unicode_key() {
        let filters = parse_filters("café='Le Monde'");
        assert_eq!(filters.len(), 1);
        assert_eq!(
            filters.get(&Field::Other("café".to_string())),
            Some("Le Monde")
        );
    }

    #[test]
    fn test_empty_value_is_structured_but_ignored() {
        let filters = parse_filters("symbol=");
        assert!(filters.is_empty());
    }

    #[test]
    fn test_missing_key_ignored() {
        // "=x" has no key, so nothing structured was found
        let filters = parse_filters("=x");
        assert_eq!(filters.free_text(), Some("=x"));
    }

    #[test]
    fn test_extra_equals_takes_second_segment() {
        let filters = parse_filters("symbol=NVDA=X");
        assert_eq!(filters.get(&Field::Ticker), Some("NVDA"));
    }

    #[test]
    fn test_spaced_equals_falls_back_to_free_text() {
        let filters = parse_filters("symbol = NVDA");
        assert_eq!(filters.free_text(), Some("symbol = NVDA"));
    }

    #[test]
    fn test_quoted_with_spaces_around_equals() {
        let filters = parse_filters("symbol = 'NVDA'");
        assert_eq!(filters.get(&Field::Ticker), Some("NVDA"));
    }

    #[test]
    fn test_mixed_malformed_tokens_ignored() {
        let filters = parse_filters("symbol=NVDA garbage more");
        assert_eq!(filters.get(&Field::Ticker), Some("NVDA"));
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn test_deterministic() {
        let q = "name='Apple Inc' symbol=AAPL sector=Tech";
        assert_eq!(parse_filters(q), parse_filters(q));
    }
}
