use std::sync::Arc;

use super::*;
use crate::data::testing::{FailingSource, MemorySource, asset_xml, tech_source};
use crate::domain::query::{build_query, parse_filters};
use crate::domain::query::filter::apply;

fn tickers(records: &[AssetRecord]) -> Vec<&str> {
    records.iter().filter_map(|r| r.ticker.as_deref()).collect()
}

fn service(source: Arc<MemorySource>, backend: QueryBackend) -> AssetService {
    AssetService::new(source, backend, Some(10))
}

// ============================================================================
// END TO END
// ============================================================================

#[tokio::test]
async fn test_sector_filter_keeps_all_in_order() {
    let svc = service(Arc::new(tech_source()), QueryBackend::Predicate);
    let outcome = svc.search("sector=Technology").await;
    assert_eq!(tickers(&outcome.assets), vec!["NVDA", "AAPL", "MSFT"]);
}

#[tokio::test]
async fn test_ticker_filter_selects_one() {
    let svc = service(Arc::new(tech_source()), QueryBackend::Predicate);
    let outcome = svc.search("symbol=AAPL").await;
    assert_eq!(tickers(&outcome.assets), vec!["AAPL"]);
}

#[tokio::test]
async fn test_end_to_end_with_pure_functions() {
    let source = tech_source();
    let all = AssetService::new(Arc::new(source), QueryBackend::Predicate, None)
        .xpath("//Asset")
        .await;
    assert_eq!(
        tickers(&apply(all.clone(), &parse_filters("sector=Technology"))),
        vec!["NVDA", "AAPL", "MSFT"]
    );
    assert_eq!(
        tickers(&apply(all, &parse_filters("symbol=AAPL"))),
        vec!["AAPL"]
    );
}

// ============================================================================
// BACKENDS
// ============================================================================

#[tokio::test]
async fn test_predicate_backend_fetches_all_assets() {
    let source = Arc::new(tech_source());
    let svc = service(source.clone(), QueryBackend::Predicate);
    let outcome = svc.search("symbol=NVDA").await;

    assert_eq!(outcome.xpath, "//Asset");
    assert_eq!(source.queries(), vec!["//Asset"]);
    assert_eq!(tickers(&outcome.assets), vec!["NVDA"]);
}

#[tokio::test]
async fn test_structural_backend_pushes_xpath_upstream() {
    let source = Arc::new(tech_source());
    let svc = service(source.clone(), QueryBackend::Structural);
    let outcome = svc.search("symbol=NVDA").await;

    assert_eq!(outcome.xpath, "//Asset[@Ticker='NVDA']");
    assert_eq!(source.queries(), vec!["//Asset[@Ticker='NVDA']"]);
    // upstream is trusted to filter; nothing is removed locally
    assert_eq!(outcome.assets.len(), 3);
}

#[tokio::test]
async fn test_raw_xpath_passthrough() {
    let source = Arc::new(tech_source());
    let svc = service(source.clone(), QueryBackend::Predicate);
    let outcome = svc.search("//Asset[@Ticker='MSFT']").await;

    assert_eq!(outcome.xpath, "//Asset[@Ticker='MSFT']");
    assert_eq!(outcome.assets.len(), 3);
}

fn listed(ticker: &str, exchange: &str) -> String {
    format!(
        r#"<Asset Ticker="{ticker}"><Exchange>{exchange}</Exchange>
             <Identification><Name>{ticker} Holdings</Name><Sector>Financials</Sector></Identification>
           </Asset>"#
    )
}

/// Structural source that answers the pushed-down XPath like the upstream would.
fn exchange_source(query: &str, matching: &[&str]) -> MemorySource {
    let fragments = [
        listed("JPM", "NYSE"),
        listed("NVDA", "NASDAQ"),
        listed("GS", "nyse"),
    ];
    let refs: Vec<&str> = fragments.iter().map(String::as_str).collect();
    MemorySource::from_fragments(&refs).answer(build_query(query), matching)
}

#[tokio::test]
async fn test_unknown_field_same_result_on_both_backends() {
    for (query, expected) in [
        ("Exchange=NYSE", vec!["JPM", "GS"]),
        ("Exchange=LSE", vec![]),
    ] {
        let predicate = service(Arc::new(exchange_source(query, &expected)), QueryBackend::Predicate)
            .search(query)
            .await;
        let structural = service(Arc::new(exchange_source(query, &expected)), QueryBackend::Structural)
            .search(query)
            .await;

        assert_ne!(structural.xpath, "//Asset", "{query}");
        assert_eq!(tickers(&predicate.assets), expected, "{query}");
        assert_eq!(tickers(&structural.assets), expected, "{query}");
    }
}

// ============================================================================
// LISTING AND OPTIONS
// ============================================================================

#[tokio::test]
async fn test_list_by_ticker_and_name() {
    let svc = service(Arc::new(tech_source()), QueryBackend::Structural);

    assert_eq!(tickers(&svc.list(Some("msft"), None).await), vec!["MSFT"]);
    assert_eq!(
        tickers(&svc.list(None, Some("corporation")).await),
        vec!["NVDA", "MSFT"]
    );
    assert_eq!(
        tickers(&svc.list(Some("AAPL"), Some("corporation")).await),
        Vec::<&str>::new()
    );
    assert_eq!(svc.list(None, Some("  ")).await.len(), 3);
}

#[tokio::test]
async fn test_filter_options_sorted_unique() {
    let fragments = [
        asset_xml("MSFT", "Microsoft Corporation", "Technology"),
        asset_xml("JPM", "JPMorgan Chase", "Financial Services"),
        asset_xml("AAPL", "Apple Inc.", "Technology"),
        asset_xml("AAPL", "Apple Inc.", "Technology"),
    ];
    let refs: Vec<&str> = fragments.iter().map(String::as_str).collect();
    let svc = service(
        Arc::new(MemorySource::from_fragments(&refs)),
        QueryBackend::Predicate,
    );

    let options = svc.filter_options().await;
    assert_eq!(options.tickers, vec!["AAPL", "JPM", "MSFT"]);
    assert_eq!(options.sectors, vec!["Financial Services", "Technology"]);
}

#[tokio::test]
async fn test_day_limit_applied() {
    let svc = AssetService::new(Arc::new(tech_source()), QueryBackend::Predicate, Some(1));
    let outcome = svc.search("").await;
    assert!(outcome.assets.iter().all(|a| a.daily_data.len() == 1));
    assert!(outcome.assets.iter().all(|a| a.prices == vec!["10"]));
}

// ============================================================================
// FAILURES
// ============================================================================

#[tokio::test]
async fn test_upstream_failure_yields_empty() {
    let svc = AssetService::new(Arc::new(FailingSource), QueryBackend::Predicate, Some(10));

    let outcome = svc.search("symbol=NVDA").await;
    assert!(outcome.assets.is_empty());
    assert_eq!(outcome.xpath, "//Asset");

    assert!(svc.list(Some("NVDA"), None).await.is_empty());
    assert_eq!(svc.filter_options().await, FilterOptions::default());
}

#[tokio::test]
async fn test_empty_source() {
    let svc = service(Arc::new(MemorySource::default()), QueryBackend::Predicate);
    assert!(svc.search("apple").await.assets.is_empty());
}
