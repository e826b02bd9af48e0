//! In-memory asset sources for tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::data::error::SourceError;
use crate::data::traits::AssetSource;
use crate::data::upstream::xml::decode_asset;
use crate::domain::assets::RawNode;

/// Serves a fixed set of nodes for every query and records each XPath.
///
/// Expressions registered with [`MemorySource::answer`] get their own result,
/// standing in for an upstream that evaluates them.
#[derive(Default)]
pub struct MemorySource {
    nodes: Vec<RawNode>,
    answers: HashMap<String, Vec<RawNode>>,
    queries: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new(nodes: Vec<RawNode>) -> Self {
        Self {
            nodes,
            ..Self::default()
        }
    }

    /// Answer `xpath` with the assets whose ticker is in `tickers`.
    pub fn answer(mut self, xpath: impl Into<String>, tickers: &[&str]) -> Self {
        let selected = self
            .nodes
            .iter()
            .filter(|node| {
                node.attributes
                    .get("Ticker")
                    .is_some_and(|t| tickers.contains(&t.as_str()))
            })
            .cloned()
            .collect();
        self.answers.insert(xpath.into(), selected);
        self
    }

    /// Build from XML fragments; non-asset fragments are dropped.
    pub fn from_fragments(fragments: &[&str]) -> Self {
        let nodes = fragments
            .iter()
            .filter_map(|xml| decode_asset(xml).unwrap())
            .collect();
        Self::new(nodes)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetSource for MemorySource {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn fetch(&self, xpath: &str) -> Result<Vec<RawNode>, SourceError> {
        self.queries.lock().unwrap().push(xpath.to_string());
        Ok(self.answers.get(xpath).unwrap_or(&self.nodes).clone())
    }
}

/// Always fails with `UNAVAILABLE`.
pub struct FailingSource;

#[async_trait]
impl AssetSource for FailingSource {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn fetch(&self, _xpath: &str) -> Result<Vec<RawNode>, SourceError> {
        Err(tonic::Status::unavailable("connection refused").into())
    }
}

pub fn asset_xml(ticker: &str, name: &str, sector: &str) -> String {
    format!(
        r#"<Asset Ticker="{ticker}">
             <Identification><Name>{name}</Name><Sector>{sector}</Sector></Identification>
             <FundamentalData><MarketCap>1T</MarketCap><Beta>1.1</Beta></FundamentalData>
             <Indicators><PriceSMA>100</PriceSMA><AverageVolume>5000</AverageVolume></Indicators>
             <DailyData>
               <Day index="1"><ClosingPrice Currency="USD">10</ClosingPrice><Volume>1</Volume></Day>
               <Day index="2"><ClosingPrice Currency="USD">11</ClosingPrice><Volume>2</Volume></Day>
             </DailyData>
           </Asset>"#
    )
}

/// NVDA, AAPL, MSFT, all in Technology
pub fn tech_source() -> MemorySource {
    let fragments = [
        asset_xml("NVDA", "NVIDIA Corporation", "Technology"),
        asset_xml("AAPL", "Apple Inc.", "Technology"),
        asset_xml("MSFT", "Microsoft Corporation", "Technology"),
    ];
    let refs: Vec<&str> = fragments.iter().map(String::as_str).collect();
    MemorySource::from_fragments(&refs)
}
