//! XML fragment decoding
//!
//! Turns one upstream result fragment into a [`RawNode`] tree with
//! `quick-xml`. Elements without attributes or child elements become plain
//! text children; everything else becomes a nested node.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::data::error::SourceError;
use crate::domain::assets::{RawChild, RawNode};

/// Root element name of an asset fragment
pub const ASSET_ELEMENT: &str = "Asset";

struct OpenElement {
    name: String,
    node: RawNode,
    text: String,
}

impl OpenElement {
    fn new(start: &BytesStart<'_>) -> Result<Self, SourceError> {
        let mut node = RawNode::new();
        for attr in start.attributes() {
            let attr = attr.map_err(SourceError::xml)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(SourceError::xml)?;
            node.attributes.insert(key, value.into_owned());
        }
        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            node,
            text: String::new(),
        })
    }

    fn into_node(self) -> RawNode {
        let mut node = self.node;
        if !self.text.is_empty() {
            node.text = Some(self.text);
        }
        node
    }

    fn into_child(self) -> (String, RawChild) {
        let is_leaf = self.node.attributes.is_empty() && self.node.children.is_empty();
        if is_leaf {
            (self.name, RawChild::Text(self.text))
        } else {
            let name = self.name.clone();
            (name, RawChild::Node(self.into_node()))
        }
    }
}

/// Decode a fragment into its root element.
///
/// Returns `Ok(None)` when the fragment has no root element (e.g. a scalar
/// result of `count(...)`). Text is trimmed at both ends; inner whitespace is
/// kept.
pub fn decode_fragment(xml: &str) -> Result<Option<(String, RawNode)>, SourceError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<(String, RawNode)> = None;

    loop {
        match reader.read_event().map_err(SourceError::xml)? {
            Event::Start(start) => stack.push(OpenElement::new(&start)?),
            Event::Empty(start) => {
                let element = OpenElement::new(&start)?;
                close(element, &mut stack, &mut root);
            }
            Event::Text(text) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&text.unescape().map_err(SourceError::xml)?);
                }
            }
            Event::CData(data) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| SourceError::xml("unexpected closing tag"))?;
                close(element, &mut stack, &mut root);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(SourceError::Xml(format!("unclosed element <{}>", open.name)));
    }
    Ok(root)
}

/// Decode a fragment, keeping it only when its root is `<Asset>`.
pub fn decode_asset(xml: &str) -> Result<Option<RawNode>, SourceError> {
    Ok(decode_fragment(xml)?
        .filter(|(name, _)| name == ASSET_ELEMENT)
        .map(|(_, node)| node))
}

fn close(
    element: OpenElement,
    stack: &mut [OpenElement],
    root: &mut Option<(String, RawNode)>,
) {
    match stack.last_mut() {
        Some(parent) => {
            let (name, child) = element.into_child();
            parent.node.push_child(name, child);
        }
        None => {
            if root.is_none() {
                let name = element.name.clone();
                *root = Some((name, element.into_node()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assets::project;

    const NVDA: &str = r#"
        <Asset Ticker="NVDA">
          <Identification>
            <Name>NVIDIA Corporation</Name>
            <Sector>Technology</Sector>
          </Identification>
          <FundamentalData>
            <MarketCap>4.5T</MarketCap>
            <PERatio>52.1</PERatio>
          </FundamentalData>
          <DailyData>
            <Day index="1"><ClosingPrice Currency="USD">181.2</ClosingPrice><Volume>100</Volume></Day>
            <Day index="2"><ClosingPrice Currency="USD">183.0</ClosingPrice><Volume>120</Volume></Day>
          </DailyData>
        </Asset>
    "#;

    #[test]
    fn test_decode_asset_tree() {
        let node = decode_asset(NVDA).unwrap().unwrap();
        assert_eq!(node.attributes.get("Ticker").map(String::as_str), Some("NVDA"));

        let ident = match &node.children["Identification"][..] {
            [RawChild::Node(n)] => n,
            other => panic!("expected one node, got {:?}", other),
        };
        assert_eq!(
            ident.children["Name"],
            vec![RawChild::Text("NVIDIA Corporation".to_string())]
        );

        let daily = match &node.children["DailyData"][..] {
            [RawChild::Node(n)] => n,
            other => panic!("expected one node, got {:?}", other),
        };
        assert_eq!(daily.children["Day"].len(), 2);
    }

    #[test]
    fn test_text_with_attributes_kept_on_node() {
        let node = decode_asset(NVDA).unwrap().unwrap();
        let record = project(&node);
        assert_eq!(record.prices, vec!["181.2", "183.0"]);
        assert_eq!(record.volumes, vec!["100", "120"]);
        assert_eq!(record.sector.as_deref(), Some("Technology"));
    }

    #[test]
    fn test_entities_unescaped() {
        let xml = r#"<Asset Ticker="T&amp;T"><Identification><Name>AT&amp;T Inc.</Name></Identification></Asset>"#;
        let record = project(&decode_asset(xml).unwrap().unwrap());
        assert_eq!(record.ticker.as_deref(), Some("T&T"));
        assert_eq!(record.name.as_deref(), Some("AT&T Inc."));
    }

    #[test]
    fn test_text_trimmed_at_edges() {
        let xml = "<Asset><Identification><Name>  Apple  Inc. \n</Name></Identification></Asset>";
        let record = project(&decode_asset(xml).unwrap().unwrap());
        assert_eq!(record.name.as_deref(), Some("Apple  Inc."));
    }

    #[test]
    fn test_cdata_is_text() {
        let xml = "<Asset><Identification><Name><![CDATA[A <B> C]]></Name></Identification></Asset>";
        let record = project(&decode_asset(xml).unwrap().unwrap());
        assert_eq!(record.name.as_deref(), Some("A <B> C"));
    }

    #[test]
    fn test_empty_element_is_empty_text() {
        let xml = r#"<Asset Ticker="X"><Identification><Name/></Identification></Asset>"#;
        let record = project(&decode_asset(xml).unwrap().unwrap());
        assert_eq!(record.name.as_deref(), Some(""));
    }

    #[test]
    fn test_non_asset_root_skipped() {
        assert!(decode_asset("<Day index=\"1\"/>").unwrap().is_none());
        let (name, _) = decode_fragment("<Day index=\"1\"/>").unwrap().unwrap();
        assert_eq!(name, "Day");
    }

    #[test]
    fn test_scalar_fragment_has_no_root() {
        assert!(decode_fragment("42").unwrap().is_none());
        assert!(decode_fragment("").unwrap().is_none());
    }

    #[test]
    fn test_malformed_fragment_errors() {
        assert!(matches!(
            decode_fragment("<Asset><Name>x</Asset>"),
            Err(SourceError::Xml(_))
        ));
        assert!(matches!(
            decode_fragment("<Asset>"),
            Err(SourceError::Xml(_))
        ));
    }
}
