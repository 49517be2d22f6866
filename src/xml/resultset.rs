//! `<resultset>` parsing

use super::{expect_root, leaf_text, parse_document, XmlError, XmlResult};
use roxmltree::Node;
use serde::Serialize;
use std::collections::BTreeMap;

/// One flat row: field name to value
pub type Record = BTreeMap<String, String>;

/// A page of records plus its pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResultSet {
    pub start: usize,
    pub size: usize,
    pub total: usize,
    pub rows: Vec<Record>,
}

fn count_attribute(root: Node, name: &'static str) -> XmlResult<usize> {
    let raw = root.attribute(name);
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .ok_or_else(|| XmlError::InvalidAttribute {
            name,
            value: raw.map(str::to_string),
        })
}

fn parse_record(result: Node) -> XmlResult<Record> {
    let mut record = Record::new();
    for field in result.children().filter(Node::is_element) {
        let name = field.tag_name().name();
        let value = leaf_text(field).ok_or_else(|| XmlError::NotLeaf(name.to_string()))?;
        record.insert(name.to_string(), value.to_string());
    }
    Ok(record)
}

/// Parse a `<resultset>` document.
///
/// Every `<result>` element below the root becomes one [`Record`]. A single
/// field that is not a plain text leaf rejects the whole result set. The
/// `size` attribute is taken as sent and not checked against the row count.
pub fn parse_resultset(xml: &str) -> XmlResult<ResultSet> {
    let doc = parse_document(xml)?;
    let root = expect_root(&doc, "resultset")?;

    let start = count_attribute(root, "start")?;
    let size = count_attribute(root, "size")?;
    let total = count_attribute(root, "total")?;

    let rows = root
        .descendants()
        .filter(|n| n.has_tag_name("result"))
        .map(parse_record)
        .collect::<XmlResult<Vec<_>>>()?;

    Ok(ResultSet {
        start,
        size,
        total,
        rows,
    })
}
