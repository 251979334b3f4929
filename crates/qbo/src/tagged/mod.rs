//! Serde-based serialization into tag lines.
//!
//! The statement format writes one `<TAG>value` pair per line. Aggregates
//! open with `<TAG>` and close with `</TAG>`. This module maps Serde's data
//! model onto that layout so document skeletons can be plain `#[derive(Serialize)]`
//! structs with `#[serde(rename = "...")]` tag names.
//!
//! # Example
//!
//! ```
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Account<'a> {
//!     #[serde(rename = "BANKID")]
//!     bank_id: &'a str,
//!     #[serde(rename = "ACCTID")]
//!     account_id: &'a str,
//! }
//!
//! let lines = qbo::tagged::to_lines("BANKACCTFROM", &Account { bank_id: "1", account_id: "2" })
//!     .unwrap();
//! assert_eq!(lines, ["<BANKACCTFROM>", "<BANKID>1", "<ACCTID>2", "</BANKACCTFROM>"]);
//! ```

mod error;
mod ser;

pub use error::{Error, Result};
pub use ser::{AggregateSerializer, ElementSerializer, RepeatedSerializer, TagSerializer};
use serde::Serialize;

/// Serializes `value` under `tag` and returns the produced lines.
pub fn to_lines<T: Serialize + ?Sized>(tag: &'static str, value: &T) -> Result<Vec<String>> {
    let mut serializer = TagSerializer::new();
    value.serialize(serializer.element(tag))?;
    Ok(serializer.into_lines())
}

/// Serializes `value` under `tag` into newline-separated text (no trailing newline).
pub fn to_string<T: Serialize + ?Sized>(tag: &'static str, value: &T) -> Result<String> {
    Ok(to_lines(tag, value)?.join("\n"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Serialize)]
    struct Entry {
        #[serde(rename = "NAME")]
        name: &'static str,
        #[serde(rename = "MEMO")]
        memo: Option<&'static str>,
        #[serde(rename = "CLEARED")]
        cleared: bool,
    }

    #[derive(Serialize)]
    struct Block {
        #[serde(rename = "TRNUID")]
        id: u32,
        #[serde(rename = "ENTRY")]
        entries: Vec<Entry>,
    }

    #[test]
    fn leaf_value() {
        assert_eq!(to_lines("CURDEF", "USD").unwrap(), ["<CURDEF>USD"]);
    }

    #[test]
    fn nested_aggregates_and_repeats() {
        let block = Block {
            id: 1001,
            entries: vec![
                Entry { name: "A", memo: Some("x"), cleared: true },
                Entry { name: "B", memo: None, cleared: false },
            ],
        };

        let text = to_string("BLOCK", &block).unwrap();
        assert_eq!(
            text,
            "<BLOCK>\n<TRNUID>1001\n\
             <ENTRY>\n<NAME>A\n<MEMO>x\n<CLEARED>Y\n</ENTRY>\n\
             <ENTRY>\n<NAME>B\n<CLEARED>N\n</ENTRY>\n\
             </BLOCK>"
        );
    }

    #[test]
    fn empty_sequence_writes_nothing() {
        let block = Block { id: 7, entries: Vec::new() };
        assert_eq!(to_lines("BLOCK", &block).unwrap(), ["<BLOCK>", "<TRNUID>7", "</BLOCK>"]);
    }

    #[test]
    fn special_characters_are_not_escaped() {
        assert_eq!(to_lines("NAME", "Tom & Jerry <LLC>").unwrap(), ["<NAME>Tom & Jerry <LLC>"]);
    }

    #[test]
    fn floats_are_rejected() {
        assert_eq!(to_lines("TRNAMT", &4.5_f64), Err(Error::UnsupportedType("f64")));
    }

    #[test]
    fn maps_are_rejected() {
        let map: HashMap<String, String> = HashMap::new();
        assert_eq!(to_lines("MAP", &map), Err(Error::UnsupportedType("map")));
    }
}
