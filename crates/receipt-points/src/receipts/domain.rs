use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Identifier minted for each processed receipt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(pub String);

impl ReceiptId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Purchase receipt exactly as submitted. Every field stays opaque text;
/// parsing happens in `receipts::parsers`.
///
/// Absent or `null` fields decode as empty values so validation can report them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    #[serde(default, deserialize_with = "null_as_default")]
    pub retailer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub purchase_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub purchase_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Item>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: String,
}

/// Single purchased line item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: String,
}

impl Item {
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            short_description: short_description.into(),
            price: price.into(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_payloads() {
        let receipt: Receipt = serde_json::from_str(
            r#"{"retailer":"Target","purchaseDate":"2022-01-02","purchaseTime":"11:11",
                "items":[{"shortDescription":"Pepsi - 12-oz","price":"1.25"}],"total":"1.25"}"#,
        )
        .expect("receipt decodes");

        assert_eq!(receipt.purchase_date, "2022-01-02");
        assert_eq!(receipt.items, vec![Item::new("Pepsi - 12-oz", "1.25")]);
    }

    #[test]
    fn missing_and_null_fields_decode_empty() {
        let receipt: Receipt =
            serde_json::from_str(r#"{"retailer":null,"items":null}"#).expect("receipt decodes");
        assert_eq!(receipt, Receipt::default());
    }

    #[test]
    fn generated_ids_are_distinct_uuids() {
        let first = ReceiptId::generate();
        let second = ReceiptId::generate();
        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.as_str()).is_ok());
    }
}
