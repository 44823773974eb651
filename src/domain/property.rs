// src/domain/property.rs

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Listing identifier. Records arrive with either numeric ids (bundled
/// dataset) or string ids (primary store); both are converted to one
/// trimmed string form here and compared as strings everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PropertyId(String);

impl PropertyId {
    /// Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for PropertyId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for PropertyId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        let raw = match RawId::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        };

        PropertyId::parse(&raw).ok_or_else(|| serde::de::Error::custom("empty property id"))
    }
}

/// Listing category as shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    #[serde(rename = "For Sale")]
    ForSale,
    #[serde(rename = "For Rent")]
    ForRent,
    #[serde(rename = "For Investment")]
    ForInvestment,
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [
        PropertyType::ForSale,
        PropertyType::ForRent,
        PropertyType::ForInvestment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::ForSale => "For Sale",
            PropertyType::ForRent => "For Rent",
            PropertyType::ForInvestment => "For Investment",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    /// Exact label match, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PropertyType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown property type: {s:?}"))
    }
}

/// A listing as served by the API and stored in `properties`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    pub location: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(default)]
    pub area: String,
    /// Display text such as "$690,000".
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Property {
    pub fn price_value(&self) -> Option<u64> {
        parse_price(&self.price)
    }
}

/// Numeric value of a display price: every non-digit is dropped.
/// Returns `None` when no digits remain or the value does not fit.
pub fn parse_price(display: &str) -> Option<u64> {
    let digits: String = display.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_ids_normalize_to_the_same_value() {
        let from_number: PropertyId = serde_json::from_str("42").unwrap();
        let from_text: PropertyId = serde_json::from_str("\" 42 \"").unwrap();

        assert_eq!(from_number, from_text);
        assert_eq!(from_number.as_str(), "42");
    }

    #[test]
    fn blank_id_is_rejected() {
        assert!(serde_json::from_str::<PropertyId>("\"   \"").is_err());
        assert!(PropertyId::parse("").is_none());
    }

    #[test]
    fn parse_price_strips_currency_formatting() {
        assert_eq!(parse_price("$690,000"), Some(690_000));
        assert_eq!(parse_price("1 250 000 USD"), Some(1_250_000));
        assert_eq!(parse_price("Price on request"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("$99999999999999999999999"), None);
    }

    #[test]
    fn property_type_labels() {
        assert_eq!("for rent".parse::<PropertyType>(), Ok(PropertyType::ForRent));
        assert!("Sold".parse::<PropertyType>().is_err());

        let json = serde_json::to_string(&PropertyType::ForInvestment).unwrap();
        assert_eq!(json, "\"For Investment\"");
    }

    #[test]
    fn property_deserializes_from_bundled_shape() {
        let raw = r#"{
            "id": 7,
            "title": "Lake House",
            "location": "Denver, CO",
            "type": "For Sale",
            "bedrooms": 4,
            "bathrooms": 2,
            "area": "2100 sqft",
            "price": "$830,500",
            "description": "Quiet shoreline.",
            "features": ["Garden"],
            "images": []
        }"#;

        let p: Property = serde_json::from_str(raw).unwrap();
        assert_eq!(p.id.as_str(), "7");
        assert_eq!(p.property_type, PropertyType::ForSale);
        assert_eq!(p.price_value(), Some(830_500));

        // Serialized back with the "type" key and a string id.
        let back = serde_json::to_value(&p).unwrap();
        assert_eq!(back["type"], "For Sale");
        assert_eq!(back["id"], "7");
    }
}
