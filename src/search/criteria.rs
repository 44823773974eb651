// src/search/criteria.rs
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Decoded query string, one value per key (last one wins).
pub type QueryParams = HashMap<String, String>;

/// Optional search constraints. `None` always means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub location: Option<String>,
    pub property_type: Option<String>,
    pub bedrooms: Option<u32>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
}

/// One editable filter, named after its query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Search,
    Location,
    Type,
    Bedrooms,
    MinPrice,
    MaxPrice,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::Search,
        FilterField::Location,
        FilterField::Type,
        FilterField::Bedrooms,
        FilterField::MinPrice,
        FilterField::MaxPrice,
    ];

    pub fn param(&self) -> &'static str {
        match self {
            FilterField::Search => "search",
            FilterField::Location => "location",
            FilterField::Type => "type",
            FilterField::Bedrooms => "bedrooms",
            FilterField::MinPrice => "minPrice",
            FilterField::MaxPrice => "maxPrice",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterField::ALL
            .into_iter()
            .find(|f| f.param().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown filter: {s}"))
    }
}

impl FilterCriteria {
    /// Build criteria from listing-endpoint parameters. Malformed numbers
    /// are dropped rather than rejected.
    pub fn from_params(params: &QueryParams) -> Self {
        let mut criteria = Self::default();
        for field in FilterField::ALL {
            if let Some(raw) = params.get(field.param()) {
                criteria.set(field, raw);
            }
        }
        criteria
    }

    /// Replace one field from raw user input.
    pub fn set(&mut self, field: FilterField, raw: &str) {
        match field {
            FilterField::Search => self.search = text(raw),
            FilterField::Location => self.location = text(raw),
            FilterField::Type => self.property_type = text(raw),
            FilterField::Bedrooms => self.bedrooms = number(raw),
            FilterField::MinPrice => self.min_price = number(raw),
            FilterField::MaxPrice => self.max_price = number(raw),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn has_price_range(&self) -> bool {
        self.min_price.is_some() || self.max_price.is_some()
    }

    /// Query-string pairs for the present fields only.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push = |field: FilterField, value: Option<String>| {
            if let Some(v) = value {
                pairs.push((field.param(), v));
            }
        };

        push(FilterField::Search, self.search.clone());
        push(FilterField::Location, self.location.clone());
        push(FilterField::Type, self.property_type.clone());
        push(FilterField::Bedrooms, self.bedrooms.map(|n| n.to_string()));
        push(FilterField::MinPrice, self.min_price.map(|n| n.to_string()));
        push(FilterField::MaxPrice, self.max_price.map(|n| n.to_string()));

        pairs
    }
}

fn text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn number<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}
