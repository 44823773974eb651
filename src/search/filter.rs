// src/search/filter.rs
use crate::domain::Property;
use crate::search::criteria::FilterCriteria;

/// Keep the properties that satisfy every present constraint, in input order.
pub fn filter_properties(properties: Vec<Property>, criteria: &FilterCriteria) -> Vec<Property> {
    if criteria.is_empty() {
        return properties;
    }

    let matcher = Matcher::new(criteria);
    properties.into_iter().filter(|p| matcher.matches(p)).collect()
}

/// Criteria with the text needles lowercased once per request.
struct Matcher<'a> {
    criteria: &'a FilterCriteria,
    search: Option<String>,
    location: Option<String>,
    property_type: Option<String>,
}

impl<'a> Matcher<'a> {
    fn new(criteria: &'a FilterCriteria) -> Self {
        let lower = |s: &Option<String>| s.as_deref().map(str::to_lowercase);
        Self {
            criteria,
            search: lower(&criteria.search),
            location: lower(&criteria.location),
            property_type: lower(&criteria.property_type),
        }
    }

    fn matches(&self, p: &Property) -> bool {
        if let Some(needle) = &self.search {
            let hit = contains_ci(&p.title, needle)
                || contains_ci(&p.location, needle)
                || contains_ci(&p.description, needle);
            if !hit {
                return false;
            }
        }

        if let Some(needle) = &self.location {
            if !contains_ci(&p.location, needle) {
                return false;
            }
        }

        if let Some(needle) = &self.property_type {
            if !contains_ci(p.property_type.as_str(), needle) {
                return false;
            }
        }

        if let Some(min_beds) = self.criteria.bedrooms {
            if p.bedrooms < min_beds {
                return false;
            }
        }

        if self.criteria.has_price_range() {
            // An unreadable price cannot be shown to fall inside the range.
            let Some(price) = p.price_value() else {
                return false;
            };
            let min = self.criteria.min_price.unwrap_or(0);
            let max = self.criteria.max_price.unwrap_or(u64::MAX);
            if price < min || price > max {
                return false;
            }
        }

        true
    }
}

/// `needle` must already be lowercase.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
