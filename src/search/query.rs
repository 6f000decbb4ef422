//! Search query types
//!
//! `SearchQuery` is the UI filter state in a form that can be serialized to
//! the search endpoint's query string. Optional fields are explicit:
//! `age_min: None` means "no lower bound" and is never sent, while
//! `age_min: Some(0)` is sent as `ageMin=0`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Page length used when none is given
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Field the service can sort on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Breed,
    Name,
    Age,
}

impl SortField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breed => "breed",
            Self::Name => "name",
            Self::Age => "age",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Sort order in the service's `<field>:<asc|desc>` form
///
/// Defaults to `breed:asc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field.as_str(), self.direction.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s
            .split_once(':')
            .ok_or_else(|| format!("Invalid sort '{s}', expected <field>:<asc|desc>"))?;

        let field = match field.trim().to_lowercase().as_str() {
            "breed" => SortField::Breed,
            "name" => SortField::Name,
            "age" => SortField::Age,
            other => return Err(format!("Unknown sort field '{other}' (breed, name, age)")),
        };
        let direction = match direction.trim().to_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => return Err(format!("Unknown sort direction '{other}' (asc, desc)")),
        };

        Ok(Self { field, direction })
    }
}

impl Serialize for SortOrder {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Filter and paging state for one search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Breeds to include; empty means any breed
    #[serde(default)]
    pub breeds: BTreeSet<String>,

    /// Minimum age, inclusive
    #[serde(default)]
    pub age_min: Option<u32>,

    /// Maximum age, inclusive
    #[serde(default)]
    pub age_max: Option<u32>,

    #[serde(default)]
    pub sort: SortOrder,

    /// Page length
    pub size: u32,

    /// Offset of the first result
    #[serde(default)]
    pub from: Option<u32>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            breeds: BTreeSet::new(),
            age_min: None,
            age_max: None,
            sort: SortOrder::default(),
            size: DEFAULT_PAGE_SIZE,
            from: None,
        }
    }
}

impl SearchQuery {
    /// Create a new query builder
    #[must_use]
    pub fn builder() -> SearchQueryBuilder {
        SearchQueryBuilder::default()
    }

    /// Same filters, different offset
    #[must_use]
    pub fn with_from(mut self, from: u32) -> Self {
        self.from = Some(from);
        self
    }

    /// Zero-based page index implied by `from` and `size`
    #[must_use]
    pub fn page_index(&self) -> u32 {
        self.from.unwrap_or(0) / self.size.max(1)
    }

    /// Check the query before it is sent
    ///
    /// # Errors
    ///
    /// Returns a message if `size` is zero or `age_min` exceeds `age_max`.
    pub fn validate(&self) -> Result<(), String> {
        if self.size == 0 {
            return Err("Page size must be at least 1".to_string());
        }

        if let (Some(min), Some(max)) = (self.age_min, self.age_max)
            && min > max
        {
            return Err(format!("Minimum age {min} is greater than maximum age {max}"));
        }

        Ok(())
    }

    /// Serialize into query parameters for `GET /dogs/search`
    ///
    /// Each breed becomes its own `breeds` parameter. Absent optional fields
    /// are left out entirely.
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> = self
            .breeds
            .iter()
            .map(|breed| ("breeds", breed.clone()))
            .collect();

        if let Some(min) = self.age_min {
            params.push(("ageMin", min.to_string()));
        }
        if let Some(max) = self.age_max {
            params.push(("ageMax", max.to_string()));
        }

        params.push(("size", self.size.to_string()));
        params.push(("sort", self.sort.to_string()));

        if let Some(from) = self.from {
            params.push(("from", from.to_string()));
        }

        params
    }
}

/// Builder for `SearchQuery`
#[derive(Debug, Clone, Default)]
pub struct SearchQueryBuilder {
    breeds: BTreeSet<String>,
    age_min: Option<u32>,
    age_max: Option<u32>,
    sort: Option<SortOrder>,
    size: Option<u32>,
    from: Option<u32>,
}

impl SearchQueryBuilder {
    /// Add a single breed
    #[must_use]
    pub fn breed(mut self, breed: impl Into<String>) -> Self {
        self.breeds.insert(breed.into());
        self
    }

    /// Add several breeds
    #[must_use]
    pub fn breeds<I, S>(mut self, breeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.breeds.extend(breeds.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub const fn age_min(mut self, age: Option<u32>) -> Self {
        self.age_min = age;
        self
    }

    #[must_use]
    pub const fn age_max(mut self, age: Option<u32>) -> Self {
        self.age_max = age;
        self
    }

    #[must_use]
    pub const fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    #[must_use]
    pub const fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub const fn from(mut self, from: Option<u32>) -> Self {
        self.from = from;
        self
    }

    /// Build the query
    #[must_use]
    pub fn build(self) -> SearchQuery {
        SearchQuery {
            breeds: self.breeds,
            age_min: self.age_min,
            age_max: self.age_max,
            sort: self.sort.unwrap_or_default(),
            size: self.size.unwrap_or(DEFAULT_PAGE_SIZE),
            from: self.from,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(params: &[(&'static str, String)]) -> Vec<&'static str> {
        params.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_empty_breeds_are_omitted() {
        let query = SearchQuery::default();
        let params = query.to_params();

        assert!(!keys(&params).contains(&"breeds"));
        assert_eq!(
            params,
            vec![("size", "25".to_string()), ("sort", "breed:asc".to_string())]
        );
    }

    #[test]
    fn test_breeds_are_repeated_parameters() {
        let query = SearchQuery::builder().breeds(["Boxer", "Akita"]).build();
        let breeds: Vec<String> = query
            .to_params()
            .into_iter()
            .filter(|(k, _)| *k == "breeds")
            .map(|(_, v)| v)
            .collect();

        assert_eq!(breeds, vec!["Akita".to_string(), "Boxer".to_string()]);
    }

    #[test]
    fn test_duplicate_breeds_collapse() {
        let query = SearchQuery::builder().breed("Boxer").breed("Boxer").build();
        assert_eq!(query.breeds.len(), 1);
    }

    #[test]
    fn test_zero_age_is_not_absent() {
        let query = SearchQuery::builder().age_min(Some(0)).build();
        let params = query.to_params();

        assert!(params.contains(&("ageMin", "0".to_string())));
        assert!(!keys(&params).contains(&"ageMax"));
    }

    #[test]
    fn test_from_only_when_present() {
        let query = SearchQuery::default();
        assert!(!keys(&query.to_params()).contains(&"from"));

        let query = query.with_from(50);
        assert!(query.to_params().contains(&("from", "50".to_string())));
    }

    #[test]
    fn test_full_parameter_order() {
        let query = SearchQuery::builder()
            .breed("Boxer")
            .age_min(Some(2))
            .age_max(Some(8))
            .sort(SortOrder::new(SortField::Age, SortDirection::Desc))
            .size(10)
            .from(Some(20))
            .build();

        assert_eq!(
            query.to_params(),
            vec![
                ("breeds", "Boxer".to_string()),
                ("ageMin", "2".to_string()),
                ("ageMax", "8".to_string()),
                ("size", "10".to_string()),
                ("sort", "age:desc".to_string()),
                ("from", "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_validate_age_range() {
        let query = SearchQuery::builder().age_min(Some(9)).age_max(Some(3)).build();
        assert!(query.validate().is_err());

        let query = SearchQuery::builder().age_min(Some(3)).age_max(Some(3)).build();
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_size() {
        let query = SearchQuery::builder().size(0).build();
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_page_index() {
        assert_eq!(SearchQuery::default().page_index(), 0);
        assert_eq!(SearchQuery::default().with_from(25).page_index(), 1);
        assert_eq!(SearchQuery::default().with_from(74).page_index(), 2);
    }

    #[test]
    fn test_sort_parse_and_display() {
        let sort: SortOrder = "name:desc".parse().unwrap();
        assert_eq!(sort, SortOrder::new(SortField::Name, SortDirection::Desc));
        assert_eq!(sort.to_string(), "name:desc");
        assert_eq!(SortOrder::default().to_string(), "breed:asc");
    }

    #[test]
    fn test_sort_parse_errors() {
        assert!("breed".parse::<SortOrder>().is_err());
        assert!("zip:asc".parse::<SortOrder>().is_err());
        assert!("age:up".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_query_serde_uses_sort_string() {
        let query = SearchQuery::builder().breed("Boxer").build();
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["sort"], "breed:asc");

        let back: SearchQuery = serde_json::from_value(json).unwrap();
        assert_eq!(back, query);
    }
}
