//! One-Hot District Encoding

use input_validator::normalize_district;
use serde::{Deserialize, Serialize};

/// One-hot encoder over a fixed, ordered set of district categories.
///
/// Districts not in the category list encode as all zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictEncoder {
    categories: Vec<String>,
}

impl DistrictEncoder {
    /// Create an encoder; category names are normalized, order is kept
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            categories: categories
                .into_iter()
                .map(|c| normalize_district(c.as_ref()))
                .collect(),
        }
    }

    /// Known categories in encoding order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of one-hot columns
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the encoder has no categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Whether a district is a known category
    pub fn contains(&self, district: &str) -> bool {
        let key = normalize_district(district);
        self.categories.iter().any(|c| *c == key)
    }

    /// Column names, `DISTRICT_<name>`
    pub fn feature_names(&self) -> impl Iterator<Item = String> + '_ {
        self.categories.iter().map(|c| format!("DISTRICT_{}", c))
    }

    /// Encode a district as a one-hot row
    pub fn encode(&self, district: &str) -> Vec<f64> {
        let key = normalize_district(district);
        self.categories
            .iter()
            .map(|c| if *c == key { 1.0 } else { 0.0 })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> DistrictEncoder {
        DistrictEncoder::new(["achham", "baglung", "chitwan"])
    }

    #[test]
    fn test_encode_known() {
        assert_eq!(encoder().encode("baglung"), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_encode_normalizes_input() {
        assert_eq!(encoder().encode(" Chitwan "), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unknown_encodes_zeros() {
        let enc = encoder();
        assert!(!enc.contains("kathmandu"));
        assert_eq!(enc.encode("kathmandu"), vec![0.0; 3]);
    }

    #[test]
    fn test_feature_names() {
        let names: Vec<_> = encoder().feature_names().collect();
        assert_eq!(names[0], "DISTRICT_achham");
        assert_eq!(names.len(), 3);
    }
}
