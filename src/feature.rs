//! Features: opaque named evidence handed to a classifier.
//!
//! The decoder never looks inside a feature. It only concatenates base
//! features with the output of outcome feature extractors and forwards the
//! result.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One feature vector per sequence position
pub type FeatureVector = Vec<Feature>;

/// Value carried by a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl FeatureValue {
    /// Returns the text payload, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Boolean(b) => write!(f, "{}", b),
            FeatureValue::Integer(i) => write!(f, "{}", i),
            FeatureValue::Real(r) => write!(f, "{}", r),
            FeatureValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Boolean(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Integer(value)
    }
}

impl From<i32> for FeatureValue {
    fn from(value: i32) -> Self {
        FeatureValue::Integer(i64::from(value))
    }
}

/// Values above `i64::MAX` keep their digits as text and render the same.
impl From<usize> for FeatureValue {
    fn from(value: usize) -> Self {
        match i64::try_from(value) {
            Ok(integer) => FeatureValue::Integer(integer),
            Err(_) => FeatureValue::Text(value.to_string()),
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Real(value)
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::Text(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Text(value.to_string())
    }
}

/// A single named piece of evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub value: FeatureValue,
}

impl Feature {
    pub fn new(name: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Finds the first feature called `name` in a feature slice
    pub fn find<'a>(features: &'a [Feature], name: &str) -> Option<&'a Feature> {
        features.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}
