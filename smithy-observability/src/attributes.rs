/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Attributes (also referred to as tags or annotations in other telemetry systems) are structured
//! key-value pairs that annotate a measurement.

use std::collections::HashMap;

/// The valid types of values accepted by [Attributes]
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    /// Holds an [i64]
    I64(i64),
    /// Holds an [f64]
    F64(f64),
    /// Holds a [String]
    String(String),
    /// Holds a [bool]
    Bool(bool),
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::I64(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::F64(value)
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

/// Structured telemetry metadata
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes {
    attrs: HashMap<String, AttributeValue>,
}

impl Attributes {
    /// Create an empty set of attributes
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`set`](Attributes::set)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Get an attribute
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.attrs.get(key)
    }

    /// Iterate over all attributes
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.attrs.iter()
    }

    /// Number of attributes set
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Returns `true` if no attributes are set
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}
