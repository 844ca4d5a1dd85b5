/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use serde::{Deserialize, Serialize};

/// A tag is a key-value pair attached to a pipeline
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Tag {
    pub fn builder() -> tag::Builder {
        tag::Builder::default()
    }
}

pub mod tag {
    use crate::model::Tag;

    #[non_exhaustive]
    #[derive(Debug, Clone, Default)]
    pub struct Builder {
        key: Option<String>,
        value: Option<String>,
    }

    impl Builder {
        pub fn key(mut self, inp: impl Into<String>) -> Self {
            self.key = Some(inp.into());
            self
        }

        pub fn value(mut self, inp: impl Into<String>) -> Self {
            self.value = Some(inp.into());
            self
        }

        pub fn build(self) -> Tag {
            Tag {
                key: self.key,
                value: self.value,
            }
        }
    }
}

/// The name and identifier of a pipeline
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineIdName {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A key-value pair describing a property of a pipeline object
///
/// The value is either a `string_value` or a `ref_value` pointing at another object.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub key: Option<String>,
    pub string_value: Option<String>,
    pub ref_value: Option<String>,
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineDescription {
    pub pipeline_id: Option<String>,
    pub name: Option<String>,
    pub fields: Option<Vec<Field>>,
    pub description: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

impl PipelineDescription {
    /// The value of the `@pipelineState` field, for example `PENDING` or `SCHEDULED`
    pub fn state(&self) -> Option<&str> {
        self.fields
            .as_ref()?
            .iter()
            .find(|field| field.key.as_deref() == Some("@pipelineState"))
            .and_then(|field| field.string_value.as_deref())
    }
}
