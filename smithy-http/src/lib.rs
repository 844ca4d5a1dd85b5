/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! HTTP plumbing shared by every generated operation: request bodies, the property bag that
//! carries per-request configuration to middleware, response parsing and error types.

pub mod body;
pub mod endpoint;
pub mod label;
pub mod middleware;
pub mod operation;
pub mod property_bag;
pub mod query;
pub mod response;
pub mod result;
pub mod retry;
pub mod sleep;
