/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

#![warn(unreachable_pub, rust_2018_idioms)]

//! Client metrics
//!
//! Clients record call durations, attempt counts and in-flight calls through the instruments of a
//! [`TelemetryProvider`](provider::TelemetryProvider). Unless a provider is configured, on the
//! client or [globally](global::set_global_telemetry_provider), every measurement is discarded.

pub mod attributes;
pub mod error;
pub mod global;
pub mod meter;
mod noop;
pub mod provider;
#[cfg(any(test, feature = "test-util"))]
pub mod test_util;
