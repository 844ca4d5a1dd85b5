/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Instrument interfaces
//!
//! A client asks its [`MeterProvider`] for a [`Meter`] once, creates its instruments up front and
//! records into them for every call.

use crate::attributes::Attributes;
use crate::error::ObservabilityError;
use std::fmt::Debug;
use std::sync::Arc;

/// Invoked with the gauge's recorder each time the provider collects
pub type MeasurementCallback<T> = Box<dyn Fn(&dyn AsyncMeasurement<Value = T>) + Send + Sync>;

/// Hands out one [`Meter`] per instrumentation scope
pub trait MeterProvider: Debug + Send + Sync {
    fn get_meter(&self, scope: &'static str, attributes: Option<&Attributes>) -> Arc<dyn Meter>;

    /// Push buffered measurements to the exporter
    fn flush(&self) -> Result<(), ObservabilityError> {
        Ok(())
    }

    /// Flush and release the exporter. Later measurements may be dropped.
    fn shutdown(&self) -> Result<(), ObservabilityError> {
        Ok(())
    }
}

/// Creates instruments. Names follow the `smithy.client.*` convention.
pub trait Meter: Debug + Send + Sync {
    /// Create an asynchronous gauge
    ///
    /// The returned handle records directly and [`stop`](AsyncMeasurement::stop)s `callback`.
    fn create_gauge(
        &self,
        name: String,
        callback: MeasurementCallback<f64>,
        units: Option<String>,
        description: Option<String>,
    ) -> Box<dyn AsyncMeasurement<Value = f64>>;

    fn create_up_down_counter(
        &self,
        name: String,
        units: Option<String>,
        description: Option<String>,
    ) -> Box<dyn UpDownCounter>;

    fn create_monotonic_counter(
        &self,
        name: String,
        units: Option<String>,
        description: Option<String>,
    ) -> Box<dyn MonotonicCounter>;

    fn create_histogram(
        &self,
        name: String,
        units: Option<String>,
        description: Option<String>,
    ) -> Box<dyn Histogram>;
}

/// Distribution of values, eg. call durations in seconds
pub trait Histogram: Debug + Send + Sync {
    fn record(&self, value: f64, attributes: Option<&Attributes>);
}

/// A count that only grows, eg. attempts
pub trait MonotonicCounter: Debug + Send + Sync {
    fn add(&self, value: u64, attributes: Option<&Attributes>);
}

/// A count that can shrink
pub trait UpDownCounter: Debug + Send + Sync {
    fn add(&self, value: i64, attributes: Option<&Attributes>);
}

/// An asynchronous gauge
///
/// Serves as the handle returned by [`Meter::create_gauge`] and as the recorder passed to its
/// callback.
pub trait AsyncMeasurement: Send + Sync {
    /// Recorded value type
    type Value;

    fn record(&self, value: Self::Value, attributes: Option<&Attributes>);

    /// Unregister the callback so the provider stops collecting this gauge
    fn stop(&self);
}
