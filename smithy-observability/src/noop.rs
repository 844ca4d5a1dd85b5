/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Instruments that discard every measurement

use crate::attributes::Attributes;
use crate::meter::{
    AsyncMeasurement, Histogram, MeasurementCallback, Meter, MeterProvider, MonotonicCounter,
    UpDownCounter,
};
use std::sync::Arc;

/// One type stands in for the provider, the meter and every synchronous instrument
#[derive(Debug, Clone, Copy)]
pub(crate) struct Noop;

impl MeterProvider for Noop {
    fn get_meter(&self, _scope: &'static str, _attributes: Option<&Attributes>) -> Arc<dyn Meter> {
        Arc::new(Noop)
    }
}

impl Meter for Noop {
    fn create_gauge(
        &self,
        _name: String,
        _callback: MeasurementCallback<f64>,
        _units: Option<String>,
        _description: Option<String>,
    ) -> Box<dyn AsyncMeasurement<Value = f64>> {
        // the callback is dropped unread, nothing ever collects a noop gauge
        Box::new(Noop)
    }

    fn create_up_down_counter(
        &self,
        _name: String,
        _units: Option<String>,
        _description: Option<String>,
    ) -> Box<dyn UpDownCounter> {
        Box::new(Noop)
    }

    fn create_monotonic_counter(
        &self,
        _name: String,
        _units: Option<String>,
        _description: Option<String>,
    ) -> Box<dyn MonotonicCounter> {
        Box::new(Noop)
    }

    fn create_histogram(
        &self,
        _name: String,
        _units: Option<String>,
        _description: Option<String>,
    ) -> Box<dyn Histogram> {
        Box::new(Noop)
    }
}

impl AsyncMeasurement for Noop {
    type Value = f64;

    fn record(&self, _value: f64, _attributes: Option<&Attributes>) {}

    fn stop(&self) {}
}

impl UpDownCounter for Noop {
    fn add(&self, _value: i64, _attributes: Option<&Attributes>) {}
}

impl MonotonicCounter for Noop {
    fn add(&self, _value: u64, _attributes: Option<&Attributes>) {}
}

impl Histogram for Noop {
    fn record(&self, _value: f64, _attributes: Option<&Attributes>) {}
}
