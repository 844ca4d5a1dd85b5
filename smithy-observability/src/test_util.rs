/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! An in-memory [`MeterProvider`] for asserting on recorded metrics in tests.

use crate::attributes::Attributes;
use crate::meter::{
    AsyncMeasurement, Histogram, MeasurementCallback, Meter, MeterProvider, MonotonicCounter,
    UpDownCounter,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorded {
    histograms: HashMap<String, Vec<f64>>,
    counters: HashMap<String, i64>,
    gauges: HashMap<String, Vec<f64>>,
    callbacks: Vec<(String, Arc<GaugeState>)>,
}

struct GaugeState {
    callback: MeasurementCallback<f64>,
    stopped: AtomicBool,
}

/// Records every measurement in memory. Meters created from the same provider share storage.
#[derive(Clone, Default)]
pub struct InMemoryMeterProvider {
    recorded: Arc<Mutex<Recorded>>,
}

impl fmt::Debug for InMemoryMeterProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryMeterProvider").finish()
    }
}

impl InMemoryMeterProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    fn with<T>(&self, f: impl FnOnce(&mut Recorded) -> T) -> T {
        f(&mut lock(&self.recorded))
    }

    /// All values recorded into the named histogram
    pub fn histogram(&self, name: &str) -> Vec<f64> {
        self.with(|r| r.histograms.get(name).cloned().unwrap_or_default())
    }

    /// The current value of the named counter (monotonic or up-down)
    pub fn counter(&self, name: &str) -> i64 {
        self.with(|r| r.counters.get(name).cloned().unwrap_or_default())
    }

    /// All values recorded into the named gauge, either directly or by [`collect`](Self::collect)
    pub fn gauge(&self, name: &str) -> Vec<f64> {
        self.with(|r| r.gauges.get(name).cloned().unwrap_or_default())
    }

    /// Invoke the callback of every gauge that has not been stopped
    pub fn collect(&self) {
        let callbacks = self.with(|r| r.callbacks.clone());
        for (name, state) in callbacks {
            if state.stopped.load(Ordering::SeqCst) {
                continue;
            }
            let recorder = InMemoryGauge {
                name,
                state: state.clone(),
                recorded: self.recorded.clone(),
            };
            (state.callback)(&recorder);
        }
    }
}

impl MeterProvider for InMemoryMeterProvider {
    fn get_meter(&self, _scope: &'static str, _attributes: Option<&Attributes>) -> Arc<dyn Meter> {
        Arc::new(InMemoryMeter {
            recorded: self.recorded.clone(),
        })
    }
}

struct InMemoryMeter {
    recorded: Arc<Mutex<Recorded>>,
}

impl fmt::Debug for InMemoryMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryMeter").finish()
    }
}

impl Meter for InMemoryMeter {
    fn create_gauge(
        &self,
        name: String,
        callback: MeasurementCallback<f64>,
        _units: Option<String>,
        _description: Option<String>,
    ) -> Box<dyn AsyncMeasurement<Value = f64>> {
        let state = Arc::new(GaugeState {
            callback,
            stopped: AtomicBool::new(false),
        });
        lock(&self.recorded)
            .callbacks
            .push((name.clone(), state.clone()));
        Box::new(InMemoryGauge {
            name,
            state,
            recorded: self.recorded.clone(),
        })
    }

    fn create_up_down_counter(
        &self,
        name: String,
        _units: Option<String>,
        _description: Option<String>,
    ) -> Box<dyn UpDownCounter> {
        Box::new(InMemoryInstrument {
            name,
            recorded: self.recorded.clone(),
        })
    }

    fn create_monotonic_counter(
        &self,
        name: String,
        _units: Option<String>,
        _description: Option<String>,
    ) -> Box<dyn MonotonicCounter> {
        Box::new(InMemoryInstrument {
            name,
            recorded: self.recorded.clone(),
        })
    }

    fn create_histogram(
        &self,
        name: String,
        _units: Option<String>,
        _description: Option<String>,
    ) -> Box<dyn Histogram> {
        Box::new(InMemoryInstrument {
            name,
            recorded: self.recorded.clone(),
        })
    }
}

fn lock(recorded: &Mutex<Recorded>) -> std::sync::MutexGuard<'_, Recorded> {
    recorded
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct InMemoryInstrument {
    name: String,
    recorded: Arc<Mutex<Recorded>>,
}

impl fmt::Debug for InMemoryInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryInstrument")
            .field("name", &self.name)
            .finish()
    }
}

impl Histogram for InMemoryInstrument {
    fn record(&self, value: f64, _attributes: Option<&Attributes>) {
        lock(&self.recorded)
            .histograms
            .entry(self.name.clone())
            .or_default()
            .push(value);
    }
}

impl MonotonicCounter for InMemoryInstrument {
    fn add(&self, value: u64, _attributes: Option<&Attributes>) {
        *lock(&self.recorded)
            .counters
            .entry(self.name.clone())
            .or_default() += value as i64;
    }
}

impl UpDownCounter for InMemoryInstrument {
    fn add(&self, value: i64, _attributes: Option<&Attributes>) {
        *lock(&self.recorded)
            .counters
            .entry(self.name.clone())
            .or_default() += value;
    }
}

struct InMemoryGauge {
    name: String,
    state: Arc<GaugeState>,
    recorded: Arc<Mutex<Recorded>>,
}

impl AsyncMeasurement for InMemoryGauge {
    type Value = f64;

    fn record(&self, value: f64, _attributes: Option<&Attributes>) {
        lock(&self.recorded)
            .gauges
            .entry(self.name.clone())
            .or_default()
            .push(value);
    }

    fn stop(&self) {
        self.state.stopped.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryMeterProvider;
    use crate::meter::MeterProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn gauge_callback_reports_on_collect_until_stopped() {
        let provider = InMemoryMeterProvider::new();
        let meter = provider.get_meter("test", None);
        let in_flight = Arc::new(AtomicUsize::new(3));
        let observed = in_flight.clone();
        let gauge = meter.create_gauge(
            "in_flight".into(),
            Box::new(move |recorder| recorder.record(observed.load(Ordering::SeqCst) as f64, None)),
            None,
            None,
        );

        provider.collect();
        in_flight.store(1, Ordering::SeqCst);
        provider.collect();
        assert_eq!(provider.gauge("in_flight"), vec![3.0, 1.0]);

        gauge.stop();
        provider.collect();
        assert_eq!(provider.gauge("in_flight"), vec![3.0, 1.0]);

        gauge.record(9.0, None);
        assert_eq!(provider.gauge("in_flight"), vec![3.0, 1.0, 9.0]);
    }

    #[test]
    fn counters_and_histograms_accumulate() {
        let provider = InMemoryMeterProvider::new();
        let meter = provider.get_meter("test", None);
        let counter = meter.create_monotonic_counter("calls".into(), None, None);
        counter.add(1, None);
        counter.add(2, None);
        let up_down = meter.create_up_down_counter("open".into(), None, None);
        up_down.add(2, None);
        up_down.add(-1, None);
        let hist = meter.create_histogram("latency".into(), Some("s".into()), None);
        hist.record(0.25, None);

        assert_eq!(provider.counter("calls"), 3);
        assert_eq!(provider.counter("open"), 1);
        assert_eq!(provider.histogram("latency"), vec![0.25]);
        assert!(provider.histogram("unknown").is_empty());
    }
}
