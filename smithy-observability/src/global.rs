/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Process-wide default [`TelemetryProvider`].
//!
//! Clients that are not given a telemetry provider explicitly fall back to this one.

use once_cell::sync::Lazy;
use std::{mem, sync::RwLock};

use crate::error::ObservabilityError;
use crate::provider::TelemetryProvider;

static GLOBAL_TELEMETRY_PROVIDER: Lazy<RwLock<TelemetryProvider>> =
    Lazy::new(|| RwLock::new(TelemetryProvider::noop()));

/// Replace the global provider, returning the previous one.
pub fn set_global_telemetry_provider(
    new_provider: TelemetryProvider,
) -> Result<TelemetryProvider, ObservabilityError> {
    let mut old_provider = GLOBAL_TELEMETRY_PROVIDER
        .write()
        .map_err(|_| ObservabilityError::GlobalProviderPoisoned)?;
    Ok(mem::replace(&mut *old_provider, new_provider))
}

/// Get a handle to the current global provider.
pub fn global_telemetry_provider() -> TelemetryProvider {
    match GLOBAL_TELEMETRY_PROVIDER.read() {
        Ok(provider) => provider.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{global_telemetry_provider, set_global_telemetry_provider};
    use crate::provider::TelemetryProvider;
    use crate::test_util::InMemoryMeterProvider;
    use std::sync::Arc;

    #[test]
    fn can_swap_global_provider() {
        let recorder = Arc::new(InMemoryMeterProvider::new());
        let provider = TelemetryProvider::builder()
            .meter_provider(recorder.clone())
            .build();
        set_global_telemetry_provider(provider).expect("lock is healthy");

        let meter = global_telemetry_provider()
            .meter_provider()
            .get_meter("test", None);
        meter
            .create_histogram("global.hist".into(), None, None)
            .record(1.5, None);
        assert_eq!(recorder.histogram("global.hist"), vec![1.5]);

        set_global_telemetry_provider(TelemetryProvider::noop()).expect("lock is healthy");
    }
}
