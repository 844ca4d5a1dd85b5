/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! The handle clients are configured with

use crate::meter::{Meter, MeterProvider};
use crate::noop::Noop;
use std::sync::Arc;

/// Where a client sends its metrics
///
/// Clones share the same [`MeterProvider`].
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct TelemetryProvider {
    meter_provider: Arc<dyn MeterProvider>,
}

impl TelemetryProvider {
    /// Start from a provider that discards everything
    pub fn builder() -> TelemetryProviderBuilder {
        TelemetryProviderBuilder {
            meter_provider: None,
        }
    }

    /// A provider whose instruments discard every measurement
    pub fn noop() -> TelemetryProvider {
        TelemetryProvider {
            meter_provider: Arc::new(Noop),
        }
    }

    /// The configured [`MeterProvider`]
    pub fn meter_provider(&self) -> &(dyn MeterProvider + 'static) {
        self.meter_provider.as_ref()
    }

    /// Shorthand for `meter_provider().get_meter(scope, None)`
    pub fn meter(&self, scope: &'static str) -> Arc<dyn Meter> {
        self.meter_provider.get_meter(scope, None)
    }
}

impl Default for TelemetryProvider {
    fn default() -> Self {
        Self::noop()
    }
}

/// Builder for [`TelemetryProvider`]
#[derive(Debug, Default)]
pub struct TelemetryProviderBuilder {
    meter_provider: Option<Arc<dyn MeterProvider>>,
}

impl TelemetryProviderBuilder {
    /// Send metrics to `meter_provider`
    pub fn meter_provider(mut self, meter_provider: Arc<dyn MeterProvider>) -> Self {
        self.meter_provider = Some(meter_provider);
        self
    }

    /// Unset providers fall back to the noop provider
    pub fn build(self) -> TelemetryProvider {
        TelemetryProvider {
            meter_provider: self.meter_provider.unwrap_or_else(|| Arc::new(Noop)),
        }
    }
}
