/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Errors reported by telemetry providers

use std::error::Error;
use std::fmt;

/// Failure of a telemetry provider. Instruments themselves never fail.
#[non_exhaustive]
#[derive(Debug)]
pub enum ObservabilityError {
    /// A thread panicked while replacing the global provider
    GlobalProviderPoisoned,
}

impl fmt::Display for ObservabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservabilityError::GlobalProviderPoisoned => {
                write!(f, "the global telemetry provider lock is poisoned")
            }
        }
    }
}

impl Error for ObservabilityError {}
