/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! HTTP behavior shared by every AWS service client
//!
//! - [`retry`]: decides whether a failed attempt is worth repeating
//! - [`user_agent`]: the `User-Agent` and `x-amz-user-agent` headers
//! - [`error`]: the generic `{"__type": .., "message": ..}` error envelope

pub mod error;
pub mod retry;
pub mod user_agent;

pub use retry::AwsErrorRetryPolicy;
