/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Standard retry mode
//!
//! A client owns one [`RetryCtx`]: the retry quota shared by every request it sends. Each request
//! gets a fresh [`StandardRetryStrategy`] counting its own attempts; tower's
//! [`Retry`](tower::retry::Retry) middleware asks it after every attempt whether to go again.

use smithy_http::operation::Operation;
use smithy_http::result::{SdkError, SdkSuccess};
use smithy_http::retry::ClassifyResponse;
use smithy_http::sleep::AsyncSleep;
use smithy_types::retry::{ErrorKind, RetryKind};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

/// Attempt limit, retry quota and backoff of a client
///
/// Defaults: three attempts including the first, a 500 token quota where a retry costs 5 tokens
/// (10 after a transient error), and a jittered `2^n` second backoff capped at 20 seconds.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    max_attempts: u32,
    initial_retry_tokens: usize,
    retry_cost: usize,
    transient_retry_cost: usize,
    success_refund: usize,
    max_backoff: Duration,
    base: fn() -> f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_attempts: 3,
            initial_retry_tokens: 500,
            retry_cost: 5,
            transient_retry_cost: 10,
            success_refund: 1,
            max_backoff: Duration::from_secs(20),
            base: fastrand::f64,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// One attempt, no retries
    pub fn disabled() -> Self {
        Self::default().with_max_attempts(1)
    }

    /// Total attempts, including the first; values below 1 are treated as 1
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = max_backoff;
        self
    }

    pub fn with_initial_retry_tokens(mut self, tokens: usize) -> Self {
        self.initial_retry_tokens = tokens;
        self
    }

    /// Replace the random backoff multiplier, eg. `|| 1.0` for deterministic delays in tests
    pub fn with_static_base(mut self, base: fn() -> f64) -> Self {
        self.base = base;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before retry number `retry` (starting at 0), never above `max_backoff`
    fn backoff(&self, retry: u32) -> Duration {
        // clamp before converting: `2^retry` overflows `Duration` long before `u32::MAX`
        let exponent = retry.min(62) as i32;
        let seconds = (self.base)() * 2_f64.powi(exponent);
        if seconds.is_nan() || seconds <= 0.0 {
            Duration::from_secs(0)
        } else if seconds >= self.max_backoff.as_secs_f64() {
            self.max_backoff
        } else {
            Duration::from_secs_f64(seconds)
        }
    }

    fn cost_of(&self, kind: ErrorKind) -> usize {
        if kind.is_transient() {
            self.transient_retry_cost
        } else {
            self.retry_cost
        }
    }
}

/// The retry quota of one client
///
/// Retrying withdraws tokens. A success refunds the last withdrawal, or a single token when
/// nothing was withdrawn, never exceeding the starting balance.
#[derive(Debug)]
pub struct RetryCtx {
    quota: usize,
    last_withdrawal: Option<usize>,
    config: RetryConfig,
}

impl RetryCtx {
    pub fn new(config: RetryConfig) -> Self {
        RetryCtx {
            quota: config.initial_retry_tokens,
            last_withdrawal: None,
            config,
        }
    }

    pub fn retry_quota(&self) -> usize {
        self.quota
    }

    fn withdraw(&mut self, kind: ErrorKind) -> bool {
        let cost = self.config.cost_of(kind);
        match self.quota.checked_sub(cost) {
            Some(remaining) => {
                self.quota = remaining;
                self.last_withdrawal = Some(cost);
                true
            }
            None => false,
        }
    }

    fn refund(&mut self) {
        let refund = self
            .last_withdrawal
            .take()
            .unwrap_or(self.config.success_refund);
        self.quota = (self.quota + refund).min(self.config.initial_retry_tokens);
    }
}

/// Per-request retry state on top of a client's shared [`RetryCtx`]
#[derive(Clone)]
pub struct StandardRetryStrategy {
    retries: u32,
    ctx: Arc<Mutex<RetryCtx>>,
    sleep_impl: Arc<dyn AsyncSleep>,
}

impl fmt::Debug for StandardRetryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardRetryStrategy")
            .field("retries", &self.retries)
            .finish()
    }
}

impl StandardRetryStrategy {
    pub fn new(ctx: Arc<Mutex<RetryCtx>>, sleep_impl: Arc<dyn AsyncSleep>) -> Self {
        StandardRetryStrategy {
            retries: 0,
            ctx,
            sleep_impl,
        }
    }

    /// Retries granted to this request so far
    pub fn attempts(&self) -> u32 {
        self.retries
    }

    pub fn ctx(&self) -> MutexGuard<'_, RetryCtx> {
        // the quota is a plain counter, still consistent after a panic elsewhere
        self.ctx
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn out_of_attempts(&self, ctx: &RetryCtx) -> bool {
        let exhausted = self.retries + 1 >= ctx.config.max_attempts;
        if exhausted {
            debug!(attempts = self.retries + 1, "no attempts remaining");
        }
        exhausted
    }

    fn next(&self) -> Self {
        StandardRetryStrategy {
            retries: self.retries + 1,
            ..self.clone()
        }
    }

    fn on_success(&self) {
        self.ctx().refund();
    }

    /// The next strategy and the delay before using it, if `kind` should be retried
    fn on_error(&self, kind: ErrorKind) -> Option<(Self, Duration)> {
        let mut ctx = self.ctx();
        if self.out_of_attempts(&ctx) {
            return None;
        }
        if !ctx.withdraw(kind) {
            debug!(quota = ctx.quota, "retry quota exhausted");
            return None;
        }
        Some((self.next(), ctx.config.backoff(self.retries)))
    }

    /// Server requested delays skip the quota but not the attempt limit
    fn on_explicit_delay(&self, delay: Duration) -> Option<(Self, Duration)> {
        if self.out_of_attempts(&self.ctx()) {
            return None;
        }
        Some((self.next(), delay))
    }
}

impl<Handler, R, T, E> tower::retry::Policy<Operation<Handler, R>, SdkSuccess<T>, SdkError<E>>
    for StandardRetryStrategy
where
    Handler: Clone,
    R: ClassifyResponse<SdkSuccess<T>, SdkError<E>>,
{
    type Future = Pin<Box<dyn Future<Output = Self> + Send>>;

    fn retry(
        &self,
        req: &Operation<Handler, R>,
        result: Result<&SdkSuccess<T>, &SdkError<E>>,
    ) -> Option<Self::Future> {
        let kind = req.retry_policy().classify(result);
        let (next, delay) = match kind {
            RetryKind::Unnecessary => {
                self.on_success();
                return None;
            }
            RetryKind::NotRetryable => return None,
            RetryKind::Error(err) => self.on_error(err)?,
            RetryKind::Explicit(delay) => self.on_explicit_delay(delay)?,
        };
        debug!(attempt = next.retries + 1, delay = ?delay, kind = ?kind, "retrying request");
        let sleep = self.sleep_impl.sleep(delay);
        Some(Box::pin(async move {
            sleep.await;
            next
        }))
    }

    fn clone_request(&self, req: &Operation<Handler, R>) -> Option<Operation<Handler, R>> {
        req.try_clone()
    }
}
