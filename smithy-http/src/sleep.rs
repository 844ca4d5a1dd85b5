/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Runtime independent delays between retry attempts
//!
//! The retry strategy never names an async runtime. It waits on whatever [`AsyncSleep`] the
//! client was configured with; with the `rt-tokio` feature, [`default_async_sleep`] supplies one
//! backed by `tokio::time`.

use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

/// Produces futures that complete after a delay
pub trait AsyncSleep: Debug + Send + Sync {
    fn sleep(&self, duration: Duration) -> Sleep;
}

impl<T> AsyncSleep for Arc<T>
where
    T: AsyncSleep + ?Sized,
{
    fn sleep(&self, duration: Duration) -> Sleep {
        T::sleep(self, duration)
    }
}

/// A pending delay returned by [`AsyncSleep::sleep`]
#[must_use = "a delay does nothing unless awaited"]
pub struct Sleep(Pin<Box<dyn Future<Output = ()> + Send + 'static>>);

impl Sleep {
    pub fn new(future: impl Future<Output = ()> + Send + 'static) -> Self {
        Sleep(Box::pin(future))
    }

    /// A delay that has already elapsed
    pub fn ready() -> Self {
        Sleep::new(std::future::ready(()))
    }
}

impl Debug for Sleep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Sleep")
    }
}

impl Future for Sleep {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.0.as_mut().poll(cx)
    }
}

/// The sleep implementation enabled by this crate's features, if any
pub fn default_async_sleep() -> Option<Arc<dyn AsyncSleep>> {
    #[cfg(feature = "rt-tokio")]
    {
        Some(Arc::new(TokioSleep::new()))
    }
    #[cfg(not(feature = "rt-tokio"))]
    {
        None
    }
}

#[cfg(feature = "rt-tokio")]
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct TokioSleep;

#[cfg(feature = "rt-tokio")]
impl TokioSleep {
    pub fn new() -> TokioSleep {
        TokioSleep
    }
}

#[cfg(feature = "rt-tokio")]
impl AsyncSleep for TokioSleep {
    fn sleep(&self, duration: Duration) -> Sleep {
        Sleep::new(tokio::time::sleep(duration))
    }
}

#[cfg(test)]
mod test {
    use crate::sleep::Sleep;

    #[tokio::test]
    async fn ready_completes_immediately() {
        Sleep::ready().await;
    }

    #[cfg(feature = "rt-tokio")]
    #[tokio::test(start_paused = true)]
    async fn tokio_sleep_waits_for_the_duration() {
        use crate::sleep::default_async_sleep;
        use std::time::Duration;

        let sleep = default_async_sleep().expect("rt-tokio is enabled");
        let start = tokio::time::Instant::now();
        sleep.sleep(Duration::from_secs(5)).await;
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }
}
