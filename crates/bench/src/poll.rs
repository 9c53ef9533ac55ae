// This file is part of Opmeter.
//
// Opmeter is free software: you can redistribute it and/or modify it under the
// terms of the GNU Lesser General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version.
//
// Opmeter is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with Opmeter.
// If not, see https://www.gnu.org/licenses/.

//! Deadline-bounded polling of bundler lifecycle endpoints.

use std::{future::Future, time::Duration};

use opmeter_provider::ProviderResult;
use tokio::time::Instant;

/// Window given to every polling loop before a missing result becomes a
/// timeout outcome.
pub const POLL_DEADLINE: Duration = Duration::from_secs(60);

/// Pause between receipt polls while funding. Measurement polls use no
/// pause at all: an artificial delay would be added to the latency sample.
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Poll `fetch` until it yields a value or `deadline` passes, sleeping
/// `interval` between attempts.
///
/// A fetch error counts as an absent observation for that attempt; transient
/// lookup failures are expected while an operation is in flight and must not
/// abort the loop. Returns `None` once the deadline has elapsed without a
/// present result. Timing out is an outcome, not an error.
pub async fn poll_until<T, F, Fut>(fetch: F, deadline: Instant, interval: Duration) -> Option<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = ProviderResult<Option<T>>>,
{
    loop {
        match fetch().await {
            Ok(Some(value)) => return Some(value),
            Ok(None) => {}
            Err(err) => {
                tracing::trace!("poll attempt failed, treating as absent: {err:?}");
            }
        }

        if Instant::now() >= deadline {
            return None;
        }
        if !interval.is_zero() {
            tokio::time::sleep(interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use anyhow::anyhow;
    use opmeter_provider::ProviderError;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_returns_on_kth_attempt() {
        let attempts = AtomicUsize::new(0);
        let deadline = Instant::now() + POLL_DEADLINE;

        let result = poll_until(
            || {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Ok((n == 3).then_some(n)) }
            },
            deadline,
            RECEIPT_POLL_INTERVAL,
        )
        .await;

        assert_eq!(result, Some(3));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_absent_only_after_deadline() {
        let start = Instant::now();
        let deadline = start + POLL_DEADLINE;

        let result: Option<()> =
            poll_until(|| async { Ok(None) }, deadline, RECEIPT_POLL_INTERVAL).await;

        assert_eq!(result, None);
        assert!(Instant::now() >= deadline);
    }

    #[tokio::test(start_paused = true)]
    async fn test_erroring_fetch_never_raises() {
        let attempts = AtomicUsize::new(0);
        let deadline = Instant::now() + POLL_DEADLINE;

        let result: Option<()> = poll_until(
            || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err(ProviderError::Other(anyhow!("node unavailable"))) }
            },
            deadline,
            RECEIPT_POLL_INTERVAL,
        )
        .await;

        assert_eq!(result, None);
        // 60s window with a 2s pause between attempts.
        assert_eq!(attempts.load(Ordering::SeqCst), 31);
    }

    #[tokio::test(start_paused = true)]
    async fn test_receipt_variant_spaces_attempts() {
        let timestamps = Mutex::new(Vec::new());
        let deadline = Instant::now() + Duration::from_secs(10);

        let _: Option<()> = poll_until(
            || {
                timestamps.lock().unwrap().push(Instant::now());
                async { Ok(None) }
            },
            deadline,
            RECEIPT_POLL_INTERVAL,
        )
        .await;

        let timestamps = timestamps.into_inner().unwrap();
        assert!(timestamps.len() > 2);
        for pair in timestamps.windows(2) {
            assert!(pair[1] - pair[0] >= RECEIPT_POLL_INTERVAL);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_measurement_variant_has_no_spacing() {
        let attempts = AtomicUsize::new(0);
        let start = Instant::now();
        let deadline = start + POLL_DEADLINE;

        let result = poll_until(
            || {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Ok((n == 50).then_some(n)) }
            },
            deadline,
            Duration::ZERO,
        )
        .await;

        assert_eq!(result, Some(50));
        // No sleeps were inserted, so paused time never advanced.
        assert_eq!(Instant::now(), start);
    }
}
