// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Retry with exponential backoff for backend calls.

use reqwest::StatusCode;
use std::time::Duration;
use tracing::warn;

/// Status codes worth another attempt.
pub const RETRYABLE_STATUSES: [StatusCode; 6] = [
	StatusCode::TOO_MANY_REQUESTS,
	StatusCode::REQUEST_TIMEOUT,
	StatusCode::INTERNAL_SERVER_ERROR,
	StatusCode::BAD_GATEWAY,
	StatusCode::SERVICE_UNAVAILABLE,
	StatusCode::GATEWAY_TIMEOUT,
];

#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
	/// Total attempts including the first one. `1` disables retrying.
	pub max_attempts: u32,
	pub base_delay: Duration,
	pub max_delay: Duration,
	pub backoff_factor: f64,
	pub jitter: bool,
}

impl Default for RetryConfig {
	fn default() -> Self {
		Self {
			max_attempts: 3,
			base_delay: Duration::from_millis(200),
			max_delay: Duration::from_secs(5),
			backoff_factor: 2.0,
			jitter: true,
		}
	}
}

impl RetryConfig {
	/// A policy that makes exactly one attempt.
	pub fn no_retry() -> Self {
		Self {
			max_attempts: 1,
			..Self::default()
		}
	}
}

pub trait RetryableError {
	fn is_retryable(&self) -> bool;
}

impl RetryableError for reqwest::Error {
	fn is_retryable(&self) -> bool {
		if self.is_timeout() || self.is_connect() {
			return true;
		}
		self
			.status()
			.map(|status| RETRYABLE_STATUSES.contains(&status))
			.unwrap_or(false)
	}
}

fn calculate_delay(cfg: &RetryConfig, attempt: u32) -> Duration {
	let exponential = cfg.base_delay.as_secs_f64() * cfg.backoff_factor.powi(attempt as i32);
	let capped = exponential.min(cfg.max_delay.as_secs_f64());

	let delay = if cfg.jitter {
		capped * (0.5 + fastrand::f64())
	} else {
		capped
	};

	Duration::from_secs_f64(delay)
}

/// Runs `f` until it succeeds, fails with a non-retryable error, or
/// `cfg.max_attempts` is reached.
pub async fn retry<F, Fut, T, E>(cfg: &RetryConfig, mut f: F) -> Result<T, E>
where
	F: FnMut() -> Fut,
	Fut: std::future::Future<Output = Result<T, E>>,
	E: RetryableError + std::fmt::Debug,
{
	let mut attempt = 0;

	loop {
		let err = match f().await {
			Ok(value) => return Ok(value),
			Err(err) => err,
		};
		attempt += 1;

		if !err.is_retryable() {
			return Err(err);
		}

		if attempt >= cfg.max_attempts {
			warn!(
				error = ?err,
				attempt,
				max_attempts = cfg.max_attempts,
				"giving up after retryable errors"
			);
			return Err(err);
		}

		let delay = calculate_delay(cfg, attempt - 1);
		warn!(
			error = ?err,
			attempt,
			max_attempts = cfg.max_attempts,
			delay_ms = delay.as_millis() as u64,
			"retrying backend call"
		);
		tokio::time::sleep(delay).await;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicU32, Ordering};
	use std::sync::Arc;

	#[derive(Debug)]
	struct FakeError {
		retryable: bool,
	}

	impl RetryableError for FakeError {
		fn is_retryable(&self) -> bool {
			self.retryable
		}
	}

	fn fast_config(max_attempts: u32) -> RetryConfig {
		RetryConfig {
			max_attempts,
			base_delay: Duration::from_millis(1),
			max_delay: Duration::from_millis(5),
			backoff_factor: 2.0,
			jitter: false,
		}
	}

	async fn count_attempts(cfg: &RetryConfig, succeed_on: Option<u32>, retryable: bool) -> (Result<u32, FakeError>, u32) {
		let calls = Arc::new(AtomicU32::new(0));
		let result = retry(cfg, || {
			let calls = Arc::clone(&calls);
			async move {
				let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
				match succeed_on {
					Some(target) if n >= target => Ok(n),
					_ => Err(FakeError { retryable }),
				}
			}
		})
		.await;
		(result, calls.load(Ordering::SeqCst))
	}

	#[tokio::test]
	async fn permanent_errors_are_not_retried() {
		let (result, calls) = count_attempts(&fast_config(5), None, false).await;
		assert!(result.is_err());
		assert_eq!(calls, 1);
	}

	#[tokio::test]
	async fn transient_errors_stop_at_max_attempts() {
		let (result, calls) = count_attempts(&fast_config(3), None, true).await;
		assert!(result.is_err());
		assert_eq!(calls, 3);
	}

	#[tokio::test]
	async fn recovers_after_transient_errors() {
		let (result, calls) = count_attempts(&fast_config(5), Some(3), true).await;
		assert_eq!(result.unwrap(), 3);
		assert_eq!(calls, 3);
	}

	#[tokio::test]
	async fn no_retry_policy_makes_a_single_attempt() {
		let (_, calls) = count_attempts(&RetryConfig::no_retry(), None, true).await;
		assert_eq!(calls, 1);
	}

	#[test]
	fn delay_grows_then_caps() {
		let cfg = RetryConfig {
			max_attempts: 10,
			base_delay: Duration::from_millis(125),
			max_delay: Duration::from_millis(500),
			backoff_factor: 2.0,
			jitter: false,
		};
		assert_eq!(calculate_delay(&cfg, 0), Duration::from_millis(125));
		assert_eq!(calculate_delay(&cfg, 1), Duration::from_millis(250));
		assert_eq!(calculate_delay(&cfg, 5), Duration::from_millis(500));
	}

	#[test]
	fn jitter_stays_within_half_to_one_and_a_half() {
		let cfg = RetryConfig {
			jitter: true,
			..fast_config(3)
		};
		for _ in 0..50 {
			let delay = calculate_delay(&cfg, 0).as_secs_f64();
			assert!((0.000_49..=0.001_51).contains(&delay));
		}
	}
}
