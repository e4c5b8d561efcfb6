// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redacting wrapper for sensitive values.
//!
//! Lexi handles three kinds of secrets: the backend's anon key, the user's
//! password while a sign-in is in flight, and the access/refresh tokens of
//! an active session. All of them are wrapped in [`Secret<T>`], which:
//!
//! - prints `[REDACTED]` through `Debug`, `Display` and `Serialize`, so a
//!   stray `tracing` field or config dump never leaks the value
//! - zeroizes its memory on drop
//! - only hands the value out through an explicit [`Secret::expose`]
//!
//! ```
//! use lexi_common_secret::SecretString;
//!
//! let token = SecretString::new("eyJhbGciOi...".to_string());
//! assert_eq!(format!("{token}"), "[REDACTED]");
//! assert_eq!(token.expose(), "eyJhbGciOi...");
//! ```

use std::fmt;
use zeroize::Zeroize;

/// Placeholder printed in place of every secret.
pub const REDACTED: &str = "[REDACTED]";

/// A value that must never reach logs, terminals or serialized output.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Secret<T>
where
	T: Zeroize,
{
	inner: T,
}

/// Most secrets in Lexi are strings.
pub type SecretString = Secret<String>;

impl<T> Secret<T>
where
	T: Zeroize,
{
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Borrow the underlying value. Every call site is a place where the
	/// secret leaves the wrapper, so keep them few and obvious.
	pub fn expose(&self) -> &T {
		&self.inner
	}

	/// Returns a copy of the inner value; the wrapper still zeroizes its own
	/// copy when dropped.
	pub fn into_inner(self) -> T
	where
		T: Clone,
	{
		self.inner.clone()
	}
}

impl SecretString {
	/// True when the secret is empty or only whitespace.
	///
	/// Used to reject blank passwords and anon keys without exposing them.
	pub fn is_blank(&self) -> bool {
		self.inner.trim().is_empty()
	}
}

impl<T> Clone for Secret<T>
where
	T: Zeroize + Clone,
{
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T> fmt::Debug for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Secret").field(&REDACTED).finish()
	}
}

impl<T> fmt::Display for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T> PartialEq for Secret<T>
where
	T: Zeroize + PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T> Eq for Secret<T> where T: Zeroize + Eq {}

#[cfg(feature = "serde")]
mod serde_impl {
	use super::{Secret, REDACTED};
	use serde::{Deserialize, Deserializer, Serialize, Serializer};
	use zeroize::Zeroize;

	impl<T> Serialize for Secret<T>
	where
		T: Serialize + Zeroize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			serializer.serialize_str(REDACTED)
		}
	}

	impl<'de, T> Deserialize<'de> for Secret<T>
	where
		T: Deserialize<'de> + Zeroize,
	{
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>,
		{
			T::deserialize(deserializer).map(Secret::new)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn debug_and_display_hide_password() {
		let password = SecretString::new("hunter2".to_string());
		assert!(!format!("{password:?}").contains("hunter2"));
		assert_eq!(format!("{password}"), REDACTED);
	}

	#[test]
	fn expose_returns_inner_value() {
		let token = SecretString::new("access-token".to_string());
		assert_eq!(token.expose(), "access-token");
		assert_eq!(token.clone().into_inner(), "access-token");
	}

	#[test]
	fn blank_detection() {
		assert!(SecretString::new(String::new()).is_blank());
		assert!(SecretString::new("  \t".to_string()).is_blank());
		assert!(!SecretString::new(" x ".to_string()).is_blank());
	}

	#[cfg(feature = "serde")]
	#[test]
	fn anon_key_never_serializes() {
		let key = SecretString::new("anon-key-value".to_string());
		let json = serde_json::to_string(&key).unwrap();
		assert_eq!(json, format!("\"{REDACTED}\""));

		let parsed: SecretString = serde_json::from_str("\"anon-key-value\"").unwrap();
		assert_eq!(parsed, key);
	}

	proptest! {
		#[test]
		fn formatting_never_leaks(value in "[a-zA-Z0-9]{12,48}") {
			let secret = SecretString::new(value.clone());
			let displayed = format!("{secret}");
			let debugged = format!("{secret:?}");
			prop_assert!(!displayed.contains(&value));
			prop_assert!(!debugged.contains(&value));
		}
	}
}
