// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Common configuration primitives for Lexi.
//!
//! - [`Secret<T>`] re-exported from [`lexi_common_secret`]
//! - [`load_secret_env`] for reading secrets from `VAR` or `VAR_FILE`

pub mod env;

pub use lexi_common_secret::{Secret, SecretString, REDACTED};

pub use env::{load_secret_env, require_secret_env, RequiredSecretError, SecretEnvError};
