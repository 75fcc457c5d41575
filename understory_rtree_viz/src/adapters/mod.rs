// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters implementing [`SpatialIndex`](crate::index::SpatialIndex) for third-party indices.
//!
//! Enabled via feature flags to keep the default build small.

#[cfg(feature = "rstar_adapter")]
pub mod rstar;
