// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Record and user factories (fixtures)
//! - Store helpers, including one that always fails
//! - Temporary store directories with auto-cleanup

mod fixtures;

#[allow(unused_imports)]
pub use fixtures::{admin, appointment, doctor, patient, sample_appointments, sample_users};
#[allow(unused_imports)]
pub use stores::{FailingStore, TempStore, seeded_memory_store};
