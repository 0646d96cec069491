// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod general;
mod stores;
mod views;

/// Asserts two percentages are equal up to rounding.
pub fn assert_percent(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}%, got {actual}%"
    );
}
