// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client for the medical appointment booking backend.
//!
//! Covers authentication and user lookup, medical specialties, and
//! appointments, together with the mappers translating between the
//! backend's wire shapes and the client-side shapes.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod appointments;
mod auth;
mod client;
mod config;
pub mod endpoints;
mod error;
mod http;
mod specialties;

pub use crate::appointments::{
    ApiAppointment, ApiAppointmentStatus, Appointment, AppointmentStatus, CreateAppointmentData,
    NewAppointment,
};
pub use crate::auth::{ApiUser, ApiUserKind, LoginResponse, RegisterData, User, UserRole};
pub use crate::client::ApiClient;
pub use crate::config::ApiConfig;
pub use crate::error::ApiError;
pub use crate::specialties::{ApiSpecialty, Specialty};
