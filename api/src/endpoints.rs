// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Backend endpoint paths, relative to the base URL.

/// Log in with email and password.
pub const LOGIN: &str = "/usuarios/login";
/// Register a new user.
pub const REGISTER: &str = "/usuarios";
/// The user owning the current token.
pub const CURRENT_USER: &str = "/usuarios/me";

/// User collection.
pub const USERS: &str = "/usuarios";
/// Users registered as doctors.
pub const DOCTORS: &str = "/usuarios/medicos";

/// Medical specialties.
pub const SPECIALTIES: &str = "/especialidades";

/// Appointments.
pub const APPOINTMENTS: &str = "/consultas";
