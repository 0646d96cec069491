// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Authentication and user directory shapes.

use serde::{Deserialize, Serialize};

/// User kind as sent by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiUserKind {
    /// A patient booking appointments.
    #[serde(rename = "PACIENTE")]
    Patient,
    /// A doctor receiving appointments.
    #[serde(rename = "MEDICO")]
    Doctor,
    /// A clinic administrator.
    #[serde(rename = "ADMIN")]
    Admin,
}

/// User as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiUser {
    /// Numeric identifier.
    pub id: u64,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Login email.
    pub email: String,
    /// User kind.
    #[serde(rename = "tipo")]
    pub kind: ApiUserKind,
    /// Specialty, for doctors.
    #[serde(rename = "especialidade", default)]
    pub specialty: Option<String>,
    /// Medical council registration number, for doctors.
    #[serde(default)]
    pub crm: Option<String>,
}

/// Response of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user.
    #[serde(rename = "usuario")]
    pub user: ApiUser,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    #[serde(rename = "senha")]
    pub password: &'a str,
}

/// Payload to register a new user.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterData {
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plain-text password, sent over the configured transport.
    #[serde(rename = "senha")]
    pub password: String,
    /// User kind.
    #[serde(rename = "tipo")]
    pub kind: ApiUserKind,
    /// Specialty, required by the backend for doctors.
    #[serde(rename = "especialidade", skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    /// Medical council registration number, for doctors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crm: Option<String>,
}

/// Role of a user, with the fields only that role carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum UserRole {
    /// A patient.
    Patient,
    /// A doctor and their specialty.
    Doctor {
        /// Specialty label.
        specialty: String,
        /// Medical council registration number.
        #[serde(skip_serializing_if = "Option::is_none")]
        crm: Option<String>,
    },
    /// A clinic administrator.
    Admin,
}

/// User in the client-side shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Identifier, as a string.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Role of the user.
    #[serde(flatten)]
    pub role: UserRole,
}

impl From<ApiUser> for User {
    fn from(user: ApiUser) -> Self {
        let role = match user.kind {
            ApiUserKind::Patient => UserRole::Patient,
            ApiUserKind::Doctor => UserRole::Doctor {
                specialty: user.specialty.unwrap_or_default(),
                crm: user.crm,
            },
            ApiUserKind::Admin => UserRole::Admin,
        };

        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            role,
        }
    }
}
