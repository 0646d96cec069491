// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;

/// Specialty as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiSpecialty {
    /// Numeric identifier.
    pub id: u64,
    /// Specialty name.
    #[serde(rename = "nome")]
    pub name: String,
}

/// Medical specialty in the client-side shape.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Specialty {
    /// Identifier, as a string.
    pub id: String,
    /// Specialty name.
    pub name: String,
}

impl From<ApiSpecialty> for Specialty {
    fn from(specialty: ApiSpecialty) -> Self {
        Self {
            id: specialty.id.to_string(),
            name: specialty.name,
        }
    }
}
