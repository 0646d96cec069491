// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Records kept in the record store.

use std::fmt::{self, Display};

use jiff::civil::Date;
use medbook_api::{Appointment, AppointmentStatus as ApiStatus, User, UserRole as ApiRole};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Status of a stored appointment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AppointmentStatus {
    /// Booked, awaiting confirmation.
    #[default]
    Pending,

    /// Confirmed by the clinic.
    Confirmed,

    /// Cancelled.
    Cancelled,

    /// A status written by some other client, kept verbatim.
    Unrecognized(String),
}

const STATUS_PENDING: &str = "pending";
const STATUS_CONFIRMED: &str = "confirmed";
const STATUS_CANCELLED: &str = "cancelled";

impl AsRef<str> for AppointmentStatus {
    fn as_ref(&self) -> &str {
        match self {
            AppointmentStatus::Pending => STATUS_PENDING,
            AppointmentStatus::Confirmed => STATUS_CONFIRMED,
            AppointmentStatus::Cancelled => STATUS_CANCELLED,
            AppointmentStatus::Unrecognized(s) => s,
        }
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl From<String> for AppointmentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            STATUS_PENDING => AppointmentStatus::Pending,
            STATUS_CONFIRMED => AppointmentStatus::Confirmed,
            STATUS_CANCELLED => AppointmentStatus::Cancelled,
            _ => AppointmentStatus::Unrecognized(value),
        }
    }
}

impl From<&str> for AppointmentStatus {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

impl Serialize for AppointmentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

impl<'de> Deserialize<'de> for AppointmentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// Completed appointments have no bucket of their own on the dashboard and
/// are kept verbatim.
impl From<ApiStatus> for AppointmentStatus {
    fn from(status: ApiStatus) -> Self {
        match status {
            ApiStatus::Scheduled => AppointmentStatus::Pending,
            ApiStatus::Confirmed => AppointmentStatus::Confirmed,
            ApiStatus::Cancelled => AppointmentStatus::Cancelled,
            ApiStatus::Completed => AppointmentStatus::Unrecognized(status.to_string()),
        }
    }
}

/// An appointment as persisted by the booking flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    /// Opaque identifier.
    pub id: String,

    /// Identifier of the patient.
    pub patient_id: String,

    /// Identifier of the doctor.
    pub doctor_id: String,

    /// Date, `DD/MM/YYYY`.
    pub date: String,

    /// Time, `HH:MM`.
    pub time: String,

    /// Free-form specialty label.
    pub specialty: String,

    /// Status.
    pub status: AppointmentStatus,

    /// Notes entered when booking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AppointmentRecord {
    /// Returns the `MM/YYYY` bucket this appointment falls in.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedDate`] unless `date` is a real calendar date
    /// written as `DD/MM/YYYY`.
    pub fn month_key(&self) -> Result<String, MalformedDate> {
        let malformed = || MalformedDate {
            date: self.date.clone(),
        };

        let mut parts = self.date.split('/');
        let (Some(day), Some(month), Some(year), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        let is_digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(day, 2) || !is_digits(month, 2) || !is_digits(year, 4) {
            return Err(malformed());
        }

        let parse = |s: &str| s.parse::<i16>().map_err(|_| malformed());
        let (d, m, y) = (parse(day)?, parse(month)?, parse(year)?);
        let (Ok(d), Ok(m)) = (i8::try_from(d), i8::try_from(m)) else {
            return Err(malformed());
        };
        Date::new(y, m, d).map_err(|_| malformed())?;

        Ok(format!("{month}/{year}"))
    }
}

impl From<Appointment> for AppointmentRecord {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            patient_id: appointment.patient_id,
            doctor_id: appointment.doctor_id,
            date: appointment.date,
            time: appointment.time,
            specialty: appointment.specialty,
            status: appointment.status.into(),
            notes: (!appointment.notes.is_empty()).then_some(appointment.notes),
        }
    }
}

/// An appointment date that is not `DD/MM/YYYY`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed appointment date `{date}`, expected DD/MM/YYYY")]
pub struct MalformedDate {
    /// The offending date string.
    pub date: String,
}

/// Role of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum UserRole {
    /// A patient.
    Patient,

    /// A doctor and their specialty.
    Doctor {
        /// Specialty label.
        specialty: String,

        /// Medical council registration number.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        crm: Option<String>,
    },

    /// A clinic administrator.
    Admin,
}

/// A user known to this device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    /// Identifier, matching `patientId`/`doctorId` of appointments.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Login email.
    pub email: String,

    /// Role of the user.
    #[serde(flatten)]
    pub role: UserRole,
}

impl From<User> for RegisteredUser {
    fn from(user: User) -> Self {
        let role = match user.role {
            ApiRole::Patient => UserRole::Patient,
            ApiRole::Doctor { specialty, crm } => UserRole::Doctor { specialty, crm },
            ApiRole::Admin => UserRole::Admin,
        };

        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role,
        }
    }
}

/// The signed-in user and their bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token issued at login.
    pub token: String,

    /// The signed-in user.
    pub user: RegisteredUser,
}
