// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Appointment shapes and the mappers between the backend and client sides.

use std::fmt::{self, Display};

use jiff::civil::{Date, DateTime, Time};
use jiff::{Timestamp, tz::TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

const CLIENT_DATE_FORMAT: &str = "%d/%m/%Y";
const CLIENT_TIME_FORMAT: &str = "%H:%M";
const WIRE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Appointment status as sent by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiAppointmentStatus {
    /// Booked, awaiting confirmation.
    #[serde(rename = "AGENDADA")]
    Scheduled,
    /// Confirmed by the clinic.
    #[serde(rename = "CONFIRMADA")]
    Confirmed,
    /// Cancelled.
    #[serde(rename = "CANCELADA")]
    Cancelled,
    /// Took place.
    #[serde(rename = "REALIZADA")]
    Completed,
    /// Any status this client does not know about.
    #[serde(other, skip_serializing)]
    Unknown,
}

/// Appointment as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiAppointment {
    /// Numeric identifier.
    pub id: u64,
    /// Local date and time, e.g. `2024-03-15T10:30:00`.
    #[serde(rename = "dataHora")]
    pub date_time: String,
    /// Specialty label.
    #[serde(rename = "especialidade")]
    pub specialty: String,
    /// Patient identifier.
    #[serde(rename = "usuarioId")]
    pub patient_id: u64,
    /// Doctor identifier.
    #[serde(rename = "medicoId")]
    pub doctor_id: u64,
    /// Free-form notes.
    #[serde(rename = "observacao", default)]
    pub notes: String,
    /// Status.
    pub status: ApiAppointmentStatus,
}

/// Appointment status in the client-side shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Booked, awaiting confirmation.
    Scheduled,
    /// Confirmed by the clinic.
    Confirmed,
    /// Cancelled.
    Cancelled,
    /// Took place.
    Completed,
}

impl From<ApiAppointmentStatus> for AppointmentStatus {
    fn from(status: ApiAppointmentStatus) -> Self {
        match status {
            ApiAppointmentStatus::Confirmed => Self::Confirmed,
            ApiAppointmentStatus::Cancelled => Self::Cancelled,
            ApiAppointmentStatus::Completed => Self::Completed,
            ApiAppointmentStatus::Scheduled | ApiAppointmentStatus::Unknown => Self::Scheduled,
        }
    }
}

impl AsRef<str> for AppointmentStatus {
    fn as_ref(&self) -> &str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// Appointment in the client-side shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Appointment {
    /// Identifier, as a string.
    pub id: String,
    /// Date, `DD/MM/YYYY`.
    pub date: String,
    /// Time, `HH:MM`.
    pub time: String,
    /// Specialty label.
    pub specialty: String,
    /// Patient identifier.
    pub patient_id: String,
    /// Doctor identifier.
    pub doctor_id: String,
    /// Free-form notes.
    pub notes: String,
    /// Status.
    pub status: AppointmentStatus,
}

impl TryFrom<ApiAppointment> for Appointment {
    type Error = ApiError;

    fn try_from(appointment: ApiAppointment) -> Result<Self, Self::Error> {
        let dt = parse_wire_datetime(&appointment.date_time)?;
        Ok(Self {
            id: appointment.id.to_string(),
            date: dt.strftime(CLIENT_DATE_FORMAT).to_string(),
            time: dt.strftime(CLIENT_TIME_FORMAT).to_string(),
            specialty: appointment.specialty,
            patient_id: appointment.patient_id.to_string(),
            doctor_id: appointment.doctor_id.to_string(),
            notes: appointment.notes,
            status: appointment.status.into(),
        })
    }
}

/// The backend sends local date-times; instants with an offset are shown in
/// the system time zone.
fn parse_wire_datetime(s: &str) -> Result<DateTime, ApiError> {
    parse_wire_datetime_in(s, &TimeZone::system())
}

fn parse_wire_datetime_in(s: &str, tz: &TimeZone) -> Result<DateTime, ApiError> {
    // A civil parse would accept and drop any offset, so instants go first.
    if let Ok(ts) = s.parse::<Timestamp>() {
        return Ok(ts.to_zoned(tz.clone()).datetime());
    }

    s.parse::<DateTime>()
        .map_err(|e| ApiError::InvalidResponse(format!("invalid appointment date `{s}`: {e}")))
}

/// Appointment data entered on the client, before it is sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    /// Date, `DD/MM/YYYY`.
    pub date: String,
    /// Time, `HH:MM`.
    pub time: String,
    /// Specialty label.
    pub specialty: String,
    /// Patient identifier.
    pub patient_id: String,
    /// Doctor identifier.
    pub doctor_id: String,
    /// Free-form notes.
    pub notes: String,
}

/// Payload to create an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateAppointmentData {
    /// Local date and time, `YYYY-MM-DDTHH:MM:SS`.
    #[serde(rename = "dataHora")]
    pub date_time: String,
    /// Specialty label.
    #[serde(rename = "especialidade")]
    pub specialty: String,
    /// Patient identifier.
    #[serde(rename = "usuarioId")]
    pub patient_id: u64,
    /// Doctor identifier.
    #[serde(rename = "medicoId")]
    pub doctor_id: u64,
    /// Free-form notes.
    #[serde(rename = "observacao")]
    pub notes: String,
}

impl TryFrom<&NewAppointment> for CreateAppointmentData {
    type Error = ApiError;

    fn try_from(data: &NewAppointment) -> Result<Self, Self::Error> {
        let date = Date::strptime(CLIENT_DATE_FORMAT, &data.date)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid date `{}`: {e}", data.date)))?;
        let time = Time::strptime(CLIENT_TIME_FORMAT, &data.time)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid time `{}`: {e}", data.time)))?;

        Ok(Self {
            date_time: date
                .to_datetime(time)
                .strftime(WIRE_DATETIME_FORMAT)
                .to_string(),
            specialty: data.specialty.clone(),
            patient_id: parse_id("patient", &data.patient_id)?,
            doctor_id: parse_id("doctor", &data.doctor_id)?,
            notes: data.notes.clone(),
        })
    }
}

fn parse_id(what: &str, id: &str) -> Result<u64, ApiError> {
    id.trim()
        .parse()
        .map_err(|_| ApiError::InvalidRequest(format!("invalid {what} id `{id}`")))
}

/// Body of a create request: the payload plus the initial status.
#[derive(Debug, Serialize)]
pub(crate) struct CreateAppointmentRequest<'a> {
    #[serde(flatten)]
    pub data: &'a CreateAppointmentData,
    pub status: ApiAppointmentStatus,
}

/// Body of a status update request.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateStatusRequest {
    pub status: ApiAppointmentStatus,
}
