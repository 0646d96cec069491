// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Validation of appointment booking input.

use jiff::ToSpan;
use jiff::civil::Date;
use medbook_api::NewAppointment;

const FIRST_SLOT_HOUR: u8 = 9;
const LAST_SLOT_HOUR: u8 = 18; // exclusive

/// How far ahead an appointment can be booked.
const BOOKING_WINDOW_MONTHS: i64 = 3;

/// Booking input errors.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// A required field is empty.
    #[error("please fill in the {0}")]
    MissingField(&'static str),

    /// The date is malformed or outside the booking window.
    #[error("invalid date `{0}`, expected DD/MM/YYYY from tomorrow up to 3 months ahead")]
    InvalidDate(String),

    /// The time is not one of the bookable slots.
    #[error("invalid time `{0}`, pick a half-hour slot between 09:00 and 17:30")]
    InvalidTimeSlot(String),
}

/// Bookable half-hour slots of a day, `09:00` through `17:30`.
#[must_use]
pub fn time_slots() -> Vec<String> {
    (FIRST_SLOT_HOUR..LAST_SLOT_HOUR)
        .flat_map(|hour| [format!("{hour:02}:00"), format!("{hour:02}:30")])
        .collect()
}

/// Parses a `DD/MM/YYYY` booking date.
///
/// The date must be a real calendar date after `today` and no more than
/// three months ahead of it.
///
/// # Errors
///
/// Returns [`BookingError::InvalidDate`] otherwise.
pub fn parse_form_date(input: &str, today: Date) -> Result<Date, BookingError> {
    let invalid = || BookingError::InvalidDate(input.to_string());

    let bytes = input.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    let date = Date::strptime("%d/%m/%Y", input).map_err(|_| invalid())?;
    let latest = today
        .checked_add(BOOKING_WINDOW_MONTHS.months())
        .map_err(|_| invalid())?;

    if date <= today || date > latest {
        return Err(invalid());
    }
    Ok(date)
}

/// Appointment details as entered in the booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentDraft {
    /// Selected doctor.
    pub doctor_id: String,

    /// Selected specialty; empty when booking without a specialty filter.
    pub specialty: String,

    /// Date, `DD/MM/YYYY`.
    pub date: String,

    /// Time slot, `HH:MM`.
    pub time: String,

    /// Reason for the appointment.
    pub description: String,
}

impl AppointmentDraft {
    /// Checks the draft the way the booking form does before submitting.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: a missing doctor, time or
    /// description, then an invalid date, then a time outside the slots.
    pub fn validate(&self, today: Date) -> Result<(), BookingError> {
        if self.doctor_id.trim().is_empty() {
            return Err(BookingError::MissingField("doctor"));
        }
        if self.time.trim().is_empty() {
            return Err(BookingError::MissingField("time"));
        }
        if self.description.trim().is_empty() {
            return Err(BookingError::MissingField("description"));
        }

        parse_form_date(&self.date, today)?;

        if !time_slots().contains(&self.time) {
            return Err(BookingError::InvalidTimeSlot(self.time.clone()));
        }
        Ok(())
    }

    /// Turns the draft into the data sent to the backend for `patient_id`.
    #[must_use]
    pub fn into_new_appointment(self, patient_id: &str) -> NewAppointment {
        NewAppointment {
            date: self.date,
            time: self.time,
            specialty: self.specialty,
            patient_id: patient_id.to_string(),
            doctor_id: self.doctor_id,
            notes: self.description,
        }
    }
}
