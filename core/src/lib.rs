// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Local side of the medical appointment booking client: the record store,
//! dashboard statistics computed from it, and booking input validation.

mod booking;
mod config;
mod medbook;
mod record;
mod statistics;
mod store;

pub use crate::booking::{AppointmentDraft, BookingError, parse_form_date, time_slots};
pub use crate::config::{APP_NAME, Config};
pub use crate::medbook::{Medbook, MedbookError};
pub use crate::record::{
    AppointmentRecord, AppointmentStatus, MalformedDate, RegisteredUser, Session, UserRole,
};
pub use crate::statistics::{
    PartialStatisticsResult, Statistics, StatisticsError, StatisticsResult, StatusPercentages,
    UserStatistics, doctor_statistics, general_statistics, patient_statistics,
};
pub use crate::store::{
    APPOINTMENTS_KEY, FileStore, MemoryStore, REGISTERED_USERS_KEY, RecordStore, SESSION_KEY,
    StoreError, load_appointments, load_array, load_registered_users, load_session, save_array,
    save_session,
};
