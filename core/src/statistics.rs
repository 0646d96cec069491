// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Dashboard statistics computed from the appointments in a record store.
//!
//! Every query reads a fresh snapshot of the store and reduces it in a single
//! pass; nothing is cached between calls. Maps are ordered, so two calls over
//! the same snapshot produce identical results.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::record::{AppointmentRecord, AppointmentStatus, RegisteredUser, UserRole};
use crate::store::{RecordStore, StoreError, load_appointments, load_registered_users};

/// Statistics query errors.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StatisticsError {
    /// The record store could not be read or decoded.
    #[error("statistics unavailable: {0}")]
    Unavailable(#[from] StoreError),

    /// No registered user has the requested identifier.
    #[error("no registered user with id `{0}`")]
    UnknownUser(String),
}

/// Share of each named status, in percent of all appointments.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StatusPercentages {
    /// Percentage of confirmed appointments.
    pub confirmed: f64,

    /// Percentage of pending appointments.
    pub pending: f64,

    /// Percentage of cancelled appointments.
    pub cancelled: f64,
}

/// Statistics over every stored appointment.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResult {
    /// Number of appointments.
    pub total_appointments: usize,

    /// Appointments with status `confirmed`.
    pub confirmed_appointments: usize,

    /// Appointments with status `pending`.
    pub pending_appointments: usize,

    /// Appointments with status `cancelled`.
    pub cancelled_appointments: usize,

    /// Appointments whose status is none of the above.
    pub unrecognized_appointments: usize,

    /// Distinct patients with at least one appointment.
    pub total_patients: usize,

    /// Distinct doctors with at least one appointment.
    pub total_doctors: usize,

    /// Appointments per specialty label.
    pub specialties: BTreeMap<String, usize>,

    /// Appointments per `MM/YYYY`, for well-formed dates only.
    pub appointments_by_month: BTreeMap<String, usize>,

    /// Share of each named status.
    pub status_percentages: StatusPercentages,

    /// Registered users with the patient role.
    pub registered_patients: usize,

    /// Registered users with the doctor role.
    pub registered_doctors: usize,
}

/// Statistics over the appointments of one doctor or one patient.
///
/// The doctor view fills `total_patients`, the patient view `total_doctors`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialStatisticsResult {
    /// Number of appointments.
    pub total_appointments: usize,

    /// Appointments with status `confirmed`.
    pub confirmed_appointments: usize,

    /// Appointments with status `pending`.
    pub pending_appointments: usize,

    /// Appointments with status `cancelled`.
    pub cancelled_appointments: usize,

    /// Appointments whose status is none of the above.
    pub unrecognized_appointments: usize,

    /// Distinct patients seen by the doctor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_patients: Option<usize>,

    /// Distinct doctors seen by the patient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_doctors: Option<usize>,

    /// Appointments per specialty label.
    pub specialties: BTreeMap<String, usize>,

    /// Share of each named status.
    pub status_percentages: StatusPercentages,
}

/// Statistics for a registered user, shaped by their role.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "statistics", rename_all = "lowercase")]
pub enum UserStatistics {
    /// The user is a doctor.
    Doctor(PartialStatisticsResult),

    /// The user is a patient.
    Patient(PartialStatisticsResult),

    /// The user is an administrator and sees everything.
    General(StatisticsResult),
}

/// Statistics queries over a record store.
#[derive(Debug, Clone)]
pub struct Statistics<S> {
    store: S,
}

impl<S: RecordStore> Statistics<S> {
    /// Creates a statistics view over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Computes statistics over every appointment.
    ///
    /// # Errors
    ///
    /// Returns [`StatisticsError::Unavailable`] if the store read fails.
    #[tracing::instrument(skip(self))]
    pub async fn compute_general(&self) -> Result<StatisticsResult, StatisticsError> {
        let appointments = load_appointments(&self.store).await?;
        let users = load_registered_users(&self.store).await?;
        Ok(general_statistics(&appointments, &users))
    }

    /// Computes statistics over the appointments of one doctor.
    ///
    /// # Errors
    ///
    /// Returns [`StatisticsError::Unavailable`] if the store read fails.
    #[tracing::instrument(skip(self))]
    pub async fn compute_for_doctor(
        &self,
        doctor_id: &str,
    ) -> Result<PartialStatisticsResult, StatisticsError> {
        let appointments = load_appointments(&self.store).await?;
        Ok(doctor_statistics(&appointments, doctor_id))
    }

    /// Computes statistics over the appointments of one patient.
    ///
    /// # Errors
    ///
    /// Returns [`StatisticsError::Unavailable`] if the store read fails.
    #[tracing::instrument(skip(self))]
    pub async fn compute_for_patient(
        &self,
        patient_id: &str,
    ) -> Result<PartialStatisticsResult, StatisticsError> {
        let appointments = load_appointments(&self.store).await?;
        Ok(patient_statistics(&appointments, patient_id))
    }

    /// Computes the statistics a registered user sees on their dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`StatisticsError::UnknownUser`] if no registered user has
    /// `user_id`, or [`StatisticsError::Unavailable`] if the store read fails.
    #[tracing::instrument(skip(self))]
    pub async fn compute_for_user(&self, user_id: &str) -> Result<UserStatistics, StatisticsError> {
        let users = load_registered_users(&self.store).await?;
        let user = users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| StatisticsError::UnknownUser(user_id.to_string()))?;

        tracing::debug!(role = ?user.role, "resolved user role");
        Ok(match user.role {
            UserRole::Doctor { .. } => {
                UserStatistics::Doctor(self.compute_for_doctor(user_id).await?)
            }
            UserRole::Patient => {
                UserStatistics::Patient(self.compute_for_patient(user_id).await?)
            }
            UserRole::Admin => UserStatistics::General(self.compute_general().await?),
        })
    }
}

/// Reduces all appointments into dashboard statistics.
#[must_use]
pub fn general_statistics(
    appointments: &[AppointmentRecord],
    users: &[RegisteredUser],
) -> StatisticsResult {
    let mut tally = Tally::with_months();
    appointments.iter().for_each(|a| tally.add(a));

    let (registered_patients, registered_doctors) =
        users.iter().fold((0, 0), |(p, d), user| match user.role {
            UserRole::Patient => (p + 1, d),
            UserRole::Doctor { .. } => (p, d + 1),
            UserRole::Admin => (p, d),
        });

    StatisticsResult {
        total_appointments: tally.total,
        confirmed_appointments: tally.confirmed,
        pending_appointments: tally.pending,
        cancelled_appointments: tally.cancelled,
        unrecognized_appointments: tally.unrecognized,
        total_patients: tally.patients.len(),
        total_doctors: tally.doctors.len(),
        status_percentages: tally.percentages(),
        specialties: tally.specialties(),
        appointments_by_month: tally.months.unwrap_or_default(),
        registered_patients,
        registered_doctors,
    }
}

/// Reduces the appointments of `doctor_id` into statistics.
#[must_use]
pub fn doctor_statistics(
    appointments: &[AppointmentRecord],
    doctor_id: &str,
) -> PartialStatisticsResult {
    let mut tally = Tally::default();
    appointments
        .iter()
        .filter(|a| a.doctor_id == doctor_id)
        .for_each(|a| tally.add(a));

    PartialStatisticsResult {
        total_patients: Some(tally.patients.len()),
        ..tally.into_partial()
    }
}

/// Reduces the appointments of `patient_id` into statistics.
#[must_use]
pub fn patient_statistics(
    appointments: &[AppointmentRecord],
    patient_id: &str,
) -> PartialStatisticsResult {
    let mut tally = Tally::default();
    appointments
        .iter()
        .filter(|a| a.patient_id == patient_id)
        .for_each(|a| tally.add(a));

    PartialStatisticsResult {
        total_doctors: Some(tally.doctors.len()),
        ..tally.into_partial()
    }
}

/// Running counters for one pass over a list of appointments.
#[derive(Debug, Default)]
struct Tally<'a> {
    total: usize,
    confirmed: usize,
    pending: usize,
    cancelled: usize,
    unrecognized: usize,
    patients: BTreeSet<&'a str>,
    doctors: BTreeSet<&'a str>,
    specialties: BTreeMap<&'a str, usize>,
    /// Only tracked when month buckets are reported.
    months: Option<BTreeMap<String, usize>>,
}

impl<'a> Tally<'a> {
    fn with_months() -> Self {
        Self {
            months: Some(BTreeMap::new()),
            ..Self::default()
        }
    }

    fn add(&mut self, appointment: &'a AppointmentRecord) {
        self.total += 1;
        match &appointment.status {
            AppointmentStatus::Confirmed => self.confirmed += 1,
            AppointmentStatus::Pending => self.pending += 1,
            AppointmentStatus::Cancelled => self.cancelled += 1,
            AppointmentStatus::Unrecognized(status) => {
                tracing::warn!(id = %appointment.id, %status, "unrecognized appointment status");
                self.unrecognized += 1;
            }
        }

        self.patients.insert(&appointment.patient_id);
        self.doctors.insert(&appointment.doctor_id);
        *self.specialties.entry(&appointment.specialty).or_default() += 1;

        if let Some(months) = &mut self.months {
            match appointment.month_key() {
                Ok(key) => *months.entry(key).or_default() += 1,
                Err(e) => tracing::warn!(id = %appointment.id, "{e}, excluded from monthly counts"),
            }
        }
    }

    fn percentages(&self) -> StatusPercentages {
        if self.total == 0 {
            return StatusPercentages::default();
        }

        #[allow(clippy::cast_precision_loss)]
        let percent = |count: usize| count as f64 / self.total as f64 * 100.0;
        StatusPercentages {
            confirmed: percent(self.confirmed),
            pending: percent(self.pending),
            cancelled: percent(self.cancelled),
        }
    }

    fn specialties(&self) -> BTreeMap<String, usize> {
        self.specialties
            .iter()
            .map(|(k, v)| ((*k).to_string(), *v))
            .collect()
    }

    fn into_partial(self) -> PartialStatisticsResult {
        PartialStatisticsResult {
            total_appointments: self.total,
            confirmed_appointments: self.confirmed,
            pending_appointments: self.pending,
            cancelled_appointments: self.cancelled,
            unrecognized_appointments: self.unrecognized,
            total_patients: None,
            total_doctors: None,
            status_percentages: self.percentages(),
            specialties: self.specialties(),
        }
    }
}
