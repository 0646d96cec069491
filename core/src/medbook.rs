// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use jiff::Zoned;
use jiff::civil::Date;
use medbook_api::{ApiClient, ApiConfig, ApiError, CreateAppointmentData, Specialty, User, UserRole};

use crate::booking::{AppointmentDraft, BookingError};
use crate::config::Config;
use crate::record::{AppointmentRecord, AppointmentStatus, RegisteredUser, Session};
use crate::statistics::Statistics;
use crate::store::{
    APPOINTMENTS_KEY, FileStore, REGISTERED_USERS_KEY, RecordStore, StoreError, load_appointments,
    load_registered_users, load_session, save_array, save_session,
};

/// Errors of the booking flow.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum MedbookError {
    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The local record store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The booking input is invalid.
    #[error(transparent)]
    Booking(#[from] BookingError),

    /// The configuration is incomplete.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Entry point tying the backend client to the local record store.
///
/// Bookings, confirmations and cancellations go to the backend first and are
/// mirrored into the record store afterwards, which is where statistics are
/// computed from.
#[derive(Debug, Clone)]
pub struct Medbook<S = FileStore> {
    config: Config,
    store: Arc<S>,
    api: ApiClient,
}

impl Medbook<FileStore> {
    /// Opens the record store configured in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be normalized, the store
    /// cannot be opened or the API client cannot be created.
    pub async fn new(mut config: Config, api: &ApiConfig) -> Result<Self, MedbookError> {
        config
            .normalize()
            .map_err(|e| MedbookError::Config(e.to_string()))?;
        let path = config
            .store_path
            .clone()
            .ok_or_else(|| MedbookError::Config("store path is not set".to_string()))?;

        let store = FileStore::open(&path).await?;
        let api = ApiClient::new(api)?;
        let medbook = Self::with_store(config, store, api);
        medbook.restore_session().await;
        Ok(medbook)
    }
}

impl<S: RecordStore> Medbook<S> {
    /// Creates an instance over an already opened store.
    pub fn with_store(config: Config, store: S, api: ApiClient) -> Self {
        Self {
            config,
            store: Arc::new(store),
            api,
        }
    }

    /// The backend client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The acting user: the configured one, else the one signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored session cannot be read.
    pub async fn user_id(&self) -> Result<Option<String>, MedbookError> {
        if let Some(id) = &self.config.user_id {
            return Ok(Some(id.clone()));
        }
        Ok(self.session().await?.map(|s| s.user.id))
    }

    /// The stored session, if someone is signed in.
    pub async fn session(&self) -> Result<Option<Session>, MedbookError> {
        Ok(load_session(&*self.store).await?)
    }

    /// Reuses the stored session token unless a token is already configured.
    pub async fn restore_session(&self) {
        if self.api.token().await.is_some() {
            return;
        }
        match load_session(&*self.store).await {
            Ok(Some(session)) => {
                tracing::debug!(user = %session.user.id, "restored session");
                self.api.set_token(Some(session.token)).await;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("ignoring unreadable session: {e}"),
        }
    }

    /// Statistics over the record store.
    pub fn statistics(&self) -> Statistics<Arc<S>> {
        Statistics::new(self.store.clone())
    }

    /// The current date in the system time zone.
    pub fn today(&self) -> Date {
        Zoned::now().date()
    }

    /// Logs in, stores the session and records the user in the
    /// registered-user list.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, MedbookError> {
        let resp = self.api.login(email, password).await?;
        let user = User::from(resp.user);
        let registered = RegisteredUser::from(user.clone());

        let session = Session {
            token: resp.token,
            user: registered.clone(),
        };
        save_session(&*self.store, Some(&session)).await?;
        self.register_locally(registered).await?;
        Ok(user)
    }

    /// Forgets the token and the stored session.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), MedbookError> {
        self.api.logout().await;
        save_session(&*self.store, None).await?;
        Ok(())
    }

    /// Lists specialties offered by the clinic.
    pub async fn specialties(&self) -> Result<Vec<Specialty>, MedbookError> {
        Ok(self.api.list_specialties().await?)
    }

    /// Lists doctors, optionally only those of one specialty, and records
    /// them in the registered-user list.
    #[tracing::instrument(skip(self))]
    pub async fn doctors(&self, specialty: Option<&str>) -> Result<Vec<User>, MedbookError> {
        let doctors = match specialty {
            Some(s) => self.api.list_doctors_by_specialty(s).await?,
            None => self.api.list_doctors().await?,
        };

        let mut users = load_registered_users(&*self.store).await?;
        for doctor in &doctors {
            upsert_user(&mut users, doctor.clone().into());
        }
        save_array(&*self.store, REGISTERED_USERS_KEY, &users).await?;
        Ok(doctors)
    }

    /// Validates and books an appointment for `patient_id`, then stores it.
    ///
    /// Without a specialty in the draft, the doctor's own specialty is used.
    #[tracing::instrument(skip(self))]
    pub async fn book(
        &self,
        mut draft: AppointmentDraft,
        patient_id: &str,
    ) -> Result<AppointmentRecord, MedbookError> {
        draft.validate(self.today())?;

        if draft.specialty.trim().is_empty() {
            let doctor = self.api.get_user(&draft.doctor_id).await?;
            match doctor.role {
                UserRole::Doctor { specialty, .. } => draft.specialty = specialty,
                _ => {
                    return Err(MedbookError::Booking(BookingError::MissingField(
                        "specialty",
                    )));
                }
            }
        }

        let data = CreateAppointmentData::try_from(&draft.into_new_appointment(patient_id))?;
        let appointment = self.api.create_appointment(&data).await?;
        let record = AppointmentRecord::from(appointment);

        let mut records = load_appointments(&*self.store).await?;
        records.push(record.clone());
        save_array(&*self.store, APPOINTMENTS_KEY, &records).await?;

        tracing::info!(id = %record.id, "appointment booked");
        Ok(record)
    }

    /// Loads an appointment from the backend and refreshes the stored copy.
    #[tracing::instrument(skip(self))]
    pub async fn appointment(&self, id: &str) -> Result<AppointmentRecord, MedbookError> {
        let record = AppointmentRecord::from(self.api.get_appointment(id).await?);
        self.upsert_record(record.clone()).await?;
        Ok(record)
    }

    /// Confirms an appointment and updates the stored copy.
    #[tracing::instrument(skip(self))]
    pub async fn confirm(&self, id: &str) -> Result<AppointmentRecord, MedbookError> {
        let record = AppointmentRecord::from(self.api.confirm_appointment(id).await?);
        self.upsert_record(record.clone()).await?;
        Ok(record)
    }

    /// Cancels an appointment and marks the stored copy as cancelled.
    ///
    /// Returns the stored copy, or `None` if this device never stored it.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, id: &str) -> Result<Option<AppointmentRecord>, MedbookError> {
        self.api.cancel_appointment(id).await?;

        let mut records = load_appointments(&*self.store).await?;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            tracing::warn!(id, "cancelled appointment is not in the record store");
            return Ok(None);
        };
        record.status = AppointmentStatus::Cancelled;
        let record = record.clone();

        save_array(&*self.store, APPOINTMENTS_KEY, &records).await?;
        Ok(Some(record))
    }

    async fn upsert_record(&self, record: AppointmentRecord) -> Result<(), MedbookError> {
        let mut records = load_appointments(&*self.store).await?;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        save_array(&*self.store, APPOINTMENTS_KEY, &records).await?;
        Ok(())
    }

    async fn register_locally(&self, user: RegisteredUser) -> Result<(), MedbookError> {
        let mut users = load_registered_users(&*self.store).await?;
        upsert_user(&mut users, user);
        save_array(&*self.store, REGISTERED_USERS_KEY, &users).await?;
        Ok(())
    }
}

fn upsert_user(users: &mut Vec<RegisteredUser>, user: RegisteredUser) {
    match users.iter_mut().find(|u| u.id == user.id) {
        Some(existing) => *existing = user,
        None => users.push(user),
    }
}
