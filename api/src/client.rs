// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Backend API client.

use std::sync::Arc;

use crate::appointments::{
    ApiAppointment, ApiAppointmentStatus, Appointment, CreateAppointmentData,
    CreateAppointmentRequest, UpdateStatusRequest,
};
use crate::auth::{ApiUser, LoginRequest, LoginResponse, RegisterData, User};
use crate::config::ApiConfig;
use crate::endpoints;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::specialties::{ApiSpecialty, Specialty};

/// Client for the appointment booking backend.
///
/// Cloning is cheap; clones share the HTTP connection pool and the session
/// token.
///
/// # Example
///
/// ```ignore
/// use medbook_api::{ApiClient, ApiConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new(&ApiConfig::default())?;
/// client.login("ana@clinic.test", "secret").await?;
/// let specialties = client.list_specialties().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Arc<HttpClient>,
}

impl ApiClient {
    /// Creates a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or HTTP client
    /// initialization fails.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = HttpClient::new(config)?;
        Ok(Self {
            http: Arc::new(http),
        })
    }

    /// Sets or clears the bearer token sent with every request.
    pub async fn set_token(&self, token: Option<String>) {
        self.http.set_token(token).await;
    }

    /// Returns the current bearer token.
    pub async fn token(&self) -> Option<String> {
        self.http.token().await
    }

    /// Logs in and keeps the returned token for subsequent requests.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let resp: LoginResponse = self
            .http
            .post(endpoints::LOGIN, &LoginRequest { email, password })
            .await
            .map_err(ApiError::context("Failed to log in"))?;

        self.http.set_token(Some(resp.token.clone())).await;
        Ok(resp)
    }

    /// Forgets the session token.
    pub async fn logout(&self) {
        self.http.set_token(None).await;
    }

    /// Registers a new user.
    #[tracing::instrument(skip_all, fields(email = %data.email))]
    pub async fn register(&self, data: &RegisterData) -> Result<User, ApiError> {
        self.http
            .post::<ApiUser, _>(endpoints::REGISTER, data)
            .await
            .map(User::from)
            .map_err(ApiError::context("Failed to register user"))
    }

    /// Returns the user owning the current token.
    #[tracing::instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.http
            .get::<ApiUser>(endpoints::CURRENT_USER)
            .await
            .map(User::from)
            .map_err(ApiError::context("Failed to load current user"))
    }

    /// Looks up a user by identifier.
    #[tracing::instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> Result<User, ApiError> {
        self.http
            .get::<ApiUser>(&format!("{}/{id}", endpoints::USERS))
            .await
            .map(User::from)
            .map_err(ApiError::context("Failed to load user"))
    }

    /// Lists every registered doctor.
    #[tracing::instrument(skip(self))]
    pub async fn list_doctors(&self) -> Result<Vec<User>, ApiError> {
        self.http
            .get::<Vec<ApiUser>>(endpoints::DOCTORS)
            .await
            .map(|users| users.into_iter().map(User::from).collect())
            .map_err(ApiError::context("Failed to load doctors"))
    }

    /// Lists the doctors of one specialty.
    #[tracing::instrument(skip(self))]
    pub async fn list_doctors_by_specialty(&self, specialty: &str) -> Result<Vec<User>, ApiError> {
        self.http
            .get_with_query::<Vec<ApiUser>, _>(endpoints::DOCTORS, &[("especialidade", specialty)])
            .await
            .map(|users| users.into_iter().map(User::from).collect())
            .map_err(ApiError::context("Failed to load doctors by specialty"))
    }

    /// Lists every medical specialty.
    #[tracing::instrument(skip(self))]
    pub async fn list_specialties(&self) -> Result<Vec<Specialty>, ApiError> {
        self.http
            .get::<Vec<ApiSpecialty>>(endpoints::SPECIALTIES)
            .await
            .map(|specialties| specialties.into_iter().map(Specialty::from).collect())
            .map_err(ApiError::context("Failed to load specialties"))
    }

    /// Books a new appointment; the backend records it as scheduled.
    #[tracing::instrument(skip(self))]
    pub async fn create_appointment(
        &self,
        data: &CreateAppointmentData,
    ) -> Result<Appointment, ApiError> {
        let req = CreateAppointmentRequest {
            data,
            status: ApiAppointmentStatus::Scheduled,
        };
        self.http
            .post::<ApiAppointment, _>(endpoints::APPOINTMENTS, &req)
            .await
            .and_then(Appointment::try_from)
            .map_err(ApiError::context("Failed to book appointment"))
    }

    /// Loads one appointment.
    #[tracing::instrument(skip(self))]
    pub async fn get_appointment(&self, id: &str) -> Result<Appointment, ApiError> {
        self.http
            .get::<ApiAppointment>(&appointment_path(id))
            .await
            .and_then(Appointment::try_from)
            .map_err(ApiError::context("Failed to load appointment"))
    }

    /// Marks an appointment as confirmed.
    #[tracing::instrument(skip(self))]
    pub async fn confirm_appointment(&self, id: &str) -> Result<Appointment, ApiError> {
        let req = UpdateStatusRequest {
            status: ApiAppointmentStatus::Confirmed,
        };
        self.http
            .put::<ApiAppointment, _>(&appointment_path(id), &req)
            .await
            .and_then(Appointment::try_from)
            .map_err(ApiError::context("Failed to confirm appointment"))
    }

    /// Cancels an appointment.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_appointment(&self, id: &str) -> Result<(), ApiError> {
        self.http
            .delete(&appointment_path(id))
            .await
            .map_err(ApiError::context("Failed to cancel appointment"))
    }
}

fn appointment_path(id: &str) -> String {
    format!("{}/{id}", endpoints::APPOINTMENTS)
}
