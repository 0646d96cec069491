// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use medbook_core::{UserRole, UserStatistics, load_registered_users};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::medbook_for;
use crate::common::TempStore;

#[tokio::test]
async fn login_registers_the_user_locally() {
    let server = MockServer::start().await;
    let temp = TempStore::new().await;

    Mock::given(method("POST"))
        .and(path("/usuarios/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc123",
            "usuario": {"id": 3, "nome": "Ana", "email": "ana@clinic.test", "tipo": "PACIENTE"},
        })))
        .mount(&server)
        .await;

    let medbook = medbook_for(&server, &temp).await;
    let user = medbook
        .login("ana@clinic.test", "secret")
        .await
        .expect("Failed to log in");
    assert_eq!(user.id, "3");
    assert_eq!(medbook.api().token().await.as_deref(), Some("abc123"));

    // Logging in twice keeps a single entry.
    medbook
        .login("ana@clinic.test", "secret")
        .await
        .expect("Failed to log in");

    let users = load_registered_users(medbook.store())
        .await
        .expect("Failed to load users");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role, UserRole::Patient);

    match medbook.statistics().compute_for_user("3").await {
        Ok(UserStatistics::Patient(stats)) => assert_eq!(stats.total_appointments, 0),
        other => panic!("expected patient statistics, got {other:?}"),
    }
}

#[tokio::test]
async fn listing_doctors_registers_them() {
    let server = MockServer::start().await;
    let temp = TempStore::new().await;

    Mock::given(method("GET"))
        .and(path("/usuarios/medicos"))
        .and(query_param("especialidade", "Pediatria"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 8, "nome": "Davi", "email": "davi@clinic.test", "tipo": "MEDICO", "especialidade": "Pediatria"},
            {"id": 12, "nome": "Eva", "email": "eva@clinic.test", "tipo": "MEDICO", "especialidade": "Pediatria"},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let medbook = medbook_for(&server, &temp).await;
    let doctors = medbook
        .doctors(Some("Pediatria"))
        .await
        .expect("Failed to list doctors");
    assert_eq!(doctors.len(), 2);

    let users = load_registered_users(medbook.store())
        .await
        .expect("Failed to load users");
    assert_eq!(users.len(), 2);
    assert!(
        users
            .iter()
            .all(|u| matches!(&u.role, UserRole::Doctor { specialty, .. } if specialty == "Pediatria"))
    );

    let stats = medbook
        .statistics()
        .compute_general()
        .await
        .expect("Failed to compute statistics");
    assert_eq!(stats.registered_doctors, 2);
    assert_eq!(stats.registered_patients, 0);
}

#[tokio::test]
async fn specialties_are_listed() {
    let server = MockServer::start().await;
    let temp = TempStore::new().await;

    Mock::given(method("GET"))
        .and(path("/especialidades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "nome": "Cardiologia"},
            {"id": 2, "nome": "Pediatria"},
        ])))
        .mount(&server)
        .await;

    let medbook = medbook_for(&server, &temp).await;
    let specialties = medbook.specialties().await.expect("Failed to list");
    let names: Vec<_> = specialties.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Cardiologia", "Pediatria"]);
}

#[tokio::test]
async fn session_survives_reopen_until_logout() {
    let server = MockServer::start().await;
    let temp = TempStore::new().await;

    Mock::given(method("POST"))
        .and(path("/usuarios/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-9",
            "usuario": {"id": 9, "nome": "Carla", "email": "carla@clinic.test", "tipo": "MEDICO", "especialidade": "Cardiologia"},
        })))
        .mount(&server)
        .await;

    {
        let medbook = medbook_for(&server, &temp).await;
        medbook
            .login("carla@clinic.test", "secret")
            .await
            .expect("Failed to log in");
    }

    let medbook = medbook_for(&server, &temp).await;
    assert_eq!(medbook.api().token().await.as_deref(), Some("tok-9"));
    let session = medbook
        .session()
        .await
        .expect("Failed to read session")
        .expect("Session should be stored");
    assert_eq!(session.user.id, "9");

    medbook.logout().await.expect("Failed to log out");
    assert!(medbook.api().token().await.is_none());
    assert!(
        medbook
            .session()
            .await
            .expect("Failed to read session")
            .is_none()
    );
}
