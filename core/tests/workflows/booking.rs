// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use medbook_core::{
    AppointmentDraft, AppointmentStatus, BookingError, MedbookError, load_appointments,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{appointment_json, medbook_for, tomorrow};
use crate::common::TempStore;

fn draft(date: &str) -> AppointmentDraft {
    AppointmentDraft {
        doctor_id: "9".to_string(),
        specialty: "Cardiologia".to_string(),
        date: date.to_string(),
        time: "10:30".to_string(),
        description: "Dor no peito".to_string(),
    }
}

#[tokio::test]
async fn booking_stores_the_new_appointment() {
    let server = MockServer::start().await;
    let temp = TempStore::new().await;
    let (form_date, wire_date) = tomorrow();
    let date_time = format!("{wire_date}T10:30:00");

    Mock::given(method("POST"))
        .and(path("/consultas"))
        .and(body_partial_json(json!({
            "dataHora": date_time,
            "usuarioId": 3,
            "medicoId": 9,
            "status": "AGENDADA",
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(appointment_json(50, &date_time, "AGENDADA")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let medbook = medbook_for(&server, &temp).await;
    let record = medbook
        .book(draft(&form_date), "3")
        .await
        .expect("Failed to book");

    assert_eq!(record.id, "50");
    assert_eq!(record.date, form_date);
    assert_eq!(record.time, "10:30");
    assert_eq!(record.status, AppointmentStatus::Pending);

    let stored = load_appointments(medbook.store())
        .await
        .expect("Failed to load records");
    assert_eq!(stored, vec![record]);

    let stats = medbook
        .statistics()
        .compute_for_patient("3")
        .await
        .expect("Failed to compute statistics");
    assert_eq!(stats.total_appointments, 1);
    assert_eq!(stats.pending_appointments, 1);
}

#[tokio::test]
async fn booking_without_specialty_uses_the_doctors() {
    let server = MockServer::start().await;
    let temp = TempStore::new().await;
    let (form_date, wire_date) = tomorrow();
    let date_time = format!("{wire_date}T10:30:00");

    Mock::given(method("GET"))
        .and(path("/usuarios/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "nome": "Carla",
            "email": "carla@clinic.test",
            "tipo": "MEDICO",
            "especialidade": "Cardiologia",
            "crm": "12345",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/consultas"))
        .and(body_partial_json(json!({"especialidade": "Cardiologia"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(appointment_json(51, &date_time, "AGENDADA")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let medbook = medbook_for(&server, &temp).await;
    let record = medbook
        .book(
            AppointmentDraft {
                specialty: String::new(),
                ..draft(&form_date)
            },
            "3",
        )
        .await
        .expect("Failed to book");
    assert_eq!(record.specialty, "Cardiologia");
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_backend() {
    let server = MockServer::start().await;
    let temp = TempStore::new().await;

    Mock::given(method("POST"))
        .and(path("/consultas"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let medbook = medbook_for(&server, &temp).await;

    let err = medbook
        .book(draft("01/01/2000"), "3")
        .await
        .expect_err("Past date should be rejected");
    assert!(matches!(
        err,
        MedbookError::Booking(BookingError::InvalidDate(_))
    ));

    let (form_date, _) = tomorrow();
    let err = medbook
        .book(
            AppointmentDraft {
                description: String::new(),
                ..draft(&form_date)
            },
            "3",
        )
        .await
        .expect_err("Missing description should be rejected");
    assert!(matches!(
        err,
        MedbookError::Booking(BookingError::MissingField("description"))
    ));

    let stored = load_appointments(medbook.store())
        .await
        .expect("Failed to load records");
    assert!(stored.is_empty());
}

#[tokio::test]
async fn backend_failure_leaves_the_store_untouched() {
    let server = MockServer::start().await;
    let temp = TempStore::new().await;
    let (form_date, _) = tomorrow();

    Mock::given(method("POST"))
        .and(path("/consultas"))
        .respond_with(ResponseTemplate::new(409).set_body_string("slot taken"))
        .mount(&server)
        .await;

    let medbook = medbook_for(&server, &temp).await;
    let err = medbook
        .book(draft(&form_date), "3")
        .await
        .expect_err("Conflict should fail");
    match err {
        MedbookError::Api(e) => assert_eq!(e.status(), Some(409)),
        other => panic!("expected api error, got {other:?}"),
    }

    let stored = load_appointments(medbook.store())
        .await
        .expect("Failed to load records");
    assert!(stored.is_empty());
}

#[tokio::test]
async fn confirm_and_cancel_update_the_stored_copy() {
    let server = MockServer::start().await;
    let temp = TempStore::new().await;
    let (form_date, wire_date) = tomorrow();
    let date_time = format!("{wire_date}T10:30:00");

    Mock::given(method("POST"))
        .and(path("/consultas"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(appointment_json(60, &date_time, "AGENDADA")),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/consultas/60"))
        .and(body_partial_json(json!({"status": "CONFIRMADA"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(appointment_json(
                60,
                &date_time,
                "CONFIRMADA",
            )),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/consultas/60"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let medbook = medbook_for(&server, &temp).await;
    medbook
        .book(draft(&form_date), "3")
        .await
        .expect("Failed to book");

    let confirmed = medbook.confirm("60").await.expect("Failed to confirm");
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

    let stats = medbook
        .statistics()
        .compute_general()
        .await
        .expect("Failed to compute statistics");
    assert_eq!(stats.total_appointments, 1);
    assert_eq!(stats.confirmed_appointments, 1);

    let cancelled = medbook
        .cancel("60")
        .await
        .expect("Failed to cancel")
        .expect("Record should be stored");
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);

    let stats = medbook
        .statistics()
        .compute_general()
        .await
        .expect("Failed to compute statistics");
    assert_eq!(stats.total_appointments, 1);
    assert_eq!(stats.cancelled_appointments, 1);
    assert_eq!(stats.confirmed_appointments, 0);
}

#[tokio::test]
async fn cancel_of_unknown_record_succeeds_without_store_change() {
    let server = MockServer::start().await;
    let temp = TempStore::new().await;

    Mock::given(method("DELETE"))
        .and(path("/consultas/77"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let medbook = medbook_for(&server, &temp).await;
    let cancelled = medbook.cancel("77").await.expect("Failed to cancel");
    assert!(cancelled.is_none());
}
