// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod booking;
mod session;

use jiff::Zoned;
use medbook_api::ApiConfig;
use medbook_core::{Config, Medbook};
use serde_json::json;
use wiremock::MockServer;

use crate::common::TempStore;

/// A facade over a temporary file store and the mocked backend.
pub async fn medbook_for(server: &MockServer, temp: &TempStore) -> Medbook {
    let config = Config {
        store_path: Some(temp.path()),
        user_id: Some("3".to_string()),
    };
    let api = ApiConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    Medbook::new(config, &api)
        .await
        .expect("Failed to create medbook")
}

/// Tomorrow in the form format, `DD/MM/YYYY`, and the wire format date part.
pub fn tomorrow() -> (String, String) {
    let date = Zoned::now()
        .date()
        .tomorrow()
        .expect("Tomorrow should exist");
    (
        date.strftime("%d/%m/%Y").to_string(),
        date.strftime("%Y-%m-%d").to_string(),
    )
}

/// An appointment as the backend returns it.
pub fn appointment_json(id: u64, date_time: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "dataHora": date_time,
        "especialidade": "Cardiologia",
        "usuarioId": 3,
        "medicoId": 9,
        "observacao": "Dor no peito",
        "status": status,
    })
}
