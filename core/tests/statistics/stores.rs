// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use medbook_core::{
    APPOINTMENTS_KEY, MemoryStore, RecordStore, Statistics, StatisticsError, StoreError,
    save_array,
};

use crate::common::{FailingStore, TempStore, sample_appointments, sample_users};

#[tokio::test]
async fn file_store_statistics_match_memory_store() {
    let temp = TempStore::new().await;
    save_array(&temp.store, APPOINTMENTS_KEY, &sample_appointments())
        .await
        .expect("Failed to save appointments");
    save_array(
        &temp.store,
        medbook_core::REGISTERED_USERS_KEY,
        &sample_users(),
    )
    .await
    .expect("Failed to save users");

    let from_file = Statistics::new(temp.store)
        .compute_general()
        .await
        .expect("Failed to compute statistics");

    let memory = MemoryStore::new();
    save_array(&memory, APPOINTMENTS_KEY, &sample_appointments())
        .await
        .expect("Failed to save appointments");
    save_array(&memory, medbook_core::REGISTERED_USERS_KEY, &sample_users())
        .await
        .expect("Failed to save users");
    let from_memory = Statistics::new(memory)
        .compute_general()
        .await
        .expect("Failed to compute statistics");

    assert_eq!(from_file, from_memory);
}

#[tokio::test]
async fn file_store_survives_reopen() {
    let temp = TempStore::new().await;
    save_array(&temp.store, APPOINTMENTS_KEY, &sample_appointments())
        .await
        .expect("Failed to save appointments");

    let reopened = medbook_core::FileStore::open(&temp.path())
        .await
        .expect("Failed to reopen store");
    let stats = Statistics::new(reopened)
        .compute_for_doctor("d2")
        .await
        .expect("Failed to compute statistics");
    assert_eq!(stats.total_appointments, 3);
}

#[tokio::test]
async fn missing_users_key_still_yields_appointment_counts() {
    let memory = MemoryStore::new();
    save_array(&memory, APPOINTMENTS_KEY, &sample_appointments())
        .await
        .expect("Failed to save appointments");

    let stats = Statistics::new(memory)
        .compute_general()
        .await
        .expect("Failed to compute statistics");
    assert_eq!(stats.total_appointments, 6);
    assert_eq!(stats.registered_patients, 0);
    assert_eq!(stats.registered_doctors, 0);
}

#[tokio::test]
async fn failing_store_reports_unavailable() {
    let statistics = Statistics::new(FailingStore);

    let err = statistics
        .compute_general()
        .await
        .expect_err("Store failure should propagate");
    assert!(matches!(
        err,
        StatisticsError::Unavailable(StoreError::Io { .. })
    ));

    let err = statistics
        .compute_for_patient("p1")
        .await
        .expect_err("Store failure should propagate");
    assert!(matches!(err, StatisticsError::Unavailable(_)));
}

#[tokio::test]
async fn corrupt_value_reports_unavailable() {
    let store = Arc::new(MemoryStore::new());
    store
        .write(APPOINTMENTS_KEY, "{not json")
        .await
        .expect("Failed to write raw value");

    let err = Statistics::new(store)
        .compute_for_doctor("d1")
        .await
        .expect_err("Corrupt value should fail");
    assert!(matches!(
        err,
        StatisticsError::Unavailable(StoreError::Deserialize { .. })
    ));
}
