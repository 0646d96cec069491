// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use medbook_core::{MemoryStore, Statistics};

use super::assert_percent;
use crate::common::{sample_appointments, sample_users, seeded_memory_store};

#[tokio::test]
async fn general_counts_every_appointment() {
    let store = seeded_memory_store(&sample_appointments(), &sample_users());
    let stats = Statistics::new(store)
        .compute_general()
        .await
        .expect("Failed to compute statistics");

    assert_eq!(stats.total_appointments, 6);
    assert_eq!(stats.confirmed_appointments, 2);
    assert_eq!(stats.pending_appointments, 2);
    assert_eq!(stats.cancelled_appointments, 1);
    assert_eq!(stats.unrecognized_appointments, 1);
    assert_eq!(
        stats.confirmed_appointments
            + stats.pending_appointments
            + stats.cancelled_appointments
            + stats.unrecognized_appointments,
        stats.total_appointments
    );

    assert_eq!(stats.total_patients, 2);
    assert_eq!(stats.total_doctors, 2);
    assert_eq!(stats.registered_patients, 2);
    assert_eq!(stats.registered_doctors, 2);
}

#[tokio::test]
async fn general_buckets_specialties_and_months() {
    let store = seeded_memory_store(&sample_appointments(), &sample_users());
    let stats = Statistics::new(store)
        .compute_general()
        .await
        .expect("Failed to compute statistics");

    assert_eq!(stats.specialties.get("Cardiologia"), Some(&3));
    assert_eq!(stats.specialties.get("Pediatria"), Some(&3));
    assert_eq!(
        stats.specialties.values().sum::<usize>(),
        stats.total_appointments
    );

    // The ISO-formatted record is left out of the monthly view only.
    assert_eq!(stats.appointments_by_month.len(), 3);
    assert_eq!(stats.appointments_by_month.get("01/2024"), Some(&2));
    assert_eq!(stats.appointments_by_month.get("02/2024"), Some(&2));
    assert_eq!(stats.appointments_by_month.get("03/2024"), Some(&1));
}

#[tokio::test]
async fn general_percentages_use_total() {
    let store = seeded_memory_store(&sample_appointments(), &sample_users());
    let stats = Statistics::new(store)
        .compute_general()
        .await
        .expect("Failed to compute statistics");

    assert_percent(stats.status_percentages.confirmed, 100.0 / 3.0);
    assert_percent(stats.status_percentages.pending, 100.0 / 3.0);
    assert_percent(stats.status_percentages.cancelled, 100.0 / 6.0);
}

#[tokio::test]
async fn general_on_empty_store_is_all_zero() {
    let stats = Statistics::new(MemoryStore::new())
        .compute_general()
        .await
        .expect("Failed to compute statistics");

    assert_eq!(stats.total_appointments, 0);
    assert_eq!(stats.total_patients, 0);
    assert!(stats.specialties.is_empty());
    assert!(stats.appointments_by_month.is_empty());
    assert_percent(stats.status_percentages.confirmed, 0.0);
    assert_percent(stats.status_percentages.pending, 0.0);
    assert_percent(stats.status_percentages.cancelled, 0.0);
}

#[tokio::test]
async fn general_is_idempotent() {
    let statistics = Statistics::new(seeded_memory_store(
        &sample_appointments(),
        &sample_users(),
    ));

    let first = statistics
        .compute_general()
        .await
        .expect("Failed to compute statistics");
    let second = statistics
        .compute_general()
        .await
        .expect("Failed to compute statistics");
    assert_eq!(first, second);
}

#[tokio::test]
async fn general_serializes_with_dashboard_field_names() {
    let store = seeded_memory_store(&sample_appointments(), &sample_users());
    let stats = Statistics::new(store)
        .compute_general()
        .await
        .expect("Failed to compute statistics");

    let value = serde_json::to_value(&stats).expect("Failed to serialize");
    assert_eq!(value["totalAppointments"], 6);
    assert_eq!(value["confirmedAppointments"], 2);
    assert_eq!(value["appointmentsByMonth"]["01/2024"], 2);
    assert_eq!(value["specialties"]["Pediatria"], 3);
    assert!(value["statusPercentages"]["cancelled"].is_f64());
}
