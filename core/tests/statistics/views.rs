// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use medbook_core::{Statistics, StatisticsError, UserStatistics};

use super::assert_percent;
use crate::common::{sample_appointments, sample_users, seeded_memory_store};

fn statistics() -> Statistics<medbook_core::MemoryStore> {
    Statistics::new(seeded_memory_store(&sample_appointments(), &sample_users()))
}

#[tokio::test]
async fn doctor_view_covers_only_their_appointments() {
    let stats = statistics()
        .compute_for_doctor("d1")
        .await
        .expect("Failed to compute statistics");

    assert_eq!(stats.total_appointments, 3);
    assert_eq!(stats.confirmed_appointments, 2);
    assert_eq!(stats.pending_appointments, 0);
    assert_eq!(stats.cancelled_appointments, 1);
    assert_eq!(stats.total_patients, Some(2));
    assert_eq!(stats.total_doctors, None);
    assert_eq!(stats.specialties.len(), 1);
    assert_eq!(stats.specialties.get("Cardiologia"), Some(&3));
    assert_percent(stats.status_percentages.confirmed, 200.0 / 3.0);
}

#[tokio::test]
async fn patient_view_covers_only_their_appointments() {
    let stats = statistics()
        .compute_for_patient("p1")
        .await
        .expect("Failed to compute statistics");

    assert_eq!(stats.total_appointments, 3);
    assert_eq!(stats.confirmed_appointments, 1);
    assert_eq!(stats.pending_appointments, 2);
    assert_eq!(stats.cancelled_appointments, 0);
    assert_eq!(stats.total_doctors, Some(2));
    assert_eq!(stats.total_patients, None);
}

#[tokio::test]
async fn views_for_unknown_ids_are_empty() {
    let stats = statistics()
        .compute_for_doctor("nobody")
        .await
        .expect("Failed to compute statistics");
    assert_eq!(stats.total_appointments, 0);
    assert_eq!(stats.total_patients, Some(0));
    assert_percent(stats.status_percentages.pending, 0.0);

    let stats = statistics()
        .compute_for_patient("nobody")
        .await
        .expect("Failed to compute statistics");
    assert_eq!(stats.total_doctors, Some(0));
}

#[tokio::test]
async fn partial_views_omit_the_missing_audience() {
    let stats = statistics()
        .compute_for_patient("p2")
        .await
        .expect("Failed to compute statistics");

    let value = serde_json::to_value(&stats).expect("Failed to serialize");
    assert_eq!(value["totalDoctors"], 2);
    assert!(value.get("totalPatients").is_none());
    assert!(value.get("appointmentsByMonth").is_none());
}

#[tokio::test]
async fn user_view_follows_role() {
    let statistics = statistics();

    match statistics.compute_for_user("d2").await {
        Ok(UserStatistics::Doctor(stats)) => assert_eq!(stats.total_appointments, 3),
        other => panic!("expected doctor statistics, got {other:?}"),
    }

    match statistics.compute_for_user("p2").await {
        Ok(UserStatistics::Patient(stats)) => assert_eq!(stats.total_appointments, 3),
        other => panic!("expected patient statistics, got {other:?}"),
    }

    match statistics.compute_for_user("a1").await {
        Ok(UserStatistics::General(stats)) => assert_eq!(stats.total_appointments, 6),
        other => panic!("expected general statistics, got {other:?}"),
    }
}

#[tokio::test]
async fn user_view_rejects_unregistered_user() {
    let err = statistics()
        .compute_for_user("ghost")
        .await
        .expect_err("Unregistered user should fail");
    assert!(matches!(err, StatisticsError::UnknownUser(id) if id == "ghost"));
}
