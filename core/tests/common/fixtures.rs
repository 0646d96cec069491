// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories.

use medbook_core::{AppointmentRecord, AppointmentStatus, RegisteredUser, UserRole};

/// Creates an appointment record.
pub fn appointment(
    id: &str,
    patient_id: &str,
    doctor_id: &str,
    date: &str,
    specialty: &str,
    status: &str,
) -> AppointmentRecord {
    AppointmentRecord {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        doctor_id: doctor_id.to_string(),
        date: date.to_string(),
        time: "10:00".to_string(),
        specialty: specialty.to_string(),
        status: AppointmentStatus::from(status),
        notes: None,
    }
}

/// Creates a registered patient.
pub fn patient(id: &str, name: &str) -> RegisteredUser {
    RegisteredUser {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@clinic.test", name.to_lowercase()),
        role: UserRole::Patient,
    }
}

/// Creates a registered doctor.
pub fn doctor(id: &str, name: &str, specialty: &str) -> RegisteredUser {
    RegisteredUser {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@clinic.test", name.to_lowercase()),
        role: UserRole::Doctor {
            specialty: specialty.to_string(),
            crm: None,
        },
    }
}

/// Creates a registered administrator.
pub fn admin(id: &str) -> RegisteredUser {
    RegisteredUser {
        id: id.to_string(),
        name: "Admin".to_string(),
        email: "admin@clinic.test".to_string(),
        role: UserRole::Admin,
    }
}

/// Two patients and two doctors sharing six appointments.
///
/// | id | patient | doctor | month   | specialty   | status    |
/// |----|---------|--------|---------|-------------|-----------|
/// | 1  | p1      | d1     | 01/2024 | Cardiologia | confirmed |
/// | 2  | p1      | d2     | 01/2024 | Pediatria   | pending   |
/// | 3  | p2      | d1     | 02/2024 | Cardiologia | cancelled |
/// | 4  | p2      | d1     | 02/2024 | Cardiologia | confirmed |
/// | 5  | p1      | d2     | bad     | Pediatria   | pending   |
/// | 6  | p2      | d2     | 03/2024 | Pediatria   | completed |
pub fn sample_appointments() -> Vec<AppointmentRecord> {
    vec![
        appointment("1", "p1", "d1", "10/01/2024", "Cardiologia", "confirmed"),
        appointment("2", "p1", "d2", "22/01/2024", "Pediatria", "pending"),
        appointment("3", "p2", "d1", "05/02/2024", "Cardiologia", "cancelled"),
        appointment("4", "p2", "d1", "19/02/2024", "Cardiologia", "confirmed"),
        appointment("5", "p1", "d2", "2024-03-01", "Pediatria", "pending"),
        appointment("6", "p2", "d2", "12/03/2024", "Pediatria", "completed"),
    ]
}

/// Users matching [`sample_appointments`], plus an administrator.
pub fn sample_users() -> Vec<RegisteredUser> {
    vec![
        patient("p1", "Ana"),
        patient("p2", "Bruno"),
        doctor("d1", "Carla", "Cardiologia"),
        doctor("d2", "Davi", "Pediatria"),
        admin("a1"),
    ]
}
