//! Explicit care-session context.
//!
//! Every patient-scoped operation takes a `CareSession` instead of a
//! loose patient identifier, so the patient is validated against the
//! registry exactly once, at session open.

use rusqlite::Connection;
use uuid::Uuid;

use crate::db::repository::patient_exists;
use crate::error::CareError;
use crate::models::enums::Role;

/// The acting patient context plus the role the caller signed in with.
#[derive(Debug, Clone)]
pub struct CareSession {
    patient_id: Uuid,
    role: Role,
}

impl CareSession {
    /// Open a session for a registered patient. Fails when the patient
    /// is not in the registry.
    pub fn open(conn: &Connection, patient_id: Uuid, role: Role) -> Result<Self, CareError> {
        if !patient_exists(conn, &patient_id)? {
            return Err(CareError::UnknownPatient { id: patient_id });
        }
        tracing::debug!(patient_id = %patient_id, role = role.as_str(), "care session opened");
        Ok(Self { patient_id, role })
    }

    pub fn patient_id(&self) -> Uuid {
        self.patient_id
    }

    pub fn role(&self) -> &Role {
        &self.role
    }
}
