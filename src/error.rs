use thiserror::Error;
use uuid::Uuid;

use crate::ai::AiError;
use crate::db::DatabaseError;
use crate::pipeline::extraction::ExtractionError;

/// Service-layer error for the coordination flows.
#[derive(Error, Debug)]
pub enum CareError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Ai(#[from] AiError),

    #[error("Unknown patient: {id}")]
    UnknownPatient { id: Uuid },

    #[error("Reminder {id} was already resolved")]
    AlreadyResolved { id: Uuid },

    #[error("Report generation failed: {0}")]
    Export(String),
}
