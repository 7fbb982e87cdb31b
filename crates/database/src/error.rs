use models::schedule::ScheduleError;
use normalizer::error::{LoadError, OfferingError};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("missing environment variable {0}")]
    MissingConfig(&'static str),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Offering(#[from] OfferingError),

    #[error(transparent)]
    Database(#[from] DbErr),
}

impl From<ScheduleError> for ServiceError {
    fn from(err: ScheduleError) -> Self {
        Self::Offering(err.into())
    }
}
