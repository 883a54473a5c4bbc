use std::num::ParseIntError;

use error_stack::Report;
use kernel::KernelError;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    SqlX(sqlx::Error),
    #[error(transparent)]
    Migration(sqlx::migrate::MigrateError),
    #[error(transparent)]
    Env(dotenvy::Error),
    #[error(transparent)]
    Conversion(anyhow::Error),
}

impl From<sqlx::Error> for DriverError {
    fn from(value: sqlx::Error) -> Self {
        Self::SqlX(value)
    }
}

impl From<sqlx::migrate::MigrateError> for DriverError {
    fn from(value: sqlx::migrate::MigrateError) -> Self {
        Self::Migration(value)
    }
}

impl From<dotenvy::Error> for DriverError {
    fn from(value: dotenvy::Error) -> Self {
        Self::Env(value)
    }
}

impl From<ParseIntError> for DriverError {
    fn from(value: ParseIntError) -> Self {
        Self::Conversion(anyhow::Error::new(value))
    }
}

/// Lifts driver-level failures into kernel reports.
pub trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T> ConvertError for Result<T, DriverError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| match error {
            DriverError::SqlX(error) => classify(error),
            other => Report::new(other).change_context(KernelError::Internal),
        })
    }
}

impl<T> ConvertError for Result<T, sqlx::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(classify)
    }
}

fn classify(error: sqlx::Error) -> Report<KernelError> {
    let context = match &error {
        sqlx::Error::PoolTimedOut => KernelError::Timeout,
        // serialization_failure
        sqlx::Error::Database(database) if database.code().as_deref() == Some("40001") => {
            KernelError::Concurrency
        }
        _ => KernelError::Internal,
    };
    Report::new(error).change_context(context)
}
