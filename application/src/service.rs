use error_stack::ResultExt;

use kernel::interface::database::Transaction;
use kernel::KernelError;

pub use self::{catalog::*, rental::*, seed::*};

mod catalog;
mod rental;
mod seed;

/// Ends a unit of work: commits when `result` is ok, rolls back otherwise.
/// Control returns only after the commit or roll back has finished.
pub(crate) async fn settle<T, Tx: Transaction>(
    transaction: Tx,
    result: error_stack::Result<T, KernelError>,
) -> error_stack::Result<T, KernelError> {
    match result {
        Ok(value) => {
            transaction
                .commit()
                .await
                .change_context(KernelError::TransactionFailure)?;
            Ok(value)
        }
        Err(report) => {
            if let Err(failure) = transaction.roll_back().await {
                tracing::error!("Failed to roll back transaction: {failure:?}");
                return Err(report.attach_printable(format!("roll back failed: {failure}")));
            }
            Err(report)
        }
    }
}
