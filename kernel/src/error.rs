use std::fmt::Display;

use error_stack::Context;

/// Record kinds a failure can point at.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum EntityKind {
    Customer,
    Movie,
    Rental,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Customer => write!(f, "customer"),
            EntityKind::Movie => write!(f, "movie"),
            EntityKind::Rental => write!(f, "rental"),
        }
    }
}

/// Business rules a request can violate.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum InvalidStateReason {
    MovieNotInStock,
    ReturnAlreadyProcessed,
}

impl Display for InvalidStateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidStateReason::MovieNotInStock => write!(f, "movie not in stock"),
            InvalidStateReason::ReturnAlreadyProcessed => write!(f, "return already processed"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum KernelError {
    ReferenceNotFound { entity: EntityKind, id: String },
    InvalidState(InvalidStateReason),
    NotFound(EntityKind),
    /// A write inside a unit of work failed and the unit of work was rolled back.
    TransactionFailure,
    Concurrency,
    Timeout,
    Internal,
}

impl KernelError {
    pub fn reference_not_found(entity: EntityKind, id: impl Display) -> Self {
        KernelError::ReferenceNotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether the failure was caused by the request rather than the infrastructure.
    pub fn is_business(&self) -> bool {
        matches!(
            self,
            KernelError::ReferenceNotFound { .. }
                | KernelError::InvalidState(_)
                | KernelError::NotFound(_)
        )
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::ReferenceNotFound { entity, id } => write!(f, "Invalid {entity}Id = {id}"),
            KernelError::InvalidState(reason) => write!(f, "{reason}"),
            KernelError::NotFound(entity) => write!(f, "{entity} not found"),
            KernelError::TransactionFailure => write!(f, "Transaction failed and was rolled back"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
