use soroban_sdk::{contracttype, log, Env, Symbol};

/// Error categories for classifying different types of errors
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Validation errors: malformed identifiers, mismatched or empty batches
    Validation = 1,
    /// Authorization errors: the caller is not the principal the operation is reserved for
    Authorization = 2,
    /// Not found errors: record, request or ledger lookups that miss
    NotFound = 3,
    /// State conflict errors: reused identifiers and terminal-state transitions
    StateConflict = 4,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    /// Low severity: caller mistakes with no compliance impact
    Low = 1,
    /// Medium severity: rejected attempts worth surfacing to operators
    Medium = 2,
    /// High severity: attempts that would have corrupted the audit trail
    High = 3,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    OnlyPatientCanApprove = 4,
    OnlyPatientCanDeny = 5,
    RecordNotFound = 6,
    RequestNotFound = 7,
    AccessNotFound = 8,
    AccessAlreadyExists = 9,
    RequestAlreadyExists = 10,
    RequestAlreadyResolved = 11,
    RecordAlreadyExists = 12,
    BatchLengthMismatch = 13,
    EmptyBatch = 14,
    BatchTooLarge = 15,
    InvalidInput = 16,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::BatchLengthMismatch
            | ContractError::EmptyBatch
            | ContractError::BatchTooLarge
            | ContractError::InvalidInput => ErrorCategory::Validation,
            ContractError::Unauthorized
            | ContractError::OnlyPatientCanApprove
            | ContractError::OnlyPatientCanDeny => ErrorCategory::Authorization,
            ContractError::RecordNotFound
            | ContractError::RequestNotFound
            | ContractError::AccessNotFound => ErrorCategory::NotFound,
            ContractError::AccessAlreadyExists
            | ContractError::RequestAlreadyExists
            | ContractError::RequestAlreadyResolved
            | ContractError::RecordAlreadyExists => ErrorCategory::StateConflict,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::BatchLengthMismatch
            | ContractError::EmptyBatch
            | ContractError::BatchTooLarge
            | ContractError::InvalidInput
            | ContractError::RecordNotFound
            | ContractError::RequestNotFound
            | ContractError::AccessNotFound
            | ContractError::RecordAlreadyExists => ErrorSeverity::Low,
            ContractError::Unauthorized
            | ContractError::OnlyPatientCanApprove
            | ContractError::OnlyPatientCanDeny
            | ContractError::RequestAlreadyExists
            | ContractError::RequestAlreadyResolved => ErrorSeverity::Medium,
            ContractError::AccessAlreadyExists => ErrorSeverity::High,
        }
    }

    /// Returns the stable, machine-checkable reason string for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Caller is not authorized for this operation",
            ContractError::OnlyPatientCanApprove => "Only patient can approve",
            ContractError::OnlyPatientCanDeny => "Only patient can deny",
            ContractError::RecordNotFound => "Record does not exist",
            ContractError::RequestNotFound => "Access request does not exist",
            ContractError::AccessNotFound => "Access does not exist",
            ContractError::AccessAlreadyExists => "Access already exists",
            ContractError::RequestAlreadyExists => "Access request already exists",
            ContractError::RequestAlreadyResolved => "Access request already resolved",
            ContractError::RecordAlreadyExists => "Record already exists",
            ContractError::BatchLengthMismatch => "Ids and hashes length mismatch",
            ContractError::EmptyBatch => "Batch must not be empty",
            ContractError::BatchTooLarge => "Batch exceeds the maximum size",
            ContractError::InvalidInput => "Invalid input parameters provided",
        }
    }
}

/// Emits a diagnostic log line for a failed operation and hands the error back,
/// so entry points can write `.map_err(|e| trace(&env, OP, e))`.
///
/// Storage writes and events of a failed invocation are rolled back by the
/// host; diagnostic logs are what survive for operators.
pub fn trace(env: &Env, operation: Symbol, error: ContractError) -> ContractError {
    log!(
        env,
        "operation failed: op={} code={} category={}",
        operation,
        error as u32,
        error.category() as u32
    );
    error
}
