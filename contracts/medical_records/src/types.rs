use soroban_sdk::{contracttype, Address, String, Vec};

/// Lifecycle of an access request. `Approved` and `Denied` are terminal.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RequestStatus {
    Pending = 0,
    Approved = 1,
    Denied = 2,
}

/// One immutable line of the audit log: who viewed which kind of record of whom.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessLogEntry {
    pub doctor: Address,
    pub patient: Address,
    pub record_type: String,
    pub timestamp: u64,
}

/// A doctor's request to view one of a patient's records, keyed by
/// `(doctor, record_id)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRequest {
    pub doctor: Address,
    pub patient: Address,
    pub record_id: String,
    pub record_type: String,
    pub status: RequestStatus,
    pub requested_at: u64,
    /// Zero while the request is pending.
    pub resolved_at: u64,
}

/// Record metadata. The payload itself is stored off-chain; only its hash is kept.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MedicalRecord {
    pub record_id: String,
    pub owner: Address,
    pub content_hash: String,
    pub exists: bool,
    pub created_at: u64,
    /// Zero until the record is deleted.
    pub deleted_at: u64,
}

/// The `(owner, hash)` pair handed back by record reads.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordData {
    pub owner: Address,
    pub content_hash: String,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum LedgerAction {
    Read = 1,
    Delete = 2,
}

/// What a claimed access id was used for.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessLedgerEntry {
    pub access_id: String,
    pub actor: Address,
    pub action: LedgerAction,
    pub record_ids: Vec<String>,
    pub timestamp: u64,
}

/// A reported misuse. `actor` is free text since the offender may not hold an address.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BadActionEntry {
    pub access_id: String,
    pub actor: String,
    pub reason: String,
    pub reporter: Address,
    pub timestamp: u64,
}
