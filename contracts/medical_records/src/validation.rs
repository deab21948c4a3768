use soroban_sdk::{String, Vec};

use crate::ContractError;

pub const MAX_ID_LEN: u32 = 64;
pub const MAX_HASH_LEN: u32 = 128;
pub const MAX_LABEL_LEN: u32 = 64;
pub const MAX_REASON_LEN: u32 = 256;

/// Largest number of records a single batch call may touch. A batch create
/// writes one entry per record plus the instance, and a call may write at
/// most 50 ledger entries.
pub const MAX_BATCH_SIZE: u32 = 40;

/// Checks that `value` is 1..=`max_len` bytes of printable ASCII.
fn validate_printable(value: &String, max_len: u32) -> Result<(), ContractError> {
    let len = value.len();
    if len == 0 || len > max_len {
        return Err(ContractError::InvalidInput);
    }

    // Soroban strings copy out as raw bytes; reject anything outside ' '..='~'.
    let mut buf = [0u8; MAX_HASH_LEN as usize];
    value.copy_into_slice(&mut buf[..len as usize]);

    if buf[..len as usize].iter().all(|b| (32..=126).contains(b)) {
        Ok(())
    } else {
        Err(ContractError::InvalidInput)
    }
}

/// Checks that `value` is 1..=`max_len` bytes. Any UTF-8 is accepted.
fn validate_text(value: &String, max_len: u32) -> Result<(), ContractError> {
    let len = value.len();
    if len == 0 || len > max_len {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

/// Record ids and access ids share one format.
pub fn validate_id(id: &String) -> Result<(), ContractError> {
    validate_printable(id, MAX_ID_LEN)
}

/// Content hashes (IPFS CID, hex digest, ...) are opaque but bounded.
pub fn validate_content_hash(hash: &String) -> Result<(), ContractError> {
    validate_printable(hash, MAX_HASH_LEN)
}

/// Free-text labels such as "MRI", "Radiografía" or a reported actor name.
pub fn validate_label(label: &String) -> Result<(), ContractError> {
    validate_text(label, MAX_LABEL_LEN)
}

pub fn validate_reason(reason: &String) -> Result<(), ContractError> {
    validate_text(reason, MAX_REASON_LEN)
}

pub fn validate_batch_size(len: u32) -> Result<(), ContractError> {
    if len == 0 {
        return Err(ContractError::EmptyBatch);
    }
    if len > MAX_BATCH_SIZE {
        return Err(ContractError::BatchTooLarge);
    }
    Ok(())
}

pub fn validate_ids(ids: &Vec<String>) -> Result<(), ContractError> {
    validate_batch_size(ids.len())?;
    for id in ids.iter() {
        validate_id(&id)?;
    }
    Ok(())
}
