#![allow(deprecated)]
use crate::{LedgerAction, RequestStatus};
use soroban_sdk::{symbol_short, Address, Env, String, Symbol};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Event published when a doctor files an access request.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRequestedEvent {
    pub doctor: Address,
    pub patient: Address,
    pub record_id: String,
    pub record_type: String,
    pub index: u32,
    pub timestamp: u64,
}

/// Event published when a patient approves or denies a request.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessResolvedEvent {
    pub doctor: Address,
    pub patient: Address,
    pub record_id: String,
    pub status: RequestStatus,
    pub timestamp: u64,
}

/// Event published when an entry lands in the access log.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessLoggedEvent {
    pub doctor: Address,
    pub patient: Address,
    pub record_type: String,
    pub index: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordCreatedEvent {
    pub record_id: String,
    pub owner: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchRecordsCreatedEvent {
    pub owner: Address,
    pub count: u32,
    pub timestamp: u64,
}

/// Event published when an access id is claimed by a read or a delete.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordAccessedEvent {
    pub access_id: String,
    pub actor: Address,
    pub action: LedgerAction,
    pub count: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BadActionEvent {
    pub access_id: String,
    pub reporter: Address,
    pub index: u32,
    pub timestamp: u64,
}

/// Event published when a consumer advances or resets a sync cursor.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyncEvent {
    pub feed: Symbol,
    pub pointer: u32,
    pub delivered: u32,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a doctor requests access.
/// Topics carry both parties so each side can filter for its own requests.
pub fn publish_access_requested(
    env: &Env,
    doctor: Address,
    patient: Address,
    record_id: String,
    record_type: String,
    index: u32,
) {
    let topics = (symbol_short!("ACC_REQ"), doctor.clone(), patient.clone());
    let data = AccessRequestedEvent {
        doctor,
        patient,
        record_id,
        record_type,
        index,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes `ACC_APP` or `ACC_DEN` depending on the resolved status.
pub fn publish_access_resolved(
    env: &Env,
    doctor: Address,
    patient: Address,
    record_id: String,
    status: RequestStatus,
) {
    let topic = match status {
        RequestStatus::Approved => symbol_short!("ACC_APP"),
        _ => symbol_short!("ACC_DEN"),
    };
    let topics = (topic, doctor.clone(), patient.clone());
    let data = AccessResolvedEvent {
        doctor,
        patient,
        record_id,
        status,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_access_logged(
    env: &Env,
    doctor: Address,
    patient: Address,
    record_type: String,
    index: u32,
) {
    let topics = (symbol_short!("LOG_ADD"), patient.clone());
    let data = AccessLoggedEvent {
        doctor,
        patient,
        record_type,
        index,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_record_created(env: &Env, record_id: String, owner: Address) {
    let topics = (symbol_short!("REC_ADD"), owner.clone());
    let data = RecordCreatedEvent {
        record_id,
        owner,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_batch_records_created(env: &Env, owner: Address, count: u32) {
    let topics = (symbol_short!("BATCH_R"), owner.clone());
    let data = BatchRecordsCreatedEvent {
        owner,
        count,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes `REC_READ` or `REC_DEL` once per claimed access id.
pub fn publish_record_accessed(
    env: &Env,
    access_id: String,
    actor: Address,
    action: LedgerAction,
    count: u32,
) {
    let topic = match action {
        LedgerAction::Read => symbol_short!("REC_READ"),
        LedgerAction::Delete => symbol_short!("REC_DEL"),
    };
    let topics = (topic, actor.clone());
    let data = RecordAccessedEvent {
        access_id,
        actor,
        action,
        count,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_bad_action(env: &Env, access_id: String, reporter: Address, index: u32) {
    let topics = (symbol_short!("BAD_ACT"), reporter.clone());
    let data = BadActionEvent {
        access_id,
        reporter,
        index,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_synced(env: &Env, feed: Symbol, pointer: u32, delivered: u32) {
    let topics = (symbol_short!("SYNC"), feed.clone());
    let data = SyncEvent {
        feed,
        pointer,
        delivered,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_sync_reset(env: &Env, feed: Symbol, admin: Address) {
    let topics = (symbol_short!("SYNC_RST"), feed);
    env.events().publish(topics, admin);
}
