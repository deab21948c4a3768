#![no_std]

pub mod access_log;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod records;
pub mod requests;
pub mod state;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "testutils"))]
pub mod seed;

use soroban_sdk::{contract, contractimpl, symbol_short, vec, Address, Env, String, Symbol, Vec};

pub use errors::{ContractError, ErrorCategory, ErrorSeverity};
pub use types::{
    AccessLedgerEntry, AccessLogEntry, AccessRequest, BadActionEntry, LedgerAction, MedicalRecord,
    RecordData, RequestStatus,
};

use errors::trace;
use state::Registry;

/// Storage keys for the contract
const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

#[contract]
pub struct MedicalRecordsContract;

#[contractimpl]
impl MedicalRecordsContract {
    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Self::extend_instance_ttl(env);
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin = Self::get_admin(env.clone())?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Initialize the contract with an admin address
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(trace(
                &env,
                symbol_short!("init"),
                ContractError::AlreadyInitialized,
            ));
        }

        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        Self::extend_instance_ttl(&env);

        events::publish_initialized(&env, admin);

        Ok(())
    }

    /// Get the admin address
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }

    // ======================== Access Requests ========================

    /// File a pending request from `doctor` to view `record_id` of `patient`.
    pub fn request_access(
        env: Env,
        doctor: Address,
        patient: Address,
        record_id: String,
        record_type: String,
    ) -> Result<AccessRequest, ContractError> {
        let op = symbol_short!("req_acc");
        doctor.require_auth();
        Self::require_initialized(&env).map_err(|e| trace(&env, op.clone(), e))?;

        validation::validate_id(&record_id)
            .and_then(|_| validation::validate_label(&record_type))
            .and_then(|_| {
                Registry::new(&env)
                    .requests()
                    .create(doctor, patient, record_id, record_type)
            })
            .map_err(|e| trace(&env, op, e))
    }

    /// Approve a pending request. Only the patient named on the request may
    /// call this; approval appends one entry to the access log.
    pub fn approve_access(
        env: Env,
        caller: Address,
        doctor: Address,
        record_id: String,
    ) -> Result<(), ContractError> {
        let op = symbol_short!("approve");
        caller.require_auth();
        Self::require_initialized(&env).map_err(|e| trace(&env, op.clone(), e))?;

        Registry::new(&env)
            .approve_access(&caller, &doctor, &record_id)
            .map(|_| ())
            .map_err(|e| trace(&env, op, e))
    }

    /// Deny a pending request. Only the patient named on the request may call this.
    pub fn deny_access(
        env: Env,
        caller: Address,
        doctor: Address,
        record_id: String,
    ) -> Result<(), ContractError> {
        let op = symbol_short!("deny");
        caller.require_auth();
        Self::require_initialized(&env).map_err(|e| trace(&env, op.clone(), e))?;

        Registry::new(&env)
            .deny_access(&caller, &doctor, &record_id)
            .map(|_| ())
            .map_err(|e| trace(&env, op, e))
    }

    pub fn get_access_request(
        env: Env,
        doctor: Address,
        record_id: String,
    ) -> Result<AccessRequest, ContractError> {
        Registry::new(&env).requests().get(&doctor, &record_id)
    }

    /// Every request in filing order, with current status.
    pub fn get_access_requests(env: Env) -> Vec<AccessRequest> {
        Registry::new(&env).requests().all()
    }

    pub fn get_access_request_count(env: Env) -> u32 {
        Registry::new(&env).requests().len()
    }

    /// The next batch of the request registry, without consuming it.
    pub fn preview_next_access_requests(env: Env) -> Vec<AccessRequest> {
        Registry::new(&env).requests().preview_next()
    }

    /// The next batch of the request registry; the request cursor moves past it.
    pub fn get_next_access_requests(env: Env) -> Vec<AccessRequest> {
        Self::extend_instance_ttl(&env);
        Registry::new(&env).requests().advance()
    }

    pub fn request_sync_pointer(env: Env) -> u32 {
        Registry::new(&env).requests().pointer()
    }

    /// Rewind the request cursor to the start. Admin only.
    pub fn reset_request_sync_pointer(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)
            .map_err(|e| trace(&env, symbol_short!("rst_req"), e))?;

        Registry::new(&env).requests().reset();
        events::publish_sync_reset(&env, requests::REQUEST_FEED, caller);
        Ok(())
    }

    // ======================== Access Log ========================

    pub fn get_access_logs(env: Env) -> Vec<AccessLogEntry> {
        Registry::new(&env).logs().all()
    }

    pub fn get_access_log_count(env: Env) -> u32 {
        Registry::new(&env).logs().len()
    }

    /// Append an entry to the access log directly. Returns its index.
    pub fn log_access(
        env: Env,
        caller: Address,
        doctor: Address,
        patient: Address,
        record_type: String,
    ) -> Result<u32, ContractError> {
        let op = symbol_short!("log_acc");
        caller.require_auth();
        Self::require_initialized(&env).map_err(|e| trace(&env, op.clone(), e))?;
        validation::validate_label(&record_type).map_err(|e| trace(&env, op, e))?;

        Ok(Registry::new(&env).logs().append(doctor, patient, record_type))
    }

    /// The next batch of the access log, without consuming it.
    pub fn preview_next_access_logs(env: Env) -> Vec<AccessLogEntry> {
        Registry::new(&env).logs().preview_next()
    }

    /// The next batch of the access log; the log cursor moves past it.
    pub fn get_next_access_logs(env: Env) -> Vec<AccessLogEntry> {
        Self::extend_instance_ttl(&env);
        Registry::new(&env).logs().advance()
    }

    pub fn log_sync_pointer(env: Env) -> u32 {
        Registry::new(&env).logs().pointer()
    }

    /// Rewind the log cursor to the start. Admin only.
    pub fn reset_log_sync_pointer(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)
            .map_err(|e| trace(&env, symbol_short!("rst_log"), e))?;

        Registry::new(&env).logs().reset();
        events::publish_sync_reset(&env, access_log::LOG_FEED, caller);
        Ok(())
    }

    // ======================== Records ========================

    /// Register a record owned by `caller`.
    pub fn create_record(
        env: Env,
        caller: Address,
        record_id: String,
        content_hash: String,
    ) -> Result<(), ContractError> {
        let op = symbol_short!("create");
        caller.require_auth();
        Self::require_initialized(&env).map_err(|e| trace(&env, op.clone(), e))?;

        validation::validate_id(&record_id)
            .and_then(|_| validation::validate_content_hash(&content_hash))
            .and_then(|_| {
                Registry::new(&env)
                    .records()
                    .create(&caller, record_id, content_hash)
            })
            .map(|_| ())
            .map_err(|e| trace(&env, op, e))
    }

    /// Register several records owned by `caller`. `record_ids` and
    /// `content_hashes` are paired by position.
    pub fn create_records(
        env: Env,
        caller: Address,
        record_ids: Vec<String>,
        content_hashes: Vec<String>,
    ) -> Result<u32, ContractError> {
        let op = symbol_short!("create_b");
        caller.require_auth();
        Self::require_initialized(&env).map_err(|e| trace(&env, op.clone(), e))?;

        Registry::new(&env)
            .create_records(&caller, &record_ids, &content_hashes)
            .map_err(|e| trace(&env, op, e))
    }

    /// True for a record that was created and not deleted.
    pub fn record_exists(env: Env, record_id: String) -> bool {
        Registry::new(&env).records().exists(&record_id)
    }

    /// Number of records ever created, deleted ones included.
    pub fn get_record_count(env: Env) -> u64 {
        Registry::new(&env).records().count()
    }

    /// Full metadata of a record, including deleted ones.
    pub fn get_record(env: Env, record_id: String) -> Result<MedicalRecord, ContractError> {
        Registry::new(&env)
            .records()
            .get(&record_id)
            .ok_or(ContractError::RecordNotFound)
    }

    /// `(owner, hash)` of each record, in input order. Does not touch the ledger.
    pub fn read_records(
        env: Env,
        record_ids: Vec<String>,
    ) -> Result<Vec<RecordData>, ContractError> {
        Registry::new(&env)
            .records()
            .read_many(&record_ids)
            .map_err(|e| trace(&env, symbol_short!("read"), e))
    }

    /// Read one record and claim `access_id` for the read.
    pub fn read_record_tx(
        env: Env,
        caller: Address,
        record_id: String,
        access_id: String,
    ) -> Result<RecordData, ContractError> {
        let op = symbol_short!("read_tx");
        let ids = vec![&env, record_id];
        let data = Self::read_records_tx(env.clone(), caller, ids, access_id)?;
        data.get(0)
            .ok_or_else(|| trace(&env, op, ContractError::RecordNotFound))
    }

    /// Read several records and claim one `access_id` for the whole read.
    pub fn read_records_tx(
        env: Env,
        caller: Address,
        record_ids: Vec<String>,
        access_id: String,
    ) -> Result<Vec<RecordData>, ContractError> {
        let op = symbol_short!("read_txs");
        caller.require_auth();
        Self::require_initialized(&env).map_err(|e| trace(&env, op.clone(), e))?;

        validation::validate_ids(&record_ids)
            .and_then(|_| validation::validate_id(&access_id))
            .and_then(|_| Registry::new(&env).read_records_tx(caller, record_ids, access_id))
            .map_err(|e| trace(&env, op, e))
    }

    /// Delete a record and claim `access_id` for the deletion.
    pub fn delete_record(
        env: Env,
        caller: Address,
        record_id: String,
        access_id: String,
    ) -> Result<(), ContractError> {
        let op = symbol_short!("delete");
        caller.require_auth();
        Self::require_initialized(&env).map_err(|e| trace(&env, op.clone(), e))?;

        validation::validate_id(&record_id)
            .and_then(|_| validation::validate_id(&access_id))
            .and_then(|_| Registry::new(&env).delete_record(caller, record_id, access_id))
            .map_err(|e| trace(&env, op, e))
    }

    /// True once `access_id` has been claimed by a read or a delete.
    pub fn access_exists(env: Env, access_id: String) -> bool {
        Registry::new(&env).ledger().contains(&access_id)
    }

    pub fn get_access_entry(
        env: Env,
        access_id: String,
    ) -> Result<AccessLedgerEntry, ContractError> {
        Registry::new(&env).ledger().get(&access_id)
    }

    /// Report a misuse. Always appended; `access_id` is not checked against
    /// the ledger or earlier reports.
    pub fn log_bad_action(
        env: Env,
        reporter: Address,
        access_id: String,
        actor: String,
        reason: String,
    ) -> Result<u32, ContractError> {
        let op = symbol_short!("bad_act");
        reporter.require_auth();
        Self::require_initialized(&env).map_err(|e| trace(&env, op.clone(), e))?;

        validation::validate_id(&access_id)
            .and_then(|_| validation::validate_label(&actor))
            .and_then(|_| validation::validate_reason(&reason))
            .map_err(|e| trace(&env, op, e))?;

        Ok(Registry::new(&env)
            .ledger()
            .log_bad_action(reporter, access_id, actor, reason))
    }

    pub fn get_bad_actions(env: Env) -> Vec<BadActionEntry> {
        Registry::new(&env).ledger().bad_actions()
    }
}




#[cfg(test)]
mod test_sync;
