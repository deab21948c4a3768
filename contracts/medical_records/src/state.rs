//! The single entry into contract state.
//!
//! [`Registry`] borrows the `Env` and hands out one accessor per store. Rules
//! that span two stores live here, so no entry point can update one side
//! without the other:
//!
//! - approving a request appends exactly one matching access-log entry;
//! - reading or deleting records claims the access id in the ledger.

use soroban_sdk::{vec, Address, Env, String, Vec};

use crate::access_log::AccessLogStore;
use crate::ledger::AccessLedger;
use crate::records::RecordStore;
use crate::requests::RequestRegistry;
use crate::{events, validation, AccessRequest, ContractError, LedgerAction, RecordData, RequestStatus};

pub struct Registry<'a> {
    env: &'a Env,
}

impl<'a> Registry<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    pub fn logs(&self) -> AccessLogStore<'a> {
        AccessLogStore::new(self.env)
    }

    pub fn requests(&self) -> RequestRegistry<'a> {
        RequestRegistry::new(self.env)
    }

    pub fn records(&self) -> RecordStore<'a> {
        RecordStore::new(self.env)
    }

    pub fn ledger(&self) -> AccessLedger<'a> {
        AccessLedger::new(self.env)
    }

    // ── Request workflow ─────────────────────────────────────────────────────

    /// Approves the request and appends its audit line. Returns the log index.
    pub fn approve_access(
        &self,
        caller: &Address,
        doctor: &Address,
        record_id: &String,
    ) -> Result<u32, ContractError> {
        let request =
            self.requests()
                .resolve(caller, doctor, record_id, RequestStatus::Approved)?;
        Ok(self
            .logs()
            .append(request.doctor, request.patient, request.record_type))
    }

    pub fn deny_access(
        &self,
        caller: &Address,
        doctor: &Address,
        record_id: &String,
    ) -> Result<AccessRequest, ContractError> {
        self.requests()
            .resolve(caller, doctor, record_id, RequestStatus::Denied)
    }

    // ── Records ──────────────────────────────────────────────────────────────

    /// Creates one record per `(id, hash)` pair. Nothing is written unless
    /// every pair is valid and every id is new.
    pub fn create_records(
        &self,
        owner: &Address,
        record_ids: &Vec<String>,
        content_hashes: &Vec<String>,
    ) -> Result<u32, ContractError> {
        if record_ids.len() != content_hashes.len() {
            return Err(ContractError::BatchLengthMismatch);
        }
        validation::validate_ids(record_ids)?;

        let records = self.records();
        for (i, record_id) in record_ids.iter().enumerate() {
            let hash = content_hashes
                .get(i as u32)
                .ok_or(ContractError::BatchLengthMismatch)?;
            validation::validate_content_hash(&hash)?;
            if records.get(&record_id).is_some() {
                return Err(ContractError::RecordAlreadyExists);
            }
        }

        for (record_id, hash) in record_ids.iter().zip(content_hashes.iter()) {
            records.create(owner, record_id, hash)?;
        }

        events::publish_batch_records_created(self.env, owner.clone(), record_ids.len());

        Ok(record_ids.len())
    }

    /// Reads live records and claims `access_id` for the read.
    ///
    /// Existence is checked before the ledger, so a missing record reports
    /// `RecordNotFound` even when the access id is also taken.
    pub fn read_records_tx(
        &self,
        actor: Address,
        record_ids: Vec<String>,
        access_id: String,
    ) -> Result<Vec<RecordData>, ContractError> {
        let data = self.records().read_many(&record_ids)?;
        self.ledger()
            .claim(access_id, actor, LedgerAction::Read, record_ids)?;
        Ok(data)
    }

    /// Tombstones the record and claims `access_id` for the deletion.
    pub fn delete_record(
        &self,
        actor: Address,
        record_id: String,
        access_id: String,
    ) -> Result<(), ContractError> {
        let records = self.records();
        let ledger = self.ledger();

        records.get_live(&record_id)?;
        ledger.ensure_unclaimed(&access_id)?;

        records.mark_deleted(&record_id)?;
        ledger.claim(
            access_id,
            actor,
            LedgerAction::Delete,
            vec![self.env, record_id],
        )?;
        Ok(())
    }
}
