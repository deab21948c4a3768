use soroban_sdk::{symbol_short, Address, Env, String, Symbol, Vec};

use crate::{events, ContractError, MedicalRecord, RecordData};

const RECORD: Symbol = symbol_short!("RECORD");
const REC_CTR: Symbol = symbol_short!("REC_CTR");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Record metadata keyed by record id.
///
/// Deletion is a tombstone: the entry stays with `exists = false`, so an id
/// is never handed out twice.
pub struct RecordStore<'a> {
    env: &'a Env,
}

impl<'a> RecordStore<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    fn key(record_id: &String) -> (Symbol, String) {
        (RECORD, record_id.clone())
    }

    fn store(&self, record: &MedicalRecord) {
        let key = Self::key(&record.record_id);
        self.env.storage().persistent().set(&key, record);
        self.env
            .storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    /// The stored entry, tombstones included.
    pub fn get(&self, record_id: &String) -> Option<MedicalRecord> {
        self.env.storage().persistent().get(&Self::key(record_id))
    }

    pub fn exists(&self, record_id: &String) -> bool {
        self.get(record_id).map(|r| r.exists).unwrap_or(false)
    }

    /// A record that has not been deleted.
    pub fn get_live(&self, record_id: &String) -> Result<MedicalRecord, ContractError> {
        match self.get(record_id) {
            Some(record) if record.exists => Ok(record),
            _ => Err(ContractError::RecordNotFound),
        }
    }

    /// Number of records ever created, deleted ones included.
    pub fn count(&self) -> u64 {
        self.env.storage().instance().get(&REC_CTR).unwrap_or(0)
    }

    pub fn create(
        &self,
        owner: &Address,
        record_id: String,
        content_hash: String,
    ) -> Result<MedicalRecord, ContractError> {
        if self.env.storage().persistent().has(&Self::key(&record_id)) {
            return Err(ContractError::RecordAlreadyExists);
        }

        let record = MedicalRecord {
            record_id: record_id.clone(),
            owner: owner.clone(),
            content_hash,
            exists: true,
            created_at: self.env.ledger().timestamp(),
            deleted_at: 0,
        };
        self.store(&record);
        self.env
            .storage()
            .instance()
            .set(&REC_CTR, &self.count().saturating_add(1));

        events::publish_record_created(self.env, record_id, owner.clone());

        Ok(record)
    }

    /// Looks up every id in input order. Fails as a whole if any id is
    /// unknown or deleted.
    pub fn read_many(&self, record_ids: &Vec<String>) -> Result<Vec<RecordData>, ContractError> {
        let mut data = Vec::new(self.env);
        for record_id in record_ids.iter() {
            let record = self.get_live(&record_id)?;
            data.push_back(RecordData {
                owner: record.owner,
                content_hash: record.content_hash,
            });
        }
        Ok(data)
    }

    pub fn mark_deleted(&self, record_id: &String) -> Result<MedicalRecord, ContractError> {
        let mut record = self.get_live(record_id)?;
        record.exists = false;
        record.deleted_at = self.env.ledger().timestamp();
        self.store(&record);
        Ok(record)
    }
}
