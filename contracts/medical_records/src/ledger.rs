use common::SyncFeed;
use soroban_sdk::{symbol_short, Address, Env, String, Symbol, Vec};

use crate::{events, AccessLedgerEntry, BadActionEntry, ContractError, LedgerAction};

const ACCESS: Symbol = symbol_short!("ACCESS");
pub const BAD_ACTION_FEED: Symbol = symbol_short!("BAD_ACT");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Global index of claimed access ids, plus the separate bad-action list.
///
/// Access ids form one namespace across all records: once claimed by any
/// read or delete, an id can never be claimed again.
pub struct AccessLedger<'a> {
    env: &'a Env,
    bad_actions: SyncFeed<BadActionEntry>,
}

impl<'a> AccessLedger<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self {
            env,
            bad_actions: SyncFeed::new(BAD_ACTION_FEED),
        }
    }

    fn key(access_id: &String) -> (Symbol, String) {
        (ACCESS, access_id.clone())
    }

    pub fn contains(&self, access_id: &String) -> bool {
        self.env.storage().persistent().has(&Self::key(access_id))
    }

    pub fn get(&self, access_id: &String) -> Result<AccessLedgerEntry, ContractError> {
        self.env
            .storage()
            .persistent()
            .get(&Self::key(access_id))
            .ok_or(ContractError::AccessNotFound)
    }

    /// Fails with `AccessAlreadyExists` when the id has been claimed before.
    pub fn ensure_unclaimed(&self, access_id: &String) -> Result<(), ContractError> {
        if self.contains(access_id) {
            return Err(ContractError::AccessAlreadyExists);
        }
        Ok(())
    }

    /// Records `access_id` as used by `actor` for `action` on `record_ids`.
    pub fn claim(
        &self,
        access_id: String,
        actor: Address,
        action: LedgerAction,
        record_ids: Vec<String>,
    ) -> Result<AccessLedgerEntry, ContractError> {
        self.ensure_unclaimed(&access_id)?;

        let count = record_ids.len();
        let entry = AccessLedgerEntry {
            access_id: access_id.clone(),
            actor: actor.clone(),
            action,
            record_ids,
            timestamp: self.env.ledger().timestamp(),
        };

        let key = Self::key(&access_id);
        self.env.storage().persistent().set(&key, &entry);
        self.env
            .storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

        events::publish_record_accessed(self.env, access_id, actor, action, count);

        Ok(entry)
    }

    /// Appends a misuse report. Reports are never deduplicated against each
    /// other or against claimed access ids.
    pub fn log_bad_action(
        &self,
        reporter: Address,
        access_id: String,
        actor: String,
        reason: String,
    ) -> u32 {
        let entry = BadActionEntry {
            access_id: access_id.clone(),
            actor,
            reason,
            reporter: reporter.clone(),
            timestamp: self.env.ledger().timestamp(),
        };
        let index = self.bad_actions.push(self.env, &entry);
        events::publish_bad_action(self.env, access_id, reporter, index);
        index
    }

    pub fn bad_actions(&self) -> Vec<BadActionEntry> {
        self.bad_actions.all(self.env)
    }
}
