use common::SyncFeed;
use soroban_sdk::{symbol_short, Address, Env, String, Symbol, Vec};

use crate::{events, AccessLogEntry};

pub const LOG_FEED: Symbol = symbol_short!("LOGS");

/// Append-only audit log with its own sync cursor.
pub struct AccessLogStore<'a> {
    env: &'a Env,
    feed: SyncFeed<AccessLogEntry>,
}

impl<'a> AccessLogStore<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self {
            env,
            feed: SyncFeed::new(LOG_FEED),
        }
    }

    /// Appends an entry stamped with the current ledger time and returns its index.
    pub fn append(&self, doctor: Address, patient: Address, record_type: String) -> u32 {
        let entry = AccessLogEntry {
            doctor: doctor.clone(),
            patient: patient.clone(),
            record_type: record_type.clone(),
            timestamp: self.env.ledger().timestamp(),
        };
        let index = self.feed.push(self.env, &entry);
        events::publish_access_logged(self.env, doctor, patient, record_type, index);
        index
    }

    pub fn len(&self) -> u32 {
        self.feed.len(self.env)
    }

    pub fn get(&self, index: u32) -> Option<AccessLogEntry> {
        self.feed.get(self.env, index)
    }

    pub fn all(&self) -> Vec<AccessLogEntry> {
        self.feed.all(self.env)
    }

    pub fn pointer(&self) -> u32 {
        self.feed.pointer(self.env)
    }

    pub fn preview_next(&self) -> Vec<AccessLogEntry> {
        self.feed.preview_next(self.env)
    }

    pub fn advance(&self) -> Vec<AccessLogEntry> {
        let batch = self.feed.advance(self.env);
        events::publish_synced(self.env, LOG_FEED, self.pointer(), batch.len());
        batch
    }

    pub fn reset(&self) {
        self.feed.reset(self.env);
    }
}
