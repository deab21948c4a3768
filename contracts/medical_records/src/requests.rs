use common::SyncFeed;
use soroban_sdk::{symbol_short, Address, Env, String, Symbol, Vec};

use crate::{events, AccessRequest, ContractError, RequestStatus};

const REQUEST: Symbol = symbol_short!("REQUEST");
pub const REQUEST_FEED: Symbol = symbol_short!("REQS");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Access requests in filing order, kept in a `REQS` feed, plus an index
/// from `(doctor, record_id)` to the request's position in that feed.
///
/// Requests are updated in place when resolved, so paging through the
/// registry always shows each request's current status.
pub struct RequestRegistry<'a> {
    env: &'a Env,
    feed: SyncFeed<AccessRequest>,
}

impl<'a> RequestRegistry<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self {
            env,
            feed: SyncFeed::new(REQUEST_FEED),
        }
    }

    fn key(doctor: &Address, record_id: &String) -> (Symbol, Address, String) {
        (REQUEST, doctor.clone(), record_id.clone())
    }

    fn index_of(&self, doctor: &Address, record_id: &String) -> Option<u32> {
        self.env
            .storage()
            .persistent()
            .get(&Self::key(doctor, record_id))
    }

    pub fn get(&self, doctor: &Address, record_id: &String) -> Result<AccessRequest, ContractError> {
        self.index_of(doctor, record_id)
            .and_then(|index| self.feed.get(self.env, index))
            .ok_or(ContractError::RequestNotFound)
    }

    /// Files a new pending request. A `(doctor, record_id)` pair can be filed once.
    pub fn create(
        &self,
        doctor: Address,
        patient: Address,
        record_id: String,
        record_type: String,
    ) -> Result<AccessRequest, ContractError> {
        let key = Self::key(&doctor, &record_id);
        if self.env.storage().persistent().has(&key) {
            return Err(ContractError::RequestAlreadyExists);
        }

        let request = AccessRequest {
            doctor: doctor.clone(),
            patient: patient.clone(),
            record_id: record_id.clone(),
            record_type: record_type.clone(),
            status: RequestStatus::Pending,
            requested_at: self.env.ledger().timestamp(),
            resolved_at: 0,
        };
        let index = self.feed.push(self.env, &request);
        self.env.storage().persistent().set(&key, &index);
        self.env
            .storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

        events::publish_access_requested(self.env, doctor, patient, record_id, record_type, index);

        Ok(request)
    }

    /// Moves a pending request to `outcome`.
    ///
    /// Only the patient named on the request may resolve it, and only once.
    /// The patient check runs first so strangers learn nothing about the
    /// request's state.
    pub fn resolve(
        &self,
        caller: &Address,
        doctor: &Address,
        record_id: &String,
        outcome: RequestStatus,
    ) -> Result<AccessRequest, ContractError> {
        let index = self
            .index_of(doctor, record_id)
            .ok_or(ContractError::RequestNotFound)?;
        let mut request = self
            .feed
            .get(self.env, index)
            .ok_or(ContractError::RequestNotFound)?;

        if *caller != request.patient {
            return Err(match outcome {
                RequestStatus::Approved => ContractError::OnlyPatientCanApprove,
                _ => ContractError::OnlyPatientCanDeny,
            });
        }
        if outcome == RequestStatus::Pending {
            return Err(ContractError::InvalidInput);
        }
        if request.status != RequestStatus::Pending {
            return Err(ContractError::RequestAlreadyResolved);
        }

        request.status = outcome;
        request.resolved_at = self.env.ledger().timestamp();
        self.feed.set(self.env, index, &request);

        events::publish_access_resolved(
            self.env,
            request.doctor.clone(),
            request.patient.clone(),
            request.record_id.clone(),
            outcome,
        );

        Ok(request)
    }

    pub fn len(&self) -> u32 {
        self.feed.len(self.env)
    }

    pub fn all(&self) -> Vec<AccessRequest> {
        self.feed.all(self.env)
    }

    pub fn pointer(&self) -> u32 {
        self.feed.pointer(self.env)
    }

    pub fn preview_next(&self) -> Vec<AccessRequest> {
        self.feed.preview_next(self.env)
    }

    pub fn advance(&self) -> Vec<AccessRequest> {
        let batch = self.feed.advance(self.env);
        events::publish_synced(self.env, REQUEST_FEED, self.pointer(), batch.len());
        batch
    }

    pub fn reset(&self) {
        self.feed.reset(self.env);
    }
}
