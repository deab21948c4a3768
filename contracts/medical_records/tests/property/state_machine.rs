//! Property-based state machine tests for the request workflow.
//!
//! A generated sequence of operations runs against both the contract and a
//! small in-memory model; after every step the two must agree.
//!
//! Invariants tested:
//! - A second `initialize` call must always return `Err(AlreadyInitialized)`
//! - Request status only moves Pending → Approved or Pending → Denied, once
//! - Each approval appends exactly one log entry; nothing else does except `log_access`
//! - Only the named patient may resolve a request
//! - Both sync pointers stay within their feeds and move independently

use std::collections::BTreeMap;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env, String};
use medical_records::{
    ContractError, MedicalRecordsContract, MedicalRecordsContractClient, RequestStatus,
};

const DOCTORS: usize = 3;
const PATIENTS: usize = 3;
const RECORDS: [&str; 3] = ["00001", "00002", "00003"];

#[derive(Debug, Clone, Arbitrary)]
enum Op {
    Request {
        #[proptest(strategy = "0usize..DOCTORS")]
        doctor: usize,
        #[proptest(strategy = "0usize..PATIENTS")]
        patient: usize,
        #[proptest(strategy = "0usize..3")]
        record: usize,
    },
    Resolve {
        approve: bool,
        #[proptest(strategy = "0usize..PATIENTS")]
        caller: usize,
        #[proptest(strategy = "0usize..DOCTORS")]
        doctor: usize,
        #[proptest(strategy = "0usize..3")]
        record: usize,
    },
    LogAccess,
    SyncLogs,
    SyncRequests,
}

#[derive(Default)]
struct Model {
    requests: BTreeMap<(usize, usize), (usize, RequestStatus)>,
    request_len: u32,
    log_len: u32,
    log_pointer: u32,
    request_pointer: u32,
}

struct Harness {
    env: Env,
    client: MedicalRecordsContractClient<'static>,
    doctors: Vec<Address>,
    patients: Vec<Address>,
}

impl Harness {
    fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let contract_id = env.register(MedicalRecordsContract, ());
        let client = MedicalRecordsContractClient::new(&env, &contract_id);
        client.initialize(&Address::generate(&env));

        let doctors = (0..DOCTORS).map(|_| Address::generate(&env)).collect();
        let patients = (0..PATIENTS).map(|_| Address::generate(&env)).collect();

        Self {
            env,
            client,
            doctors,
            patients,
        }
    }

    fn record(&self, record: usize) -> String {
        String::from_str(&self.env, RECORDS[record])
    }
}

fn expected_resolution(
    model: &Model,
    approve: bool,
    caller: usize,
    key: (usize, usize),
) -> Result<RequestStatus, ContractError> {
    let (patient, status) = model.requests.get(&key).ok_or(ContractError::RequestNotFound)?;
    if caller != *patient {
        return Err(if approve {
            ContractError::OnlyPatientCanApprove
        } else {
            ContractError::OnlyPatientCanDeny
        });
    }
    if *status != RequestStatus::Pending {
        return Err(ContractError::RequestAlreadyResolved);
    }
    Ok(if approve {
        RequestStatus::Approved
    } else {
        RequestStatus::Denied
    })
}

proptest! {
    /// A second `initialize` call must always fail with `AlreadyInitialized`.
    #[test]
    fn prop_double_initialize_always_fails(_seed in 0u8..=255u8) {
        let h = Harness::new();
        let second_admin = Address::generate(&h.env);

        let result = h.client.try_initialize(&second_admin);
        match result {
            Err(Ok(e)) => prop_assert_eq!(e, ContractError::AlreadyInitialized),
            _ => prop_assert!(false, "Expected AlreadyInitialized error"),
        }
    }

    #[test]
    fn prop_workflow_matches_model(ops in prop::collection::vec(any::<Op>(), 1..40)) {
        let h = Harness::new();
        let mut model = Model::default();
        let label = String::from_str(&h.env, "MRI");

        for op in ops {
            match op {
                Op::Request { doctor, patient, record } => {
                    let result = h.client.try_request_access(
                        &h.doctors[doctor],
                        &h.patients[patient],
                        &h.record(record),
                        &label,
                    );
                    if model.requests.contains_key(&(doctor, record)) {
                        prop_assert_eq!(
                            result.map(|r| r.map(|_| ())),
                            Err(Ok(ContractError::RequestAlreadyExists))
                        );
                    } else {
                        prop_assert!(result.is_ok());
                        model.requests.insert((doctor, record), (patient, RequestStatus::Pending));
                        model.request_len += 1;
                    }
                }
                Op::Resolve { approve, caller, doctor, record } => {
                    let caller_addr = &h.patients[caller];
                    let result = if approve {
                        h.client.try_approve_access(caller_addr, &h.doctors[doctor], &h.record(record))
                    } else {
                        h.client.try_deny_access(caller_addr, &h.doctors[doctor], &h.record(record))
                    };

                    match expected_resolution(&model, approve, caller, (doctor, record)) {
                        Ok(status) => {
                            prop_assert!(result.is_ok());
                            if let Some(entry) = model.requests.get_mut(&(doctor, record)) {
                                entry.1 = status;
                            }
                            if approve {
                                model.log_len += 1;
                            }
                        }
                        Err(e) => prop_assert_eq!(result, Err(Ok(e))),
                    }
                }
                Op::LogAccess => {
                    let doctor = &h.doctors[0];
                    let index = h.client.log_access(doctor, doctor, &h.patients[0], &label);
                    prop_assert_eq!(index, model.log_len);
                    model.log_len += 1;
                }
                Op::SyncLogs => {
                    let batch = h.client.get_next_access_logs();
                    let expected = core::cmp::min(3, model.log_len - model.log_pointer);
                    prop_assert_eq!(batch.len(), expected);
                    model.log_pointer += expected;
                }
                Op::SyncRequests => {
                    let batch = h.client.get_next_access_requests();
                    let expected = core::cmp::min(3, model.request_len - model.request_pointer);
                    prop_assert_eq!(batch.len(), expected);
                    model.request_pointer += expected;
                }
            }

            prop_assert_eq!(h.client.get_access_log_count(), model.log_len);
            prop_assert_eq!(h.client.get_access_request_count(), model.request_len);
            prop_assert_eq!(h.client.log_sync_pointer(), model.log_pointer);
            prop_assert_eq!(h.client.request_sync_pointer(), model.request_pointer);
        }

        for ((doctor, record), (patient, status)) in &model.requests {
            let stored = h.client.get_access_request(&h.doctors[*doctor], &h.record(*record));
            prop_assert_eq!(&stored.patient, &h.patients[*patient]);
            prop_assert_eq!(stored.status, *status);
        }
    }
}
