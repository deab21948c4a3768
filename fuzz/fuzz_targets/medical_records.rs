#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{testutils::Address as _, Address, Env, String, Vec as SorobanVec};
use medical_records::{ContractError, MedicalRecordsContract, MedicalRecordsContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    RequestAccess { doctor: u8, patient: u8, record: u8 },
    Resolve { approve: bool, caller: u8, doctor: u8, record: u8 },
    LogAccess { label_len: u8 },
    CreateRecords { first: u8, count: u8, hash_len: u8 },
    ReadRecordTx { actor: u8, record: u8, access: u8 },
    DeleteRecord { actor: u8, record: u8, access: u8 },
    BadAction { access: u8, reason_len: u16 },
    SyncLogs,
    SyncRequests,
}

fn id(env: &Env, prefix: u8, n: u8) -> String {
    let bytes = [prefix, b'0' + n / 100, b'0' + (n / 10) % 10, b'0' + n % 10];
    String::from_bytes(env, &bytes)
}

fn filler(env: &Env, len: usize) -> String {
    // Lengths past the validation bounds are kept to exercise rejections.
    let bytes = vec![b'a'; len];
    String::from_bytes(env, &bytes)
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    let admin = Address::generate(&env);

    let contract_id = env.register(MedicalRecordsContract, ());
    let client = MedicalRecordsContractClient::new(&env, &contract_id);
    let _ = client.try_initialize(&admin);

    let users: Vec<Address> = (0..4).map(|_| Address::generate(&env)).collect();
    let user = |n: u8| &users[n as usize % users.len()];

    for action in actions {
        match action {
            FuzzAction::RequestAccess { doctor, patient, record } => {
                let _ = client.try_request_access(
                    user(doctor),
                    user(patient),
                    &id(&env, b'r', record % 8),
                    &String::from_str(&env, "MRI"),
                );
            }
            FuzzAction::Resolve { approve, caller, doctor, record } => {
                let before = client.get_access_log_count();
                let rid = id(&env, b'r', record % 8);
                let result = if approve {
                    client.try_approve_access(user(caller), user(doctor), &rid)
                } else {
                    client.try_deny_access(user(caller), user(doctor), &rid)
                };
                let after = client.get_access_log_count();
                let grew = if approve && result.is_ok() { 1 } else { 0 };
                assert_eq!(after, before + grew);
            }
            FuzzAction::LogAccess { label_len } => {
                let _ = client.try_log_access(
                    &admin,
                    user(0),
                    user(1),
                    &filler(&env, label_len as usize % 80),
                );
            }
            FuzzAction::CreateRecords { first, count, hash_len } => {
                let mut ids = SorobanVec::new(&env);
                let mut hashes = SorobanVec::new(&env);
                for i in 0..(count % 6) {
                    ids.push_back(id(&env, b'r', first.wrapping_add(i) % 8));
                    hashes.push_back(filler(&env, hash_len as usize % 140));
                }
                let _ = client.try_create_records(user(first), &ids, &hashes);
            }
            FuzzAction::ReadRecordTx { actor, record, access } => {
                let access_id = id(&env, b'a', access % 16);
                let claimed = client.access_exists(&access_id);
                let result =
                    client.try_read_record_tx(user(actor), &id(&env, b'r', record % 8), &access_id);
                if claimed {
                    assert!(result.is_err());
                }
                if result.is_ok() {
                    assert!(client.access_exists(&access_id));
                }
            }
            FuzzAction::DeleteRecord { actor, record, access } => {
                let rid = id(&env, b'r', record % 8);
                let result =
                    client.try_delete_record(user(actor), &rid, &id(&env, b'a', access % 16));
                if result.is_ok() {
                    assert!(!client.record_exists(&rid));
                }
                if let Err(Ok(e)) = result {
                    assert!(matches!(
                        e,
                        ContractError::RecordNotFound | ContractError::AccessAlreadyExists
                    ));
                }
            }
            FuzzAction::BadAction { access, reason_len } => {
                let _ = client.try_log_bad_action(
                    user(access),
                    &id(&env, b'b', access),
                    &String::from_str(&env, "intruder"),
                    &filler(&env, reason_len as usize % 300),
                );
            }
            FuzzAction::SyncLogs => {
                let batch = client.get_next_access_logs();
                assert!(batch.len() <= 3);
                assert!(client.log_sync_pointer() <= client.get_access_log_count());
            }
            FuzzAction::SyncRequests => {
                let batch = client.get_next_access_requests();
                assert!(batch.len() <= 3);
                assert!(client.request_sync_pointer() <= client.get_access_request_count());
            }
        }
    }
});
