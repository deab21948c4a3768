#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::arithmetic_side_effects
)]

use super::*;
use common::SYNC_BATCH_SIZE;
use soroban_sdk::testutils::{Address as _, Events};
use soroban_sdk::{symbol_short, Env, IntoVal, TryIntoVal};

/// Deploys the contract and seeds both feeds with the default fixture.
fn seeded() -> (Env, MedicalRecordsContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(MedicalRecordsContract, ());
    let client = MedicalRecordsContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.initialize(&admin);

    env.cost_estimate().budget().reset_unlimited();
    seed::seed_contract(&env, &contract_id, 7, seed::DEFAULT_FIXTURE_SIZE);

    (env, client, admin)
}

#[test]
fn test_fixture_fills_both_feeds() {
    let (_env, client, _admin) = seeded();

    assert_eq!(client.get_access_log_count(), 100);
    assert_eq!(client.get_access_logs().len(), 100);
    assert_eq!(client.get_access_request_count(), 100);
    assert_eq!(client.get_access_requests().len(), 100);

    assert_eq!(client.log_sync_pointer(), 0);
    assert_eq!(client.request_sync_pointer(), 0);

    for request in client.get_access_requests().iter() {
        assert_eq!(request.status, RequestStatus::Pending);
    }
}

#[test]
fn test_fixture_is_deterministic_per_seed() {
    let (_env_a, client_a, _) = seeded();
    let (_env_b, client_b, _) = seeded();

    let a = client_a.get_access_logs();
    let b = client_b.get_access_logs();
    for i in 0..a.len() {
        assert_eq!(
            a.get(i).unwrap().record_type,
            b.get(i).unwrap().record_type
        );
    }
}

#[test]
fn test_preview_does_not_move_the_cursor() {
    let (_env, client, _admin) = seeded();

    let first = client.preview_next_access_logs();
    let second = client.preview_next_access_logs();
    assert_eq!(first.len(), SYNC_BATCH_SIZE);
    assert_eq!(first, second);
    assert_eq!(client.log_sync_pointer(), 0);
}

#[test]
fn test_get_next_returns_the_previewed_batch() {
    let (_env, client, _admin) = seeded();
    let logs = client.get_access_logs();

    let preview = client.preview_next_access_logs();
    let batch = client.get_next_access_logs();
    assert_eq!(preview, batch);
    assert_eq!(batch.get(0).unwrap(), logs.get(0).unwrap());
    assert_eq!(batch.get(2).unwrap(), logs.get(2).unwrap());
    assert_eq!(client.log_sync_pointer(), 3);

    let next = client.get_next_access_logs();
    assert_eq!(next.get(0).unwrap(), logs.get(3).unwrap());
    assert_eq!(client.log_sync_pointer(), 6);
}

#[test]
fn test_log_feed_drains_in_batches_of_three_then_one_then_empty() {
    let (env, client, _admin) = seeded();
    let logs = client.get_access_logs();

    let mut seen = soroban_sdk::Vec::new(&env);
    for i in 0..33u32 {
        let batch = client.get_next_access_logs();
        assert_eq!(batch.len(), 3);
        assert_eq!(client.log_sync_pointer(), (i + 1) * 3);
        seen.append(&batch);
    }

    let tail = client.get_next_access_logs();
    assert_eq!(tail.len(), 1);
    seen.append(&tail);
    assert_eq!(client.log_sync_pointer(), 100);

    // Batches were disjoint and covered the feed in order.
    assert_eq!(seen, logs);

    assert_eq!(client.preview_next_access_logs().len(), 0);
    assert_eq!(client.get_next_access_logs().len(), 0);
    assert_eq!(client.log_sync_pointer(), 100);
}

#[test]
fn test_manual_log_entry_joins_the_next_batch() {
    let (env, client, _admin) = seeded();
    for _ in 0..34 {
        client.get_next_access_logs();
    }
    assert_eq!(client.get_next_access_logs().len(), 0);

    let doctor = Address::generate(&env);
    let patient = Address::generate(&env);
    let blood = String::from_str(&env, "Blood Test");
    let index = client.log_access(&doctor, &doctor, &patient, &blood);

    assert_eq!(index, 100);
    assert_eq!(client.get_access_log_count(), 101);
    let stored = client.get_access_logs().get(100).unwrap();
    assert_eq!(stored.doctor, doctor);
    assert_eq!(stored.record_type, blood);

    let batch = client.get_next_access_logs();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.get(0).unwrap(), stored);
    assert_eq!(client.log_sync_pointer(), 101);
}

#[test]
fn test_request_feed_drains_independently() {
    let (_env, client, _admin) = seeded();

    for _ in 0..10 {
        client.get_next_access_logs();
    }
    assert_eq!(client.log_sync_pointer(), 30);
    assert_eq!(client.request_sync_pointer(), 0);

    let mut delivered = 0;
    for _ in 0..33 {
        delivered += client.get_next_access_requests().len();
    }
    assert_eq!(delivered, 99);
    assert_eq!(client.get_next_access_requests().len(), 1);
    assert_eq!(client.get_next_access_requests().len(), 0);
    assert_eq!(client.request_sync_pointer(), 100);
    assert_eq!(client.log_sync_pointer(), 30);
}

#[test]
fn test_advance_publishes_sync_event() {
    let (env, client, _admin) = seeded();

    client.get_next_access_logs();
    let events = env.events().all();
    let event = events.get(events.len() - 1).unwrap();
    let topic: soroban_sdk::Vec<soroban_sdk::Val> =
        (symbol_short!("SYNC"), access_log::LOG_FEED).into_val(&env);
    assert_eq!(event.1, topic);

    let payload: events::SyncEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.pointer, 3);
    assert_eq!(payload.delivered, 3);
}

#[test]
fn test_reset_replays_from_the_start() {
    let (_env, client, admin) = seeded();
    let first = client.get_next_access_logs();
    client.get_next_access_logs();

    client.reset_log_sync_pointer(&admin);
    assert_eq!(client.log_sync_pointer(), 0);
    assert_eq!(client.get_next_access_logs(), first);
}
