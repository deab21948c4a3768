//! Deterministic fixture data for exercising the sync feeds.
//!
//! Compiled only for tests and the `testutils` feature; no contract entry
//! point calls into this module. The `seed_*` functions run inside one
//! `env.as_contract(...)` frame, which the host caps at
//! [`SEED_CHUNK`]-sized fixtures. [`seed_contract`] splits larger fixtures
//! across frames:
//!
//! ```ignore
//! seed::seed_contract(&env, &contract_id, 7, 100);
//! ```

use soroban_sdk::{testutils::Address as _, Address, Env, String};

use crate::state::Registry;

pub const DEFAULT_FIXTURE_SIZE: u32 = 100;

/// Fixture entries written per contract frame. Every request adds one
/// index entry, and a frame may write at most 50 ledger entries.
pub const SEED_CHUNK: u32 = 25;

const RECORD_TYPES: [&str; 6] = [
    "X-Ray",
    "MRI",
    "Blood Test",
    "CT Scan",
    "Prescription",
    "Lab Result",
];

/// splitmix64 step.
fn next(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn record_type(env: &Env, roll: u64) -> String {
    let label = RECORD_TYPES[(roll % RECORD_TYPES.len() as u64) as usize];
    String::from_str(env, label)
}

/// Five-digit, zero-padded record id such as `"01293"`.
fn record_id(env: &Env, roll: u64) -> String {
    let mut buf = [b'0'; 5];
    let mut value = roll % 100_000;
    for slot in buf.iter_mut().rev() {
        *slot = b'0' + (value % 10) as u8;
        value /= 10;
    }
    String::from_bytes(env, &buf)
}

/// Appends `count` access-log entries, each with a fresh doctor and patient.
pub fn seed_access_logs(env: &Env, seed: u64, count: u32) {
    let logs = Registry::new(env).logs();
    let mut state = seed;
    for _ in 0..count {
        let doctor = Address::generate(env);
        let patient = Address::generate(env);
        logs.append(doctor, patient, record_type(env, next(&mut state)));
    }
}

/// Files `count` pending requests, each from a fresh doctor to a fresh patient.
pub fn seed_access_requests(env: &Env, seed: u64, count: u32) {
    let requests = Registry::new(env).requests();
    let mut state = seed;
    for _ in 0..count {
        let doctor = Address::generate(env);
        let patient = Address::generate(env);
        let id = record_id(env, next(&mut state));
        let kind = record_type(env, next(&mut state));
        // Fresh doctors never collide on (doctor, record_id).
        let _ = requests.create(doctor, patient, id, kind);
    }
}

/// Seeds both feeds with `count` entries each.
pub fn seed_fixtures(env: &Env, seed: u64, count: u32) {
    seed_access_logs(env, seed, count);
    seed_access_requests(env, seed.rotate_left(32), count);
}

/// Seeds both feeds of the contract at `contract_id` with `count` entries
/// each, one [`SEED_CHUNK`] per frame. The same `seed` always yields the
/// same record types and ids.
pub fn seed_contract(env: &Env, contract_id: &Address, seed: u64, count: u32) {
    let mut done = 0u32;
    let mut chunk = 0u64;
    while done < count {
        let size = SEED_CHUNK.min(count - done);
        let chunk_seed = seed.wrapping_add(chunk.wrapping_mul(0x9E37_79B9));
        env.as_contract(contract_id, || seed_fixtures(env, chunk_seed, size));
        done += size;
        chunk += 1;
    }
}
