//! Shared utilities for the medical records workspace.
//!
//! This crate provides [`sync::SyncFeed`], an append-only storage sequence
//! with a bounded-batch sync cursor. Contracts instantiate one per feed they
//! expose to polling consumers, so the boundary arithmetic lives in one place.

#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod sync;

pub use sync::{FeedKey, SyncFeed, FEED_PAGE_SIZE, SYNC_BATCH_SIZE};
