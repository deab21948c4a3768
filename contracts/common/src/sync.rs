//! # Append-only feeds with a sync cursor
//!
//! A [`SyncFeed`] is an append-only sequence kept in contract storage plus a
//! single consumer cursor. Polling consumers replay the feed in bounded
//! batches instead of re-reading the whole history on every call.
//!
//! ## Storage layout
//!
//! Items are packed into pages of [`FEED_PAGE_SIZE`] so that reading the
//! whole feed touches `ceil(len / FEED_PAGE_SIZE)` ledger entries, not one
//! entry per item.
//!
//! | Key                        | Storage    | Value                            |
//! |----------------------------|------------|----------------------------------|
//! | `FeedKey::Len(name)`       | instance   | `u32` number of items            |
//! | `FeedKey::Pointer(name)`   | instance   | `u32` cursor position            |
//! | `FeedKey::Page(name, p)`   | persistent | `Vec<T>` items `p*25 .. p*25+25` |
//!
//! ## Cursor rules
//!
//! - `preview_next` returns `[pointer, min(pointer + batch, len))` and never
//!   writes.
//! - `advance` returns the same slice and moves the pointer to its end.
//! - Near the tail the slice shrinks to what remains, then stays empty. It
//!   never pads, wraps or errors.
//! - `0 <= pointer <= len` always holds, so items appended later become
//!   visible to the next batch without disturbing the consumed prefix.

use core::marker::PhantomData;

use soroban_sdk::{contracttype, Env, IntoVal, Symbol, TryFromVal, Val, Vec};

/// Default number of items handed out per sync batch.
pub const SYNC_BATCH_SIZE: u32 = 3;

/// Number of items stored under one page key.
pub const FEED_PAGE_SIZE: u32 = 25;

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FeedKey {
    Len(Symbol),
    Pointer(Symbol),
    Page(Symbol, u32),
}

/// Handle to a named append-only feed and its cursor.
///
/// The handle itself holds no state; every call reads and writes the
/// contract storage of the current `Env`, so two handles with the same name
/// address the same feed.
pub struct SyncFeed<T> {
    name: Symbol,
    batch_size: u32,
    _item: PhantomData<T>,
}

impl<T> SyncFeed<T>
where
    T: Clone + IntoVal<Env, Val> + TryFromVal<Env, Val>,
{
    pub fn new(name: Symbol) -> Self {
        Self::with_batch_size(name, SYNC_BATCH_SIZE)
    }

    /// A batch size of zero is treated as one so the cursor can always make
    /// progress.
    pub fn with_batch_size(name: Symbol, batch_size: u32) -> Self {
        Self {
            name,
            batch_size: batch_size.max(1),
            _item: PhantomData,
        }
    }

    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    // ── Pages ────────────────────────────────────────────────────────────────

    fn page_key(&self, page: u32) -> FeedKey {
        FeedKey::Page(self.name.clone(), page)
    }

    fn load_page(&self, env: &Env, page: u32) -> Vec<T> {
        env.storage()
            .persistent()
            .get(&self.page_key(page))
            .unwrap_or_else(|| Vec::new(env))
    }

    fn store_page(&self, env: &Env, page: u32, items: &Vec<T>) {
        let key = self.page_key(page);
        env.storage().persistent().set(&key, items);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    // ── Sequence ─────────────────────────────────────────────────────────────

    pub fn len(&self, env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&FeedKey::Len(self.name.clone()))
            .unwrap_or(0)
    }

    pub fn is_empty(&self, env: &Env) -> bool {
        self.len(env) == 0
    }

    pub fn get(&self, env: &Env, index: u32) -> Option<T> {
        if index >= self.len(env) {
            return None;
        }
        self.load_page(env, index / FEED_PAGE_SIZE)
            .get(index % FEED_PAGE_SIZE)
    }

    /// Appends `item` at the tail and returns its index.
    pub fn push(&self, env: &Env, item: &T) -> u32 {
        let index = self.len(env);
        let page = index / FEED_PAGE_SIZE;
        let mut items = self.load_page(env, page);
        items.push_back(item.clone());
        self.store_page(env, page, &items);
        env.storage()
            .instance()
            .set(&FeedKey::Len(self.name.clone()), &index.saturating_add(1));
        index
    }

    /// Overwrites the item at `index`. Returns `false` when `index` is past
    /// the tail; the feed never grows through `set`.
    pub fn set(&self, env: &Env, index: u32, item: &T) -> bool {
        if index >= self.len(env) {
            return false;
        }
        let page = index / FEED_PAGE_SIZE;
        let mut items = self.load_page(env, page);
        items.set(index % FEED_PAGE_SIZE, item.clone());
        self.store_page(env, page, &items);
        true
    }

    /// Every item in append order.
    pub fn all(&self, env: &Env) -> Vec<T> {
        self.slice(env, 0, self.len(env))
    }

    /// Items in `[start, end)`, clamped to the current length. Each page in
    /// the range is loaded once.
    pub fn slice(&self, env: &Env, start: u32, end: u32) -> Vec<T> {
        let end = end.min(self.len(env));
        let mut items = Vec::new(env);
        let mut index = start;
        while index < end {
            let page = index / FEED_PAGE_SIZE;
            let page_end = page.saturating_add(1).saturating_mul(FEED_PAGE_SIZE).min(end);
            let stored = self.load_page(env, page);
            while index < page_end {
                if let Some(item) = stored.get(index % FEED_PAGE_SIZE) {
                    items.push_back(item);
                }
                index = index.saturating_add(1);
            }
        }
        items
    }

    // ── Cursor ───────────────────────────────────────────────────────────────

    pub fn pointer(&self, env: &Env) -> u32 {
        let stored: u32 = env
            .storage()
            .instance()
            .get(&FeedKey::Pointer(self.name.clone()))
            .unwrap_or(0);
        stored.min(self.len(env))
    }

    /// The next batch, without moving the cursor.
    pub fn preview_next(&self, env: &Env) -> Vec<T> {
        let (start, end) = self.window(env);
        self.slice(env, start, end)
    }

    /// The next batch; the cursor moves past it.
    pub fn advance(&self, env: &Env) -> Vec<T> {
        let (start, end) = self.window(env);
        let batch = self.slice(env, start, end);
        env.storage()
            .instance()
            .set(&FeedKey::Pointer(self.name.clone()), &end);
        batch
    }

    pub fn reset(&self, env: &Env) {
        env.storage()
            .instance()
            .set(&FeedKey::Pointer(self.name.clone()), &0u32);
    }

    fn window(&self, env: &Env) -> (u32, u32) {
        let len = self.len(env);
        let start = self.pointer(env);
        let end = start.saturating_add(self.batch_size).min(len);
        (start, end)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
