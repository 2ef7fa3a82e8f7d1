//! Directory of every will the contract has created.
//!
//! The registry only appends. Ids are issued sequentially, so the global
//! creation-ordered list is `1..=will_count`, and each owner bucket is a
//! counter plus indexed slots. Nothing here moves funds or touches a will's
//! timers.

use soroban_sdk::{Address, Env, Vec};

use crate::errors::WillError;
use crate::escrow::Will;
use crate::storage;

/// Indexes a freshly created will under its owner.
pub fn register(env: &Env, will: &Will) -> Result<(), WillError> {
    storage::write_will_owner(env, will.id, &will.owner);
    storage::push_owner_will(env, &will.owner, will.id)
}

pub fn deployed_wills(env: &Env) -> Vec<u64> {
    let mut result = Vec::new(env);
    for will_id in 1..=storage::will_count(env) {
        result.push_back(will_id);
    }
    result
}

/// 1-based page over the creation-ordered list.
pub fn deployed_wills_page(env: &Env, start_index: u64, limit: u32) -> Vec<u64> {
    let count = storage::will_count(env);
    let mut result = Vec::new(env);

    if start_index == 0 || start_index > count {
        return result;
    }

    let end = core::cmp::min(start_index.saturating_add(u64::from(limit)), count + 1);
    for will_id in start_index..end {
        result.push_back(will_id);
    }
    result
}

pub fn wills_of(env: &Env, owner: &Address) -> Vec<u64> {
    let count = storage::owner_will_count(env, owner);
    let mut result = Vec::new(env);
    for index in 1..=count {
        if let Some(will_id) = storage::read_owner_will(env, owner, index) {
            result.push_back(will_id);
        }
    }
    result
}

pub fn owner_of(env: &Env, will_id: u64) -> Option<Address> {
    storage::read_will_owner(env, will_id)
}

pub fn is_owner(env: &Env, will_id: u64, candidate: &Address) -> bool {
    owner_of(env, will_id).is_some_and(|owner| owner == *candidate)
}

/// Registry-level heartbeat. Kept apart from every will's own clock.
pub fn record_ping(env: &Env, owner: &Address, now: u64) {
    storage::write_last_ping(env, owner, now);
}

pub fn last_ping(env: &Env, owner: &Address) -> u64 {
    storage::read_last_ping(env, owner)
}
