use soroban_sdk::{contracttype, Address, Env, TryFromVal, Val};

use crate::errors::WillError;
use crate::escrow::Will;

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Storage keys for the will contract
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    // Instance storage
    Initialized,
    Admin,
    /// Token every will is funded in
    Token,
    /// Last issued will id; ids run 1..=NextWillId in creation order
    NextWillId,

    // Persistent storage
    /// will_id -> Will
    Will(u64),
    /// will_id -> creating owner
    WillOwner(u64),
    /// owner -> number of wills created
    OwnerWillCount(Address),
    /// (owner, 1-based index) -> will_id
    OwnerWill(Address, u32),
    /// owner -> timestamp of the last registry-level ping
    OwnerLastPing(Address),
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Reads a persistent entry and keeps it alive if present.
fn read_persistent<V: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> Option<V> {
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump_persistent(env, key);
    }
    value
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get::<_, bool>(&DataKey::Initialized)
        .unwrap_or(false)
}

pub fn require_initialized(env: &Env) -> Result<(), WillError> {
    if is_initialized(env) {
        Ok(())
    } else {
        Err(WillError::NotInitialized)
    }
}

pub fn write_config(env: &Env, admin: &Address, token: &Address) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Admin, admin);
    instance.set(&DataKey::Token, token);
    instance.set(&DataKey::NextWillId, &0u64);
    instance.set(&DataKey::Initialized, &true);
}

pub fn read_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Admin)
}

pub fn read_token(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Token)
}

pub fn will_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::NextWillId)
        .unwrap_or(0)
}

/// Reserves the next will id.
pub fn next_will_id(env: &Env) -> Result<u64, WillError> {
    let next = will_count(env)
        .checked_add(1)
        .ok_or(WillError::ArithmeticOverflow)?;
    env.storage().instance().set(&DataKey::NextWillId, &next);
    Ok(next)
}

pub fn read_will(env: &Env, will_id: u64) -> Option<Will> {
    read_persistent(env, &DataKey::Will(will_id))
}

pub fn load_will(env: &Env, will_id: u64) -> Result<Will, WillError> {
    read_will(env, will_id).ok_or(WillError::UnknownEscrow)
}

pub fn write_will(env: &Env, will: &Will) {
    let key = DataKey::Will(will.id);
    env.storage().persistent().set(&key, will);
    bump_persistent(env, &key);

    // The owner index entry lives as long as the will itself
    let owner_key = DataKey::WillOwner(will.id);
    if env.storage().persistent().has(&owner_key) {
        bump_persistent(env, &owner_key);
    }
}

pub fn read_will_owner(env: &Env, will_id: u64) -> Option<Address> {
    read_persistent(env, &DataKey::WillOwner(will_id))
}

pub fn write_will_owner(env: &Env, will_id: u64, owner: &Address) {
    let key = DataKey::WillOwner(will_id);
    env.storage().persistent().set(&key, owner);
    bump_persistent(env, &key);
}

pub fn owner_will_count(env: &Env, owner: &Address) -> u32 {
    read_persistent(env, &DataKey::OwnerWillCount(owner.clone())).unwrap_or(0)
}

/// Appends `will_id` to the owner's bucket.
pub fn push_owner_will(env: &Env, owner: &Address, will_id: u64) -> Result<(), WillError> {
    let count = owner_will_count(env, owner)
        .checked_add(1)
        .ok_or(WillError::ArithmeticOverflow)?;

    let count_key = DataKey::OwnerWillCount(owner.clone());
    let slot_key = DataKey::OwnerWill(owner.clone(), count);
    env.storage().persistent().set(&count_key, &count);
    env.storage().persistent().set(&slot_key, &will_id);
    bump_persistent(env, &count_key);
    bump_persistent(env, &slot_key);
    Ok(())
}

pub fn read_owner_will(env: &Env, owner: &Address, index: u32) -> Option<u64> {
    read_persistent(env, &DataKey::OwnerWill(owner.clone(), index))
}

pub fn read_last_ping(env: &Env, owner: &Address) -> u64 {
    read_persistent(env, &DataKey::OwnerLastPing(owner.clone())).unwrap_or(0)
}

pub fn write_last_ping(env: &Env, owner: &Address, timestamp: u64) {
    let key = DataKey::OwnerLastPing(owner.clone());
    env.storage().persistent().set(&key, &timestamp);
    bump_persistent(env, &key);
}
