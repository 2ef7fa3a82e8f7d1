use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WillCreatedEvent {
    pub will_id: u64,
    pub owner: Address,
    pub heir: Address,
    pub deposit: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HeirPaidEvent {
    pub will_id: u64,
    pub heir: Address,
    pub amount: i128,
    pub timestamp: u64,
    pub remaining_balance: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActivityConfirmedEvent {
    pub will_id: u64,
    pub owner: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryPingEvent {
    pub owner: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SurplusReclaimedEvent {
    pub will_id: u64,
    pub owner: Address,
    pub amount: i128,
}

pub fn emit_initialized(env: &Env, event: InitializedEvent) {
    env.events().publish((symbol_short!("init"),), event);
}

pub fn emit_will_created(env: &Env, event: WillCreatedEvent) {
    env.events()
        .publish((symbol_short!("will_new"), event.will_id), event);
}

pub fn emit_heir_paid(env: &Env, event: HeirPaidEvent) {
    env.events()
        .publish((symbol_short!("heir_paid"), event.will_id), event);
}

pub fn emit_activity_confirmed(env: &Env, event: ActivityConfirmedEvent) {
    env.events()
        .publish((symbol_short!("alive"), event.will_id), event);
}

pub fn emit_registry_ping(env: &Env, event: RegistryPingEvent) {
    env.events().publish((symbol_short!("reg_ping"),), event);
}

pub fn emit_surplus_reclaimed(env: &Env, event: SurplusReclaimedEvent) {
    env.events()
        .publish((symbol_short!("reclaim"), event.will_id), event);
}
