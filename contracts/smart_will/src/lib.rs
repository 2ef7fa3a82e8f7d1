#![no_std]

pub mod errors;
pub mod escrow;
pub mod events;
pub mod liveness;
pub mod registry;
pub mod storage;

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, String, Vec};

use errors::WillError;
use escrow::{Will, WillState};
use events::{
    ActivityConfirmedEvent, HeirPaidEvent, InitializedEvent, RegistryPingEvent,
    SurplusReclaimedEvent, WillCreatedEvent,
};

/// Smart Will contract: a dead man's switch for inheritance payouts.
///
/// Each will escrows an owner's deposit for one heir. The owner keeps the
/// will dormant by pinging it. Once the owner has been silent for the
/// waiting period, the heir can withdraw `transfer_amount` at most once per
/// `transfer_frequency`, never more than `limit` in total.
///
/// # Security Model
///
/// - Every role-checked call takes the caller explicitly and requires its auth
/// - Only a will's owner can ping it or reclaim surplus
/// - Only a will's heir can withdraw, and eligibility is re-checked in the call
/// - The registry index is append-only and never moves funds
#[contract]
pub struct SmartWillContract;

fn now(env: &Env) -> u64 {
    env.ledger().timestamp()
}

fn token_client(env: &Env) -> Result<token::Client<'_>, WillError> {
    let token = storage::read_token(env).ok_or(WillError::NotInitialized)?;
    Ok(token::Client::new(env, &token))
}

fn load_owned_will(env: &Env, owner: &Address, will_id: u64) -> Result<Will, WillError> {
    let will = storage::load_will(env, will_id)?;
    if will.owner != *owner {
        return Err(WillError::Unauthorized);
    }
    Ok(will)
}

fn confirm(env: &Env, owner: Address, will_id: u64) -> Result<(), WillError> {
    storage::require_initialized(env)?;
    owner.require_auth();
    storage::bump_instance(env);

    let mut will = load_owned_will(env, &owner, will_id)?;
    let timestamp = now(env);
    will.confirm_activity(timestamp);
    storage::write_will(env, &will);

    events::emit_activity_confirmed(
        env,
        ActivityConfirmedEvent {
            will_id,
            owner,
            timestamp,
        },
    );
    Ok(())
}

#[contractimpl]
impl SmartWillContract {
    /// Initializes the contract.
    ///
    /// # Arguments
    ///
    /// * `admin` - The admin address (must authenticate)
    /// * `token` - The token every will is funded and paid out in
    ///
    /// # Errors
    ///
    /// `AlreadyInitialized` if called twice.
    pub fn initialize(env: Env, admin: Address, token: Address) -> Result<(), WillError> {
        admin.require_auth();

        if storage::is_initialized(&env) {
            return Err(WillError::AlreadyInitialized);
        }

        storage::write_config(&env, &admin, &token);
        storage::bump_instance(&env);

        events::emit_initialized(&env, InitializedEvent { admin, token });
        Ok(())
    }

    /// Creates and funds a new will, indexing it under `owner`.
    ///
    /// Transfers `deposit` tokens from the owner to this contract. The owner's
    /// liveness clock starts at the current ledger timestamp.
    ///
    /// # Arguments
    ///
    /// * `owner` - Creator of the will (must authenticate)
    /// * `heir` - The only address allowed to withdraw
    /// * `heir_name`, `heir_role` - Descriptive labels
    /// * `transfer_amount` - Amount paid per payout
    /// * `transfer_frequency` - Minimum seconds between payouts
    /// * `waiting_period` - Seconds of owner silence before payouts unlock
    /// * `limit` - Cap on cumulative payouts
    /// * `deposit` - Initial funding, at least `limit`
    ///
    /// # Returns
    ///
    /// The new will id.
    ///
    /// # Events
    ///
    /// Emits `will_new` on success.
    #[allow(clippy::too_many_arguments)]
    pub fn create_smart_will(
        env: Env,
        owner: Address,
        heir: Address,
        heir_name: String,
        heir_role: String,
        transfer_amount: i128,
        transfer_frequency: u64,
        waiting_period: u64,
        limit: i128,
        deposit: i128,
    ) -> Result<u64, WillError> {
        storage::require_initialized(&env)?;
        owner.require_auth();
        storage::bump_instance(&env);

        let will_id = storage::next_will_id(&env)?;
        let will = Will::create(
            will_id,
            owner.clone(),
            heir.clone(),
            heir_name,
            heir_role,
            transfer_amount,
            transfer_frequency,
            waiting_period,
            limit,
            deposit,
            now(&env),
        )?;

        token_client(&env)?.transfer(&owner, &env.current_contract_address(), &deposit);

        storage::write_will(&env, &will);
        registry::register(&env, &will)?;

        log!(&env, "will {} created, deposit {}", will_id, deposit);
        events::emit_will_created(
            &env,
            WillCreatedEvent {
                will_id,
                owner,
                heir,
                deposit,
            },
        );

        Ok(will_id)
    }

    /// Owner proof of life for one will. Resets its liveness clock.
    pub fn ping(env: Env, owner: Address, will_id: u64) -> Result<(), WillError> {
        confirm(&env, owner, will_id)
    }

    /// Same as [`ping`](Self::ping).
    pub fn confirm_activity(env: Env, owner: Address, will_id: u64) -> Result<(), WillError> {
        confirm(&env, owner, will_id)
    }

    /// Pays one installment to the heir.
    ///
    /// Eligibility is evaluated against the ledger state at execution time, so
    /// an owner ping landing before this call makes it fail.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` - caller is not the heir
    /// * `OwnerStillActive` - owner pinged within the waiting period
    /// * `TransferFrequencyLimit` - previous payout is too recent
    /// * `InsufficientBalance` - balance below `transfer_amount`
    /// * `LimitReached` - the payout would exceed `limit`
    ///
    /// # Events
    ///
    /// Emits `heir_paid` on success.
    pub fn transfer_to_heir(env: Env, heir: Address, will_id: u64) -> Result<i128, WillError> {
        storage::require_initialized(&env)?;
        heir.require_auth();
        storage::bump_instance(&env);

        let mut will = storage::load_will(&env, will_id)?;
        if will.heir != heir {
            return Err(WillError::Unauthorized);
        }

        let timestamp = now(&env);
        let amount = will.record_payout(timestamp)?;
        storage::write_will(&env, &will);

        token_client(&env)?.transfer(&env.current_contract_address(), &heir, &amount);

        log!(&env, "will {} paid {} to heir", will_id, amount);
        events::emit_heir_paid(
            &env,
            HeirPaidEvent {
                will_id,
                heir,
                amount,
                timestamp,
                remaining_balance: will.balance,
            },
        );

        Ok(amount)
    }

    /// Returns the part of the deposit above the remaining payout commitment
    /// (`balance - (limit - total_paid)`) to the owner.
    pub fn reclaim_surplus(env: Env, owner: Address, will_id: u64) -> Result<i128, WillError> {
        storage::require_initialized(&env)?;
        owner.require_auth();
        storage::bump_instance(&env);

        let mut will = load_owned_will(&env, &owner, will_id)?;
        let amount = will.take_surplus()?;
        storage::write_will(&env, &will);

        token_client(&env)?.transfer(&env.current_contract_address(), &owner, &amount);

        events::emit_surplus_reclaimed(
            &env,
            SurplusReclaimedEvent {
                will_id,
                owner,
                amount,
            },
        );
        Ok(amount)
    }

    /// Registry-level heartbeat for `owner`. Does not touch any will's clock.
    pub fn ping_registry(env: Env, owner: Address) -> Result<(), WillError> {
        storage::require_initialized(&env)?;
        owner.require_auth();
        storage::bump_instance(&env);

        let timestamp = now(&env);
        registry::record_ping(&env, &owner, timestamp);
        events::emit_registry_ping(&env, RegistryPingEvent { owner, timestamp });
        Ok(())
    }

    /// Timestamp of `owner`'s last registry-level ping, 0 if never.
    pub fn get_last_ping(env: Env, owner: Address) -> u64 {
        registry::last_ping(&env, &owner)
    }

    // ---------------------------------------------------------------------
    // Eligibility reads
    // ---------------------------------------------------------------------

    /// Whether the owner pinged within the waiting period. Fails with
    /// `UnknownEscrow` for an unknown id.
    pub fn is_owner_active(env: Env, will_id: u64) -> Result<bool, WillError> {
        Ok(storage::load_will(&env, will_id)?.is_owner_active(now(&env)))
    }

    /// Whether `transfer_to_heir` would succeed at the current timestamp.
    pub fn can_transfer_now(env: Env, will_id: u64) -> Result<bool, WillError> {
        Ok(storage::load_will(&env, will_id)?.can_transfer_now(now(&env)))
    }

    /// Earliest timestamp at which a payout could succeed. `0` when one can
    /// succeed right now, `u64::MAX` when the will can never pay again.
    pub fn get_next_possible_transfer_time(env: Env, will_id: u64) -> Result<u64, WillError> {
        Ok(storage::load_will(&env, will_id)?.next_possible_transfer_time(now(&env)))
    }

    /// Lifecycle state derived from the current timestamp.
    pub fn get_will_state(env: Env, will_id: u64) -> Result<WillState, WillError> {
        Ok(storage::load_will(&env, will_id)?.state(now(&env)))
    }

    // ---------------------------------------------------------------------
    // Will accessors
    // ---------------------------------------------------------------------

    /// Full stored record.
    pub fn get_will(env: Env, will_id: u64) -> Result<Will, WillError> {
        storage::load_will(&env, will_id)
    }

    /// Tokens still escrowed.
    pub fn get_balance(env: Env, will_id: u64) -> Result<i128, WillError> {
        Ok(storage::load_will(&env, will_id)?.balance)
    }

    pub fn get_owner(env: Env, will_id: u64) -> Result<Address, WillError> {
        Ok(storage::load_will(&env, will_id)?.owner)
    }

    pub fn get_heir(env: Env, will_id: u64) -> Result<Address, WillError> {
        Ok(storage::load_will(&env, will_id)?.heir)
    }

    pub fn get_heir_name(env: Env, will_id: u64) -> Result<String, WillError> {
        Ok(storage::load_will(&env, will_id)?.heir_name)
    }

    pub fn get_heir_role(env: Env, will_id: u64) -> Result<String, WillError> {
        Ok(storage::load_will(&env, will_id)?.heir_role)
    }

    pub fn get_transfer_amount(env: Env, will_id: u64) -> Result<i128, WillError> {
        Ok(storage::load_will(&env, will_id)?.transfer_amount)
    }

    pub fn get_transfer_frequency(env: Env, will_id: u64) -> Result<u64, WillError> {
        Ok(storage::load_will(&env, will_id)?.transfer_frequency)
    }

    pub fn get_waiting_period(env: Env, will_id: u64) -> Result<u64, WillError> {
        Ok(storage::load_will(&env, will_id)?.waiting_period())
    }

    pub fn get_limit(env: Env, will_id: u64) -> Result<i128, WillError> {
        Ok(storage::load_will(&env, will_id)?.limit)
    }

    /// Timestamp of the owner's last ping, or creation time.
    pub fn get_last_activity(env: Env, will_id: u64) -> Result<u64, WillError> {
        Ok(storage::load_will(&env, will_id)?.last_activity())
    }

    /// 0 until the first payout.
    pub fn get_last_transfer_time(env: Env, will_id: u64) -> Result<u64, WillError> {
        Ok(storage::load_will(&env, will_id)?.last_transfer_time)
    }

    /// Cumulative amount paid to the heir.
    pub fn get_total_paid(env: Env, will_id: u64) -> Result<i128, WillError> {
        Ok(storage::load_will(&env, will_id)?.total_paid)
    }

    // ---------------------------------------------------------------------
    // Registry queries
    // ---------------------------------------------------------------------

    /// Every will id ever created, in creation order.
    pub fn get_deployed_wills(env: Env) -> Vec<u64> {
        registry::deployed_wills(&env)
    }

    /// Page of will ids. `start_index` is 1-based; out of range yields an
    /// empty vector.
    pub fn get_deployed_wills_page(env: Env, start_index: u64, limit: u32) -> Vec<u64> {
        registry::deployed_wills_page(&env, start_index, limit)
    }

    /// Number of wills ever created.
    pub fn get_will_count(env: Env) -> u64 {
        storage::will_count(&env)
    }

    /// Wills created by `caller`, in creation order.
    pub fn get_my_wills(env: Env, caller: Address) -> Vec<u64> {
        caller.require_auth();
        registry::wills_of(&env, &caller)
    }

    /// Creator of `will_id`, `None` if the id is unknown.
    pub fn will_to_owner(env: Env, will_id: u64) -> Option<Address> {
        registry::owner_of(&env, will_id)
    }

    pub fn is_will_owner(env: Env, will_id: u64, candidate: Address) -> bool {
        registry::is_owner(&env, will_id, &candidate)
    }

    pub fn get_admin(env: Env) -> Option<Address> {
        storage::read_admin(&env)
    }

    pub fn get_token(env: Env) -> Option<Address> {
        storage::read_token(&env)
    }
}

#[cfg(test)]
mod tests;
