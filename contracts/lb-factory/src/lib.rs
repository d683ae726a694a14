#![no_std]

mod error;
mod events;

pub use error::FactoryError;

use lb_types::{PoolKey, FEE_UNIT};
use soroban_sdk::xdr::ToXdr;
use soroban_sdk::{
    contract, contractimpl, contracttype, log, token, Address, BytesN, Env, Vec,
};

#[contract]
pub struct LbFactory;

/// Storage keys for Factory contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Owner address, sets the protocol fee and collects it
    Owner,
    /// Pool WASM hash for deployment
    PoolWasmHash,
    /// Protocol fee in FEE_UNIT parts, snapshotted by pools at initialize
    FeeProtocol,
    /// PoolKey -> pool address
    Pool(PoolKey),
    /// Reverse lookup for deployed pools
    IsPool(Address),
    /// Total number of pools created (counter for indexed storage)
    PoolCount,
    /// Pool address at index (indexed storage to avoid unbounded Vec)
    PoolAt(u32),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Read entries per tx are limited, pagination never reads more than this
const MAX_PAGE: u32 = 50;

#[contractimpl]
impl LbFactory {
    /// Initialize factory with owner and pool WASM hash
    pub fn initialize(
        env: Env,
        owner: Address,
        pool_wasm_hash: BytesN<32>,
    ) -> Result<(), FactoryError> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(FactoryError::AlreadyInitialized);
        }

        owner.require_auth();

        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage()
            .instance()
            .set(&DataKey::PoolWasmHash, &pool_wasm_hash);
        env.storage().instance().set(&DataKey::FeeProtocol, &0u32);
        env.storage().instance().set(&DataKey::PoolCount, &0u32);

        extend_instance_ttl(&env);
        Ok(())
    }

    /// Deploy a pool for the range and supplier
    ///
    /// The address is derived from the sorted `PoolKey`, so it is known
    /// before deployment through `pool_address`. The pool's constructor
    /// validates the ticks and the initialize timestamp.
    pub fn create_pool(
        env: Env,
        token_a: Address,
        token_b: Address,
        tick_lower: i32,
        tick_upper: i32,
        supplier: Address,
        block_timestamp_initialize: u64,
    ) -> Result<Address, FactoryError> {
        if token_a == token_b {
            return Err(FactoryError::InvalidTokens);
        }

        let pool_wasm_hash: BytesN<32> = env
            .storage()
            .instance()
            .get(&DataKey::PoolWasmHash)
            .ok_or(FactoryError::NotInitialized)?;

        let key = PoolKey::new(
            token_a,
            token_b,
            tick_lower,
            tick_upper,
            supplier,
            block_timestamp_initialize,
        );
        let pool_key = DataKey::Pool(key.clone());
        if env.storage().persistent().has(&pool_key) {
            return Err(FactoryError::PoolActive);
        }

        let pool_address = env
            .deployer()
            .with_current_contract(pool_salt(&env, &key))
            .deploy_v2(
                pool_wasm_hash,
                (
                    env.current_contract_address(),
                    key.token0.clone(),
                    key.token1.clone(),
                    key.tick_lower,
                    key.tick_upper,
                    key.supplier.clone(),
                    key.block_timestamp_initialize,
                ),
            );

        env.storage().persistent().set(&pool_key, &pool_address);
        extend_persistent_ttl(&env, &pool_key);

        let is_pool_key = DataKey::IsPool(pool_address.clone());
        env.storage().persistent().set(&is_pool_key, &true);
        extend_persistent_ttl(&env, &is_pool_key);

        // Store pool at index (indexed storage - O(1) append)
        let pool_count = Self::get_pool_count(env.clone());
        let pool_at_key = DataKey::PoolAt(pool_count);
        env.storage()
            .persistent()
            .set(&pool_at_key, &pool_address);
        extend_persistent_ttl(&env, &pool_at_key);

        env.storage()
            .instance()
            .set(&DataKey::PoolCount, &(pool_count + 1));

        log!(&env, "pool created", pool_address);
        events::emit_pool_created(&env, &key, &pool_address);

        extend_instance_ttl(&env);
        Ok(pool_address)
    }

    /// Get pool address for the parameters, in either token order
    pub fn get_pool(
        env: Env,
        token_a: Address,
        token_b: Address,
        tick_lower: i32,
        tick_upper: i32,
        supplier: Address,
        block_timestamp_initialize: u64,
    ) -> Option<Address> {
        let key = PoolKey::new(
            token_a,
            token_b,
            tick_lower,
            tick_upper,
            supplier,
            block_timestamp_initialize,
        );
        env.storage().persistent().get(&DataKey::Pool(key))
    }

    /// Address `create_pool` deploys (or deployed) `key` at
    pub fn pool_address(env: Env, key: PoolKey) -> Address {
        let key = PoolKey::new(
            key.token0,
            key.token1,
            key.tick_lower,
            key.tick_upper,
            key.supplier,
            key.block_timestamp_initialize,
        );
        env.deployer()
            .with_current_contract(pool_salt(&env, &key))
            .deployed_address()
    }

    /// Whether `pool` was deployed by this factory
    pub fn is_pool(env: Env, pool: Address) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::IsPool(pool))
            .unwrap_or(false)
    }

    /// Get total number of pools created
    pub fn get_pool_count(env: Env) -> u32 {
        extend_instance_ttl(&env);
        env.storage()
            .instance()
            .get(&DataKey::PoolCount)
            .unwrap_or(0)
    }

    /// Get pool address at specific index
    pub fn get_pool_at(env: Env, index: u32) -> Option<Address> {
        env.storage().persistent().get(&DataKey::PoolAt(index))
    }

    /// Get pools with pagination
    /// Returns up to `limit` pools starting from `start_index`, at most 50
    pub fn get_pools_paginated(env: Env, start_index: u32, limit: u32) -> Vec<Address> {
        let pool_count = Self::get_pool_count(env.clone());
        let end_index = start_index
            .saturating_add(limit.min(MAX_PAGE))
            .min(pool_count);

        let mut pools: Vec<Address> = Vec::new(&env);
        for i in start_index..end_index {
            if let Some(pool) = env.storage().persistent().get(&DataKey::PoolAt(i)) {
                pools.push_back(pool);
            }
        }
        pools
    }

    /// Protocol fee new pools snapshot at initialize
    pub fn fee_protocol(env: Env) -> u32 {
        extend_instance_ttl(&env);
        env.storage()
            .instance()
            .get(&DataKey::FeeProtocol)
            .unwrap_or(0)
    }

    /// Set the protocol fee in FEE_UNIT parts
    pub fn set_fee_protocol(
        env: Env,
        sender: Address,
        fee_protocol: u32,
    ) -> Result<(), FactoryError> {
        require_owner(&env, &sender)?;

        if fee_protocol > FEE_UNIT {
            return Err(FactoryError::InvalidFeeProtocol);
        }

        let old = Self::fee_protocol(env.clone());
        env.storage()
            .instance()
            .set(&DataKey::FeeProtocol, &fee_protocol);
        events::emit_set_fee_protocol(&env, old, fee_protocol);

        extend_instance_ttl(&env);
        Ok(())
    }

    /// Hand ownership to `owner`
    pub fn set_owner(env: Env, sender: Address, owner: Address) -> Result<(), FactoryError> {
        let old = require_owner(&env, &sender)?;

        env.storage().instance().set(&DataKey::Owner, &owner);
        events::emit_set_owner(&env, &old, &owner);

        extend_instance_ttl(&env);
        Ok(())
    }

    /// Send the factory's whole `token` balance, i.e. the protocol fees
    /// finalized pools paid in, to `recipient`
    pub fn collect_protocol(
        env: Env,
        sender: Address,
        token: Address,
        recipient: Address,
    ) -> Result<i128, FactoryError> {
        require_owner(&env, &sender)?;

        let client = token::Client::new(&env, &token);
        let factory = env.current_contract_address();
        let amount = client.balance(&factory);
        if amount > 0 {
            client.transfer(&factory, &recipient, &amount);
        }

        events::emit_collect_protocol(&env, &sender, &token, &recipient, amount);
        Ok(amount)
    }

    /// Get owner address
    pub fn owner(env: Env) -> Result<Address, FactoryError> {
        extend_instance_ttl(&env);
        env.storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(FactoryError::NotInitialized)
    }

    /// Get pool WASM hash
    pub fn pool_wasm_hash(env: Env) -> Result<BytesN<32>, FactoryError> {
        extend_instance_ttl(&env);
        env.storage()
            .instance()
            .get(&DataKey::PoolWasmHash)
            .ok_or(FactoryError::NotInitialized)
    }
}

/// Authenticate `sender` and check it is the owner; returns the owner
fn require_owner(env: &Env, sender: &Address) -> Result<Address, FactoryError> {
    sender.require_auth();

    let owner: Address = env
        .storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(FactoryError::NotInitialized)?;
    if *sender != owner {
        return Err(FactoryError::Unauthorized);
    }
    Ok(owner)
}

/// sha256 of the XDR-encoded key
fn pool_salt(env: &Env, key: &PoolKey) -> BytesN<32> {
    env.crypto().sha256(&key.clone().to_xdr(env)).into()
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}
