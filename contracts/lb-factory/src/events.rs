//! Factory events

use lb_types::PoolKey;
use soroban_sdk::{Address, Env, Symbol};

/// Emitted when a pool is deployed
/// Topics: ("pool_created", token0, token1)
/// Data: (tick_lower, tick_upper, supplier, block_timestamp_initialize, pool)
pub fn emit_pool_created(env: &Env, key: &PoolKey, pool: &Address) {
    env.events().publish(
        (
            Symbol::new(env, "pool_created"),
            key.token0.clone(),
            key.token1.clone(),
        ),
        (
            key.tick_lower,
            key.tick_upper,
            key.supplier.clone(),
            key.block_timestamp_initialize,
            pool.clone(),
        ),
    );
}

pub fn emit_set_fee_protocol(env: &Env, old: u32, new: u32) {
    env.events()
        .publish((Symbol::new(env, "set_fee_protocol"),), (old, new));
}

pub fn emit_set_owner(env: &Env, old: &Address, new: &Address) {
    env.events().publish(
        (Symbol::new(env, "set_owner"),),
        (old.clone(), new.clone()),
    );
}

/// Topics: ("collect_protocol", sender, token, recipient)
pub fn emit_collect_protocol(
    env: &Env,
    sender: &Address,
    token: &Address,
    recipient: &Address,
    amount: i128,
) {
    env.events().publish(
        (
            Symbol::new(env, "collect_protocol"),
            sender.clone(),
            token.clone(),
            recipient.clone(),
        ),
        amount,
    );
}
