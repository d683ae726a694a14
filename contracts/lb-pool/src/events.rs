// Pool events. Every state transition publishes exactly one event.

use soroban_sdk::{Address, Env, Symbol};

/// Emitted when the pool is seeded
/// Topics: ("initialize",)
/// Data: (liquidity, sqrt_price_x96, tick)
pub fn emit_initialize(env: &Env, liquidity: u128, sqrt_price_x96: u128, tick: i32) {
    env.events().publish(
        (Symbol::new(env, "initialize"),),
        (liquidity, sqrt_price_x96, tick),
    );
}

/// Emitted on every swap
/// Topics: ("swap", sender, recipient)
/// Data: (amount0, amount1, sqrt_price_x96, liquidity, tick, finalized)
#[allow(clippy::too_many_arguments)]
pub fn emit_swap(
    env: &Env,
    sender: &Address,
    recipient: &Address,
    amount0: i128,
    amount1: i128,
    sqrt_price_x96: u128,
    liquidity: u128,
    tick: i32,
    finalized: bool,
) {
    env.events().publish(
        (Symbol::new(env, "swap"), sender.clone(), recipient.clone()),
        (amount0, amount1, sqrt_price_x96, liquidity, tick, finalized),
    );
}

/// Emitted when reserves are paid out
/// Topics: ("finalize",)
/// Data: (liquidity_delta, sqrt_price_x96, amount0, amount1)
pub fn emit_finalize(
    env: &Env,
    liquidity_delta: u128,
    sqrt_price_x96: u128,
    amount0: i128,
    amount1: i128,
) {
    env.events().publish(
        (Symbol::new(env, "finalize"),),
        (liquidity_delta, sqrt_price_x96, amount0, amount1),
    );
}

pub fn emit_mint(env: &Env, to: &Address, amount: u128) {
    env.events()
        .publish((Symbol::new(env, "mint"), to.clone()), amount);
}

pub fn emit_burn(env: &Env, from: &Address, amount: u128) {
    env.events()
        .publish((Symbol::new(env, "burn"), from.clone()), amount);
}

pub fn emit_transfer(env: &Env, from: &Address, to: &Address, amount: u128) {
    env.events().publish(
        (Symbol::new(env, "transfer"), from.clone(), to.clone()),
        amount,
    );
}
