// Share ledger for the pool's single aggregate position. Shares are minted
// 1:1 with liquidity to the pool itself at initialize and burned at finalize.

use crate::events;
use crate::storage::{get_balance, get_total_supply, set_balance, set_total_supply};
use crate::PoolError;
use soroban_sdk::{Address, Env};

pub fn total_supply(env: &Env) -> u128 {
    get_total_supply(env)
}

pub fn balance(env: &Env, id: &Address) -> u128 {
    get_balance(env, id)
}

pub fn mint(env: &Env, to: &Address, amount: u128) -> Result<(), PoolError> {
    let supply = get_total_supply(env)
        .checked_add(amount)
        .ok_or(PoolError::Overflow)?;
    let balance = get_balance(env, to)
        .checked_add(amount)
        .ok_or(PoolError::Overflow)?;

    set_total_supply(env, supply);
    set_balance(env, to, balance);
    events::emit_mint(env, to, amount);
    Ok(())
}

pub fn burn(env: &Env, from: &Address, amount: u128) -> Result<(), PoolError> {
    let balance = get_balance(env, from);
    if balance < amount {
        return Err(PoolError::BalanceLessThanAmount);
    }

    set_balance(env, from, balance - amount);
    set_total_supply(env, get_total_supply(env).saturating_sub(amount));
    events::emit_burn(env, from, amount);
    Ok(())
}

pub fn transfer(env: &Env, from: &Address, to: &Address, amount: u128) -> Result<(), PoolError> {
    let from_balance = get_balance(env, from);
    if from_balance < amount {
        return Err(PoolError::BalanceLessThanAmount);
    }

    set_balance(env, from, from_balance - amount);
    let to_balance = get_balance(env, to)
        .checked_add(amount)
        .ok_or(PoolError::Overflow)?;
    set_balance(env, to, to_balance);
    events::emit_transfer(env, from, to, amount);
    Ok(())
}
