use crate::PoolError;
use soroban_sdk::{token, Address, Env};

/// Push `amount` of `token` from the pool to `to`
pub fn pay(env: &Env, token: &Address, to: &Address, amount: i128) {
    if amount > 0 {
        token::Client::new(env, token).transfer(&env.current_contract_address(), to, &amount);
    }
}

/// Pull `amount` of `token` from `payer` into the pool. The payer authorizes
/// the transfer; delivery is judged by the pool's balance, not by the token
/// call returning.
pub fn collect(
    env: &Env,
    token: &Address,
    payer: &Address,
    amount: i128,
    shortfall: PoolError,
) -> Result<(), PoolError> {
    if amount <= 0 {
        return Ok(());
    }

    let client = token::Client::new(env, token);
    let pool = env.current_contract_address();

    let balance_before = client.balance(&pool);
    client.transfer(payer, &pool, &amount);
    let balance_after = client.balance(&pool);

    let required = balance_before
        .checked_add(amount)
        .ok_or(PoolError::Overflow)?;
    if balance_after < required {
        return Err(shortfall);
    }
    Ok(())
}
