use crate::PoolError;
use lb_types::PoolState;

/// Accumulate `tick * elapsed` into the cumulative tick and move the
/// observation timestamp to `now`
pub fn advance(state: &mut PoolState, now: u64) -> Result<(), PoolError> {
    let elapsed = now.saturating_sub(state.block_timestamp);
    let delta = i128::from(state.tick)
        .checked_mul(i128::from(elapsed))
        .ok_or(PoolError::Overflow)?;

    state.tick_cumulative = state
        .tick_cumulative
        .checked_add(delta)
        .ok_or(PoolError::Overflow)?;
    state.block_timestamp = now;
    Ok(())
}
