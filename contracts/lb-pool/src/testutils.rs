// Test doubles and a ready-made pool fixture, shared with the router and
// quoter test suites through the `testutils` feature.

use crate::{LbPool, LbPoolClient};
use lb_types::PoolKey;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{contract, contractimpl, contracttype, Address, Bytes, Env};

/// Range used by the fixture, around a price of ~50,000 token1 per token0
pub const TICK_LOWER: i32 = 195682;
pub const TICK_UPPER: i32 = 199682;

/// Liquidity the fixture seeds with
pub const LIQUIDITY: u128 = 82_831_101_479_592_400;

/// Balance minted to the supplier and the trader for each token
pub const MINT_AMOUNT: i128 = 1_000_000_000_000_000_000_000_000;

// ============================================================================
// Mock factory
// ============================================================================

#[contracttype]
#[derive(Clone)]
enum MockFactoryKey {
    FeeProtocol,
    Pool(PoolKey),
}

/// Stands in for the factory: serves `fee_protocol` and a pool registry
#[contract]
pub struct MockFactory;

#[contractimpl]
impl MockFactory {
    pub fn set_fee_protocol(env: Env, fee_protocol: u32) {
        env.storage()
            .instance()
            .set(&MockFactoryKey::FeeProtocol, &fee_protocol);
    }

    pub fn fee_protocol(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&MockFactoryKey::FeeProtocol)
            .unwrap_or(0)
    }

    pub fn set_pool(env: Env, key: PoolKey, pool: Address) {
        env.storage()
            .instance()
            .set(&MockFactoryKey::Pool(key), &pool);
    }

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
        env.storage().instance().get(&MockFactoryKey::Pool(key))
    }
}

// ============================================================================
// Liquidity receiver
// ============================================================================

#[contracttype]
#[derive(Clone)]
enum MockReceiverKey {
    Notified,
}

/// Records the last finalize notification
#[contract]
pub struct MockReceiver;

#[contractimpl]
impl MockReceiver {
    pub fn lb_finalize_notify(env: Env, amount0: i128, amount1: i128, data: Bytes) {
        env.storage()
            .instance()
            .set(&MockReceiverKey::Notified, &(amount0, amount1, data));
    }

    pub fn notified(env: Env) -> Option<(i128, i128, Bytes)> {
        env.storage().instance().get(&MockReceiverKey::Notified)
    }
}

// ============================================================================
// Skimming token
// ============================================================================

#[contracttype]
#[derive(Clone)]
enum SkimTokenKey {
    Balance(Address),
}

/// Token that burns 1% of every transfer, so recipients receive less than sent
#[contract]
pub struct SkimToken;

#[contractimpl]
impl SkimToken {
    pub fn mint(env: Env, to: Address, amount: i128) {
        let balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .persistent()
            .set(&SkimTokenKey::Balance(to), &(balance + amount));
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&SkimTokenKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            panic!("insufficient balance");
        }
        env.storage()
            .persistent()
            .set(&SkimTokenKey::Balance(from), &(from_balance - amount));

        let received = amount - amount / 100;
        let to_balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .persistent()
            .set(&SkimTokenKey::Balance(to), &(to_balance + received));
    }
}

// ============================================================================
// Pool fixture
// ============================================================================

/// A deployed, funded but uninitialized pool over [TICK_LOWER, TICK_UPPER]
pub struct PoolTest<'a> {
    pub env: &'a Env,
    pub pool: LbPoolClient<'a>,
    pub factory: MockFactoryClient<'a>,
    pub token0: TokenClient<'a>,
    pub token1: TokenClient<'a>,
    pub supplier: Address,
    pub trader: Address,
    /// Set by `with_skim_token` when the skimming token sorted first
    pub skim_is_token0: bool,
}

impl<'a> PoolTest<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self::build(env, 0, false)
    }

    /// Pool that only accepts `initialize` from `block_timestamp_initialize` on
    pub fn with_initialize_at(env: &'a Env, block_timestamp_initialize: u64) -> Self {
        Self::build(env, block_timestamp_initialize, false)
    }

    /// Pool where one of the two tokens is a `SkimToken`
    pub fn with_skim_token(env: &'a Env) -> Self {
        Self::build(env, 0, true)
    }

    fn build(env: &'a Env, block_timestamp_initialize: u64, skim: bool) -> Self {
        env.mock_all_auths();

        let admin = Address::generate(env);
        let supplier = Address::generate(env);
        let trader = Address::generate(env);

        let token_a = env
            .register_stellar_asset_contract_v2(admin.clone())
            .address();
        let token_b = if skim {
            env.register(SkimToken, ())
        } else {
            env.register_stellar_asset_contract_v2(admin.clone())
                .address()
        };

        for to in [&supplier, &trader] {
            StellarAssetClient::new(env, &token_a).mint(to, &MINT_AMOUNT);
            if skim {
                SkimTokenClient::new(env, &token_b).mint(to, &MINT_AMOUNT);
            } else {
                StellarAssetClient::new(env, &token_b).mint(to, &MINT_AMOUNT);
            }
        }

        let skim_is_token0 = skim && token_b < token_a;
        let (token0, token1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        let factory_id = env.register(MockFactory, ());
        let pool_id = env.register(
            LbPool,
            (
                factory_id.clone(),
                token0.clone(),
                token1.clone(),
                TICK_LOWER,
                TICK_UPPER,
                supplier.clone(),
                block_timestamp_initialize,
            ),
        );

        let factory = MockFactoryClient::new(env, &factory_id);
        let key = PoolKey::new(
            token0.clone(),
            token1.clone(),
            TICK_LOWER,
            TICK_UPPER,
            supplier.clone(),
            block_timestamp_initialize,
        );
        factory.set_pool(&key, &pool_id);

        PoolTest {
            env,
            pool: LbPoolClient::new(env, &pool_id),
            factory,
            token0: TokenClient::new(env, &token0),
            token1: TokenClient::new(env, &token1),
            supplier,
            trader,
            skim_is_token0,
        }
    }

    /// Seed with `LIQUIDITY` at the lower edge; the pool sells token0
    pub fn initialize_at_lower(&self) -> (u128, i128, i128) {
        let price = self.pool.config().sqrt_price_lower_x96;
        self.pool.initialize(&self.supplier, &LIQUIDITY, &price)
    }

    /// Seed with `LIQUIDITY` at the upper edge; the pool sells token1
    pub fn initialize_at_upper(&self) -> (u128, i128, i128) {
        let price = self.pool.config().sqrt_price_upper_x96;
        self.pool.initialize(&self.supplier, &LIQUIDITY, &price)
    }

    /// Key the mock factory registered this pool under
    pub fn key(&self) -> PoolKey {
        let config = self.pool.config();
        PoolKey::new(
            config.token0,
            config.token1,
            config.tick_lower,
            config.tick_upper,
            config.supplier,
            config.block_timestamp_initialize,
        )
    }
}
