multiversx_sc::imports!();

use common_errors::{
    ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO, ERROR_PRICE_FEED_STALE, ERROR_PRICE_NOT_SET,
    ERROR_UNAUTHORIZED_ORACLE,
};
use common_structs::PriceFeed;

use crate::storage;

/// Collateral price supplied by an external oracle.
///
/// The oracle pushes prices; every consumer reads the last one and rejects
/// it once it is older than `max_price_stale_seconds`.
#[multiversx_sc::module]
pub trait OracleModule:
    storage::Storage + common_events::EventsModule + common_math::SharedMathModule
{
    /// Records a new collateral price.
    ///
    /// # Arguments
    /// - `price`: Stablecoin per unit of collateral, 18 decimals.
    ///
    /// # Errors
    /// - `ERROR_UNAUTHORIZED_ORACLE`: Caller is not the configured oracle.
    /// - `ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO`: Zero price.
    #[endpoint(submitPrice)]
    fn submit_price(&self, price: BigUint) {
        let caller = self.blockchain().get_caller();
        require!(
            caller == self.price_oracle_address().get(),
            ERROR_UNAUTHORIZED_ORACLE
        );
        require!(price > BigUint::zero(), ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO);

        let feed = PriceFeed {
            price: self.to_decimal_wad(price),
            timestamp: self.blockchain().get_block_timestamp(),
        };
        self.last_price_feed().set(&feed);
        self.price_updated_event(&feed);
    }

    /// Returns the last price, failing if none was submitted or it is stale.
    fn get_validated_price(
        &self,
        timestamp: u64,
        max_price_stale_seconds: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        require!(!self.last_price_feed().is_empty(), ERROR_PRICE_NOT_SET);

        let feed = self.last_price_feed().get();
        require!(
            timestamp.saturating_sub(feed.timestamp) <= max_price_stale_seconds,
            ERROR_PRICE_FEED_STALE
        );

        feed.price
    }
}
