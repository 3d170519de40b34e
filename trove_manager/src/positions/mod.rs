pub mod account;
pub mod adjust;
pub mod close;
pub mod liquidation;
pub mod open;
pub mod redeem;
