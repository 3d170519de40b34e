use multiversx_sc_scenario::imports::{MxscPath, TestAddress, TestSCAddress, TestTokenIdentifier};

pub const WAD: u128 = 1_000_000_000_000_000_000;

pub const TROVE_MANAGER_PATH: MxscPath = MxscPath::new("output/trove_manager.mxsc.json");
pub const TROVE_MANAGER_ADDRESS: TestSCAddress = TestSCAddress::new("trove-manager");

pub const COLL_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("WSTETH-123456");
pub const INITIAL_COLL_BALANCE: u128 = 10_000_000_000_000 * WAD;

pub const OWNER_ADDRESS: TestAddress = TestAddress::new("owner");
pub const ORACLE_ADDRESS: TestAddress = TestAddress::new("oracle");
pub const INTEREST_RECIPIENT: TestAddress = TestAddress::new("interest-recipient");
pub const LIQUIDATOR: TestAddress = TestAddress::new("liquidator");

pub const ALICE: TestAddress = TestAddress::new("alice");
pub const BOB: TestAddress = TestAddress::new("bob");
pub const CAROL: TestAddress = TestAddress::new("carol");
pub const DAVE: TestAddress = TestAddress::new("dave");
pub const WHALE: TestAddress = TestAddress::new("whale");

pub const USERS: [TestAddress; 5] = [ALICE, BOB, CAROL, DAVE, WHALE];

// Risk parameters used by most tests: default ratios, no minimum debt.
pub const MCR: u128 = 1_100_000_000_000_000_000;
pub const COLL_GAS_COMPENSATION: u128 = 5_000_000_000_000_000;
pub const LIQUIDATION_PENALTY_SP: u128 = 50_000_000_000_000_000;
pub const LIQUIDATION_PENALTY_REDISTRIBUTION: u128 = 100_000_000_000_000_000;
pub const REDEMPTION_FEE: u128 = 5_000_000_000_000_000;
pub const MAX_ANNUAL_INTEREST_RATE: u128 = 2_500_000_000_000_000_000;
pub const MAX_PRICE_STALE_SECONDS: u64 = 3_600;

pub const SECONDS_PER_YEAR: u64 = 31_536_000;
