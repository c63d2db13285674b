pub mod balances;
pub mod chain_manager;
pub mod mempool;
pub mod persistence;

pub use balances::{balance_of, rebuild, resolve, BalanceIndex};
pub use chain_manager::{AcceptOutcome, ChainManager};
pub use mempool::Mempool;
