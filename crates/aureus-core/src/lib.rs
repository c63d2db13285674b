pub mod block;
pub mod constants;
pub mod error;
pub mod transaction;
pub mod types;
pub mod validation;

pub use block::Block;
pub use constants::*;
pub use error::{AureusError, AureusResult};
pub use transaction::Transaction;
pub use types::*;
