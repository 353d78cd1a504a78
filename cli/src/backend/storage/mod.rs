//! Storage layer: abstraction traits plus the text file backend.

pub mod text;
pub mod traits;

pub use text::TextConnection;
pub use traits::{BalanceStore, Connection, LedgerStore};
