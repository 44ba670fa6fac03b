//! Per-user payment ledger.

mod service;
pub use service::LedgerService;
