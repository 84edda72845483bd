//! Exchange desk domain: posting rules for cash and bank balances.
//!
//! Pure domain logic only: no IO, no persistence concerns. Loading and saving
//! a [`DeskState`] is left to the caller.

pub mod attachment;
pub mod balances;
pub mod desk;
pub mod input;
pub mod log;
pub mod operation;
pub mod posting;
pub mod transaction;

pub use attachment::{ALLOWED_MIME_TYPES, AttachmentRef, MAX_ATTACHMENT_BYTES};
pub use balances::{BankBalances, CashRegisterBalances};
pub use desk::{DeskState, ExchangeDesk, PostingSettings};
pub use input::TransactionInput;
pub use log::TransactionLog;
pub use operation::{BankRequirement, CurrencyOperation, OperationKind};
pub use posting::{BalanceDelta, BalanceTarget, Posting, plan};
pub use transaction::Transaction;
