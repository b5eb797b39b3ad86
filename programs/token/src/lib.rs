//! # Hooked Token
//!
//! A token program whose mints can be bound to a transfer hook program.
//! Every checked transfer of a bound mint carries the hook's extra
//! accounts, is checked against the hook's extra account meta list, and
//! invokes the hook's `Execute` instruction.
//!
//! ## Account Types
//!
//! | Account Type | Size | Description |
//! |--------------|------|-------------|
//! | Mint | 154 bytes | Token type, with its transfer hook binding |
//! | Account | 73 bytes | Holds tokens for an owner |
//!
//! ## Instructions
//!
//! | # | Instruction | Description |
//! |---|-------------|-------------|
//! | 0 | InitializeMint | Create a new token mint |
//! | 1 | InitializeAccount | Create a new token account |
//! | 7 | MintTo | Mint new tokens |
//! | 12 | TransferChecked | Transfer tokens, through the hook if bound |
//! | 36 | InitializeTransferHook | Bind a hook program to a new mint |

/// Program entrypoint
pub mod entrypoint;

/// Custom error types with unique codes
pub mod error;

/// Transfer hook calls made by checked transfers
pub mod hook;

/// Instruction definitions, parsing and builders
pub mod instruction;

/// Instruction processors
pub mod processor;

/// Account state structures (Mint, Account)
pub mod state;

/// Validation and checked math
pub mod utils;

pub use error::TokenError;
pub use instruction::TokenInstruction;
pub use processor::Processor;
pub use state::{Account, AccountState, Mint, Pack};

solana_program::declare_id!("6BwRDofGzyCcqoz8jrVdsFcon147XneQLxnPoTpDBUzm");
