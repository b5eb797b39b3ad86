//! # Transfer Hook Gate
//!
//! A transfer hook program. A token mint bound to this program has every
//! transfer routed through it; the program only lets the transfer through
//! when the caller attached exactly the extra accounts the mint requires.
//!
//! ## Overview
//!
//! - The required accounts of a mint are kept in an *extra account meta
//!   list*, a PDA of this program seeded with `["extra-account-metas", mint]`.
//! - Each entry is a fixed address or a seed formula resolved per transfer.
//! - During a transfer, the trailing accounts must be, in order:
//!   the list itself, every resolved entry, then this program.
//!
//! ## Instructions
//!
//! | Discriminator | Instruction | Description |
//! |---------------|-------------|-------------|
//! | `[43, 34, 13, 49, 167, 88, 235, 235]` | InitializeExtraAccountMetaList | Create and fill the list of a mint |
//! | `[105, 37, 101, 197, 75, 251, 102, 26]` | Execute | Transfer-time validation |
//!
//! ## Modules
//!
//! | Module | Role |
//! |--------|------|
//! | `state` | Byte layout of the list (codec) |
//! | `resolver` | Seed formulas to addresses |
//! | `manager` | Create and load the list account |
//! | `gate` | Positional validation of trailing accounts |
//! | `policy` | What happens once the accounts are valid |
//! | `offchain` | Client-side helpers that build matching transfers |

/// Program entrypoint
pub mod entrypoint;

/// Custom error types with stable codes
pub mod error;

/// Transfer-time account validation
pub mod gate;

/// Instruction definitions, parsing and builders
pub mod instruction;

/// Lifecycle of the extra account meta list account
pub mod manager;

/// Client-side resolution of trailing accounts
pub mod offchain;

/// Transfer policies applied after validation
pub mod policy;

/// Instruction processors
pub mod processor;

/// Descriptor resolution
pub mod resolver;

/// Account state layout
pub mod state;

pub use error::TransferHookError;
pub use gate::{Gate, GateState, Rejection, TransferContext};
pub use instruction::TransferHookInstruction;
pub use processor::Processor;
pub use state::{AccountAddress, ExtraAccountMeta, ExtraAccountMetaList, Seed};

use solana_program::pubkey::Pubkey;

solana_program::declare_id!("GwUqKeSYPfuGq8YAKHNfEKTEfX3rfEz8ygLgGeVBLz8a");

/// Seed prefix of the extra account meta list PDA.
pub const EXTRA_ACCOUNT_METAS_SEED: &[u8] = b"extra-account-metas";

/// Address and bump of the extra account meta list of `mint`.
pub fn find_extra_account_meta_list_address(mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[EXTRA_ACCOUNT_METAS_SEED, mint.as_ref()], program_id)
}

/// Address of the extra account meta list of `mint`.
pub fn get_extra_account_meta_list_address(mint: &Pubkey, program_id: &Pubkey) -> Pubkey {
    find_extra_account_meta_list_address(mint, program_id).0
}
