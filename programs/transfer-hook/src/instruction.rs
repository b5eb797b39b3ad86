//! Instruction Types
//!
//! Instructions are identified by an 8-byte discriminator, the same one
//! every transfer hook program answers to, so a token program can call
//! `Execute` without knowing anything else about the hook.
//!
//! # Instruction Format
//!
//! ```text
//! [discriminator: 8 bytes][data: varies]
//! ```
//!
//! | Instruction | Data after the discriminator |
//! |-------------|------------------------------|
//! | InitializeExtraAccountMetaList | encoded list (`[count: u32][records...]`) |
//! | Execute | `[amount: u64 LE][decimals: u8]` |

use crate::error::TransferHookError;
use crate::state::{ExtraAccountMeta, ExtraAccountMetaList};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

/// Discriminator length.
pub const DISCRIMINATOR_LEN: usize = 8;

/// Discriminator of `Execute`.
pub const EXECUTE_DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] = [105, 37, 101, 197, 75, 251, 102, 26];

/// Discriminator of `InitializeExtraAccountMetaList`.
pub const INITIALIZE_EXTRA_ACCOUNT_META_LIST_DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] =
    [43, 34, 13, 49, 167, 88, 235, 235];

/// Instructions supported by the transfer hook program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransferHookInstruction {
    /// Create the extra account meta list of a mint.
    ///
    /// Accounts expected:
    /// 0. `[writable, signer]` Payer
    /// 1. `[writable]` Extra account meta list, `["extra-account-metas", mint]`
    /// 2. `[]` Mint
    /// 3. `[]` System program
    InitializeExtraAccountMetaList {
        /// Accounts every transfer of the mint must carry, in order
        extra_account_metas: Vec<ExtraAccountMeta>,
    },

    /// Validate a transfer. Called by the token program.
    ///
    /// Accounts expected:
    /// 0. `[]` Source token account
    /// 1. `[]` Mint
    /// 2. `[]` Destination token account
    /// 3. `[]` Source owner
    /// 4. `[]` Extra account meta list
    /// 5..5+N. Resolved extra accounts
    /// 5+N. `[]` This program
    Execute {
        /// Amount transferred
        amount: u64,
        /// Decimals of the mint
        decimals: u8,
    },
}

impl TransferHookInstruction {
    /// Parse instruction data.
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        if input.len() < DISCRIMINATOR_LEN {
            return Err(TransferHookError::InvalidInstruction.into());
        }
        let (discriminator, rest) = input.split_at(DISCRIMINATOR_LEN);

        if discriminator == EXECUTE_DISCRIMINATOR {
            if rest.len() != 9 {
                return Err(TransferHookError::InvalidInstruction.into());
            }
            let amount = u64::from_le_bytes(
                rest[..8]
                    .try_into()
                    .map_err(|_| TransferHookError::InvalidInstruction)?,
            );
            Ok(TransferHookInstruction::Execute {
                amount,
                decimals: rest[8],
            })
        } else if discriminator == INITIALIZE_EXTRA_ACCOUNT_META_LIST_DISCRIMINATOR {
            Ok(TransferHookInstruction::InitializeExtraAccountMetaList {
                extra_account_metas: ExtraAccountMetaList::decode(rest)?,
            })
        } else {
            Err(TransferHookError::InvalidInstruction.into())
        }
    }

    /// Serialize instruction data.
    pub fn pack(&self) -> Result<Vec<u8>, ProgramError> {
        let mut buf = Vec::new();

        match self {
            TransferHookInstruction::InitializeExtraAccountMetaList {
                extra_account_metas,
            } => {
                buf.extend_from_slice(&INITIALIZE_EXTRA_ACCOUNT_META_LIST_DISCRIMINATOR);
                buf.extend_from_slice(&ExtraAccountMetaList::encode(extra_account_metas)?);
            }
            TransferHookInstruction::Execute { amount, decimals } => {
                buf.extend_from_slice(&EXECUTE_DISCRIMINATOR);
                buf.extend_from_slice(&amount.to_le_bytes());
                buf.push(*decimals);
            }
        }

        Ok(buf)
    }
}

// =============================================================================
// INSTRUCTION BUILDERS
// =============================================================================

/// Build an `InitializeExtraAccountMetaList` instruction.
pub fn initialize_extra_account_meta_list(
    program_id: &Pubkey,
    payer: &Pubkey,
    mint: &Pubkey,
    extra_account_metas: &[ExtraAccountMeta],
) -> Result<Instruction, ProgramError> {
    let data = TransferHookInstruction::InitializeExtraAccountMetaList {
        extra_account_metas: extra_account_metas.to_vec(),
    }
    .pack()?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(
                crate::get_extra_account_meta_list_address(mint, program_id),
                false,
            ),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data,
    })
}

/// Build an `Execute` instruction with the given trailing accounts.
///
/// Use [`crate::offchain`] to resolve `trailing` from the stored list.
#[allow(clippy::too_many_arguments)]
pub fn execute(
    program_id: &Pubkey,
    source: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    amount: u64,
    decimals: u8,
    trailing: &[AccountMeta],
) -> Instruction {
    let mut data = Vec::with_capacity(DISCRIMINATOR_LEN + 9);
    data.extend_from_slice(&EXECUTE_DISCRIMINATOR);
    data.extend_from_slice(&amount.to_le_bytes());
    data.push(decimals);

    let mut accounts = vec![
        AccountMeta::new_readonly(*source, false),
        AccountMeta::new_readonly(*mint, false),
        AccountMeta::new_readonly(*destination, false),
        AccountMeta::new_readonly(*authority, false),
    ];
    accounts.extend_from_slice(trailing);

    Instruction {
        program_id: *program_id,
        accounts,
        data,
    }
}
