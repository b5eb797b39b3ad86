//! Instruction Types
//!
//! Each instruction has a one-byte discriminant followed by its data.
//!
//! # Instruction Format
//!
//! ```text
//! [discriminant: u8][data: varies]
//! ```
//!
//! # Discriminant Values (matching SPL Token / Token-2022)
//!
//! | Value | Instruction |
//! |-------|-------------|
//! | 0 | InitializeMint |
//! | 1 | InitializeAccount |
//! | 7 | MintTo |
//! | 12 | TransferChecked |
//! | 36 | InitializeTransferHook |

use crate::error::TokenError;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvar,
};

/// Sub-instruction of the transfer hook extension that sets the binding.
const TRANSFER_HOOK_INITIALIZE: u8 = 0;

// =============================================================================
// TOKEN INSTRUCTION ENUM
// =============================================================================

/// Instructions supported by the token program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenInstruction {
    /// Initialize a new mint.
    ///
    /// Accounts expected:
    /// 0. `[writable]` Mint account (created, not yet initialized)
    /// 1. `[]` Rent sysvar
    ///
    /// Data: `[decimals: u8][mint_authority: 32][freeze option: 1][freeze_authority: 32]?`
    InitializeMint {
        decimals: u8,
        mint_authority: Pubkey,
        freeze_authority: Option<Pubkey>,
    },

    /// Initialize a token account.
    ///
    /// Accounts expected:
    /// 0. `[writable]` Token account (created, not yet initialized)
    /// 1. `[]` Mint
    /// 2. `[]` Owner
    /// 3. `[]` Rent sysvar
    InitializeAccount,

    /// Mint new tokens to an account.
    ///
    /// Accounts expected:
    /// 0. `[writable]` Mint
    /// 1. `[writable]` Destination token account
    /// 2. `[signer]` Mint authority
    ///
    /// Data: `[amount: u64]`
    MintTo { amount: u64 },

    /// Transfer tokens, checking the mint and its decimals.
    ///
    /// When the mint is bound to a transfer hook, the hook's trailing
    /// accounts follow the four base accounts, and the hook program is
    /// invoked with all of them.
    ///
    /// Accounts expected:
    /// 0. `[writable]` Source token account
    /// 1. `[]` Mint
    /// 2. `[writable]` Destination token account
    /// 3. `[signer]` Source owner
    /// 4.. Transfer hook accounts, if the mint has a hook
    ///
    /// Data: `[amount: u64][decimals: u8]`
    TransferChecked { amount: u64, decimals: u8 },

    /// Bind a transfer hook program to a mint. Must precede InitializeMint.
    ///
    /// Accounts expected:
    /// 0. `[writable]` Mint account (created, not yet initialized)
    ///
    /// Data: `[0][authority: 32][program_id: 32]`, an all-zero key meaning none.
    InitializeTransferHook {
        authority: Option<Pubkey>,
        program_id: Option<Pubkey>,
    },
}

impl TokenInstruction {
    /// Parse instruction data into a TokenInstruction.
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let (&discriminant, rest) = input
            .split_first()
            .ok_or(TokenError::InvalidInstruction)?;

        Ok(match discriminant {
            // =================================================================
            // 0: InitializeMint
            // =================================================================
            0 => {
                // decimals(1) + mint_authority(32) + option(1)
                if rest.len() < 34 {
                    return Err(TokenError::InvalidInstruction.into());
                }
                let decimals = rest[0];
                let mint_authority = unpack_pubkey(&rest[1..33])?;
                let freeze_authority = match rest[33] {
                    0 => None,
                    1 => Some(unpack_pubkey(
                        rest.get(34..66).ok_or(TokenError::InvalidInstruction)?,
                    )?),
                    _ => return Err(TokenError::InvalidInstruction.into()),
                };

                TokenInstruction::InitializeMint {
                    decimals,
                    mint_authority,
                    freeze_authority,
                }
            }

            // =================================================================
            // 1: InitializeAccount
            // =================================================================
            1 => TokenInstruction::InitializeAccount,

            // =================================================================
            // 7: MintTo
            // =================================================================
            7 => TokenInstruction::MintTo {
                amount: unpack_u64(rest)?,
            },

            // =================================================================
            // 12: TransferChecked
            // =================================================================
            12 => {
                if rest.len() < 9 {
                    return Err(TokenError::InvalidInstruction.into());
                }
                TokenInstruction::TransferChecked {
                    amount: unpack_u64(&rest[..8])?,
                    decimals: rest[8],
                }
            }

            // =================================================================
            // 36: InitializeTransferHook
            // =================================================================
            36 => {
                if rest.len() < 65 || rest[0] != TRANSFER_HOOK_INITIALIZE {
                    return Err(TokenError::InvalidInstruction.into());
                }
                TokenInstruction::InitializeTransferHook {
                    authority: unpack_optional_pubkey(&rest[1..33])?,
                    program_id: unpack_optional_pubkey(&rest[33..65])?,
                }
            }

            _ => return Err(TokenError::InvalidInstruction.into()),
        })
    }

    /// Pack instruction into bytes. Inverse of `unpack()`.
    pub fn pack(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        match self {
            TokenInstruction::InitializeMint {
                decimals,
                mint_authority,
                freeze_authority,
            } => {
                buf.push(0);
                buf.push(*decimals);
                buf.extend_from_slice(mint_authority.as_ref());
                match freeze_authority {
                    Some(authority) => {
                        buf.push(1);
                        buf.extend_from_slice(authority.as_ref());
                    }
                    None => buf.push(0),
                }
            }

            TokenInstruction::InitializeAccount => buf.push(1),

            TokenInstruction::MintTo { amount } => {
                buf.push(7);
                buf.extend_from_slice(&amount.to_le_bytes());
            }

            TokenInstruction::TransferChecked { amount, decimals } => {
                buf.push(12);
                buf.extend_from_slice(&amount.to_le_bytes());
                buf.push(*decimals);
            }

            TokenInstruction::InitializeTransferHook {
                authority,
                program_id,
            } => {
                buf.push(36);
                buf.push(TRANSFER_HOOK_INITIALIZE);
                buf.extend_from_slice(authority.unwrap_or_default().as_ref());
                buf.extend_from_slice(program_id.unwrap_or_default().as_ref());
            }
        }

        buf
    }
}

fn unpack_pubkey(input: &[u8]) -> Result<Pubkey, ProgramError> {
    input
        .try_into()
        .map(Pubkey::new_from_array)
        .map_err(|_| TokenError::InvalidInstruction.into())
}

fn unpack_optional_pubkey(input: &[u8]) -> Result<Option<Pubkey>, ProgramError> {
    let pubkey = unpack_pubkey(input)?;
    Ok((pubkey != Pubkey::default()).then_some(pubkey))
}

fn unpack_u64(input: &[u8]) -> Result<u64, ProgramError> {
    input
        .get(..8)
        .and_then(|bytes| bytes.try_into().ok())
        .map(u64::from_le_bytes)
        .ok_or_else(|| TokenError::InvalidInstruction.into())
}

// =============================================================================
// INSTRUCTION BUILDERS
// =============================================================================

/// Build an `InitializeMint` instruction.
pub fn initialize_mint(
    program_id: &Pubkey,
    mint: &Pubkey,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
    decimals: u8,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*mint, false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
        ],
        data: TokenInstruction::InitializeMint {
            decimals,
            mint_authority: *mint_authority,
            freeze_authority: freeze_authority.copied(),
        }
        .pack(),
    }
}

/// Build an `InitializeAccount` instruction.
pub fn initialize_account(
    program_id: &Pubkey,
    account: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*account, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
        ],
        data: TokenInstruction::InitializeAccount.pack(),
    }
}

/// Build a `MintTo` instruction.
pub fn mint_to(
    program_id: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    mint_authority: &Pubkey,
    amount: u64,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*mint, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(*mint_authority, true),
        ],
        data: TokenInstruction::MintTo { amount }.pack(),
    }
}

/// Build a `TransferChecked` instruction without hook accounts.
///
/// For a hook-bound mint, append the resolved accounts with
/// `transfer_hook_gate::offchain::add_extra_accounts_for_execute`.
pub fn transfer_checked(
    program_id: &Pubkey,
    source: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    amount: u64,
    decimals: u8,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*source, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(*authority, true),
        ],
        data: TokenInstruction::TransferChecked { amount, decimals }.pack(),
    }
}

/// Build an `InitializeTransferHook` instruction.
pub fn initialize_transfer_hook(
    program_id: &Pubkey,
    mint: &Pubkey,
    authority: Option<Pubkey>,
    hook_program_id: Option<Pubkey>,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![AccountMeta::new(*mint, false)],
        data: TokenInstruction::InitializeTransferHook {
            authority,
            program_id: hook_program_id,
        }
        .pack(),
    }
}
