//! Custom Error Types
//!
//! Errors the token program can return. Each has a stable numeric code.
//!
//! # Error Code Ranges
//!
//! | Range | Category |
//! |-------|----------|
//! | 0-4 | Account validation errors |
//! | 5-7 | Authority errors |
//! | 8-13 | Operation errors |
//!
//! Failures raised by a mint's transfer hook keep the hook's own codes
//! (100 and above) when they surface through this program.

use num_traits::FromPrimitive;
use solana_program::{
    decode_error::DecodeError,
    msg,
    program_error::{PrintProgramError, ProgramError},
};
use thiserror::Error;

// =============================================================================
// ERROR ENUM
// =============================================================================

/// Errors that may be returned by the Token program.
///
/// After deployment, never reorder these variants. Add new ones at the end.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenError {
    // =========================================================================
    // ACCOUNT VALIDATION ERRORS (0-4)
    // =========================================================================
    /// Error 0: Account is not owned by the token program.
    #[error("Account not owned by token program")]
    InvalidAccountOwner,

    /// Error 1: Account data has wrong length.
    #[error("Invalid account data length")]
    InvalidAccountDataLength,

    /// Error 2: Account is not rent exempt.
    #[error("Account is not rent exempt")]
    NotRentExempt,

    /// Error 3: Account is already initialized.
    ///
    /// Also returned when binding a transfer hook to a mint that was
    /// already initialized: the binding is fixed before the mint exists.
    #[error("Account already initialized")]
    AlreadyInitialized,

    /// Error 4: Account is not initialized.
    #[error("Account not initialized")]
    UninitializedAccount,

    // =========================================================================
    // AUTHORITY ERRORS (5-7)
    // =========================================================================
    /// Error 5: The signer does not match the expected authority.
    #[error("Invalid authority")]
    InvalidAuthority,

    /// Error 6: The token account's owner does not match the signer.
    #[error("Owner mismatch")]
    OwnerMismatch,

    /// Error 7: Minting requires a mint authority, but none is set.
    #[error("Mint authority required")]
    MintAuthorityRequired,

    // =========================================================================
    // OPERATION ERRORS (8-13)
    // =========================================================================
    /// Error 8: Account doesn't have enough tokens for the operation.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Error 9: An arithmetic operation would overflow.
    #[error("Arithmetic overflow")]
    Overflow,

    /// Error 10: Token accounts must belong to the given mint.
    #[error("Mint mismatch")]
    MintMismatch,

    /// Error 11: Could not parse the instruction data.
    #[error("Invalid instruction")]
    InvalidInstruction,

    /// Error 12: Source and destination are the same account.
    #[error("Self transfer not allowed")]
    SelfTransfer,

    /// Error 13: The decimals passed to a checked transfer differ from
    /// the mint's.
    #[error("Mint decimals mismatch")]
    MintDecimalsMismatch,
}

// =============================================================================
// CONVERSIONS
// =============================================================================

impl From<TokenError> for ProgramError {
    fn from(e: TokenError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for TokenError {
    fn type_of() -> &'static str {
        "TokenError"
    }
}

impl FromPrimitive for TokenError {
    fn from_i64(n: i64) -> Option<Self> {
        if n < 0 {
            return None;
        }
        Self::from_u64(n as u64)
    }

    fn from_u64(n: u64) -> Option<Self> {
        Some(match n {
            0 => TokenError::InvalidAccountOwner,
            1 => TokenError::InvalidAccountDataLength,
            2 => TokenError::NotRentExempt,
            3 => TokenError::AlreadyInitialized,
            4 => TokenError::UninitializedAccount,
            5 => TokenError::InvalidAuthority,
            6 => TokenError::OwnerMismatch,
            7 => TokenError::MintAuthorityRequired,
            8 => TokenError::InsufficientFunds,
            9 => TokenError::Overflow,
            10 => TokenError::MintMismatch,
            11 => TokenError::InvalidInstruction,
            12 => TokenError::SelfTransfer,
            13 => TokenError::MintDecimalsMismatch,
            _ => return None,
        })
    }
}

impl PrintProgramError for TokenError {
    fn print<E>(&self)
    where
        E: 'static + std::error::Error + DecodeError<E> + PrintProgramError + FromPrimitive,
    {
        msg!("Error: {}", self);
    }
}
