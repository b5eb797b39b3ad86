//! Transfer Hook Error Types
//!
//! Every failure the hook can surface, with a stable numeric code.
//!
//! # Error Code Ranges
//!
//! | Range | Category |
//! |-------|----------|
//! | 100-101 | Codec and seed configuration |
//! | 102 | Resolution |
//! | 103-105 | List lifecycle |
//! | 106 | Transfer-time validation |
//! | 107-110 | Instruction parsing and transfer policy |
//!
//! Codes start at 100 so that a hook error surfaced through the token
//! program is never confused with one of the token program's own codes.

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

/// Errors that may be returned by the transfer hook program.
///
/// After deployment, never reorder or renumber these variants.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransferHookError {
    /// Error 100: A stored record could not be decoded.
    ///
    /// Unknown discriminant, unknown seed tag, a flag byte that is not
    /// 0 or 1, or a buffer whose length is not `header + count * record`.
    #[error("Malformed extra account meta record")]
    MalformedRecord = 100,

    /// Error 101: A descriptor cannot be encoded into a record.
    ///
    /// The seeds do not fit the 32-byte address config, a seed component
    /// is longer than a PDA seed may be, or an external program index is
    /// not below 128.
    #[error("Extra account meta address config cannot be encoded")]
    InvalidAddressConfig,

    /// Error 102: A seed points outside the resolution context.
    ///
    /// The instruction-data slice or account index referenced by a
    /// derived descriptor does not exist for this transfer.
    #[error("Seed references data outside the resolution context")]
    UnresolvedSeedReference,

    /// Error 103: The extra account meta list already holds data.
    #[error("Extra account meta list already initialized")]
    AlreadyInitialized,

    /// Error 104: The extra account meta list holds no data.
    #[error("Extra account meta list not initialized")]
    NotInitialized,

    /// Error 105: The list account is not at the derived address.
    #[error("Extra account meta list address does not match its derivation")]
    IncorrectListAddress,

    /// Error 106: A trailing account does not match the resolved list.
    ///
    /// The failing position, the expected account and the supplied one
    /// are written to the program log before this is returned.
    #[error("Trailing account does not match the extra account meta list")]
    AccountMismatch,

    /// Error 107: Instruction data could not be parsed.
    #[error("Invalid instruction")]
    InvalidInstruction,

    /// Error 108: The transfer is not at an allowed instruction position.
    #[error("Transfer instruction is not at an allowed position")]
    InvalidInstructionPosition,

    /// Error 109: The top-level instruction is not a token transfer.
    #[error("Transfer invoked through an unauthorized program")]
    UnauthorizedCaller,

    /// Error 110: Another instruction follows the transfer.
    #[error("Unauthorized instruction after the transfer")]
    UnauthorizedTrailingInstruction,
}

// =============================================================================
// CONVERSIONS
// =============================================================================

impl From<TransferHookError> for ProgramError {
    fn from(e: TransferHookError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for TransferHookError {
    fn type_of() -> &'static str {
        "TransferHookError"
    }
}

impl FromPrimitive for TransferHookError {
    fn from_i64(n: i64) -> Option<Self> {
        u64::try_from(n).ok().and_then(Self::from_u64)
    }

    fn from_u64(n: u64) -> Option<Self> {
        use TransferHookError::*;
        Some(match n {
            100 => MalformedRecord,
            101 => InvalidAddressConfig,
            102 => UnresolvedSeedReference,
            103 => AlreadyInitialized,
            104 => NotInitialized,
            105 => IncorrectListAddress,
            106 => AccountMismatch,
            107 => InvalidInstruction,
            108 => InvalidInstructionPosition,
            109 => UnauthorizedCaller,
            110 => UnauthorizedTrailingInstruction,
            _ => return None,
        })
    }
}

impl PrintProgramError for TransferHookError {
    fn print<E>(&self)
    where
        E: 'static + std::error::Error + DecodeError<E> + PrintProgramError + FromPrimitive,
    {
        msg!("Error: {}", self);
    }
}

impl TransferHookError {
    /// Map a `ProgramError::Custom` code back to a hook error.
    ///
    /// Returns `None` for any other error or an unknown code.
    pub fn from_program_error(error: &ProgramError) -> Option<Self> {
        match error {
            ProgramError::Custom(code) => Self::from_u32(*code),
            _ => None,
        }
    }
}
