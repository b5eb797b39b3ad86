//! Assertion Helpers
//!
//! Validation shared by the processors. Each processor validates every
//! account before it touches state:
//!
//! ```ignore
//! assert_owned_by(account_info, program_id)?;
//! assert_writable(account_info)?;
//! assert_data_length(account_info, Account::LEN)?;
//! ```

use crate::error::TokenError;
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    program_error::ProgramError,
    pubkey::Pubkey,
    rent::Rent,
};

// =============================================================================
// ACCOUNT CHECKS
// =============================================================================

/// Fails with `InvalidAccountOwner` unless `account` is owned by `owner`.
///
/// Guards against state forged by another program.
pub fn assert_owned_by(account: &AccountInfo, owner: &Pubkey) -> ProgramResult {
    if account.owner != owner {
        Err(TokenError::InvalidAccountOwner.into())
    } else {
        Ok(())
    }
}

/// Fails with `MissingRequiredSignature` unless `account` signed.
pub fn assert_signer(account: &AccountInfo) -> ProgramResult {
    if !account.is_signer {
        Err(ProgramError::MissingRequiredSignature)
    } else {
        Ok(())
    }
}

/// Fails with `InvalidAccountData` unless `account` is writable.
pub fn assert_writable(account: &AccountInfo) -> ProgramResult {
    if !account.is_writable {
        Err(ProgramError::InvalidAccountData)
    } else {
        Ok(())
    }
}

/// Fails with `InvalidAccountDataLength` unless the data is `expected` bytes.
pub fn assert_data_length(account: &AccountInfo, expected: usize) -> ProgramResult {
    if account.data_len() != expected {
        Err(TokenError::InvalidAccountDataLength.into())
    } else {
        Ok(())
    }
}

pub fn assert_rent_exempt(rent: &Rent, account: &AccountInfo) -> ProgramResult {
    if !rent.is_exempt(account.lamports(), account.data_len()) {
        Err(TokenError::NotRentExempt.into())
    } else {
        Ok(())
    }
}

// =============================================================================
// CHECKED ARITHMETIC
// =============================================================================

/// `a + b`, or `Overflow`.
pub fn checked_add(a: u64, b: u64) -> Result<u64, ProgramError> {
    a.checked_add(b).ok_or_else(|| TokenError::Overflow.into())
}

/// `a - b`, or `InsufficientFunds` when `b > a`.
pub fn checked_sub(a: u64, b: u64) -> Result<u64, ProgramError> {
    a.checked_sub(b)
        .ok_or_else(|| TokenError::InsufficientFunds.into())
}
