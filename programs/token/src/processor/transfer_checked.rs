//! TransferChecked Instruction Processor
//!
//! Moves tokens between two accounts of the same mint. When the mint is
//! bound to a transfer hook, the trailing accounts are checked against the
//! hook's extra account meta list before any balance moves, and the hook
//! program is invoked once the balances are written.

use crate::error::TokenError;
use crate::hook;
use crate::state::{Account, Mint, Pack};
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    pubkey::Pubkey,
};

/// Process TransferChecked instruction
///
/// Accounts expected:
/// 0. `[writable]` Source token account
/// 1. `[]` Mint
/// 2. `[writable]` Destination token account
/// 3. `[signer]` Source owner
/// 4.. Transfer hook accounts, when the mint has a hook
pub fn process(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    amount: u64,
    decimals: u8,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    // Account 0: Source
    let source_info = next_account_info(account_info_iter)?;

    // Account 1: Mint
    let mint_info = next_account_info(account_info_iter)?;

    // Account 2: Destination
    let dest_info = next_account_info(account_info_iter)?;

    // Account 3: Source owner
    let authority_info = next_account_info(account_info_iter)?;

    // Remaining: transfer hook accounts, read from `accounts` below

    // Validate source
    assert_owned_by(source_info, program_id)?;
    assert_writable(source_info)?;
    assert_data_length(source_info, Account::LEN)?;

    // Validate destination
    assert_owned_by(dest_info, program_id)?;
    assert_writable(dest_info)?;
    assert_data_length(dest_info, Account::LEN)?;

    // Validate mint
    assert_owned_by(mint_info, program_id)?;
    assert_data_length(mint_info, Mint::LEN)?;

    // Prevent self-transfer
    if source_info.key == dest_info.key {
        return Err(TokenError::SelfTransfer.into());
    }

    // Load mint and check the caller's view of it
    let mint = Mint::unpack_from_slice(&mint_info.data.borrow())?;
    if !mint.is_initialized {
        return Err(TokenError::UninitializedAccount.into());
    }
    if decimals != mint.decimals {
        return Err(TokenError::MintDecimalsMismatch.into());
    }

    // Load token accounts
    let mut source = Account::unpack_from_slice(&source_info.data.borrow())?;
    let mut dest = Account::unpack_from_slice(&dest_info.data.borrow())?;

    if !source.is_initialized() || !dest.is_initialized() {
        return Err(TokenError::UninitializedAccount.into());
    }
    // Validate mints match
    if source.mint != *mint_info.key || dest.mint != *mint_info.key {
        return Err(TokenError::MintMismatch.into());
    }
    // Validate authority
    if source.owner != *authority_info.key {
        return Err(TokenError::OwnerMismatch.into());
    }
    assert_signer(authority_info)?;

    // Check the hook accounts before any balance moves
    let hook_program_id = mint.transfer_hook_program_id().copied();
    let execute_data = match hook_program_id {
        Some(hook_program_id) => {
            let execute_data = hook::execute_data(amount, decimals)?;
            hook::check_trailing_accounts(
                &hook_program_id,
                accounts,
                &execute_data,
                amount,
                decimals,
            )?;
            Some(execute_data)
        }
        None => None,
    };

    // Transfer tokens
    source.amount = checked_sub(source.amount, amount)?;
    dest.amount = checked_add(dest.amount, amount)?;

    // Save states
    source.pack_into_slice(&mut source_info.data.borrow_mut())?;
    dest.pack_into_slice(&mut dest_info.data.borrow_mut())?;

    // Balances are written and no borrow is held across the hook
    if let (Some(hook_program_id), Some(execute_data)) = (hook_program_id, execute_data) {
        hook::invoke_execute(&hook_program_id, accounts, execute_data)?;
    }

    Ok(())
}
