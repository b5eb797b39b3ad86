//! InitializeTransferHook Instruction Processor
//!
//! Binds a transfer hook program to a mint. The binding can only be made
//! while the mint is uninitialized, so it is fixed for the mint's lifetime.

use crate::error::TokenError;
use crate::state::{Mint, Pack};
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

/// Process InitializeTransferHook instruction
///
/// Accounts expected:
/// 0. `[writable]` Mint account, created but not yet initialized
pub fn process(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    authority: Option<Pubkey>,
    hook_program_id: Option<Pubkey>,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    // Account 0: Mint account
    let mint_info = next_account_info(account_info_iter)?;

    // Validate mint account
    assert_owned_by(mint_info, program_id)?;
    assert_writable(mint_info)?;
    assert_data_length(mint_info, Mint::LEN)?;

    // A mint cannot hook itself into its own token program
    if hook_program_id.as_ref() == Some(program_id) {
        return Err(ProgramError::IncorrectProgramId);
    }

    // The binding is fixed once the mint is initialized
    let mut mint = Mint::unpack_from_slice(&mint_info.data.borrow())?;
    if mint.is_initialized {
        return Err(TokenError::AlreadyInitialized.into());
    }

    mint.transfer_hook_authority = authority.into();
    mint.transfer_hook_program_id = hook_program_id.into();
    if let Some(hook_program_id) = hook_program_id {
        msg!("Transfer hook program: {}", hook_program_id);
    }

    mint.pack_into_slice(&mut mint_info.data.borrow_mut())
}
