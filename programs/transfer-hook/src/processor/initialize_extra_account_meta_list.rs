//! InitializeExtraAccountMetaList Instruction Processor
//!
//! Stores the accounts every transfer of a mint must carry.

use crate::manager;
use crate::state::ExtraAccountMeta;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

/// Process InitializeExtraAccountMetaList instruction
///
/// Accounts expected:
/// 0. `[writable, signer]` Payer
/// 1. `[writable]` Extra account meta list PDA
/// 2. `[]` Mint
/// 3. `[]` System program
pub fn process(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    extra_account_metas: &[ExtraAccountMeta],
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let payer_info = next_account_info(account_info_iter)?;
    let list_info = next_account_info(account_info_iter)?;
    let mint_info = next_account_info(account_info_iter)?;
    let system_program_info = next_account_info(account_info_iter)?;

    if !payer_info.is_signer {
        return Err(ProgramError::MissingRequiredSignature);
    }
    if !list_info.is_writable {
        return Err(ProgramError::InvalidAccountData);
    }
    if !system_program::check_id(system_program_info.key) {
        return Err(ProgramError::IncorrectProgramId);
    }

    manager::initialize(
        program_id,
        payer_info,
        list_info,
        mint_info,
        system_program_info,
        extra_account_metas,
    )
}
