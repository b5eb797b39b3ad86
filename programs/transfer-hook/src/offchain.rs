//! Client-side Resolution
//!
//! Helpers for clients building a transfer of a hook-bound mint. They
//! resolve the stored list with the same code the gate runs, so the
//! accounts they produce are exactly the ones the gate accepts.
//!
//! Fetching the list account is left to the caller; pass its raw data.

use crate::gate::{expected_trailing, TransferContext};
use crate::instruction::{self, TransferHookInstruction};
use crate::state::ExtraAccountMetaList;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
};

/// The base accounts and amounts of a transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferAccounts {
    pub source: Pubkey,
    pub mint: Pubkey,
    pub destination: Pubkey,
    pub authority: Pubkey,
    pub amount: u64,
    pub decimals: u8,
}

/// Resolve the trailing accounts a transfer must carry.
///
/// `list_data` is the raw data of the mint's extra account meta list.
pub fn resolve_trailing_accounts(
    hook_program_id: &Pubkey,
    transfer: &TransferAccounts,
    list_data: &[u8],
) -> Result<Vec<AccountMeta>, ProgramError> {
    let metas = ExtraAccountMetaList::decode(list_data)?;
    let instruction_data = TransferHookInstruction::Execute {
        amount: transfer.amount,
        decimals: transfer.decimals,
    }
    .pack()?;

    let context = TransferContext {
        source: transfer.source,
        mint: transfer.mint,
        destination: transfer.destination,
        authority: transfer.authority,
        amount: transfer.amount,
        decimals: transfer.decimals,
        instruction_data: &instruction_data,
        trailing: Vec::new(),
    };

    expected_trailing(&context, hook_program_id, &metas)
}

/// Build an `Execute` instruction carrying the resolved trailing accounts.
pub fn execute_with_extra_accounts(
    hook_program_id: &Pubkey,
    transfer: &TransferAccounts,
    list_data: &[u8],
) -> Result<Instruction, ProgramError> {
    let trailing = resolve_trailing_accounts(hook_program_id, transfer, list_data)?;
    Ok(instruction::execute(
        hook_program_id,
        &transfer.source,
        &transfer.mint,
        &transfer.destination,
        &transfer.authority,
        transfer.amount,
        transfer.decimals,
        &trailing,
    ))
}

/// Append the resolved trailing accounts to a token program instruction
/// whose first four accounts are the transfer's base accounts.
pub fn add_extra_accounts_for_execute(
    instruction: &mut Instruction,
    hook_program_id: &Pubkey,
    transfer: &TransferAccounts,
    list_data: &[u8],
) -> Result<(), ProgramError> {
    let trailing = resolve_trailing_accounts(hook_program_id, transfer, list_data)?;
    instruction.accounts.extend(trailing);
    Ok(())
}
