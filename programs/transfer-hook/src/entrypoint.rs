//! Program Entrypoint
//!
//! Not compiled with the `no-entrypoint` feature, so a token program can
//! link this crate for its types and builders.

#![cfg(not(feature = "no-entrypoint"))]

use crate::{error::TransferHookError, processor::Processor};
use solana_program::{
    account_info::AccountInfo,
    entrypoint,
    entrypoint::ProgramResult,
    program_error::PrintProgramError,
    pubkey::Pubkey,
};

entrypoint!(process_instruction);

/// Entrypoint of the transfer hook program.
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    if let Err(error) = Processor::process(program_id, accounts, instruction_data) {
        error.print::<TransferHookError>();
        return Err(error);
    }
    Ok(())
}
