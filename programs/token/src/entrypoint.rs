//! Program Entrypoint
//!
//! Compiled out with the `no-entrypoint` feature so the crate can be
//! linked by other programs.

#![cfg(not(feature = "no-entrypoint"))]

use crate::{error::TokenError, processor::Processor};
use solana_program::{
    account_info::AccountInfo,
    entrypoint,
    entrypoint::ProgramResult,
    program_error::PrintProgramError,
    pubkey::Pubkey,
};

entrypoint!(process_instruction);

/// Delegates to [`Processor::process`] and logs any custom error.
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    if let Err(error) = Processor::process(program_id, accounts, instruction_data) {
        error.print::<TokenError>();
        return Err(error);
    }
    Ok(())
}
