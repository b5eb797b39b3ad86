//! Instruction Processors
//!
//! One file per instruction.

pub mod execute;
pub mod initialize_extra_account_meta_list;

use crate::instruction::TransferHookInstruction;
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
};

/// Main processor that routes instructions to specific handlers
pub struct Processor;

impl Processor {
    /// Process a transfer hook instruction
    pub fn process(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        let instruction = TransferHookInstruction::unpack(instruction_data)?;

        match instruction {
            TransferHookInstruction::InitializeExtraAccountMetaList {
                extra_account_metas,
            } => {
                msg!("Instruction: InitializeExtraAccountMetaList");
                initialize_extra_account_meta_list::process(
                    program_id,
                    accounts,
                    &extra_account_metas,
                )
            }

            TransferHookInstruction::Execute { amount, decimals } => {
                msg!("Instruction: Execute");
                execute::process(program_id, accounts, instruction_data, amount, decimals)
            }
        }
    }
}
