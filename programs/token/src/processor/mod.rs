//! Instruction Processors
//!
//! One file per instruction.

pub mod initialize_account;
pub mod initialize_mint;
pub mod initialize_transfer_hook;
pub mod mint_to;
pub mod transfer_checked;

use crate::instruction::TokenInstruction;
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
};

/// Main processor that routes instructions to specific handlers
pub struct Processor;

impl Processor {
    /// Process a Token program instruction
    pub fn process(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        let instruction = TokenInstruction::unpack(instruction_data)?;

        match instruction {
            TokenInstruction::InitializeMint {
                decimals,
                mint_authority,
                freeze_authority,
            } => {
                msg!("Instruction: InitializeMint");
                initialize_mint::process(
                    program_id,
                    accounts,
                    decimals,
                    mint_authority,
                    freeze_authority,
                )
            }

            TokenInstruction::InitializeAccount => {
                msg!("Instruction: InitializeAccount");
                initialize_account::process(program_id, accounts)
            }

            TokenInstruction::MintTo { amount } => {
                msg!("Instruction: MintTo");
                mint_to::process(program_id, accounts, amount)
            }

            TokenInstruction::TransferChecked { amount, decimals } => {
                msg!("Instruction: TransferChecked");
                transfer_checked::process(program_id, accounts, amount, decimals)
            }

            TokenInstruction::InitializeTransferHook {
                authority,
                program_id: hook_program_id,
            } => {
                msg!("Instruction: InitializeTransferHook");
                initialize_transfer_hook::process(program_id, accounts, authority, hook_program_id)
            }
        }
    }
}
