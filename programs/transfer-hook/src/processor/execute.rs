//! Execute Instruction Processor
//!
//! Runs the gate over the trailing accounts of a transfer.

use crate::gate::{Gate, TransferContext, BASE_ACCOUNTS_LEN};
use crate::manager;
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    pubkey::Pubkey,
};

/// Process Execute instruction
///
/// Accounts expected:
/// 0. `[]` Source token account
/// 1. `[]` Mint
/// 2. `[]` Destination token account
/// 3. `[]` Source owner
/// 4.. Trailing accounts, see [`crate::gate`]
///
/// The stored list is only read when the first trailing account is the
/// derived list address. Otherwise the gate runs against an empty list,
/// which fails at position 0.
pub fn process(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
    amount: u64,
    decimals: u8,
) -> ProgramResult {
    let transfer =
        TransferContext::from_account_infos(accounts, instruction_data, amount, decimals)?;
    let metas =
        manager::load_supplied(program_id, &transfer.mint, accounts.get(BASE_ACCOUNTS_LEN))?;

    #[cfg(not(feature = "instruction-introspection"))]
    let policy = crate::policy::Permissive;

    #[cfg(feature = "instruction-introspection")]
    let policy = {
        let token_program_id = *accounts[0].owner;
        crate::policy::Deferred(move || {
            crate::policy::InstructionOrderPolicy::from_accounts(&token_program_id, accounts)
        })
    };

    Gate::new(policy).check(&transfer, program_id, &metas)
}
