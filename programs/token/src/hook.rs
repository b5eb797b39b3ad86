//! Transfer hook calls made during `TransferChecked`.
//!
//! The hook sees the four base accounts read-only and unsigned, followed
//! by the trailing accounts exactly as the transaction supplied them.

use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    instruction::{AccountMeta, Instruction},
    program::invoke,
    program_error::ProgramError,
    pubkey::Pubkey,
};
use transfer_hook_gate::{
    gate::{Gate, TransferContext, BASE_ACCOUNTS_LEN},
    manager,
    policy::Permissive,
    TransferHookInstruction,
};

/// Data of the hook's `Execute` instruction.
pub fn execute_data(amount: u64, decimals: u8) -> Result<Vec<u8>, ProgramError> {
    TransferHookInstruction::Execute { amount, decimals }.pack()
}

/// Run the account gate over the trailing accounts of a transfer.
///
/// Only a rejection is logged here; the hook program logs acceptance when
/// it runs the same gate. Ordering rules that need the whole transaction
/// are left to the hook program itself.
pub fn check_trailing_accounts(
    hook_program_id: &Pubkey,
    accounts: &[AccountInfo],
    execute_data: &[u8],
    amount: u64,
    decimals: u8,
) -> ProgramResult {
    let transfer = TransferContext::from_account_infos(accounts, execute_data, amount, decimals)?;
    let metas = manager::load_supplied(
        hook_program_id,
        &transfer.mint,
        accounts.get(BASE_ACCOUNTS_LEN),
    )?;

    let mut gate = Gate::new(Permissive);
    let outcome = gate.evaluate(&transfer, hook_program_id, &metas);
    gate.reset();
    outcome.map_err(|rejection| {
        rejection.log();
        rejection.into()
    })
}

/// Account metas for the hook's `Execute`, built from the transfer's accounts.
pub fn execute_account_metas(accounts: &[AccountInfo]) -> Vec<AccountMeta> {
    accounts
        .iter()
        .enumerate()
        .map(|(position, info)| {
            if position < BASE_ACCOUNTS_LEN {
                AccountMeta::new_readonly(*info.key, false)
            } else {
                AccountMeta {
                    pubkey: *info.key,
                    is_signer: info.is_signer,
                    is_writable: info.is_writable,
                }
            }
        })
        .collect()
}

/// Invoke `Execute` on the hook program with every account of the transfer.
pub fn invoke_execute(
    hook_program_id: &Pubkey,
    accounts: &[AccountInfo],
    execute_data: Vec<u8>,
) -> ProgramResult {
    let instruction = Instruction {
        program_id: *hook_program_id,
        accounts: execute_account_metas(accounts),
        data: execute_data,
    };
    invoke(&instruction, accounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_program::clock::Epoch;

    #[test]
    fn test_execute_data_is_hook_execute() {
        let data = execute_data(7, 2).unwrap();
        assert_eq!(
            TransferHookInstruction::unpack(&data).unwrap(),
            TransferHookInstruction::Execute {
                amount: 7,
                decimals: 2
            }
        );
    }

    #[test]
    fn test_execute_account_metas_flags() {
        let keys: Vec<Pubkey> = (0..6).map(|_| Pubkey::new_unique()).collect();
        let owner = Pubkey::new_unique();
        let mut lamports = vec![0u64; 6];
        let mut data = vec![[0u8; 0]; 6];
        let infos: Vec<AccountInfo> = keys
            .iter()
            .zip(lamports.iter_mut())
            .zip(data.iter_mut())
            .enumerate()
            .map(|(i, ((key, lamports), data))| {
                // Base authority signs; the last trailing account is writable
                AccountInfo::new(
                    key,
                    i == 3,
                    i == 0 || i == 2 || i == 5,
                    lamports,
                    data,
                    &owner,
                    false,
                    Epoch::default(),
                )
            })
            .collect();

        let metas = execute_account_metas(&infos);

        assert_eq!(metas.len(), 6);
        for (meta, key) in metas.iter().zip(&keys).take(BASE_ACCOUNTS_LEN) {
            assert_eq!(meta, &AccountMeta::new_readonly(*key, false));
        }
        assert_eq!(metas[4], AccountMeta::new_readonly(keys[4], false));
        assert_eq!(metas[5], AccountMeta::new(keys[5], false));
    }
}
