//! Extra Account Meta List Manager
//!
//! Creates the list account of a mint and reads it back.
//!
//! The list lives at the PDA `["extra-account-metas", mint]` of this
//! program, is sized to exactly its encoding and never changes after
//! creation.

use crate::error::TransferHookError;
use crate::state::{ExtraAccountMeta, ExtraAccountMetaList};
use crate::{find_extra_account_meta_list_address, EXTRA_ACCOUNT_METAS_SEED};
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    program_error::ProgramError,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction,
    sysvar::Sysvar,
};

/// Create the list account of `mint_info` and write `metas` into it.
///
/// # Errors
///
/// - `IncorrectListAddress` if `list_info` is not the derived address
/// - `AlreadyInitialized` if the account already holds data
///
/// An address that already holds lamports but no data is topped up to the
/// rent-exempt minimum, then allocated and assigned.
pub fn initialize<'a>(
    program_id: &Pubkey,
    payer_info: &AccountInfo<'a>,
    list_info: &AccountInfo<'a>,
    mint_info: &AccountInfo<'a>,
    system_program_info: &AccountInfo<'a>,
    metas: &[ExtraAccountMeta],
) -> ProgramResult {
    let (list_address, bump) = find_extra_account_meta_list_address(mint_info.key, program_id);
    if list_address != *list_info.key {
        msg!(
            "Expected extra account meta list {}, got {}",
            list_address,
            list_info.key
        );
        return Err(TransferHookError::IncorrectListAddress.into());
    }

    if !list_info.data_is_empty() {
        return Err(TransferHookError::AlreadyInitialized.into());
    }

    // Encode before paying for anything.
    let encoded = ExtraAccountMetaList::encode(metas)?;
    let space = encoded.len();
    let required_lamports = Rent::get()?.minimum_balance(space);

    let bump_seed = [bump];
    let signer_seeds: &[&[u8]] = &[EXTRA_ACCOUNT_METAS_SEED, mint_info.key.as_ref(), &bump_seed];

    if list_info.lamports() == 0 {
        invoke_signed(
            &system_instruction::create_account(
                payer_info.key,
                list_info.key,
                required_lamports,
                space as u64,
                program_id,
            ),
            &[
                payer_info.clone(),
                list_info.clone(),
                system_program_info.clone(),
            ],
            &[signer_seeds],
        )?;
    } else {
        let shortfall = required_lamports.saturating_sub(list_info.lamports());
        if shortfall > 0 {
            invoke(
                &system_instruction::transfer(payer_info.key, list_info.key, shortfall),
                &[
                    payer_info.clone(),
                    list_info.clone(),
                    system_program_info.clone(),
                ],
            )?;
        }
        invoke_signed(
            &system_instruction::allocate(list_info.key, space as u64),
            &[list_info.clone(), system_program_info.clone()],
            &[signer_seeds],
        )?;
        invoke_signed(
            &system_instruction::assign(list_info.key, program_id),
            &[list_info.clone(), system_program_info.clone()],
            &[signer_seeds],
        )?;
    }

    list_info
        .try_borrow_mut_data()?
        .copy_from_slice(&encoded);

    msg!(
        "Initialized extra account meta list for mint {} with {} accounts",
        mint_info.key,
        metas.len()
    );

    Ok(())
}

/// Read the list of `mint` from `list_info`.
///
/// # Errors
///
/// - `IncorrectListAddress` if `list_info` is not the derived address
/// - `NotInitialized` if the account holds no data
/// - `IllegalOwner` if the account is not owned by this program
/// - `MalformedRecord` if the data does not decode
pub fn load(
    program_id: &Pubkey,
    mint: &Pubkey,
    list_info: &AccountInfo,
) -> Result<Vec<ExtraAccountMeta>, ProgramError> {
    let (list_address, _) = find_extra_account_meta_list_address(mint, program_id);
    if list_address != *list_info.key {
        return Err(TransferHookError::IncorrectListAddress.into());
    }

    if list_info.data_is_empty() {
        return Err(TransferHookError::NotInitialized.into());
    }

    if list_info.owner != program_id {
        return Err(ProgramError::IllegalOwner);
    }

    let data = list_info.try_borrow_data()?;
    ExtraAccountMetaList::decode(&data)
}

/// Read the list of `mint` when `candidate` is its list account.
///
/// Any other candidate, or none, gives an empty list, which the gate
/// rejects at position 0 since the list address is always expected there.
pub fn load_supplied(
    program_id: &Pubkey,
    mint: &Pubkey,
    candidate: Option<&AccountInfo>,
) -> Result<Vec<ExtraAccountMeta>, ProgramError> {
    let list_address = crate::get_extra_account_meta_list_address(mint, program_id);
    match candidate {
        Some(list_info) if *list_info.key == list_address => load(program_id, mint, list_info),
        _ => Ok(Vec::new()),
    }
}
