//! Transfer Policies
//!
//! A policy runs once the gate has matched every trailing account, and has
//! the final say on the transfer.
//!
//! Two policies ship with the program:
//!
//! - [`Permissive`] allows every transfer. This is the default.
//! - [`InstructionOrderPolicy`] inspects the other instructions of the
//!   transaction through the instructions sysvar. Enabled with the
//!   `instruction-introspection` feature.

use crate::error::TransferHookError;
use crate::gate::TransferContext;
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvar::instructions::{load_current_index_checked, load_instruction_at_checked},
};

/// Associated token account program.
pub mod associated_token_program {
    solana_program::declare_id!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
}

/// `CreateIdempotent` instruction of the associated token account program.
pub const CREATE_IDEMPOTENT: u8 = 1;

/// Decides whether a transfer with valid accounts may go through.
pub trait TransferPolicy {
    fn approve(&self, transfer: &TransferContext) -> ProgramResult;
}

/// Allows every transfer.
#[derive(Clone, Copy, Debug, Default)]
pub struct Permissive;

impl TransferPolicy for Permissive {
    fn approve(&self, _transfer: &TransferContext) -> ProgramResult {
        Ok(())
    }
}

// =============================================================================
// INSTRUCTION ORDER POLICY
// =============================================================================

/// A top-level instruction of the transaction, as far as the policy cares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntrospectedInstruction {
    pub program_id: Pubkey,
    pub data: Vec<u8>,
}

/// Only lets a transfer through as a plain, standalone token transfer.
///
/// 1. The transfer is the first instruction, or the second one right after
///    an idempotent associated token account creation.
/// 2. The top-level instruction is the token program itself, so no other
///    program can drive the transfer through a CPI.
/// 3. Nothing follows the transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionOrderPolicy {
    /// Program that owns the token accounts
    pub token_program_id: Pubkey,
    /// Index of the top-level instruction being executed
    pub current_index: usize,
    /// Every top-level instruction of the transaction
    pub instructions: Vec<IntrospectedInstruction>,
}

impl InstructionOrderPolicy {
    /// Load the transaction's instructions from the instructions sysvar.
    pub fn from_sysvar(
        token_program_id: &Pubkey,
        instructions_sysvar: &AccountInfo,
    ) -> Result<Self, ProgramError> {
        let current_index = load_current_index_checked(instructions_sysvar)? as usize;

        let count = {
            let data = instructions_sysvar.try_borrow_data()?;
            if data.len() < 2 {
                return Err(ProgramError::InvalidAccountData);
            }
            u16::from_le_bytes(*arrayref::array_ref![data, 0, 2]) as usize
        };

        let instructions = (0..count)
            .map(|index| {
                load_instruction_at_checked(index, instructions_sysvar).map(|instruction| {
                    IntrospectedInstruction {
                        program_id: instruction.program_id,
                        data: instruction.data,
                    }
                })
            })
            .collect::<Result<Vec<_>, ProgramError>>()?;

        Ok(Self {
            token_program_id: *token_program_id,
            current_index,
            instructions,
        })
    }

    /// Same as [`InstructionOrderPolicy::from_sysvar`], finding the
    /// instructions sysvar among `accounts`.
    pub fn from_accounts(
        token_program_id: &Pubkey,
        accounts: &[AccountInfo],
    ) -> Result<Self, ProgramError> {
        let sysvar_info = accounts
            .iter()
            .find(|info| solana_program::sysvar::instructions::check_id(info.key))
            .ok_or(ProgramError::NotEnoughAccountKeys)?;
        Self::from_sysvar(token_program_id, sysvar_info)
    }

    pub fn check(&self) -> ProgramResult {
        // Rule 1: position
        match self.current_index {
            0 => {}
            1 => {
                let creates_account = self.instructions.first().is_some_and(|previous| {
                    previous.program_id == associated_token_program::id()
                        && previous.data.first() == Some(&CREATE_IDEMPOTENT)
                });
                if !creates_account {
                    return Err(TransferHookError::InvalidInstructionPosition.into());
                }
            }
            _ => return Err(TransferHookError::InvalidInstructionPosition.into()),
        }

        // Rule 2: caller
        let current = self
            .instructions
            .get(self.current_index)
            .ok_or(ProgramError::InvalidAccountData)?;
        if current.program_id != self.token_program_id {
            return Err(TransferHookError::UnauthorizedCaller.into());
        }

        // Rule 3: nothing after
        if self.instructions.len() > self.current_index + 1 {
            return Err(TransferHookError::UnauthorizedTrailingInstruction.into());
        }

        Ok(())
    }
}

impl TransferPolicy for InstructionOrderPolicy {
    fn approve(&self, _transfer: &TransferContext) -> ProgramResult {
        self.check()
    }
}

/// A policy whose construction may fail, built only once it is needed.
///
/// The introspection policy needs the instructions sysvar, which is only
/// guaranteed to be present after the gate matched the trailing accounts.
pub struct Deferred<F>(pub F);

impl<F, P> TransferPolicy for Deferred<F>
where
    F: Fn() -> Result<P, ProgramError>,
    P: TransferPolicy,
{
    fn approve(&self, transfer: &TransferContext) -> ProgramResult {
        (self.0)()?.approve(transfer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Gate;
    use solana_program::{
        instruction::AccountMeta,
        sysvar::{
            self,
            instructions::{
                construct_instructions_data, store_current_index, BorrowedAccountMeta,
                BorrowedInstruction,
            },
        },
    };
    use std::cell::Cell;

    fn instruction(program_id: Pubkey, data: &[u8]) -> IntrospectedInstruction {
        IntrospectedInstruction {
            program_id,
            data: data.to_vec(),
        }
    }

    fn policy(current_index: usize, instructions: Vec<IntrospectedInstruction>) -> InstructionOrderPolicy {
        InstructionOrderPolicy {
            token_program_id: instructions
                .get(current_index)
                .map(|ix| ix.program_id)
                .unwrap_or_default(),
            current_index,
            instructions,
        }
    }

    #[test]
    fn test_standalone_transfer_allowed() {
        let token = Pubkey::new_unique();
        assert_eq!(policy(0, vec![instruction(token, &[12])]).check(), Ok(()));
    }

    #[test]
    fn test_after_ata_creation_allowed() {
        let token = Pubkey::new_unique();
        let policy = policy(
            1,
            vec![
                instruction(associated_token_program::id(), &[CREATE_IDEMPOTENT]),
                instruction(token, &[12]),
            ],
        );
        assert_eq!(policy.check(), Ok(()));
    }

    #[test]
    fn test_after_other_instruction_rejected() {
        let token = Pubkey::new_unique();

        let policy_a = policy(
            1,
            vec![instruction(Pubkey::new_unique(), &[1]), instruction(token, &[12])],
        );
        assert_eq!(
            policy_a.check(),
            Err(TransferHookError::InvalidInstructionPosition.into())
        );

        // Non-idempotent creation
        let policy_b = policy(
            1,
            vec![
                instruction(associated_token_program::id(), &[0]),
                instruction(token, &[12]),
            ],
        );
        assert_eq!(
            policy_b.check(),
            Err(TransferHookError::InvalidInstructionPosition.into())
        );
    }

    #[test]
    fn test_third_position_rejected() {
        let token = Pubkey::new_unique();
        let policy = policy(
            2,
            vec![
                instruction(associated_token_program::id(), &[CREATE_IDEMPOTENT]),
                instruction(associated_token_program::id(), &[CREATE_IDEMPOTENT]),
                instruction(token, &[12]),
            ],
        );
        assert_eq!(
            policy.check(),
            Err(TransferHookError::InvalidInstructionPosition.into())
        );
    }

    #[test]
    fn test_foreign_caller_rejected() {
        let mut policy = policy(0, vec![instruction(Pubkey::new_unique(), &[0])]);
        policy.token_program_id = Pubkey::new_unique();
        assert_eq!(
            policy.check(),
            Err(TransferHookError::UnauthorizedCaller.into())
        );
    }

    #[test]
    fn test_trailing_instruction_rejected() {
        let token = Pubkey::new_unique();
        let policy = policy(
            0,
            vec![instruction(token, &[12]), instruction(Pubkey::new_unique(), &[2])],
        );
        assert_eq!(
            policy.check(),
            Err(TransferHookError::UnauthorizedTrailingInstruction.into())
        );
    }

    fn sysvar_data(instructions: &[(Pubkey, Vec<u8>)], current_index: u16) -> Vec<u8> {
        let payer = Pubkey::new_unique();
        let borrowed = instructions
            .iter()
            .map(|(program_id, data)| BorrowedInstruction {
                program_id,
                accounts: vec![BorrowedAccountMeta {
                    pubkey: &payer,
                    is_signer: true,
                    is_writable: true,
                }],
                data,
            })
            .collect::<Vec<_>>();
        let mut data = construct_instructions_data(&borrowed);
        store_current_index(&mut data, current_index);
        data
    }

    #[test]
    fn test_from_sysvar_reads_every_instruction() {
        let token = Pubkey::new_unique();
        let mut data = sysvar_data(
            &[
                (associated_token_program::id(), vec![CREATE_IDEMPOTENT]),
                (token, vec![12, 1, 0]),
            ],
            1,
        );

        let key = sysvar::instructions::id();
        let owner = sysvar::id();
        let mut lamports = 0;
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &owner, false, 0);

        let policy = InstructionOrderPolicy::from_sysvar(&token, &info).unwrap();
        assert_eq!(policy.current_index, 1);
        assert_eq!(
            policy.instructions,
            vec![
                instruction(associated_token_program::id(), &[CREATE_IDEMPOTENT]),
                instruction(token, &[12, 1, 0]),
            ]
        );
        assert_eq!(policy.check(), Ok(()));
    }

    #[test]
    fn test_from_accounts_finds_sysvar() {
        let token = Pubkey::new_unique();
        let mut data = sysvar_data(
            &[(token, vec![12]), (Pubkey::new_unique(), vec![2])],
            0,
        );

        let key = sysvar::instructions::id();
        let other_key = Pubkey::new_unique();
        let owner = sysvar::id();
        let mut lamports = 0;
        let mut other_lamports = 0;
        let mut other_data: [u8; 0] = [];
        let other = AccountInfo::new(
            &other_key,
            false,
            false,
            &mut other_lamports,
            &mut other_data,
            &owner,
            false,
            0,
        );
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &owner, false, 0);

        assert_eq!(
            InstructionOrderPolicy::from_accounts(&token, &[other.clone()]),
            Err(ProgramError::NotEnoughAccountKeys)
        );

        let policy = InstructionOrderPolicy::from_accounts(&token, &[other, info]).unwrap();
        assert_eq!(policy.instructions.len(), 2);
        assert_eq!(
            policy.check(),
            Err(TransferHookError::UnauthorizedTrailingInstruction.into())
        );
    }

    #[test]
    fn test_deferred_builds_only_after_accounts_match() {
        let hook = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let built = Cell::new(false);
        let mut gate = Gate::new(Deferred(|| -> Result<Permissive, ProgramError> {
            built.set(true);
            Ok(Permissive)
        }));

        let mut transfer = TransferContext {
            source: Pubkey::new_unique(),
            mint,
            destination: Pubkey::new_unique(),
            authority: Pubkey::new_unique(),
            amount: 1,
            decimals: 0,
            instruction_data: &[],
            trailing: vec![],
        };
        assert!(gate.evaluate(&transfer, &hook, &[]).is_err());
        assert!(!built.get());

        transfer.trailing = vec![
            AccountMeta::new_readonly(crate::get_extra_account_meta_list_address(&mint, &hook), false),
            AccountMeta::new_readonly(hook, false),
        ];
        assert_eq!(gate.evaluate(&transfer, &hook, &[]), Ok(()));
        assert!(built.get());
    }

    #[test]
    fn test_deferred_build_failure_rejects() {
        let policy = Deferred(|| -> Result<Permissive, ProgramError> {
            Err(ProgramError::NotEnoughAccountKeys)
        });
        let transfer = TransferContext {
            source: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            destination: Pubkey::new_unique(),
            authority: Pubkey::new_unique(),
            amount: 1,
            decimals: 0,
            instruction_data: &[],
            trailing: vec![],
        };
        assert_eq!(
            policy.approve(&transfer),
            Err(ProgramError::NotEnoughAccountKeys)
        );
    }
}
