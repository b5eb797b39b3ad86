//! Hook Invocation Gate
//!
//! Transfer-time validation of the trailing accounts.
//!
//! The accounts after the four base accounts of `Execute` must be exactly:
//!
//! ```text
//! ┌──────────┬──────────────────────────────────────────┐
//! │ Position │ Account                                  │
//! ├──────────┼──────────────────────────────────────────┤
//! │ 0        │ extra account meta list (readonly)       │
//! │ 1..=N    │ resolved descriptors, with their flags   │
//! │ N+1      │ this hook program (readonly)             │
//! └──────────┴──────────────────────────────────────────┘
//! ```
//!
//! Each descriptor is resolved against the keys of the accounts before it,
//! so a seed may reference the base accounts, the list, or an earlier
//! extra account.
//!
//! # States
//!
//! ```text
//! Idle ──evaluate──▶ Validating ──▶ Accepted
//!   ▲                          └──▶ Rejected
//!   └────────────── reset ─────────────┘
//! ```

use crate::error::TransferHookError;
use crate::policy::TransferPolicy;
use crate::resolver::{resolve, ResolveContext};
use crate::state::ExtraAccountMeta;
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    instruction::AccountMeta,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

/// Number of base accounts before the trailing accounts.
pub const BASE_ACCOUNTS_LEN: usize = 4;

// =============================================================================
// TRANSFER CONTEXT
// =============================================================================

/// Everything the gate sees of one transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferContext<'a> {
    /// Source token account
    pub source: Pubkey,
    /// Mint of the transferred token
    pub mint: Pubkey,
    /// Destination token account
    pub destination: Pubkey,
    /// Owner of the source account
    pub authority: Pubkey,
    /// Amount transferred
    pub amount: u64,
    /// Decimals of the mint
    pub decimals: u8,
    /// Full `Execute` instruction data, used for seed resolution
    pub instruction_data: &'a [u8],
    /// Accounts supplied after the base accounts, in order
    pub trailing: Vec<AccountMeta>,
}

impl<'a> TransferContext<'a> {
    /// Build the context from the accounts of an `Execute` instruction.
    ///
    /// Fails with `NotEnoughAccountKeys` when a base account is missing.
    pub fn from_account_infos(
        accounts: &[AccountInfo],
        instruction_data: &'a [u8],
        amount: u64,
        decimals: u8,
    ) -> Result<Self, ProgramError> {
        if accounts.len() < BASE_ACCOUNTS_LEN {
            return Err(ProgramError::NotEnoughAccountKeys);
        }

        Ok(Self {
            source: *accounts[0].key,
            mint: *accounts[1].key,
            destination: *accounts[2].key,
            authority: *accounts[3].key,
            amount,
            decimals,
            instruction_data,
            trailing: accounts[BASE_ACCOUNTS_LEN..]
                .iter()
                .map(|info| AccountMeta {
                    pubkey: *info.key,
                    is_signer: info.is_signer,
                    is_writable: info.is_writable,
                })
                .collect(),
        })
    }

    /// Keys of the base accounts, in instruction order.
    pub fn base_keys(&self) -> [Pubkey; BASE_ACCOUNTS_LEN] {
        [self.source, self.mint, self.destination, self.authority]
    }
}

// =============================================================================
// EXPECTED ACCOUNTS
// =============================================================================

/// Lazily resolves the expected trailing accounts, position by position.
///
/// Yields an error at the first descriptor that cannot be resolved and
/// nothing after it.
pub struct ExpectedAccounts<'a> {
    metas: &'a [ExtraAccountMeta],
    instruction_data: &'a [u8],
    hook_program_id: Pubkey,
    list_address: Pubkey,
    keys: Vec<Pubkey>,
    position: usize,
    failed: bool,
}

impl<'a> ExpectedAccounts<'a> {
    /// Start at trailing position 0, with the base accounts as the keys
    /// seeds may reference.
    pub fn new(
        transfer: &TransferContext<'a>,
        hook_program_id: &Pubkey,
        metas: &'a [ExtraAccountMeta],
    ) -> Self {
        Self {
            metas,
            instruction_data: transfer.instruction_data,
            hook_program_id: *hook_program_id,
            list_address: crate::get_extra_account_meta_list_address(
                &transfer.mint,
                hook_program_id,
            ),
            keys: transfer.base_keys().to_vec(),
            position: 0,
            failed: false,
        }
    }

    fn resolve_at(&self, position: usize) -> Result<AccountMeta, ProgramError> {
        if position == 0 {
            return Ok(AccountMeta::new_readonly(self.list_address, false));
        }

        match self.metas.get(position - 1) {
            Some(meta) => {
                let context = ResolveContext {
                    instruction_data: self.instruction_data,
                    account_keys: &self.keys,
                };
                let pubkey = resolve(meta, &context, &self.hook_program_id)?;
                Ok(AccountMeta {
                    pubkey,
                    is_signer: meta.is_signer,
                    is_writable: meta.is_writable,
                })
            }
            None => Ok(AccountMeta::new_readonly(self.hook_program_id, false)),
        }
    }
}

impl Iterator for ExpectedAccounts<'_> {
    type Item = Result<AccountMeta, ProgramError>;

    fn next(&mut self) -> Option<Self::Item> {
        // list + descriptors + hook program
        if self.failed || self.position > self.metas.len() + 1 {
            return None;
        }

        let expected = self.resolve_at(self.position);
        self.position += 1;
        match &expected {
            Ok(meta) => self.keys.push(meta.pubkey),
            Err(_) => self.failed = true,
        }
        Some(expected)
    }
}

/// Every trailing account a transfer must carry, in order.
pub fn expected_trailing(
    transfer: &TransferContext,
    hook_program_id: &Pubkey,
    metas: &[ExtraAccountMeta],
) -> Result<Vec<AccountMeta>, ProgramError> {
    ExpectedAccounts::new(transfer, hook_program_id, metas).collect()
}

// =============================================================================
// REJECTIONS
// =============================================================================

/// The first trailing position that differs from the resolved list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountMismatch {
    /// Position within the trailing accounts
    pub position: usize,
    /// What the list requires there; `None` past the end of the list
    pub expected: Option<AccountMeta>,
    /// What was supplied there; `None` past the end of the supplied accounts
    pub actual: Option<AccountMeta>,
}

impl AccountMismatch {
    /// Log the position and both sides of the mismatch.
    pub fn log(&self) {
        msg!(
            "Account mismatch at trailing position {}: expected {}, got {}",
            self.position,
            describe(self.expected.as_ref()),
            describe(self.actual.as_ref())
        );
    }
}

fn describe(meta: Option<&AccountMeta>) -> String {
    match meta {
        Some(meta) => format!(
            "{} (signer: {}, writable: {})",
            meta.pubkey, meta.is_signer, meta.is_writable
        ),
        None => "no account".to_string(),
    }
}

/// Why the gate rejected a transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// A trailing account differs from the resolved list.
    AccountMismatch(AccountMismatch),

    /// The descriptor at `position` could not be resolved.
    Unresolved {
        /// Position within the trailing accounts
        position: usize,
        /// Error raised by the seed resolver
        error: ProgramError,
    },

    /// The accounts matched but the transfer policy refused.
    Policy(ProgramError),
}

impl Rejection {
    /// Log why the transfer was rejected.
    pub fn log(&self) {
        match self {
            Rejection::AccountMismatch(mismatch) => mismatch.log(),
            Rejection::Unresolved { position, error } => {
                msg!("Cannot resolve trailing position {}: {}", position, error)
            }
            Rejection::Policy(error) => msg!("Transfer refused by policy: {}", error),
        }
    }
}

impl From<Rejection> for ProgramError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::AccountMismatch(_) => TransferHookError::AccountMismatch.into(),
            Rejection::Unresolved { error, .. } => error,
            Rejection::Policy(error) => error,
        }
    }
}

// =============================================================================
// GATE
// =============================================================================

/// Where the gate is in the evaluation of one transfer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GateState {
    /// Waiting for a transfer
    #[default]
    Idle,
    /// Comparing accounts and running the policy
    Validating,
    /// The last transfer passed
    Accepted,
    /// The last transfer was refused
    Rejected,
}

/// Validates transfers against a resolved list, then applies a policy.
pub struct Gate<P> {
    policy: P,
    state: GateState,
}

impl<P: TransferPolicy> Gate<P> {
    /// An idle gate that applies `policy` once the accounts match.
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            state: GateState::Idle,
        }
    }

    /// Current state of the gate.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Compare the trailing accounts of `transfer` with `metas`, position
    /// by position, then ask the policy.
    ///
    /// Leaves the gate `Accepted` or `Rejected`; call [`Gate::reset`]
    /// before the next transfer.
    pub fn evaluate(
        &mut self,
        transfer: &TransferContext,
        hook_program_id: &Pubkey,
        metas: &[ExtraAccountMeta],
    ) -> Result<(), Rejection> {
        self.state = GateState::Validating;

        let outcome = check_accounts(transfer, hook_program_id, metas)
            .and_then(|()| self.policy.approve(transfer).map_err(Rejection::Policy));

        self.state = match outcome {
            Ok(()) => GateState::Accepted,
            Err(_) => GateState::Rejected,
        };
        outcome
    }

    /// Return to `Idle` after an evaluation.
    pub fn reset(&mut self) {
        self.state = GateState::Idle;
    }

    /// Evaluate, log the outcome and return to `Idle`.
    pub fn check(
        &mut self,
        transfer: &TransferContext,
        hook_program_id: &Pubkey,
        metas: &[ExtraAccountMeta],
    ) -> ProgramResult {
        let outcome = self.evaluate(transfer, hook_program_id, metas);
        self.reset();

        match outcome {
            Ok(()) => {
                msg!("Transfer accepted");
                Ok(())
            }
            Err(rejection) => {
                rejection.log();
                Err(rejection.into())
            }
        }
    }
}

fn check_accounts(
    transfer: &TransferContext,
    hook_program_id: &Pubkey,
    metas: &[ExtraAccountMeta],
) -> Result<(), Rejection> {
    let mut expected_len = 0;

    for (position, expected) in ExpectedAccounts::new(transfer, hook_program_id, metas).enumerate() {
        let expected = expected.map_err(|error| Rejection::Unresolved { position, error })?;
        let actual = transfer.trailing.get(position);

        if actual != Some(&expected) {
            return Err(Rejection::AccountMismatch(AccountMismatch {
                position,
                expected: Some(expected),
                actual: actual.cloned(),
            }));
        }
        expected_len = position + 1;
    }

    if let Some(surplus) = transfer.trailing.get(expected_len) {
        return Err(Rejection::AccountMismatch(AccountMismatch {
            position: expected_len,
            expected: None,
            actual: Some(surplus.clone()),
        }));
    }

    Ok(())
}
