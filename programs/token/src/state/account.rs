//! Token Account State
//!
//! A token account holds a balance of one mint for one owner.
//!
//! # Size: 73 bytes

use crate::state::Pack;
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

// =============================================================================
// ACCOUNT STATE ENUM
// =============================================================================

/// The lifecycle of a token account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccountState {
    /// Created but InitializeAccount not yet called.
    #[default]
    Uninitialized,

    /// Ready to hold and move tokens.
    Initialized,
}

impl AccountState {
    /// Convert a u8 byte to AccountState.
    pub fn from_u8(value: u8) -> Result<Self, ProgramError> {
        match value {
            0 => Ok(AccountState::Uninitialized),
            1 => Ok(AccountState::Initialized),
            _ => Err(ProgramError::InvalidAccountData),
        }
    }

    /// Convert AccountState to a u8 byte.
    pub fn to_u8(self) -> u8 {
        match self {
            AccountState::Uninitialized => 0,
            AccountState::Initialized => 1,
        }
    }
}

// =============================================================================
// ACCOUNT STRUCTURE
// =============================================================================

/// Token account data structure.
///
/// # Memory Layout (73 bytes total)
///
/// ```text
/// ┌──────────────────────────────────────────┐
/// │ Offset │ Size │ Field  │ Type            │
/// ├────────┼──────┼────────┼─────────────────┤
/// │ 0      │ 32   │ mint   │ Pubkey          │
/// │ 32     │ 32   │ owner  │ Pubkey          │
/// │ 64     │ 8    │ amount │ u64             │
/// │ 72     │ 1    │ state  │ AccountState    │
/// └──────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Account {
    /// The mint this account holds tokens of.
    pub mint: Pubkey,

    /// The owner, who signs transfers out of this account.
    pub owner: Pubkey,

    /// Balance in base units.
    pub amount: u64,

    /// Lifecycle state.
    pub state: AccountState,
}

impl Account {
    /// Account size in bytes.
    pub const LEN: usize = 73;

    pub fn is_initialized(&self) -> bool {
        self.state != AccountState::Uninitialized
    }
}

impl Pack for Account {
    const LEN: usize = 73;

    fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let input = array_ref![input, 0, Account::LEN];

        #[allow(clippy::ptr_offset_with_cast)]
        let (mint, owner, amount, state) = array_refs![input, 32, 32, 8, 1];

        Ok(Account {
            mint: Pubkey::new_from_array(*mint),
            owner: Pubkey::new_from_array(*owner),
            amount: u64::from_le_bytes(*amount),
            state: AccountState::from_u8(state[0])?,
        })
    }

    fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError> {
        let output = array_mut_ref![output, 0, Account::LEN];

        #[allow(clippy::ptr_offset_with_cast)]
        let (mint_dst, owner_dst, amount_dst, state_dst) = mut_array_refs![output, 32, 32, 8, 1];

        mint_dst.copy_from_slice(self.mint.as_ref());
        owner_dst.copy_from_slice(self.owner.as_ref());
        *amount_dst = self.amount.to_le_bytes();
        state_dst[0] = self.state.to_u8();

        Ok(())
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
