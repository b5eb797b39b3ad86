//! Mint Account State
//!
//! A Mint defines a token type: who may mint it, how much exists, how
//! amounts are displayed, and which transfer hook, if any, every checked
//! transfer of it must pass.
//!
//! # Size: 154 bytes
//!
//! The 82-byte base mint followed by the transfer hook extension.

use crate::state::{pack_coption_pubkey, unpack_coption_pubkey, COption, Pack};
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

// =============================================================================
// MINT STRUCTURE
// =============================================================================

/// Mint account data structure.
///
/// # Memory Layout (154 bytes total)
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────────┐
/// │ Offset │ Size │ Field                    │ Type                 │
/// ├────────┼──────┼──────────────────────────┼──────────────────────┤
/// │ 0      │ 36   │ mint_authority           │ COption<Pubkey>      │
/// │ 36     │ 8    │ supply                   │ u64                  │
/// │ 44     │ 1    │ decimals                 │ u8                   │
/// │ 45     │ 1    │ is_initialized           │ bool (0 or 1)        │
/// │ 46     │ 36   │ freeze_authority         │ COption<Pubkey>      │
/// ├────────┼──────┼──────────────────────────┼──────────────────────┤
/// │ 82     │ 36   │ transfer_hook_authority  │ COption<Pubkey>      │
/// │ 118    │ 36   │ transfer_hook_program_id │ COption<Pubkey>      │
/// ├────────┼──────┼──────────────────────────┼──────────────────────┤
/// │ Total  │ 154  │                          │                      │
/// └─────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Mint {
    /// The authority that can mint new tokens. `None` fixes the supply.
    pub mint_authority: COption<Pubkey>,

    /// Total number of tokens currently in existence.
    ///
    /// Always equals the sum of the balances of this mint's accounts.
    pub supply: u64,

    /// Number of decimal places for display purposes.
    ///
    /// `TransferChecked` must repeat this value.
    pub decimals: u8,

    /// Whether InitializeMint was called.
    pub is_initialized: bool,

    /// The authority that can freeze token accounts.
    pub freeze_authority: COption<Pubkey>,

    /// Authority recorded with the transfer hook binding.
    pub transfer_hook_authority: COption<Pubkey>,

    /// Program every checked transfer of this mint is routed through.
    ///
    /// Set before InitializeMint and fixed from then on.
    pub transfer_hook_program_id: COption<Pubkey>,
}

impl Mint {
    /// Size of the base mint, without the transfer hook extension.
    pub const BASE_LEN: usize = 82;

    /// Mint size in bytes.
    pub const LEN: usize = 154;

    /// The bound transfer hook program, if any.
    pub fn transfer_hook_program_id(&self) -> Option<&Pubkey> {
        self.transfer_hook_program_id.as_ref()
    }
}

impl Pack for Mint {
    const LEN: usize = 154;

    fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let input = array_ref![input, 0, Mint::LEN];

        #[allow(clippy::ptr_offset_with_cast)]
        let (
            mint_authority_bytes,
            supply_bytes,
            decimals_bytes,
            is_initialized_bytes,
            freeze_authority_bytes,
            transfer_hook_authority_bytes,
            transfer_hook_program_id_bytes,
        ) = array_refs![input, 36, 8, 1, 1, 36, 36, 36];

        let is_initialized = match is_initialized_bytes[0] {
            0 => false,
            1 => true,
            _ => return Err(ProgramError::InvalidAccountData),
        };

        Ok(Mint {
            mint_authority: unpack_coption_pubkey(mint_authority_bytes)?,
            supply: u64::from_le_bytes(*supply_bytes),
            decimals: decimals_bytes[0],
            is_initialized,
            freeze_authority: unpack_coption_pubkey(freeze_authority_bytes)?,
            transfer_hook_authority: unpack_coption_pubkey(transfer_hook_authority_bytes)?,
            transfer_hook_program_id: unpack_coption_pubkey(transfer_hook_program_id_bytes)?,
        })
    }

    fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError> {
        let output = array_mut_ref![output, 0, Mint::LEN];

        #[allow(clippy::ptr_offset_with_cast)]
        let (
            mint_authority_dst,
            supply_dst,
            decimals_dst,
            is_initialized_dst,
            freeze_authority_dst,
            transfer_hook_authority_dst,
            transfer_hook_program_id_dst,
        ) = mut_array_refs![output, 36, 8, 1, 1, 36, 36, 36];

        pack_coption_pubkey(&self.mint_authority, mint_authority_dst);
        *supply_dst = self.supply.to_le_bytes();
        decimals_dst[0] = self.decimals;
        is_initialized_dst[0] = self.is_initialized as u8;
        pack_coption_pubkey(&self.freeze_authority, freeze_authority_dst);
        pack_coption_pubkey(&self.transfer_hook_authority, transfer_hook_authority_dst);
        pack_coption_pubkey(&self.transfer_hook_program_id, transfer_hook_program_id_dst);

        Ok(())
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
