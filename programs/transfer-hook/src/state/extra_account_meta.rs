//! Extra Account Meta Record
//!
//! One descriptor of an account the hook requires on every transfer.
//!
//! # Size: 35 bytes
//!
//! ```text
//! ┌────────┬──────┬────────────────┬──────────────────────────────┐
//! │ Offset │ Size │ Field          │ Meaning                      │
//! ├────────┼──────┼────────────────┼──────────────────────────────┤
//! │ 0      │ 1    │ discriminant   │ 0 fixed, 1 derived,          │
//! │        │      │                │ 128+i derived under key i    │
//! │ 1      │ 32   │ address_config │ pubkey or packed seeds       │
//! │ 33     │ 1    │ is_signer      │ bool (0 or 1)                │
//! │ 34     │ 1    │ is_writable    │ bool (0 or 1)                │
//! └────────┴──────┴────────────────┴──────────────────────────────┘
//! ```

use crate::error::TransferHookError;
use crate::state::seeds::{Seed, ADDRESS_CONFIG_LEN};
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

const DISCRIMINANT_FIXED: u8 = 0;
const DISCRIMINANT_DERIVED: u8 = 1;
const DISCRIMINANT_EXTERNAL_BASE: u8 = 128;

// =============================================================================
// ADDRESS
// =============================================================================

/// Where the account address comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountAddress {
    /// A literal address.
    Fixed(Pubkey),

    /// A PDA of the hook program over the given seeds.
    Derived {
        /// Seed formula, resolved in order
        seeds: Vec<Seed>,
    },

    /// A PDA of the program whose key sits at `program_index` in the
    /// `Execute` accounts.
    DerivedExternal {
        /// Index of the owning program's account; below 128
        program_index: u8,
        /// Seed formula, resolved in order
        seeds: Vec<Seed>,
    },
}

// =============================================================================
// EXTRA ACCOUNT META
// =============================================================================

/// An extra account descriptor with the flags it must be supplied with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtraAccountMeta {
    /// Address or address formula
    pub address: AccountAddress,
    /// Whether the account must be supplied as a signer
    pub is_signer: bool,
    /// Whether the account must be supplied as writable
    pub is_writable: bool,
}

impl ExtraAccountMeta {
    /// Serialized size of one record.
    pub const LEN: usize = 35;

    /// Descriptor for a fixed address.
    pub fn new_with_pubkey(pubkey: &Pubkey, is_signer: bool, is_writable: bool) -> Self {
        Self {
            address: AccountAddress::Fixed(*pubkey),
            is_signer,
            is_writable,
        }
    }

    /// Descriptor for a PDA of the hook program.
    ///
    /// Fails with `InvalidAddressConfig` if the seeds cannot be packed.
    pub fn new_with_seeds(
        seeds: &[Seed],
        is_signer: bool,
        is_writable: bool,
    ) -> Result<Self, ProgramError> {
        Seed::pack_address_config(seeds)?;
        Ok(Self {
            address: AccountAddress::Derived {
                seeds: seeds.to_vec(),
            },
            is_signer,
            is_writable,
        })
    }

    /// Descriptor for a PDA of another program, found at `program_index`.
    ///
    /// Fails with `InvalidAddressConfig` if the index is 128 or above or
    /// the seeds cannot be packed.
    pub fn new_external_pda_with_seeds(
        program_index: u8,
        seeds: &[Seed],
        is_signer: bool,
        is_writable: bool,
    ) -> Result<Self, ProgramError> {
        if program_index >= DISCRIMINANT_EXTERNAL_BASE {
            return Err(TransferHookError::InvalidAddressConfig.into());
        }
        Seed::pack_address_config(seeds)?;
        Ok(Self {
            address: AccountAddress::DerivedExternal {
                program_index,
                seeds: seeds.to_vec(),
            },
            is_signer,
            is_writable,
        })
    }

    /// Write this descriptor into a 35-byte record.
    pub fn pack(&self, output: &mut [u8; ExtraAccountMeta::LEN]) -> Result<(), ProgramError> {
        #[allow(clippy::ptr_offset_with_cast)]
        let (discriminant_dst, config_dst, is_signer_dst, is_writable_dst) =
            mut_array_refs![output, 1, ADDRESS_CONFIG_LEN, 1, 1];

        match &self.address {
            AccountAddress::Fixed(pubkey) => {
                discriminant_dst[0] = DISCRIMINANT_FIXED;
                config_dst.copy_from_slice(pubkey.as_ref());
            }
            AccountAddress::Derived { seeds } => {
                discriminant_dst[0] = DISCRIMINANT_DERIVED;
                *config_dst = Seed::pack_address_config(seeds)?;
            }
            AccountAddress::DerivedExternal {
                program_index,
                seeds,
            } => {
                if *program_index >= DISCRIMINANT_EXTERNAL_BASE {
                    return Err(TransferHookError::InvalidAddressConfig.into());
                }
                discriminant_dst[0] = DISCRIMINANT_EXTERNAL_BASE + program_index;
                *config_dst = Seed::pack_address_config(seeds)?;
            }
        }

        is_signer_dst[0] = self.is_signer as u8;
        is_writable_dst[0] = self.is_writable as u8;

        Ok(())
    }

    /// Read a descriptor from a 35-byte record.
    ///
    /// Fails with `MalformedRecord` on discriminants 2-127, flag bytes
    /// other than 0 or 1, or an invalid seed config.
    pub fn unpack(input: &[u8; ExtraAccountMeta::LEN]) -> Result<Self, ProgramError> {
        #[allow(clippy::ptr_offset_with_cast)]
        let (discriminant, config, is_signer, is_writable) =
            array_refs![input, 1, ADDRESS_CONFIG_LEN, 1, 1];

        let address = match discriminant[0] {
            DISCRIMINANT_FIXED => AccountAddress::Fixed(Pubkey::new_from_array(*config)),
            DISCRIMINANT_DERIVED => AccountAddress::Derived {
                seeds: Seed::unpack_address_config(config)?,
            },
            d if d >= DISCRIMINANT_EXTERNAL_BASE => AccountAddress::DerivedExternal {
                program_index: d - DISCRIMINANT_EXTERNAL_BASE,
                seeds: Seed::unpack_address_config(config)?,
            },
            _ => return Err(TransferHookError::MalformedRecord.into()),
        };

        Ok(Self {
            address,
            is_signer: unpack_flag(is_signer[0])?,
            is_writable: unpack_flag(is_writable[0])?,
        })
    }

    /// Read a descriptor from the start of a slice of at least 35 bytes.
    pub fn unpack_from_slice(input: &[u8]) -> Result<Self, ProgramError> {
        if input.len() < Self::LEN {
            return Err(TransferHookError::MalformedRecord.into());
        }
        Self::unpack(array_ref![input, 0, ExtraAccountMeta::LEN])
    }

    /// Write a descriptor into the start of a slice of at least 35 bytes.
    pub fn pack_into_slice(&self, output: &mut [u8]) -> Result<(), ProgramError> {
        if output.len() < Self::LEN {
            return Err(ProgramError::AccountDataTooSmall);
        }
        self.pack(array_mut_ref![output, 0, ExtraAccountMeta::LEN])
    }
}

fn unpack_flag(byte: u8) -> Result<bool, ProgramError> {
    match byte {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(TransferHookError::MalformedRecord.into()),
    }
}
