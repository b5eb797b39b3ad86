//! Account State Structures
//!
//! # Account Types
//!
//! | Type | Size | Description |
//! |------|------|-------------|
//! | Mint | 154 bytes | Token type, with its transfer hook binding |
//! | Account | 73 bytes | Holds tokens for an owner |
//!
//! # Serialization
//!
//! All structures use fixed-size, deterministic serialization:
//! little-endian integers, no padding between fields.

pub mod account;
pub mod mint;

pub use account::{Account, AccountState};
pub use mint::Mint;

use arrayref::{array_refs, mut_array_refs};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

// =============================================================================
// PACK TRAIT
// =============================================================================

/// Packing and unpacking of fixed-size account state.
pub trait Pack: Sized {
    /// The fixed size in bytes when serialized.
    const LEN: usize;

    /// Deserialize from a byte slice of at least `LEN` bytes.
    fn unpack(input: &[u8]) -> Result<Self, ProgramError>;

    /// Serialize into a byte slice of at least `LEN` bytes.
    fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError>;

    /// Unpack after checking that `src.len() == Self::LEN`.
    fn unpack_from_slice(src: &[u8]) -> Result<Self, ProgramError> {
        if src.len() != Self::LEN {
            return Err(ProgramError::InvalidAccountData);
        }
        Self::unpack(src)
    }

    /// Pack after checking that `dst.len() == Self::LEN`.
    fn pack_into_slice(&self, dst: &mut [u8]) -> Result<(), ProgramError> {
        if dst.len() != Self::LEN {
            return Err(ProgramError::InvalidAccountData);
        }
        self.pack(dst)
    }
}

// =============================================================================
// COPTION - COMPACT OPTIONAL TYPE
// =============================================================================

/// An optional value with a fixed on-chain layout.
///
/// ```text
/// COption<Pubkey>: 36 bytes
/// [tag: 4 bytes, little-endian u32][value: 32 bytes]
///
/// Tag = 0: None (value bytes are zeros)
/// Tag = 1: Some (value bytes contain the Pubkey)
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct COption<T> {
    value: Option<T>,
}

impl<T> COption<T> {
    pub fn some(value: T) -> Self {
        Self { value: Some(value) }
    }

    pub fn none() -> Self {
        Self { value: None }
    }

    pub fn is_some(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_none(&self) -> bool {
        self.value.is_none()
    }

    pub fn as_ref(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

impl<T> From<Option<T>> for COption<T> {
    fn from(opt: Option<T>) -> Self {
        Self { value: opt }
    }
}

impl<T> From<COption<T>> for Option<T> {
    fn from(copt: COption<T>) -> Self {
        copt.value
    }
}

/// Size of a packed `COption<Pubkey>`.
pub const COPTION_PUBKEY_LEN: usize = 36;

pub(crate) fn unpack_coption_pubkey(
    src: &[u8; COPTION_PUBKEY_LEN],
) -> Result<COption<Pubkey>, ProgramError> {
    let (tag, body) = array_refs![src, 4, 32];
    match u32::from_le_bytes(*tag) {
        0 => Ok(COption::none()),
        1 => Ok(COption::some(Pubkey::new_from_array(*body))),
        _ => Err(ProgramError::InvalidAccountData),
    }
}

pub(crate) fn pack_coption_pubkey(src: &COption<Pubkey>, dst: &mut [u8; COPTION_PUBKEY_LEN]) {
    let (tag, body) = mut_array_refs![dst, 4, 32];
    match src.as_ref() {
        Some(pubkey) => {
            *tag = 1u32.to_le_bytes();
            body.copy_from_slice(pubkey.as_ref());
        }
        None => {
            *tag = [0; 4];
            *body = [0; 32];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coption_pubkey_layout() {
        let key = Pubkey::new_unique();
        let mut dst = [0xffu8; COPTION_PUBKEY_LEN];

        pack_coption_pubkey(&COption::some(key), &mut dst);
        assert_eq!(&dst[..4], &[1, 0, 0, 0]);
        assert_eq!(unpack_coption_pubkey(&dst).unwrap(), COption::some(key));

        pack_coption_pubkey(&COption::none(), &mut dst);
        assert_eq!(dst, [0u8; COPTION_PUBKEY_LEN]);
        assert!(unpack_coption_pubkey(&dst).unwrap().is_none());
    }

    #[test]
    fn test_coption_pubkey_invalid_tag() {
        let mut src = [0u8; COPTION_PUBKEY_LEN];
        src[0] = 2;
        assert_eq!(
            unpack_coption_pubkey(&src),
            Err(ProgramError::InvalidAccountData)
        );
    }
}
