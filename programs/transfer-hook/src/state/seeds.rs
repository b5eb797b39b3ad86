//! Seed Configurations
//!
//! A derived extra account is described by a list of seeds. Each seed is
//! either literal bytes or a reference into the transfer being validated,
//! and is resolved to concrete bytes at transfer time.
//!
//! # Packed Layout
//!
//! All seeds of one descriptor are packed into the 32-byte address config
//! of its record, one after another, as `[tag][payload]`:
//!
//! | Tag | Seed | Payload |
//! |-----|------|---------|
//! | 0 | (end) | none, the rest of the config must be zero |
//! | 1 | Literal | `[length: u8][bytes...]` |
//! | 2 | InstructionData | `[index: u8][length: u8]` |
//! | 3 | AccountKey | `[index: u8]` |

use crate::error::TransferHookError;
use solana_program::{program_error::ProgramError, pubkey::MAX_SEED_LEN};

/// Size of the address config a seed list is packed into.
pub const ADDRESS_CONFIG_LEN: usize = 32;

/// Most seeds one descriptor may declare.
///
/// One seed slot of the PDA derivation is taken by the bump.
pub const MAX_SEEDS_PER_ACCOUNT: usize = solana_program::pubkey::MAX_SEEDS - 1;

const TAG_END: u8 = 0;
const TAG_LITERAL: u8 = 1;
const TAG_INSTRUCTION_DATA: u8 = 2;
const TAG_ACCOUNT_KEY: u8 = 3;

// =============================================================================
// SEED
// =============================================================================

/// One component of a derived address formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Seed {
    /// Fixed bytes, e.g. a prefix like `b"counter"`.
    Literal {
        /// The bytes used as-is
        bytes: Vec<u8>,
    },

    /// A slice of the `Execute` instruction data.
    ///
    /// Offsets are into the full data, discriminator included, so the
    /// transfer amount lives at `index: 8, length: 8`.
    InstructionData {
        /// Start offset into the instruction data
        index: u8,
        /// Number of bytes to take
        length: u8,
    },

    /// The key of an account already present in the `Execute` accounts.
    ///
    /// Indices 0-3 are source, mint, destination and authority, 4 is the
    /// extra account meta list, and 5 onwards are earlier extra accounts.
    AccountKey {
        /// Index into the accounts preceding this one
        index: u8,
    },
}

impl Seed {
    /// Number of bytes this seed takes in the packed config.
    pub fn packed_len(&self) -> usize {
        match self {
            Seed::Literal { bytes } => 2 + bytes.len(),
            Seed::InstructionData { .. } => 3,
            Seed::AccountKey { .. } => 2,
        }
    }

    /// Pack a seed list into a 32-byte address config.
    ///
    /// # Errors
    ///
    /// `InvalidAddressConfig` when the list is empty, does not fit,
    /// declares too many seeds, or contains a component longer than a PDA seed.
    pub fn pack_address_config(seeds: &[Seed]) -> Result<[u8; ADDRESS_CONFIG_LEN], ProgramError> {
        if seeds.is_empty() || seeds.len() > MAX_SEEDS_PER_ACCOUNT {
            return Err(TransferHookError::InvalidAddressConfig.into());
        }

        let packed_len: usize = seeds.iter().map(Seed::packed_len).sum();
        if packed_len > ADDRESS_CONFIG_LEN {
            return Err(TransferHookError::InvalidAddressConfig.into());
        }

        let mut config = [0u8; ADDRESS_CONFIG_LEN];
        let mut offset = 0;
        for seed in seeds {
            match seed {
                Seed::Literal { bytes } => {
                    // A literal always fits a PDA seed once the config fits,
                    // but keep the bound explicit.
                    if bytes.len() > MAX_SEED_LEN {
                        return Err(TransferHookError::InvalidAddressConfig.into());
                    }
                    config[offset] = TAG_LITERAL;
                    config[offset + 1] = bytes.len() as u8;
                    config[offset + 2..offset + 2 + bytes.len()].copy_from_slice(bytes);
                }
                Seed::InstructionData { index, length } => {
                    if *length as usize > MAX_SEED_LEN {
                        return Err(TransferHookError::InvalidAddressConfig.into());
                    }
                    config[offset] = TAG_INSTRUCTION_DATA;
                    config[offset + 1] = *index;
                    config[offset + 2] = *length;
                }
                Seed::AccountKey { index } => {
                    config[offset] = TAG_ACCOUNT_KEY;
                    config[offset + 1] = *index;
                }
            }
            offset += seed.packed_len();
        }

        Ok(config)
    }

    /// Unpack a seed list from a 32-byte address config.
    ///
    /// The config is read until an end tag; everything after it must be
    /// zero so that every config has exactly one encoding.
    ///
    /// # Errors
    ///
    /// `MalformedRecord` on an unknown tag, a payload running past the
    /// config, an oversized component, or non-zero padding.
    pub fn unpack_address_config(config: &[u8; ADDRESS_CONFIG_LEN]) -> Result<Vec<Seed>, ProgramError> {
        let mut seeds = Vec::new();
        let mut offset = 0;

        while offset < ADDRESS_CONFIG_LEN {
            let tag = config[offset];
            let seed = match tag {
                TAG_END => break,
                TAG_LITERAL => {
                    let length = *config
                        .get(offset + 1)
                        .ok_or(TransferHookError::MalformedRecord)? as usize;
                    let bytes = config
                        .get(offset + 2..offset + 2 + length)
                        .ok_or(TransferHookError::MalformedRecord)?;
                    Seed::Literal {
                        bytes: bytes.to_vec(),
                    }
                }
                TAG_INSTRUCTION_DATA => {
                    let payload = config
                        .get(offset + 1..offset + 3)
                        .ok_or(TransferHookError::MalformedRecord)?;
                    if payload[1] as usize > MAX_SEED_LEN {
                        return Err(TransferHookError::MalformedRecord.into());
                    }
                    Seed::InstructionData {
                        index: payload[0],
                        length: payload[1],
                    }
                }
                TAG_ACCOUNT_KEY => {
                    let index = *config
                        .get(offset + 1)
                        .ok_or(TransferHookError::MalformedRecord)?;
                    Seed::AccountKey { index }
                }
                _ => return Err(TransferHookError::MalformedRecord.into()),
            };
            offset += seed.packed_len();
            seeds.push(seed);
        }

        if config[offset.min(ADDRESS_CONFIG_LEN)..].iter().any(|b| *b != 0) {
            return Err(TransferHookError::MalformedRecord.into());
        }
        if seeds.is_empty() || seeds.len() > MAX_SEEDS_PER_ACCOUNT {
            return Err(TransferHookError::MalformedRecord.into());
        }

        Ok(seeds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_layout() {
        let config = Seed::pack_address_config(&[
            Seed::Literal {
                bytes: b"abc".to_vec(),
            },
            Seed::InstructionData {
                index: 8,
                length: 8,
            },
            Seed::AccountKey { index: 1 },
        ])
        .unwrap();

        assert_eq!(&config[..12], &[1, 3, b'a', b'b', b'c', 2, 8, 8, 3, 1, 0, 0]);
        assert!(config[10..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_unpack_restores_seeds() {
        let seeds = vec![
            Seed::Literal {
                bytes: b"extra-account-metas".to_vec(),
            },
            Seed::AccountKey { index: 1 },
        ];
        let config = Seed::pack_address_config(&seeds).unwrap();
        assert_eq!(Seed::unpack_address_config(&config).unwrap(), seeds);
    }

    #[test]
    fn test_pack_rejects_overflowing_config() {
        let seeds = [Seed::Literal {
            bytes: vec![7u8; 31],
        }];
        assert_eq!(
            Seed::pack_address_config(&seeds),
            Err(TransferHookError::InvalidAddressConfig.into())
        );
    }

    #[test]
    fn test_pack_rejects_oversized_instruction_slice() {
        let seeds = [Seed::InstructionData {
            index: 0,
            length: 33,
        }];
        assert_eq!(
            Seed::pack_address_config(&seeds),
            Err(TransferHookError::InvalidAddressConfig.into())
        );
    }

    #[test]
    fn test_pack_rejects_too_many_seeds() {
        let seeds = vec![Seed::AccountKey { index: 0 }; MAX_SEEDS_PER_ACCOUNT + 1];
        assert_eq!(
            Seed::pack_address_config(&seeds),
            Err(TransferHookError::InvalidAddressConfig.into())
        );
    }

    #[test]
    fn test_unpack_rejects_unknown_tag() {
        let mut config = [0u8; ADDRESS_CONFIG_LEN];
        config[0] = 9;
        assert_eq!(
            Seed::unpack_address_config(&config),
            Err(TransferHookError::MalformedRecord.into())
        );
    }

    #[test]
    fn test_unpack_rejects_literal_past_end() {
        let mut config = [0u8; ADDRESS_CONFIG_LEN];
        config[0] = TAG_LITERAL;
        config[1] = 31;
        assert_eq!(
            Seed::unpack_address_config(&config),
            Err(TransferHookError::MalformedRecord.into())
        );
    }

    #[test]
    fn test_unpack_rejects_bytes_after_end() {
        let mut config = [0u8; ADDRESS_CONFIG_LEN];
        config[0] = TAG_ACCOUNT_KEY;
        config[1] = 1;
        config[5] = 0xff;
        assert_eq!(
            Seed::unpack_address_config(&config),
            Err(TransferHookError::MalformedRecord.into())
        );
    }

    #[test]
    fn test_unpack_rejects_empty_config() {
        let config = [0u8; ADDRESS_CONFIG_LEN];
        assert_eq!(
            Seed::unpack_address_config(&config),
            Err(TransferHookError::MalformedRecord.into())
        );
    }
}
