//! Seed Resolver
//!
//! Turns a descriptor into a concrete address for one transfer.
//!
//! Resolution is a pure function of the descriptor, the `Execute`
//! instruction data and the keys of the accounts that precede the
//! descriptor. A client assembling a transfer and the gate validating it
//! therefore always arrive at the same addresses.

use crate::error::TransferHookError;
use crate::state::{AccountAddress, ExtraAccountMeta, Seed};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

/// What a descriptor may reference while being resolved.
#[derive(Clone, Copy, Debug)]
pub struct ResolveContext<'a> {
    /// Full `Execute` instruction data, discriminator included
    pub instruction_data: &'a [u8],
    /// Keys of every account before the one being resolved
    pub account_keys: &'a [Pubkey],
}

/// Derive a program address from raw seeds.
///
/// Same formula as `Pubkey::find_program_address`, but returns an error
/// instead of panicking when the seeds are not usable.
pub fn derive_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<Pubkey, ProgramError> {
    Pubkey::try_find_program_address(seeds, program_id)
        .map(|(address, _bump)| address)
        .ok_or(ProgramError::InvalidSeeds)
}

/// Resolve each seed of a formula to its bytes, in declared order.
pub fn resolve_seeds<'a>(
    seeds: &'a [Seed],
    context: &ResolveContext<'a>,
) -> Result<Vec<&'a [u8]>, ProgramError> {
    seeds
        .iter()
        .map(|seed| -> Result<&'a [u8], ProgramError> {
            match seed {
                Seed::Literal { bytes } => Ok(bytes.as_slice()),
                Seed::InstructionData { index, length } => {
                    let start = *index as usize;
                    let end = start + *length as usize;
                    context
                        .instruction_data
                        .get(start..end)
                        .ok_or_else(|| TransferHookError::UnresolvedSeedReference.into())
                }
                Seed::AccountKey { index } => context
                    .account_keys
                    .get(*index as usize)
                    .map(|key| key.as_ref())
                    .ok_or_else(|| TransferHookError::UnresolvedSeedReference.into()),
            }
        })
        .collect()
}

/// Resolve a descriptor to the address it stands for.
///
/// # Errors
///
/// `UnresolvedSeedReference` when a seed or the external program index
/// points outside `context`; `InvalidSeeds` if no valid PDA exists.
pub fn resolve(
    meta: &ExtraAccountMeta,
    context: &ResolveContext,
    hook_program_id: &Pubkey,
) -> Result<Pubkey, ProgramError> {
    match &meta.address {
        AccountAddress::Fixed(pubkey) => Ok(*pubkey),
        AccountAddress::Derived { seeds } => {
            derive_address(&resolve_seeds(seeds, context)?, hook_program_id)
        }
        AccountAddress::DerivedExternal {
            program_index,
            seeds,
        } => {
            let program_id = context
                .account_keys
                .get(*program_index as usize)
                .ok_or(TransferHookError::UnresolvedSeedReference)?;
            derive_address(&resolve_seeds(seeds, context)?, program_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        hook: Pubkey,
        keys: Vec<Pubkey>,
        data: Vec<u8>,
    }

    impl Fixture {
        fn new() -> Self {
            let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8];
            data.extend_from_slice(&42u64.to_le_bytes());
            data.push(0);
            Self {
                hook: Pubkey::new_unique(),
                keys: (0..5).map(|_| Pubkey::new_unique()).collect(),
                data,
            }
        }

        fn context(&self) -> ResolveContext {
            ResolveContext {
                instruction_data: &self.data,
                account_keys: &self.keys,
            }
        }
    }

    #[test]
    fn test_fixed_resolves_to_itself() {
        let fixture = Fixture::new();
        let key = Pubkey::new_unique();
        let meta = ExtraAccountMeta::new_with_pubkey(&key, false, false);
        assert_eq!(resolve(&meta, &fixture.context(), &fixture.hook).unwrap(), key);
    }

    #[test]
    fn test_derived_matches_find_program_address() {
        let fixture = Fixture::new();
        let meta = ExtraAccountMeta::new_with_seeds(
            &[
                Seed::Literal {
                    bytes: b"extra-account-metas".to_vec(),
                },
                Seed::AccountKey { index: 1 },
            ],
            false,
            false,
        )
        .unwrap();

        let (expected, _) = Pubkey::find_program_address(
            &[b"extra-account-metas", fixture.keys[1].as_ref()],
            &fixture.hook,
        );
        assert_eq!(resolve(&meta, &fixture.context(), &fixture.hook).unwrap(), expected);
    }

    #[test]
    fn test_instruction_data_seed() {
        let fixture = Fixture::new();
        let meta = ExtraAccountMeta::new_with_seeds(
            &[Seed::InstructionData {
                index: 8,
                length: 8,
            }],
            false,
            false,
        )
        .unwrap();

        let (expected, _) =
            Pubkey::find_program_address(&[&42u64.to_le_bytes()], &fixture.hook);
        assert_eq!(resolve(&meta, &fixture.context(), &fixture.hook).unwrap(), expected);
    }

    #[test]
    fn test_external_pda_uses_program_at_index() {
        let fixture = Fixture::new();
        let meta = ExtraAccountMeta::new_external_pda_with_seeds(
            4,
            &[Seed::AccountKey { index: 0 }],
            false,
            false,
        )
        .unwrap();

        let (expected, _) =
            Pubkey::find_program_address(&[fixture.keys[0].as_ref()], &fixture.keys[4]);
        assert_eq!(resolve(&meta, &fixture.context(), &fixture.hook).unwrap(), expected);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let fixture = Fixture::new();
        let meta = ExtraAccountMeta::new_with_seeds(
            &[
                Seed::AccountKey { index: 2 },
                Seed::InstructionData {
                    index: 0,
                    length: 4,
                },
            ],
            false,
            true,
        )
        .unwrap();

        let first = resolve(&meta, &fixture.context(), &fixture.hook).unwrap();
        let second = resolve(&meta, &fixture.context(), &fixture.hook).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_out_of_range_instruction_slice() {
        let fixture = Fixture::new();
        let meta = ExtraAccountMeta::new_with_seeds(
            &[Seed::InstructionData {
                index: 10,
                length: 8,
            }],
            false,
            false,
        )
        .unwrap();
        assert_eq!(
            resolve(&meta, &fixture.context(), &fixture.hook),
            Err(TransferHookError::UnresolvedSeedReference.into())
        );
    }

    #[test]
    fn test_out_of_range_account_index() {
        let fixture = Fixture::new();
        let meta =
            ExtraAccountMeta::new_with_seeds(&[Seed::AccountKey { index: 5 }], false, false)
                .unwrap();
        assert_eq!(
            resolve(&meta, &fixture.context(), &fixture.hook),
            Err(TransferHookError::UnresolvedSeedReference.into())
        );

        let external = ExtraAccountMeta::new_external_pda_with_seeds(
            9,
            &[Seed::AccountKey { index: 0 }],
            false,
            false,
        )
        .unwrap();
        assert_eq!(
            resolve(&external, &fixture.context(), &fixture.hook),
            Err(TransferHookError::UnresolvedSeedReference.into())
        );
    }
}
