//! Extra Account Meta List Codec
//!
//! The body of the list account: a record count followed by that many
//! fixed-size records, in the order the trailing accounts must appear.
//!
//! ```text
//! [record_count: u32 LE][record 0: 35 bytes][record 1: 35 bytes]...
//! ```
//!
//! The account is allocated with exactly `size_of(count)` bytes, so a
//! buffer of any other length is rejected as malformed.

use crate::error::TransferHookError;
use crate::state::extra_account_meta::ExtraAccountMeta;
use arrayref::array_ref;
use solana_program::program_error::ProgramError;

/// Namespace for the list encoding.
pub struct ExtraAccountMetaList;

impl ExtraAccountMetaList {
    /// Size of the `record_count` header.
    pub const HEADER_LEN: usize = 4;

    /// Bytes needed to store `count` records.
    pub fn size_of(count: usize) -> Result<usize, ProgramError> {
        count
            .checked_mul(ExtraAccountMeta::LEN)
            .and_then(|records| records.checked_add(Self::HEADER_LEN))
            .ok_or(ProgramError::InvalidArgument)
    }

    /// Encode descriptors into a freshly allocated buffer.
    pub fn encode(metas: &[ExtraAccountMeta]) -> Result<Vec<u8>, ProgramError> {
        let mut buffer = vec![0u8; Self::size_of(metas.len())?];
        Self::encode_into(metas, &mut buffer)?;
        Ok(buffer)
    }

    /// Encode descriptors into `output`, which must be exactly
    /// `size_of(metas.len())` bytes.
    pub fn encode_into(metas: &[ExtraAccountMeta], output: &mut [u8]) -> Result<(), ProgramError> {
        if output.len() != Self::size_of(metas.len())? {
            return Err(ProgramError::InvalidAccountData);
        }
        let count = u32::try_from(metas.len()).map_err(|_| ProgramError::InvalidArgument)?;

        let (header, records) = output.split_at_mut(Self::HEADER_LEN);
        header.copy_from_slice(&count.to_le_bytes());
        for (meta, record) in metas
            .iter()
            .zip(records.chunks_exact_mut(ExtraAccountMeta::LEN))
        {
            meta.pack_into_slice(record)?;
        }

        Ok(())
    }

    /// Decode every descriptor, or fail as a whole.
    pub fn decode(input: &[u8]) -> Result<Vec<ExtraAccountMeta>, ProgramError> {
        let count = Self::record_count(input)?;
        if Self::size_of(count).ok() != Some(input.len()) {
            return Err(TransferHookError::MalformedRecord.into());
        }

        input[Self::HEADER_LEN..]
            .chunks_exact(ExtraAccountMeta::LEN)
            .map(|record| ExtraAccountMeta::unpack(array_ref![record, 0, ExtraAccountMeta::LEN]))
            .collect()
    }

    /// Read the `record_count` header.
    pub fn record_count(input: &[u8]) -> Result<usize, ProgramError> {
        if input.len() < Self::HEADER_LEN {
            return Err(TransferHookError::MalformedRecord.into());
        }
        let count = u32::from_le_bytes(*array_ref![input, 0, ExtraAccountMetaList::HEADER_LEN]);
        Ok(count as usize)
    }
}
