//! Account State
//!
//! The only account this program owns is the extra account meta list of a
//! mint. Its body is encoded by hand, little-endian and without padding, so
//! that any client can produce and read the same bytes.
//!
//! | Module | Contents |
//! |--------|----------|
//! | `seeds` | Seed formulas and their 32-byte packed config |
//! | `extra_account_meta` | One 35-byte descriptor record |
//! | `extra_account_meta_list` | The `[count][records...]` body |

pub mod extra_account_meta;
pub mod extra_account_meta_list;
pub mod seeds;

pub use extra_account_meta::{AccountAddress, ExtraAccountMeta};
pub use extra_account_meta_list::ExtraAccountMetaList;
pub use seeds::Seed;
