//! # yield-store
//!
//! Campaign document storage.
//!
//! Two [`CampaignStore`](yield_core::store::CampaignStore) backends:
//! - [`FileCampaignStore`]: one pretty-printed JSON document per campaign,
//!   replaced atomically on every write
//! - [`MemoryCampaignStore`]: a mutex-guarded map, for tests and embedding

mod error;
mod file;
mod lock;
mod memory;

pub use error::StoreError;
pub use file::FileCampaignStore;
pub use memory::MemoryCampaignStore;
