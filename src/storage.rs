//! Contract with the persistence collaborator.
//!
//! No backend lives in this crate; `Model::save_to` drives an implementor
//! after every save.

use crate::error::Result;
use crate::model::Mapping;

pub trait StorageHook {
    /// Called after a save with the record's `<ClassName>.<id>` key and its
    /// full post-save `to_dict` snapshot.
    fn record_saved(&mut self, key: &str, snapshot: &Mapping) -> Result<()>;
}
