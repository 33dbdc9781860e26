pub mod label_mapper;
pub mod loaders;

pub use label_mapper::*;
pub use loaders::*;

use crate::error::Result;
use crate::models::FileRecord;

/// A per-file transform applied to corpus records
///
/// The protocol layer attaches preprocessors to fill in derived record
/// fields (annotation, annotated region, transcript, duration) on demand,
/// one record at a time.
pub trait Preprocessor {
    type Output;

    fn process(&self, file: &FileRecord) -> Result<Self::Output>;
}
