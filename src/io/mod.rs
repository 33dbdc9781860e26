pub mod formats;
pub mod table;

pub use formats::*;
pub use table::*;
