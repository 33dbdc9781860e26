pub mod annotation;
pub mod record;
pub mod segment;
pub mod timeline;
pub mod transcript;

pub use annotation::*;
pub use record::*;
pub use segment::*;
pub use timeline::*;
pub use transcript::*;
