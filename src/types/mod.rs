pub mod format;
pub mod header;
pub mod map;
pub mod record;
pub mod summary;

pub use format::*;
pub use header::*;
pub use map::*;
pub use record::*;
pub use summary::*;
