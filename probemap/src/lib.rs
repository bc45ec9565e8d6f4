pub mod capacity;
pub mod error;
pub mod hash;
pub mod iter;
mod probe;
pub mod probe_map;
pub mod slot;
pub use error::{ProbeMapError, Result};
pub use hash::{FxKeyHasher, KeyHasher};
pub use iter::{IntoIter, Iter, Keys, Values};
pub use probe_map::ProbeMap;
pub use slot::Slot;
