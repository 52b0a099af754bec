pub mod datasets;
pub mod lookup;
pub mod snapshot_sync;
pub mod validator;

pub use lookup::RegistryLookup;
