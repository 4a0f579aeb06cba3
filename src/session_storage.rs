mod errors;
mod internal;

pub use errors::SessionStorageError;
pub use internal::session::Session;
pub use internal::{ProductionSessionStorage, SessionStorage};
