mod errors;
mod internal;

pub use errors::UserDbError;
pub use internal::{
    ProductionUserDb, UserData, UserDb, UserDbImpl, UsersData,
};
