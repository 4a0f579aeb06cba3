// Field limits mirror the dashboard's form validation.
pub const MAX_TODO_TITLE_LEN: usize = 100;
pub const MAX_TODO_DESCRIPTION_LEN: usize = 500;
pub const MAX_NOTE_TITLE_LEN: usize = 200;
pub const MAX_NOTE_CONTENT_LEN: usize = 5_000;

// Upper bound on a single stored document, checked before parsing.
pub const MAX_DOCUMENT_LEN: u64 = 64 * 1024;

pub const MAX_USERNAME_LEN: usize = 64;

// the defaults are taken from the argon2 crate itself
pub const DEFAULT_ARGON2_M_COST: u32 = 19 * 1024;
pub const DEFAULT_ARGON2_T_COST: u32 = 2;
pub const DEFAULT_ARGON2_P_COST: u32 = 1;
pub const DEFAULT_ARGON2_OUTPUT_LEN: Option<usize> = Some(32);

pub const DEFAULT_SESSION_TTL_MINUTES: u64 = 30 * 24 * 60;
