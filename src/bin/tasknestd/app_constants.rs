pub const API_MOUNT_POINT: &str = "/api";
pub const WEB_MOUNT_POINT: &str = "/";
