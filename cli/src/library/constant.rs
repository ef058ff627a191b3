pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

/// Provider default for the number of snapshots an account may hold.
pub const DEFAULT_MAX_SNAPSHOTS: usize = 500;

pub const DEFAULT_KEEP_PERCENTAGE: f64 = 0.40;

pub const AUTH_FAILURE: &str = "AuthFailure";
pub const REQUEST_FAILED: &str = "RequestFailed";
pub const HTTP_ERROR: &str = "HttpError";
pub const INVALID_ENDPOINT: &str = "InvalidEndpoint";
