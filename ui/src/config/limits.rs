/// Bounds for backend request timeouts (seconds)
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Bounds for the number of remembered recent bookings
pub const MIN_HISTORY_LIMIT: usize = 1;
pub const MAX_HISTORY_LIMIT: usize = 50;

/// Bounds for concurrently running backend calls
pub const MIN_TASK_POOL_SIZE: usize = 1;
pub const MAX_TASK_POOL_SIZE: usize = 64;
