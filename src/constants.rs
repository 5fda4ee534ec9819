// src/constants.rs

/// Flags some FTP clients append to LIST/NLST (`-a`, `-al`, ...). Server
/// support for these varies, so anything matching is dropped.
pub const LIST_FLAGS_PATTERN: &str = r"^-[alt]+$";

/// Bind attempts before giving up on a configured passive port range.
pub const PASSIVE_BIND_RETRIES: u32 = 100;

/// Poll cadence while waiting for the passive accept; grows linearly.
pub const ACCEPT_POLL_INTERVAL_MS: u64 = 500;
pub const ACCEPT_POLL_RETRIES: u32 = 3;

/// Pause after a completed transfer. Some clients on loopback treat an
/// immediate control reply after the data socket closes as an error.
pub const POST_TRANSFER_PAUSE_MS: u64 = 10;

// Timestamp layouts for detailed listings (current-year and older entries).
pub const LIST_TIME_RECENT: &str = "%b %e %H:%M";
pub const LIST_TIME_OLD: &str = "%b %e  %Y";

/// Layout of the MDTM reply body.
pub const MDTM_TIME_LAYOUT: &str = "%Y%m%d%H%M%S";
