use serde::{Deserialize, Serialize};

/// Configuration for the staff_directory module (`modules.staff_directory`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaffDirectoryConfig {
    /// Idle lifetime of a login session in seconds.
    #[serde(default = "default_session_ttl_sec")]
    pub session_ttl_sec: u64,
    #[serde(default = "default_csrf_enabled")]
    pub csrf_enabled: bool,
    /// Mark cookies `Secure`; enable when served over HTTPS.
    #[serde(default)]
    pub cookie_secure: bool,
}

impl Default for StaffDirectoryConfig {
    fn default() -> Self {
        Self {
            session_ttl_sec: default_session_ttl_sec(),
            csrf_enabled: default_csrf_enabled(),
            cookie_secure: false,
        }
    }
}

fn default_session_ttl_sec() -> u64 {
    8 * 60 * 60
}

fn default_csrf_enabled() -> bool {
    true
}
