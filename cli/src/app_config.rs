use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use crate::{args::ConfigArgs, blocker::TimeLimit, profile::Profile};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000";

#[derive(Debug, Serialize)]
pub struct AppConfig {
    pub profile_path: String,
    pub profile_exists: bool,
    pub endpoint: String,
    pub authorization: String,
    pub blocker_lower_ms: u64,
    pub blocker_upper_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let limits = TimeLimit::default();
        AppConfig {
            profile_path: "./".to_string(),
            profile_exists: false,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            authorization: random_authorization(),
            blocker_lower_ms: millis(limits.lower),
            blocker_upper_ms: millis(limits.upper),
        }
    }
}

impl AppConfig {
    /// Arguments win over the profile, the profile wins over defaults
    pub fn from_args(args: ConfigArgs, profile_path: &Path, profile: Option<&Profile>) -> Self {
        let defaults = AppConfig::default();

        let endpoint = args
            .endpoint
            .or_else(|| profile.and_then(|p| p.endpoint.clone()))
            .unwrap_or(defaults.endpoint);

        let authorization = args
            .authorization
            .or_else(|| profile.and_then(|p| p.authorization.clone()))
            .unwrap_or(defaults.authorization);

        AppConfig {
            profile_exists: profile.is_some(),
            profile_path: profile_path
                .to_str()
                .map(|p| p.to_string())
                .unwrap_or(defaults.profile_path),
            endpoint,
            authorization,
            blocker_lower_ms: profile
                .and_then(|p| p.blocker_lower_ms)
                .unwrap_or(defaults.blocker_lower_ms),
            blocker_upper_ms: profile
                .and_then(|p| p.blocker_upper_ms)
                .unwrap_or(defaults.blocker_upper_ms),
        }
    }

    pub fn time_limit(&self) -> TimeLimit {
        let lower = Duration::from_millis(self.blocker_lower_ms);
        TimeLimit {
            lower,
            upper: Duration::from_millis(self.blocker_upper_ms).max(lower),
        }
    }

    pub fn to_profile(&self) -> Profile {
        Profile {
            endpoint: Some(self.endpoint.clone()),
            authorization: Some(self.authorization.clone()),
            blocker_lower_ms: Some(self.blocker_lower_ms),
            blocker_upper_ms: Some(self.blocker_upper_ms),
        }
    }
}

/// The API only checks that some Authorization header is present
fn random_authorization() -> String {
    format!("Basic {}", uuid::Uuid::new_v4().simple())
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
