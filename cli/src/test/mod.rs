#![allow(clippy::unwrap_used, clippy::panic)]

use predicates::prelude::{
    predicate::str::{contains, is_empty},
    PredicateBooleanExt,
};

use crate::profile::Profile;
use test_context::TestContext;

pub mod fake_gateway;

fn profile(endpoint: &str) -> Profile {
    Profile {
        endpoint: Some(endpoint.to_string()),
        authorization: Some("Basic profile-token".to_string()),
        blocker_lower_ms: Some(100),
        blocker_upper_ms: Some(500),
    }
}

#[test]
fn test_config_defaults() {
    let context = TestContext::new();

    context
        .command()
        .arg("config")
        .assert()
        .success()
        .stdout(
            contains(r#""endpoint": "http://127.0.0.1:3000""#)
                .and(contains(r#""profile_exists": false"#))
                .and(contains("tripboard/profiles/default.toml"))
                .and(contains(r#""authorization": "Basic "#))
                .and(contains(r#""blocker_lower_ms": 350"#)),
        )
        .stderr(is_empty());
}

#[test]
fn test_profile_env() {
    let context = TestContext::with_profile(profile("http://from-profile:4000"));

    context
        .profile_command()
        .arg("config")
        .assert()
        .success()
        .stdout(
            contains(r#""endpoint": "http://from-profile:4000""#)
                .and(contains(r#""profile_exists": true"#))
                .and(contains(r#""blocker_upper_ms": 500"#)),
        )
        .stderr(is_empty());
}

#[test]
fn test_profile_arg() {
    // --profile-path overrides TRIPBOARD_PROFILE
    let context = TestContext::with_profile(profile("http://from-profile:4000"));

    context
        .command()
        .env("TRIPBOARD_PROFILE", "wrong_profile")
        .args(["--profile-path", context.profile_path.to_str().unwrap()])
        .arg("config")
        .assert()
        .success()
        .stdout(contains(r#""endpoint": "http://from-profile:4000""#))
        .stderr(is_empty());
}

#[test]
fn test_endpoint_env_beats_profile() {
    let context = TestContext::with_profile(profile("http://from-profile:4000"));

    context
        .profile_command()
        .env("TRIPBOARD_ENDPOINT", "http://from-env:5000")
        .arg("config")
        .assert()
        .success()
        .stdout(
            contains(r#""endpoint": "http://from-env:5000""#)
                .and(contains(r#""authorization": "Basic profile-token""#)),
        );
}

#[test]
fn test_list_reports_unreachable_server() {
    let context = TestContext::new();

    context
        .command()
        .args(["--endpoint", "http://127.0.0.1:9", "list"])
        .assert()
        .failure()
        .stderr(contains("Failed to load latest route information"));
}

#[test]
fn test_disabled_sort_is_rejected() {
    let context = TestContext::new();

    context
        .command()
        .args(["list", "--sort", "offers"])
        .assert()
        .failure()
        .stderr(contains("not supported"));
}
