//! Build identification for `cmv-check --version` and the startup log
//!
//! Exposes `CMV_BUILD_ID` as "<revision> <date> <profile>". The date honors
//! `SOURCE_DATE_EPOCH` so packaged builds are reproducible.

use chrono::{DateTime, SecondsFormat, Utc};
use std::env;
use std::process::Command;

fn revision() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let revision = String::from_utf8(output.stdout).ok()?;
    Some(revision.trim().to_string()).filter(|r| !r.is_empty())
}

fn build_date() -> String {
    let pinned = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
    pinned
        .unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn main() {
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    let build_id = format!(
        "{} {} {}",
        revision().unwrap_or_else(|| "unknown".to_string()),
        build_date(),
        profile
    );
    println!("cargo:rustc-env=CMV_BUILD_ID={}", build_id);
}
