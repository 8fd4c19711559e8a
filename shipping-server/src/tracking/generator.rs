//! Tracking Code Generator
//!
//! Produces human-readable, collision-resistant codes scoped by
//! format/branch/calendar-day, backed by the atomic counter store. When
//! the counter store cannot be reached the generator degrades to an
//! epoch-derived counter instead of failing the request; the degraded
//! counter trades global uniqueness for availability and is logged as
//! such.

use crate::db::repository::TrackingSequenceRepository;
use crate::utils::AppError;
use chrono::{Local, Utc};
use rand::Rng;
use shared::models::GeneratedTracking;
use std::fmt;
use std::str::FromStr;

/// Supported code formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeFormat {
    Ord,
    Inv,
    Shop001,
}

impl CodeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeFormat::Ord => "ORD",
            CodeFormat::Inv => "INV",
            CodeFormat::Shop001 => "SHOP001",
        }
    }
}

impl fmt::Display for CodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ORD" => Ok(CodeFormat::Ord),
            "INV" => Ok(CodeFormat::Inv),
            "SHOP001" => Ok(CodeFormat::Shop001),
            other => Err(AppError::validation(format!("unsupported format: {other}"))),
        }
    }
}

/// Generate the next tracking code for `format`, optionally scoped to a
/// branch. The counter is unique per format/branch/day.
pub async fn generate(
    repo: &TrackingSequenceRepository,
    format: CodeFormat,
    branch: Option<&str>,
) -> GeneratedTracking {
    let date_part = Local::now().format("%Y%m%d").to_string();
    let branch = normalize_branch(branch);
    let key = sequence_key(format, branch.as_deref(), &date_part);

    let counter = match repo.next_counter(&key).await {
        Ok(counter) => counter,
        Err(e) => {
            // Degraded mode: the code stays well-formed but uniqueness is
            // only as good as one request per second per key.
            let fallback = fallback_counter();
            tracing::warn!(
                key = %key,
                error = %e,
                fallback,
                "Sequence store unavailable, using epoch-derived fallback counter"
            );
            fallback
        }
    };

    GeneratedTracking {
        code: format_code(format, &date_part, counter, branch.as_deref()),
        key,
        counter,
    }
}

fn normalize_branch(branch: Option<&str>) -> Option<String> {
    branch
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_uppercase)
}

fn sequence_key(format: CodeFormat, branch: Option<&str>, date_part: &str) -> String {
    match branch {
        Some(branch) => format!("{format}:{branch}:{date_part}"),
        None => format!("{format}:{date_part}"),
    }
}

fn fallback_counter() -> i64 {
    Utc::now().timestamp() % 1_000_000
}

fn format_code(format: CodeFormat, date_part: &str, counter: i64, branch: Option<&str>) -> String {
    match format {
        // ORD-20250115-000123
        CodeFormat::Ord => format!("ORD-{date_part}-{counter:06}"),
        // INV-20250115-ABC789 (branch, or a random suffix; the random path
        // is not collision-checked against existing codes)
        CodeFormat::Inv => {
            let suffix = match branch {
                Some(branch) => branch.to_string(),
                None => random_suffix(),
            };
            format!("INV-{date_part}-{suffix}")
        }
        // SHOP001-20250115-456 (short numeric, branch overrides the prefix)
        CodeFormat::Shop001 => {
            let prefix = branch.unwrap_or("SHOP001");
            format!("{prefix}-{date_part}-{:03}", counter % 1000)
        }
    }
}

/// 6 random base-36 characters, rendered upper-case
fn random_suffix() -> String {
    const CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut rng = rand::thread_rng();
    (0..6)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
