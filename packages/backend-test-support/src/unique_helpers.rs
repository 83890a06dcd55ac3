//! Test helpers for generating unique test data
//!
//! ULID suffixes keep test rows from colliding when several tests share a
//! database (e.g. when running against Postgres).

use ulid::Ulid;

/// Longest name a state may carry.
const STATE_NAME_MAX: usize = 50;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("state");
/// let id2 = unique_str("state");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("state-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique state name that still fits the 50 character limit.
///
/// The prefix is truncated so that `{prefix}-{ulid}` never exceeds the limit.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_state_name;
///
/// let name = unique_state_name("a-very-long-prefix-that-would-not-fit");
/// assert!(name.chars().count() <= 50);
/// ```
pub fn unique_state_name(prefix: &str) -> String {
    let ulid = Ulid::new().to_string();
    let room = STATE_NAME_MAX - ulid.len() - 1;
    let prefix: String = prefix.chars().take(room).collect();
    format!("{prefix}-{ulid}")
}
