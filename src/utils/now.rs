/// Returns the current wall-clock time in milliseconds since the UNIX epoch,
/// the unit every payload timestamp uses.
///
/// A clock set before 1970 yields `0` rather than a wrapped value.
///
/// # Example:
/// ```rust
/// use fleetwire::utils::now_millis;
/// let timestamp = now_millis();
/// assert!(timestamp > 1_700_000_000_000);
/// ```
pub fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}
