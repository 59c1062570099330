/// Identifiers are opaque text. Users, teams and boards are owned by other
/// services, so their IDs are passed through unchanged.
pub type Id = String;

/// Milliseconds since the Unix epoch. `0` in a `delete_at` column means
/// the row is active.
pub type Millis = i64;

/// Generate a fresh row identifier.
///
/// UUIDv7 in its 32-character simple form, so new rows sort roughly by
/// creation time.
pub fn new_id() -> Id {
    uuid::Uuid::now_v7().simple().to_string()
}

/// Current time in epoch milliseconds (UTC).
pub fn now_millis() -> Millis {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_is_simple_uuid() {
        let id = new_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn new_ids_are_unique() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
    }

    #[test]
    fn now_millis_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(now_millis() > 1_577_836_800_000);
    }
}
