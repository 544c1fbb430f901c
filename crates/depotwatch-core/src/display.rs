/// Human-readable service names for notification text. Unknown services fall
/// back to their raw key so a new probe entry still renders.
pub fn service_title(service: &str) -> &str {
    match service {
        "sessions" => "Sessions Logon",
        "community" => "Steam Community",
        "matchmaking" => "Matchmaking",
        "datacenters" => "Datacenters",
        other => other,
    }
}

/// Human-readable status phrases.
pub fn status_phrase(status: &str) -> &str {
    match status {
        "normal" => "operating normally",
        "delayed" => "delayed",
        "surge" => "under heavy load",
        "offline" => "offline",
        "down" => "down",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_entries_map_to_titles() {
        assert_eq!(service_title("matchmaking"), "Matchmaking");
        assert_eq!(status_phrase("offline"), "offline");
        assert_eq!(status_phrase("surge"), "under heavy load");
    }

    #[test]
    fn unknown_entries_pass_through() {
        assert_eq!(service_title("something_new"), "something_new");
        assert_eq!(status_phrase("weird"), "weird");
    }
}
