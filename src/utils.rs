/// Flatten a display name into the id form the dumps key everything by.
/// `Mr. Mime` -> `mrmime`, `U-turn` -> `uturn`.
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
