/// Parse a byte size such as `1000`, `4kb` or `2KiB`.
///
/// `kb`/`mb` are decimal (1000), `kib`/`mib` binary (1024). Units are
/// case-insensitive.
///
/// # Errors
///
/// Returns an error message for empty input, unknown units or overflow.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, unit) = s.split_at(split);
    if digits.is_empty() {
        return Err(format!("Size must start with a number: '{}'", s));
    }

    let value: u64 = digits
        .parse()
        .map_err(|_| format!("Size is too large: '{}'", s))?;

    let multiplier: u64 = match unit.trim().to_ascii_lowercase().as_str() {
        "" | "b" => 1,
        "kb" => 1_000,
        "kib" => 1_024,
        "mb" => 1_000_000,
        "mib" => 1_048_576,
        other => return Err(format!("Unknown size unit '{}' (use b, kb, kib, mb or mib)", other)),
    };

    value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("Size is too large: '{}'", s))
}
