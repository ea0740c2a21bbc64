pub mod events;
pub mod window;

/// Parses a window handle given in decimal or as `0x`-prefixed hex.
pub fn parse_hwnd(s: &str) -> Option<usize> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_and_hex_handles() {
        assert_eq!(parse_hwnd("1234"), Some(1234));
        assert_eq!(parse_hwnd("0x1A2B"), Some(0x1A2B));
        assert_eq!(parse_hwnd(" 0X10 "), Some(16));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_hwnd("window"), None);
        assert_eq!(parse_hwnd("0x"), None);
    }
}
