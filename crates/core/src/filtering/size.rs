//! Parsing of free-text sizes ("1.2 GB", "700 MiB", "4,3 Go").

use once_cell::sync::Lazy;
use regex_lite::Regex;

static SIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([0-9][0-9.,\s]*)\s*([a-zA-Z]*)\s*$").unwrap());

/// Parse a human-written size into bytes.
///
/// Decimal units (KB, MB, GB, TB) use powers of 1000, binary units (KiB,
/// MiB, GiB, TiB) powers of 1024. French octet units (o, Ko, Mo, Go, To) are
/// accepted as decimal. A bare number is bytes. Both `.` and `,` work as the
/// decimal separator; when both appear the last one wins and the other is
/// treated as a thousands separator.
///
/// Any Unicode whitespace (the `&nbsp;` of HTML tables, thin spaces used as
/// thousands separators) counts as a space.
///
/// Returns `None` when the text is not a size.
pub fn parse_size(text: &str) -> Option<u64> {
    // regex-lite's \s only covers ASCII
    let text: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let caps = SIZE_RE.captures(&text)?;
    let number = parse_number(&caps[1])?;
    let multiplier = unit_multiplier(&caps[2])?;
    let bytes = number * multiplier;
    if !bytes.is_finite() || bytes < 0.0 {
        return None;
    }
    Some(bytes.round() as u64)
}

fn parse_number(raw: &str) -> Option<f64> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let decimal = compact.rfind(['.', ',']);

    let normalized = match decimal {
        Some(pos) => {
            let (int_part, frac_part) = compact.split_at(pos);
            let int_part: String = int_part.chars().filter(|c| c.is_ascii_digit()).collect();
            let frac_part = &frac_part[1..];
            // "1,024" and "1.024.000" read as thousands groups
            if frac_part.len() == 3 && !int_part.is_empty() && has_single_kind(&compact) {
                format!("{}{}", int_part, frac_part)
            } else {
                format!("{}.{}", int_part, frac_part)
            }
        }
        None => compact,
    };

    normalized.parse::<f64>().ok()
}

/// True when only one kind of separator appears and it repeats, or appears
/// as a comma. "1,024" is a thousands group, "1.024" stays a decimal.
fn has_single_kind(value: &str) -> bool {
    let dots = value.matches('.').count();
    let commas = value.matches(',').count();
    (dots == 0 && commas >= 1) || (commas == 0 && dots > 1)
}

fn unit_multiplier(unit: &str) -> Option<f64> {
    let multiplier = match unit.to_lowercase().as_str() {
        "" | "b" | "o" | "bytes" => 1.0,
        "kb" | "ko" | "k" => 1e3,
        "mb" | "mo" | "m" => 1e6,
        "gb" | "go" | "g" => 1e9,
        "tb" | "to" | "t" => 1e12,
        "kib" => 1024.0,
        "mib" => 1024.0 * 1024.0,
        "gib" => 1024.0 * 1024.0 * 1024.0,
        "tib" => 1024.0 * 1024.0 * 1024.0 * 1024.0,
        _ => return None,
    };
    Some(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_units() {
        assert_eq!(parse_size("1.2 GB"), Some(1_200_000_000));
        assert_eq!(parse_size("1.2GB"), Some(1_200_000_000));
        assert_eq!(parse_size("700 MB"), Some(700_000_000));
        assert_eq!(parse_size("512 kb"), Some(512_000));
        assert_eq!(parse_size("2 TB"), Some(2_000_000_000_000));
    }

    #[test]
    fn test_parse_binary_units() {
        assert_eq!(parse_size("1 GiB"), Some(1_073_741_824));
        assert_eq!(parse_size("700 MiB"), Some(734_003_200));
    }

    #[test]
    fn test_parse_french_units_and_comma() {
        assert_eq!(parse_size("4,3 Go"), Some(4_300_000_000));
        assert_eq!(parse_size("350 Mo"), Some(350_000_000));
    }

    #[test]
    fn test_parse_bare_bytes() {
        assert_eq!(parse_size("123456"), Some(123_456));
        assert_eq!(parse_size("1,024"), Some(1024));
    }

    #[test]
    fn test_parse_thousands_and_decimal() {
        assert_eq!(parse_size("1,234.5 MB"), Some(1_234_500_000));
        assert_eq!(parse_size("1.234,5 MB"), Some(1_234_500_000));
    }

    #[test]
    fn test_parse_unicode_whitespace() {
        assert_eq!(parse_size("1.2\u{a0}GB"), Some(1_200_000_000));
        assert_eq!(parse_size("\u{a0}700\u{2009}MB\u{a0}"), Some(700_000_000));
        assert_eq!(parse_size("1\u{202f}234 MB"), Some(1_234_000_000));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_size(""), None);
        assert_eq!(parse_size("unknown"), None);
        assert_eq!(parse_size("12 parsecs"), None);
        assert_eq!(parse_size("GB"), None);
    }
}
