use once_cell::sync::Lazy;
use regex::Regex;

static SIGNED_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-+]?\d+(?:\.\d+)?").expect("signed decimal pattern"));

/// Parses an already-isolated numeric fragment as `f64`.
///
/// Strips everything outside digits, `.` and `-` first, so thousands
/// separators, currency glyphs and stray whitespace are tolerated:
/// `"₹1,23,456.78"` parses to `123456.78`. Returns `None` when nothing
/// numeric remains.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok()
}

/// Extracts the first signed decimal number from a percentage fragment such
/// as `"+2.5%"` or `"(-3.1 %)"`. The `%` sign is dropped before matching.
pub fn parse_percentage(text: &str) -> Option<f64> {
    let stripped = text.replace('%', "");
    let matched = SIGNED_DECIMAL.find(&stripped)?;

    matched.as_str().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("₹1,23,456.78"), Some(123456.78));
        assert_eq!(parse_price("Rs. 3,456.70"), Some(3456.70));
        assert_eq!(parse_price(" 1,234.56 \n"), Some(1234.56));
        assert_eq!(parse_price("42"), Some(42.0));
        assert_eq!(parse_price("-12.5"), Some(-12.5));
    }

    #[test]
    fn test_parse_price_rejects_non_numeric() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("N/A"), None);
        assert_eq!(parse_price("--"), None);
        assert_eq!(parse_price("1.2.3.4-"), None);
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("+2.5%"), Some(2.5));
        assert_eq!(parse_percentage("-3.1%"), Some(-3.1));
        assert_eq!(parse_percentage("0.85 %"), Some(0.85));
        assert_eq!(parse_percentage("(1.42%)"), Some(1.42));
    }

    #[test]
    fn test_parse_percentage_rejects_non_numeric() {
        assert_eq!(parse_percentage(""), None);
        assert_eq!(parse_percentage("%"), None);
        assert_eq!(parse_percentage("n.a."), None);
    }
}
