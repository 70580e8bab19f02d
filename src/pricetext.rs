//! Shared price-string normalization.
//!
//! Store pages expose prices as free text or attribute values in locale-
//! dependent shapes: `"12,99€"`, `"€ 12,99"`, `"1.299,00 €"`, `"$12.99"`.
//! All adapters reduce such tokens through this one routine instead of
//! carrying their own heuristics.

/// A price token reduced to a numeric value and the currency symbol that
/// accompanied it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPrice {
    pub value: f64,
    pub currency: String,
}

/// Parses a single price token.
///
/// Non-breaking spaces and regular spaces are stripped, a leading or
/// trailing run of non-numeric characters is isolated as the currency
/// symbol, thousands separators are dropped and a comma decimal separator
/// becomes a point. Returns `None` when no parseable number remains or the
/// value is negative.
pub fn parse_price(raw: &str) -> Option<ParsedPrice> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '\u{a0}' && *c != ' ')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let is_numeric = |c: char| c.is_ascii_digit() || c == ',' || c == '.';

    let start = cleaned.find(is_numeric)?;
    // Digits and separators are ASCII, so +1 lands on a char boundary
    let end = cleaned.rfind(is_numeric)? + 1;

    let leading = &cleaned[..start];
    let trailing = &cleaned[end..];
    // Trailing symbol wins when the token somehow carries both
    let currency = if !trailing.is_empty() { trailing } else { leading };

    let value = parse_number(&cleaned[start..end])?;
    if value < 0.0 {
        return None;
    }

    Some(ParsedPrice {
        value,
        currency: currency.to_string(),
    })
}

/// Reduces the numeric body of a price token to an `f64`.
///
/// When both `,` and `.` occur, the last one is the decimal separator and
/// the other is a thousands separator. A lone `,` is a decimal comma.
fn parse_number(body: &str) -> Option<f64> {
    let has_comma = body.contains(',');
    let has_point = body.contains('.');

    let normalized: String = if has_comma && has_point {
        let decimal = if body.rfind(',') > body.rfind('.') { ',' } else { '.' };
        let last = body.rfind(decimal)?;
        body.char_indices()
            .filter_map(|(i, c)| match c {
                ',' | '.' if i != last => None,
                ',' | '.' => Some('.'),
                c => Some(c),
            })
            .collect()
    } else if has_comma {
        // Decimal comma, possibly after point-free thousands grouping
        body.replace(',', ".")
    } else {
        body.to_string()
    };

    normalized.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_symbol_comma_decimal() {
        let p = parse_price("12,99€").unwrap();
        assert_eq!(p.value, 12.99);
        assert_eq!(p.currency, "€");
    }

    #[test]
    fn leading_symbol() {
        let p = parse_price("€12,99").unwrap();
        assert_eq!(p.value, 12.99);
        assert_eq!(p.currency, "€");
    }

    #[test]
    fn leading_symbol_with_space() {
        let p = parse_price("€ 12,99").unwrap();
        assert_eq!(p.value, 12.99);
        assert_eq!(p.currency, "€");
    }

    #[test]
    fn non_breaking_space_stripped() {
        let p = parse_price("12,99\u{a0}€").unwrap();
        assert_eq!(p.value, 12.99);
        assert_eq!(p.currency, "€");
    }

    #[test]
    fn thousands_separator_dropped() {
        let p = parse_price("1.299,00 €").unwrap();
        assert_eq!(p.value, 1299.00);
        assert_eq!(p.currency, "€");
    }

    #[test]
    fn point_decimal_dollar() {
        let p = parse_price("$12.99").unwrap();
        assert_eq!(p.value, 12.99);
        assert_eq!(p.currency, "$");
    }

    #[test]
    fn comma_thousands_point_decimal() {
        let p = parse_price("1,299.50$").unwrap();
        assert_eq!(p.value, 1299.50);
        assert_eq!(p.currency, "$");
    }

    #[test]
    fn bare_number_has_empty_currency() {
        let p = parse_price("19.99").unwrap();
        assert_eq!(p.value, 19.99);
        assert_eq!(p.currency, "");
    }

    #[test]
    fn empty_and_garbage_rejected() {
        assert!(parse_price("").is_none());
        assert!(parse_price("   ").is_none());
        assert!(parse_price("n/a").is_none());
        assert!(parse_price("€").is_none());
    }
}
