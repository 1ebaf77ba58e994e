//! Lenient number parsing for configuration prompts.
//!
//! Input is never rejected. The longest numeric prefix is used, and text with
//! no numeric prefix reads as zero, the same way `strtoul`/`strtof` behave.

/// Parse a decimal unsigned integer.
///
/// Leading whitespace is skipped, an optional sign is accepted (`-n` wraps
/// modulo 2^32) and overflow saturates at `u32::MAX`.
pub fn parse_u32_lenient(text: &str) -> u32 {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: u32 = 0;
    let mut overflow = false;
    let mut any = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        any = true;
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(b - b'0')))
        {
            Some(v) => value = v,
            None => overflow = true,
        }
    }

    if !any {
        0
    } else if overflow {
        u32::MAX
    } else if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

/// Parse a decimal floating-point number (`[+-]digits[.digits][e[+-]digits]`).
pub fn parse_f32_lenient(text: &str) -> f32 {
    let s = text.trim_start();
    let b = s.as_bytes();
    let mut end = 0;

    if matches!(b.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_digits = count_digits(&b[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if b.get(end) == Some(&b'.') {
        frac_digits = count_digits(&b[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return 0.0;
    }

    // Exponent only counts if at least one digit follows it.
    if matches!(b.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(b.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&b[exp_end.min(b.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u32_plain() {
        assert_eq!(parse_u32_lenient("625"), 625);
        assert_eq!(parse_u32_lenient("  42"), 42);
        assert_eq!(parse_u32_lenient("+7"), 7);
    }

    #[test]
    fn test_u32_prefix_and_garbage() {
        assert_eq!(parse_u32_lenient("12abc"), 12);
        assert_eq!(parse_u32_lenient("abc"), 0);
        assert_eq!(parse_u32_lenient(""), 0);
        assert_eq!(parse_u32_lenient("-"), 0);
    }

    #[test]
    fn test_u32_overflow_and_negative() {
        assert_eq!(parse_u32_lenient("4294967295"), u32::MAX);
        assert_eq!(parse_u32_lenient("99999999999"), u32::MAX);
        assert_eq!(parse_u32_lenient("-1"), u32::MAX);
        assert_eq!(parse_u32_lenient("-2"), u32::MAX - 1);
    }

    #[test]
    fn test_f32_forms() {
        assert_eq!(parse_f32_lenient("0.5"), 0.5);
        assert_eq!(parse_f32_lenient(" .25"), 0.25);
        assert_eq!(parse_f32_lenient("3."), 3.0);
        assert_eq!(parse_f32_lenient("-1.5"), -1.5);
        assert_eq!(parse_f32_lenient("1e-2"), 0.01);
        assert_eq!(parse_f32_lenient("2E1"), 20.0);
    }

    #[test]
    fn test_f32_prefix_and_garbage() {
        assert_eq!(parse_f32_lenient("0.1x"), 0.1);
        assert_eq!(parse_f32_lenient("1e"), 1.0);
        assert_eq!(parse_f32_lenient("1e+"), 1.0);
        assert_eq!(parse_f32_lenient("."), 0.0);
        assert_eq!(parse_f32_lenient("power"), 0.0);
        assert_eq!(parse_f32_lenient(""), 0.0);
    }
}
