//! Numeric scanning and rendering shared by the interpreter and the log codec.
//!
//! Scanning is deliberately forgiving: anything that does not start with a
//! number yields `None`, and callers fold that into a zero contribution.

/// Extract the leading floating-point value from `text`.
///
/// Leading whitespace is skipped. The accepted shape is an optional sign,
/// digits with an optional fractional part, and an optional exponent. Trailing
/// garbage after the number is ignored, so `"3-"` yields `3.0` and
/// `"12.5 apples"` yields `12.5`.
pub fn leading_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // An exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    // Overflow to infinity counts as unparseable.
    s[..end].parse().ok().filter(|v: &f64| v.is_finite())
}

/// Extract the leading, optionally signed, integer from `text`.
pub fn leading_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let digits = count_digits(&bytes[end..]);
    if digits == 0 {
        return None;
    }

    s[..end + digits].parse().ok()
}

/// Render a value for the log and the prompt.
///
/// Uses the shortest representation that parses back to the same double, so
/// a saved log always sums to the total it recorded.
pub fn format_entry(number: f64) -> String {
    if number == 0.0 {
        return String::from("0");
    }
    format!("{}", number)
}

/// Like [`format_entry`], but non-negative values carry an explicit `+`.
pub fn format_signed(number: f64) -> String {
    if number < 0.0 {
        format_entry(number)
    } else {
        format!("+{}", format_entry(number))
    }
}

/// Render a batch total with six decimals, dropping trailing fractional zeros
/// and the decimal point when nothing remains after it.
pub fn truncate_zeroes(total: f64) -> String {
    let fixed = format!("{:.6}", total);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');

    match trimmed {
        "-0" => String::from("0"),
        other => other.to_string(),
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
