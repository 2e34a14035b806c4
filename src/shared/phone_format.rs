// ============================================================
// PHONE DISPLAY FORMATTING
// ============================================================

/// Format an 11-digit number as "+C (AAA) PPP-LLLL" for display.
/// Anything that does not contain exactly 11 digits comes back
/// unchanged, so raw stored values stay visible as-is.
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != 11 {
        return phone.to_string();
    }

    format!(
        "+{} ({}) {}-{}",
        &digits[0..1],
        &digits[1..4],
        &digits[4..7],
        &digits[7..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eleven_digits_are_formatted() {
        assert_eq!(format_phone_number("13853430571"), "+1 (385) 343-0571");
    }

    #[test]
    fn test_already_formatted_input_is_reformatted() {
        assert_eq!(format_phone_number("+1 (385) 343-0571"), "+1 (385) 343-0571");
        assert_eq!(format_phone_number("1-385-343-0571"), "+1 (385) 343-0571");
    }

    #[test]
    fn test_other_lengths_pass_through() {
        assert_eq!(format_phone_number("5551234567"), "5551234567");
        assert_eq!(format_phone_number("123"), "123");
        assert_eq!(format_phone_number(""), "");
    }

    #[test]
    fn test_non_digit_input_passes_through() {
        assert_eq!(format_phone_number("unknown"), "unknown");
    }
}
