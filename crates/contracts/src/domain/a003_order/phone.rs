//! Телефонные номера: нормализация и маска ввода `+7 (999) 999-99-99`

/// Минимальное количество цифр в корректном номере
pub const MIN_PHONE_DIGITS: usize = 11;

/// Strip everything that is not an ASCII digit
pub fn normalize_phone(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn is_valid_phone(value: &str) -> bool {
    normalize_phone(value).len() >= MIN_PHONE_DIGITS
}

/// Форматирует ввод по маске `+7 (XXX) XXX-XX-XX`.
///
/// The first digit is the country code and is always rendered as `+7`;
/// digits beyond the eleventh are dropped.
pub fn format_phone_mask(value: &str) -> String {
    let digits: Vec<char> = normalize_phone(value).chars().take(MIN_PHONE_DIGITS).collect();
    let part = |from: usize, to: usize| -> String {
        digits
            .get(from..to.min(digits.len()))
            .map(|s| s.iter().collect())
            .unwrap_or_default()
    };

    match digits.len() {
        0 => String::new(),
        1 => format!("+7 ({}", part(0, 1)),
        2..=4 => format!("+7 ({}", part(1, 4)),
        5..=7 => format!("+7 ({}) {}", part(1, 4), part(4, 7)),
        8..=9 => format!("+7 ({}) {}-{}", part(1, 4), part(4, 7), part(7, 9)),
        _ => format!(
            "+7 ({}) {}-{}-{}",
            part(1, 4),
            part(4, 7),
            part(7, 9),
            part(9, 11)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+7 (999) 123-45-67"), "79991234567");
        assert_eq!(normalize_phone("abc"), "");
    }

    #[test]
    fn test_valid_phone_boundary() {
        assert!(!is_valid_phone("+7 (999) 123-45-6"));
        assert!(is_valid_phone("+7 (999) 123-45-67"));
    }

    #[test]
    fn test_format_phone_mask() {
        assert_eq!(format_phone_mask(""), "");
        assert_eq!(format_phone_mask("7"), "+7 (7");
        assert_eq!(format_phone_mask("7999"), "+7 (999");
        assert_eq!(format_phone_mask("7999123"), "+7 (999) 123");
        assert_eq!(format_phone_mask("799912345"), "+7 (999) 123-45");
        assert_eq!(format_phone_mask("79991234567"), "+7 (999) 123-45-67");
        assert_eq!(format_phone_mask("+7 (999) 123-45-67 890"), "+7 (999) 123-45-67");
    }
}
