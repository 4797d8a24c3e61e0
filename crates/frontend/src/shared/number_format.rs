//! Утилиты форматирования цен

/// Форматирует целое число с разделителем тысяч (пробел)
///
/// # Примеры
///
/// ```
/// # use frontend::shared::number_format::format_number_int;
/// assert_eq!(format_number_int(1234567), "1 234 567");
/// ```
pub fn format_number_int(value: u64) -> String {
    let digits = value.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(' ');
        }
        result.push(c);
    }
    result
}

/// Цена в рублях: "5 600 ₽"
pub fn format_price(value: u64) -> String {
    format!("{} ₽", format_number_int(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_int() {
        assert_eq!(format_number_int(0), "0");
        assert_eq!(format_number_int(999), "999");
        assert_eq!(format_number_int(1000), "1 000");
        assert_eq!(format_number_int(1234567), "1 234 567");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(11200), "11 200 ₽");
    }
}
