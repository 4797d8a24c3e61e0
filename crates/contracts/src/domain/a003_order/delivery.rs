//! Варианты дат, интервалов и городов доставки

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};

/// Города доставки; the first one is the form default
pub const CITIES: [&str; 5] = [
    "Москва",
    "Санкт-Петербург",
    "Екатеринбург",
    "Казань",
    "Новосибирск",
];

/// How many days ahead a delivery can be booked, today included
pub const DELIVERY_DAYS_AHEAD: u64 = 7;

const FIRST_SLOT_HOUR: u32 = 10;
const LAST_SLOT_HOUR: u32 = 20;

/// Интервал доставки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliverySlot {
    pub from: NaiveTime,
    pub to: NaiveTime,
}

impl DeliverySlot {
    /// `"10:00-11:00"`, the value used by the slot select
    pub fn value(&self) -> String {
        format!("{}-{}", self.from.format("%H:%M"), self.to.format("%H:%M"))
    }

    pub fn label(&self) -> String {
        format!("С {} до {}", self.from.format("%H:%M"), self.to.format("%H:%M"))
    }
}

/// Hourly slots from 10:00-11:00 up to 20:00-21:00
pub fn delivery_time_slots() -> Vec<DeliverySlot> {
    (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR)
        .filter_map(|hour| {
            Some(DeliverySlot {
                from: NaiveTime::from_hms_opt(hour, 0, 0)?,
                to: NaiveTime::from_hms_opt(hour + 1, 0, 0)?,
            })
        })
        .collect()
}

/// Parse `"HH:MM-HH:MM"`; missing halves default to 10:00 and 11:00
pub fn parse_time_slot(value: &str) -> DeliverySlot {
    let (from, to) = value.split_once('-').unwrap_or((value, ""));
    let parse = |s: &str, default_hour: u32| {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .ok()
            .or_else(|| NaiveTime::from_hms_opt(default_hour, 0, 0))
            .unwrap_or_default()
    };
    DeliverySlot {
        from: parse(from, 10),
        to: parse(to, 11),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryDateOption {
    pub date: NaiveDate,
    pub label: String,
}

impl DeliveryDateOption {
    /// `YYYY-MM-DD`
    pub fn value(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Today and the following days, labelled the way the storefront shows them
pub fn delivery_date_options(today: NaiveDate) -> Vec<DeliveryDateOption> {
    (0..DELIVERY_DAYS_AHEAD)
        .filter_map(|offset| {
            let date = today.checked_add_days(Days::new(offset))?;
            let day_month = format!("{} {}", date.day(), month_genitive(date.month()));
            let label = match offset {
                0 => format!("Сегодня, {}", day_month),
                1 => format!("Завтра, {}", day_month),
                _ => format!("{}, {}", weekday_name(date.weekday()), day_month),
            };
            Some(DeliveryDateOption { date, label })
        })
        .collect()
}

fn month_genitive(month: u32) -> &'static str {
    match month {
        1 => "января",
        2 => "февраля",
        3 => "марта",
        4 => "апреля",
        5 => "мая",
        6 => "июня",
        7 => "июля",
        8 => "августа",
        9 => "сентября",
        10 => "октября",
        11 => "ноября",
        _ => "декабря",
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "понедельник",
        Weekday::Tue => "вторник",
        Weekday::Wed => "среда",
        Weekday::Thu => "четверг",
        Weekday::Fri => "пятница",
        Weekday::Sat => "суббота",
        Weekday::Sun => "воскресенье",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_slots() {
        let slots = delivery_time_slots();
        assert_eq!(slots.len(), 11);
        assert_eq!(slots[0].value(), "10:00-11:00");
        assert_eq!(slots[10].value(), "20:00-21:00");
        assert_eq!(slots[0].label(), "С 10:00 до 11:00");
    }

    #[test]
    fn test_parse_time_slot() {
        let slot = parse_time_slot("14:00-15:00");
        assert_eq!(slot.value(), "14:00-15:00");
        assert_eq!(parse_time_slot("").value(), "10:00-11:00");
    }

    #[test]
    fn test_date_options() {
        // 10 ноября 2024 - воскресенье
        let today = NaiveDate::from_ymd_opt(2024, 11, 10).unwrap();
        let options = delivery_date_options(today);
        assert_eq!(options.len(), 7);
        assert_eq!(options[0].label, "Сегодня, 10 ноября");
        assert_eq!(options[1].label, "Завтра, 11 ноября");
        assert_eq!(options[2].label, "вторник, 12 ноября");
        assert_eq!(options[2].value(), "2024-11-12");
    }

    #[test]
    fn test_date_options_cross_month() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let options = delivery_date_options(today);
        assert_eq!(options[2].label, "среда, 1 января");
    }
}
