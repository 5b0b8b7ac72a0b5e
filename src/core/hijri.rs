//! Gregorian to Hijri date conversion.
//!
//! The default [`TabularHijri`] uses the arithmetic Islamic calendar
//! (30-year cycle, leap years 2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29).
//! It can differ by a day from the sighting-based Umm al-Qura calendar;
//! callers needing exact Umm al-Qura dates plug in their own
//! [`HijriCalendar`].

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

const MONTHS_EN: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi al-Awwal",
    "Rabi al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Shaban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qadah",
    "Dhu al-Hijjah",
];

const MONTHS_AR: [&str; 12] = [
    "محرم",
    "صفر",
    "ربيع الأول",
    "ربيع الآخر",
    "جمادى الأولى",
    "جمادى الآخرة",
    "رجب",
    "شعبان",
    "رمضان",
    "شوال",
    "ذو القعدة",
    "ذو الحجة",
];

/// A date in the Hijri calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HijriDate {
    pub year: i32,
    /// 1 (Muharram) to 12 (Dhu al-Hijjah).
    pub month: u32,
    pub day: u32,
    pub weekday: Weekday,
}

/// Output language for [`HijriDate::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HijriLocale {
    English,
    Arabic,
}

impl HijriDate {
    pub fn month_name(&self, locale: HijriLocale) -> &'static str {
        let idx = (self.month.clamp(1, 12) - 1) as usize;
        match locale {
            HijriLocale::English => MONTHS_EN[idx],
            HijriLocale::Arabic => MONTHS_AR[idx],
        }
    }

    /// Long localized form, e.g. "Monday, 1 Ramadan 1445 AH" or
    /// "الاثنين، ١ رمضان ١٤٤٥ هـ".
    pub fn format(&self, locale: HijriLocale) -> String {
        match locale {
            HijriLocale::English => format!(
                "{}, {} {} {} AH",
                weekday_en(self.weekday),
                self.day,
                self.month_name(locale),
                self.year
            ),
            HijriLocale::Arabic => format!(
                "{}، {} {} {} هـ",
                weekday_ar(self.weekday),
                arabic_digits(&self.day.to_string()),
                self.month_name(locale),
                arabic_digits(&self.year.to_string())
            ),
        }
    }
}

/// ISO-like `YYYY-MM-DD`.
impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Converts Gregorian dates to Hijri dates.
pub trait HijriCalendar {
    /// Returns `None` for dates the calendar cannot represent.
    fn to_hijri(&self, date: NaiveDate) -> Option<HijriDate>;
}

/// Arithmetic (tabular) Islamic calendar, civil epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabularHijri;

impl TabularHijri {
    /// 1 Muharram 1 AH in the proleptic Gregorian calendar.
    fn epoch() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(622, 7, 19)
    }
}

/// Days from the epoch to 1 Muharram of `year`.
fn year_start(year: i64) -> i64 {
    (year - 1) * 354 + (3 + 11 * year).div_euclid(30)
}

/// Days from 1 Muharram to the first day of `month`.
fn month_start(month: i64) -> i64 {
    (59 * (month - 1) + 1).div_euclid(2)
}

fn ceil_div(a: i64, b: i64) -> i64 {
    -(-a).div_euclid(b)
}

impl HijriCalendar for TabularHijri {
    fn to_hijri(&self, date: NaiveDate) -> Option<HijriDate> {
        let days = (date - Self::epoch()?).num_days();
        if days < 0 {
            return None;
        }

        let year = (30 * days + 10646).div_euclid(10631);
        let month = (ceil_div(2 * (days - 29 - year_start(year)), 59) + 1).clamp(1, 12);
        let day = days - year_start(year) - month_start(month) + 1;

        Some(HijriDate {
            year: i32::try_from(year).ok()?,
            month: month as u32,
            day: day as u32,
            weekday: date.weekday(),
        })
    }
}

/// Convert a Gregorian date with the default tabular calendar.
pub fn convert_to_hijri(date: NaiveDate) -> Option<HijriDate> {
    TabularHijri.to_hijri(date)
}

fn weekday_en(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn weekday_ar(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "الاثنين",
        Weekday::Tue => "الثلاثاء",
        Weekday::Wed => "الأربعاء",
        Weekday::Thu => "الخميس",
        Weekday::Fri => "الجمعة",
        Weekday::Sat => "السبت",
        Weekday::Sun => "الأحد",
    }
}

/// Replace ASCII digits with Arabic-Indic digits.
fn arabic_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}
