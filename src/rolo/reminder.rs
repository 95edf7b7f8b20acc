//! # Birthday Reminders
//!
//! Works out which contacts should be greeted in the next few days.
//!
//! For every contact with a birthday:
//! 1. Take the birthday's month/day in the current year. If that day is already
//!    behind `today`, use next year's instead. Reminders only look forward.
//! 2. If that occurrence is a Saturday or Sunday, the *greeting date* moves to
//!    the following Monday. The stored birthday never changes.
//! 3. The contact is due if `today <= greeting <= today + window`.
//!
//! Results are ordered by greeting date, then by name.
//!
//! A February 29 birthday is celebrated on February 28 in non-leap years.
//!
//! Date arithmetic saturates at [`NaiveDate::MAX`], so any `u32` window is safe.

use crate::model::Contact;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

/// A contact due for greeting, paired with the business day to greet on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Greeting {
    pub name: String,
    pub birthday: NaiveDate,
    pub greeting_date: NaiveDate,
}

/// The date a birthday falls on in `year`.
pub fn occurrence_in(birthday: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(birthday)
}

/// The next occurrence of `birthday` on or after `today`.
pub fn next_occurrence(birthday: NaiveDate, today: NaiveDate) -> NaiveDate {
    let this_year = occurrence_in(birthday, today.year());
    if this_year < today {
        occurrence_in(birthday, today.year() + 1)
    } else {
        this_year
    }
}

/// Moves weekend dates forward to Monday.
pub fn to_business_day(date: NaiveDate) -> NaiveDate {
    let shift = match date.weekday() {
        Weekday::Sat => 2,
        Weekday::Sun => 1,
        _ => 0,
    };
    date.checked_add_days(Days::new(shift)).unwrap_or(date)
}

pub fn greeting_date(birthday: NaiveDate, today: NaiveDate) -> NaiveDate {
    to_business_day(next_occurrence(birthday, today))
}

/// Contacts whose greeting date lands within `window_days` of `today`, inclusive.
pub fn upcoming<'a, I>(contacts: I, today: NaiveDate, window_days: u32) -> Vec<Greeting>
where
    I: IntoIterator<Item = &'a Contact>,
{
    let window_end = today
        .checked_add_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MAX);

    let mut due: Vec<Greeting> = contacts
        .into_iter()
        .filter_map(|contact| {
            let birthday = contact.birthday?;
            let greeting_date = greeting_date(birthday, today);
            (greeting_date <= window_end).then(|| Greeting {
                name: contact.name.clone(),
                birthday,
                greeting_date,
            })
        })
        .collect();

    due.sort_by(|a, b| {
        a.greeting_date
            .cmp(&b.greeting_date)
            .then_with(|| a.name.cmp(&b.name))
    });
    due
}
