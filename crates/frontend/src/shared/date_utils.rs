/// Utilities for calendar dates shown in the TIN forms
use chrono::{Local, NaiveDate};

/// Today in the browser's local time zone. Used as the default effective date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
