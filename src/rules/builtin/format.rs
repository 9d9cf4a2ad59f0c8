//! Format rules: number, digits, email, url, date, dateISO, match
//!
//! These are the sole reporters of format errors. Numeric bound rules lean
//! on them by treating non-coercible values as inapplicable, so a form
//! author pairs `min` with `number` to also reject garbage input.

use std::sync::LazyLock;

use chrono::NaiveDate;
use serde_json::Value;

use crate::core::coerce_number;
use crate::rules::{Rule, RuleContext};

static EMAIL_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex")
});

static URL_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)^(https?|ftp)://[^\s/$.?#][^\s]*$").expect("url regex")
});

static DATE_ISO_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^\d{4}[-/](0?[1-9]|1[012])[-/](0?[1-9]|[12]\d|3[01])$")
        .expect("iso date regex")
});

const NUMBER_MESSAGE: &str = "Please enter a valid number.";
const DIGITS_MESSAGE: &str = "Please enter only digits.";
const EMAIL_MESSAGE: &str = "Please enter a valid email address.";
const URL_MESSAGE: &str = "Please enter a valid URL.";
const DATE_MESSAGE: &str = "Please enter a valid date.";
const DATE_ISO_MESSAGE: &str = "Please enter a valid date (ISO).";
const MATCH_MESSAGE: &str = "Please enter a valid value.";

/// `number`: the value must be a finite number or a string fully matching
/// the numeric grammar.
pub struct Number;

impl Rule for Number {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        if coerce_number(ctx.value).is_some_and(f64::is_finite) {
            return None;
        }
        Some(ctx.message(NUMBER_MESSAGE, &[]))
    }
}

/// `digits`: a non-negative integer, as a digit string or an integral
/// number value.
pub struct Digits;

impl Rule for Digits {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let ok = match ctx.value {
            Value::String(s) => !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()),
            Value::Number(n) => n.as_u64().is_some(),
            _ => false,
        };
        if ok {
            None
        } else {
            Some(ctx.message(DIGITS_MESSAGE, &[]))
        }
    }
}

/// `email`: pragmatic shape check (`local@domain.tld`, no whitespace).
pub struct Email;

impl Rule for Email {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        match ctx.value {
            Value::String(s) if EMAIL_RE.is_match(s) => None,
            _ => Some(ctx.message(EMAIL_MESSAGE, &[])),
        }
    }
}

/// `url`: http, https or ftp URL.
pub struct Url;

impl Rule for Url {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        match ctx.value {
            Value::String(s) if URL_RE.is_match(s) => None,
            _ => Some(ctx.message(URL_MESSAGE, &[])),
        }
    }
}

/// `date`: a parseable calendar date (`YYYY-MM-DD`, `YYYY/MM/DD`,
/// `MM/DD/YYYY` or `MM-DD-YYYY`), with real day-of-month bounds.
pub struct Date;

impl Rule for Date {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        match ctx.value {
            Value::String(s) if parse_date(s).is_some() => None,
            _ => Some(ctx.message(DATE_MESSAGE, &[])),
        }
    }
}

/// `dateISO`: `YYYY-MM-DD` (or slash-separated) by shape only.
pub struct DateIso;

impl Rule for DateIso {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        match ctx.value {
            Value::String(s) if DATE_ISO_RE.is_match(s) => None,
            _ => Some(ctx.message(DATE_ISO_MESSAGE, &[])),
        }
    }
}

/// `match`: the string value must contain a match of the parameter regex.
///
/// An invalid pattern makes the rule inapplicable; that is a spec-authoring
/// bug, so it is logged rather than surfaced to the user.
pub struct Match;

impl Rule for Match {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let Value::String(pattern) = ctx.param else {
            return None;
        };
        let Value::String(value) = ctx.value else {
            return None;
        };
        match regex::Regex::new(pattern) {
            Ok(re) if re.is_match(value) => None,
            Ok(_) => Some(ctx.message(MATCH_MESSAGE, &[])),
            Err(err) => {
                tracing::warn!(pattern, %err, "invalid match pattern, rule skipped");
                None
            }
        }
    }
}

/// Accepted date shapes, year-first before month-first so `2023-02-01`
/// is never read as month 2023.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y"];

/// Parses a date string into a calendar date. `chrono` enforces real
/// month and day-of-month bounds, leap years included.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}
