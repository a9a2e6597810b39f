use minijinja::{Environment, Error, ErrorKind};
use minijinja::value::Rest;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use anyhow::{Result, anyhow};

/// Marker that turns a parameter string into an expression.
pub const EXPRESSION_OPEN: &str = "{{";

pub fn create_environment() -> Environment<'static> {
    let mut env = Environment::new();

    env.add_function("CONCAT", concat);
    env.add_function("UPPER", upper);
    env.add_function("LOWER", lower);
    env.add_function("TRIM", trim);

    // Date range helpers
    env.add_function("NOW", now);
    env.add_function("DATE_ADD", date_add);
    env.add_function("TO_UTC", to_utc);
    env.add_function("TO_ISO", to_utc);

    env
}

pub fn is_expression(raw: &str) -> bool {
    raw.contains(EXPRESSION_OPEN)
}

/// Renders `template` with the item payload as the template context.
pub fn render(env: &Environment<'_>, template: &str, item: &Value) -> Result<String> {
    env.render_str(template, item)
        .map_err(|e| anyhow!("Failed to render expression '{}': {}", template, e))
}

fn concat(args: Rest<minijinja::Value>) -> String {
    let mut result = String::new();
    for arg in args.0 {
        match arg.as_str() {
            Some(s) => result.push_str(s),
            None => result.push_str(&arg.to_string()),
        }
    }
    result
}

fn upper(s: String) -> String {
    s.to_uppercase()
}

fn lower(s: String) -> String {
    s.to_lowercase()
}

fn trim(s: String) -> String {
    s.trim().to_string()
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn invalid(msg: String) -> Error {
    Error::new(ErrorKind::InvalidOperation, msg)
}

fn parse_utc(ts: &str) -> Result<DateTime<Utc>, Error> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(ts, fmt) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(ts, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(invalid(format!("Could not parse date: {}", ts)))
}

fn to_utc(ts: String) -> Result<String, Error> {
    Ok(parse_utc(&ts)?.to_rfc3339())
}

fn date_add(ts: String, amount: i64, unit: String) -> Result<String, Error> {
    let dt = parse_utc(&ts)?;
    let delta = match unit.to_lowercase().as_str() {
        "week" | "weeks" => Duration::try_weeks(amount),
        "day" | "days" => Duration::try_days(amount),
        "hour" | "hours" => Duration::try_hours(amount),
        "minute" | "minutes" => Duration::try_minutes(amount),
        "second" | "seconds" => Duration::try_seconds(amount),
        _ => return Err(invalid(format!("Unknown unit: {}", unit))),
    };
    delta
        .and_then(|d| dt.checked_add_signed(d))
        .map(|shifted| shifted.to_rfc3339())
        .ok_or_else(|| invalid(format!("DATE_ADD out of range: {} {} {}", ts, amount, unit)))
}
