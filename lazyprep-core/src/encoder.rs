use crate::{Error, MAX_WIRE_LENGTH, ParameterList, Result, StatementError, Value, WireValue};
use std::fmt::Write;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, format_description::BorrowedFormatItem,
    macros::format_description,
};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");
const TIME_FRACTION_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second].[subsecond digits:6]");
const OFFSET_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");
const OFFSET_SECONDS_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]:[offset_second]");

/// Text of a string-like parameter as the server will see it.
///
/// **Beware of zero bytes.** Text parameters end at the first zero byte: `"ab\0cd"` is
/// sent as `"ab"` and the rest is dropped without any error. Use [`crate::Binary`] when
/// the zero bytes must survive.
pub fn truncate_at_nul(value: &str) -> &str {
    match value.find('\0') {
        Some(end) => &value[..end],
        None => value,
    }
}

fn truncate_owned(mut value: String) -> String {
    let end = truncate_at_nul(&value).len();
    if end < value.len() {
        log::debug!(
            "Text parameter truncated at the zero byte in position {end} ({} bytes dropped)",
            value.len() - end
        );
        value.truncate(end);
    }
    value
}

/// Encode a sequence of `(value, nonnull)` pairs. Position `i` of the result binds `$i + 1`.
pub fn encode_parameters<I, V>(values: I) -> Result<ParameterList>
where
    I: IntoIterator<Item = (V, bool)>,
    V: Into<Value>,
{
    let values = values.into_iter();
    let mut result = ParameterList::with_capacity(values.size_hint().0);
    for (value, nonnull) in values {
        let placeholder = result.len() + 1;
        result.push(encode(value.into(), nonnull, Some(placeholder))?);
    }
    Ok(result)
}

/// Encode a single parameter.
///
/// The result is [`WireValue::Null`] when `nonnull` is false or when the value itself is
/// NULL. [`Value::Blob`] becomes [`WireValue::Binary`] with the exact bytes, everything else
/// is rendered as text and cut at its first zero byte (see [`truncate_at_nul`]).
pub fn encode_value(value: Value, nonnull: bool) -> Result<WireValue> {
    encode(value, nonnull, None)
}

pub(crate) fn encode(value: Value, nonnull: bool, placeholder: Option<usize>) -> Result<WireValue> {
    if !nonnull {
        return Ok(WireValue::Null);
    }
    let encoded = match value {
        Value::Blob(Some(v)) => check_length(v.len()).map(|_| WireValue::Binary(v)),
        v if v.is_null() => return Ok(WireValue::Null),
        v => render(v).and_then(|v| {
            let v = truncate_owned(v);
            check_length(v.len())?;
            Ok(WireValue::Text(v))
        }),
    };
    encoded.map_err(|e| {
        let e = Error::new(match placeholder {
            Some(placeholder) => e.at(placeholder),
            None => e,
        });
        log::error!("{:#}", e);
        e
    })
}

type Rendered<T> = std::result::Result<T, StatementError>;

fn check_length(len: usize) -> Rendered<()> {
    if len > MAX_WIRE_LENGTH {
        return Err(StatementError::encode(format!(
            "{len} bytes exceed the maximum parameter length of {MAX_WIRE_LENGTH} bytes"
        )));
    }
    Ok(())
}

/// Textual rendering of a non null value.
fn render(value: Value) -> Rendered<String> {
    let mut out = String::new();
    write_value(&mut out, value)?;
    Ok(out)
}

fn write_value(out: &mut String, value: Value) -> Rendered<()> {
    macro_rules! write_integer {
        ($v:expr) => {
            out.push_str(itoa::Buffer::new().format($v))
        };
    }
    macro_rules! write_float {
        ($v:expr) => {{
            let v = $v;
            if v.is_nan() {
                out.push_str("NaN");
            } else if v.is_infinite() {
                out.push_str(if v > 0.0 { "Infinity" } else { "-Infinity" });
            } else {
                out.push_str(ryu::Buffer::new().format_finite(v));
            }
        }};
    }
    match value {
        Value::Null => out.push_str("NULL"),
        Value::Boolean(Some(v)) => out.push_str(if v { "true" } else { "false" }),
        Value::Int8(Some(v)) => write_integer!(v),
        Value::Int16(Some(v)) => write_integer!(v),
        Value::Int32(Some(v)) => write_integer!(v),
        Value::Int64(Some(v)) => write_integer!(v),
        Value::Int128(Some(v)) => write_integer!(v),
        Value::UInt8(Some(v)) => write_integer!(v),
        Value::UInt16(Some(v)) => write_integer!(v),
        Value::UInt32(Some(v)) => write_integer!(v),
        Value::UInt64(Some(v)) => write_integer!(v),
        Value::UInt128(Some(v)) => write_integer!(v),
        Value::Float32(Some(v)) => write_float!(v),
        Value::Float64(Some(v)) => write_float!(v),
        Value::Decimal(Some(v)) => {
            let _ = write!(out, "{v}");
        }
        Value::Char(Some(v)) => out.push(v),
        Value::Varchar(Some(v)) => out.push_str(&v),
        Value::Date(Some(v)) => write_date(out, &v)?,
        Value::Time(Some(v)) => write_time(out, &v)?,
        Value::Timestamp(Some(v)) => write_timestamp(out, &v)?,
        Value::TimestampWithTimezone(Some(v)) => write_timestamp_tz(out, &v)?,
        Value::Uuid(Some(v)) => {
            let _ = write!(out, "{}", v.hyphenated());
        }
        Value::List(Some(v), ..) => write_list(out, v)?,
        Value::Blob(Some(..)) => {
            return Err(StatementError::encode(
                "binary values have no textual form, send them as a parameter of their own",
            ));
        }
        _ => out.push_str("NULL"),
    }
    Ok(())
}

fn format_error(value: &dyn std::fmt::Debug, error: time::error::Format) -> StatementError {
    StatementError::encode(format!("cannot render {value:?}: {error}"))
}

fn check_year(value: &Date) -> Rendered<()> {
    if !(1..=9999).contains(&value.year()) {
        return Err(StatementError::encode(format!(
            "year {} of {value} is outside the range 1..=9999",
            value.year()
        )));
    }
    Ok(())
}

fn write_date(out: &mut String, value: &Date) -> Rendered<()> {
    check_year(value)?;
    out.push_str(&value.format(DATE_FORMAT).map_err(|e| format_error(value, e))?);
    Ok(())
}

/// Precision is microseconds, the nanoseconds below are dropped.
fn write_time(out: &mut String, value: &Time) -> Rendered<()> {
    let format = if value.microsecond() == 0 {
        TIME_FORMAT
    } else {
        TIME_FRACTION_FORMAT
    };
    out.push_str(&value.format(format).map_err(|e| format_error(value, e))?);
    Ok(())
}

fn write_timestamp(out: &mut String, value: &PrimitiveDateTime) -> Rendered<()> {
    write_date(out, &value.date())?;
    out.push(' ');
    write_time(out, &value.time())
}

fn write_timestamp_tz(out: &mut String, value: &OffsetDateTime) -> Rendered<()> {
    write_date(out, &value.date())?;
    out.push(' ');
    write_time(out, &value.time())?;
    let offset = value.offset();
    let format = if offset.seconds_past_minute() == 0 {
        OFFSET_FORMAT
    } else {
        OFFSET_SECONDS_FORMAT
    };
    out.push_str(&offset.format(format).map_err(|e| format_error(value, e))?);
    Ok(())
}

/// Array literal: `{1,2,NULL}`, `{"a b","c\"d"}`, `{{1,2},{3,4}}`.
fn write_list(out: &mut String, values: Vec<Value>) -> Rendered<()> {
    out.push('{');
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        match value {
            v if v.is_null() => out.push_str("NULL"),
            Value::List(Some(v), ..) => write_list(out, v)?,
            v => {
                let element = truncate_owned(render(v)?);
                write_list_element(out, &element);
            }
        }
    }
    out.push('}');
    Ok(())
}

fn write_list_element(out: &mut String, element: &str) {
    let needs_quotes = element.is_empty()
        || element.eq_ignore_ascii_case("NULL")
        || element
            .chars()
            .any(|c| matches!(c, '{' | '}' | ',' | '"' | '\\') || c.is_whitespace());
    if !needs_quotes {
        out.push_str(element);
        return;
    }
    out.push('"');
    for c in element.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}
