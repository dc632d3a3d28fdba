//! Value rendering.
//!
//! Values are printed the way they would be written in source: `2L`,
//! `0.5F`, `'c'`, `"text"`, `[1, 2, 3]`. Output is budgeted by a length
//! hint: strings, `toString()` text and sequences stop growing once the
//! running length of the rendering passes it, and mark the cut with `...`.

use vouch_runtime::{java_double_string, java_float_string, Value};

/// Default overall budget for one rendered value, in characters.
pub const DEFAULT_LENGTH_HINT: usize = 100;

/// Smallest budget a single string or `toString()` text is ever given.
const MIN_TEXT_BUDGET: usize = 10;

/// Budget for the escaped text of a `char`.
const CHAR_BUDGET: usize = 100;

/// Renders runtime values for diagnostics.
///
/// Any `Fn(&Value) -> String` is a value formatter.
pub trait ValueFormatter {
    fn format(&self, value: &Value) -> String;
}

impl<F> ValueFormatter for F
where
    F: Fn(&Value) -> String,
{
    fn format(&self, value: &Value) -> String {
        self(value)
    }
}

/// Source-literal rendering with abbreviation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DefaultValueFormatter {
    length_hint: usize,
}

impl DefaultValueFormatter {
    pub const fn new(length_hint: usize) -> Self {
        DefaultValueFormatter { length_hint }
    }

    pub const fn length_hint(&self) -> usize {
        self.length_hint
    }

    fn text_budget(&self, out: &Out) -> usize {
        self.length_hint.saturating_sub(out.len).max(MIN_TEXT_BUDGET)
    }

    fn write_value(&self, out: &mut Out, value: &Value) {
        match value {
            Value::Null => out.push("null"),
            Value::Bool(_) | Value::Byte(_) | Value::Short(_) | Value::Int(_) => {
                out.push(&value.to_string());
            }
            Value::Char(_) => {
                out.push("'");
                write_escaped(out, &value.to_string(), CHAR_BUDGET);
                out.push("'");
            }
            Value::Long(v) => {
                out.push(&v.to_string());
                out.push("L");
            }
            Value::Float(v) => out.push(&float_text(*v)),
            Value::Double(v) => out.push(&double_text(*v)),
            Value::Str(s) => {
                out.push("\"");
                let budget = self.text_budget(out);
                write_escaped(out, s, budget);
                out.push("\"");
            }
            Value::Map(entries) => {
                self.write_sequence(out, entries.as_slice(), |this, out, (key, value)| {
                    this.write_text(out, &format!("{key}={value}"));
                });
            }
            Value::Array(array) => {
                self.write_sequence(out, array.items.as_slice(), Self::write_value);
            }
            Value::List(items) => self.write_sequence(out, items.as_slice(), Self::write_value),
            Value::Object(_) | Value::Throwable(_) => self.write_text(out, &value.to_string()),
        }
    }

    /// `[a, b, ...]`: once the running length passes the hint, the
    /// remaining items collapse into `...`.
    fn write_sequence<T>(
        &self,
        out: &mut Out,
        items: &[T],
        mut write_item: impl FnMut(&Self, &mut Out, &T),
    ) {
        out.push("[");
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(", ");
            }
            if out.len > self.length_hint {
                out.push("...");
                break;
            }
            write_item(self, out, item);
        }
        out.push("]");
    }

    /// `toString()` text, abbreviated to what is left of the budget.
    fn write_text(&self, out: &mut Out, text: &str) {
        let budget = self.text_budget(out);
        match text.char_indices().nth(budget) {
            Some((cut, _)) => {
                out.push(&text[..cut]);
                out.push("...");
            }
            None => out.push(text),
        }
    }
}

impl Default for DefaultValueFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_LENGTH_HINT)
    }
}

impl ValueFormatter for DefaultValueFormatter {
    fn format(&self, value: &Value) -> String {
        let mut out = Out::default();
        self.write_value(&mut out, value);
        out.text
    }
}

/// Output buffer that tracks its length in characters.
#[derive(Default)]
struct Out {
    text: String,
    len: usize,
}

impl Out {
    fn push(&mut self, s: &str) {
        self.text.push_str(s);
        self.len += s.chars().count();
    }
}

fn float_text(v: f32) -> String {
    if v.is_nan() {
        "Float.NaN".to_string()
    } else if v.is_infinite() {
        if v.is_sign_positive() {
            "Float.POSITIVE_INFINITY"
        } else {
            "Float.NEGATIVE_INFINITY"
        }
        .to_string()
    } else {
        format!("{}F", java_float_string(v))
    }
}

fn double_text(v: f64) -> String {
    if v.is_nan() {
        "Double.NaN".to_string()
    } else if v.is_infinite() {
        if v.is_sign_positive() {
            "Double.POSITIVE_INFINITY"
        } else {
            "Double.NEGATIVE_INFINITY"
        }
        .to_string()
    } else {
        java_double_string(v)
    }
}

/// Escaped contents of a string or char literal.
///
/// Stops with `...` once `budget` characters of escaped text are written
/// and input remains.
fn write_escaped(out: &mut Out, input: &str, budget: usize) {
    let mut written = 0;
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        let before = out.len;
        match c {
            '\\' => out.push("\\\\"),
            '\t' => out.push("\\t"),
            '\n' => out.push("\\n"),
            '\u{c}' => out.push("\\f"),
            '\u{8}' => out.push("\\b"),
            '\r' => out.push("\\r"),
            '\'' => out.push("\\'"),
            '"' => out.push("\\\""),
            c if c < ' ' => out.push(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c.encode_utf8(&mut [0; 4])),
        }
        written += out.len - before;
        if written >= budget && chars.peek().is_some() {
            out.push("...");
            break;
        }
    }
}

#[cfg(test)]
mod tests;
