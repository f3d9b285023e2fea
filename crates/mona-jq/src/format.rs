//! Indented, optionally colorized JSON output.
//!
//! Styling uses fixed ANSI escape sequences: punctuation bold, object keys
//! bold blue, string values green. The constants are shared with tests so
//! expected output is spelled with names rather than raw escapes.

use std::io::{self, Write};

use serde_json::Value;

/// Bold, for `{}[],:` punctuation.
pub(crate) const PUNCT: &str = "\x1b[1m";
/// Bold blue, for object keys.
pub(crate) const KEY: &str = "\x1b[1;34m";
/// Green, for string values.
pub(crate) const STRING: &str = "\x1b[32m";
/// Reset sequence.
pub(crate) const RESET: &str = "\x1b[0m";

/// Write `value` as JSON. `indent` is the per-level unit; when empty the
/// output is compact (no newlines, no space after `:`).
pub(crate) fn write_json<W: Write>(
    w: &mut W,
    value: &Value,
    indent: &str,
    colorize: bool,
) -> io::Result<()> {
    Printer { indent, colorize }.value(w, value, 0)
}

struct Printer<'a> {
    indent: &'a str,
    colorize: bool,
}

impl Printer<'_> {
    fn value<W: Write>(&self, w: &mut W, value: &Value, depth: usize) -> io::Result<()> {
        match value {
            Value::Null => write!(w, "null"),
            Value::Bool(b) => write!(w, "{b}"),
            Value::Number(n) => write!(w, "{n}"),
            Value::String(s) => self.styled(w, STRING, &quote(s)?),
            Value::Array(items) => self.array(w, items, depth),
            Value::Object(map) => self.object(w, map, depth),
        }
    }

    fn array<W: Write>(&self, w: &mut W, items: &[Value], depth: usize) -> io::Result<()> {
        self.styled(w, PUNCT, "[")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.styled(w, PUNCT, ",")?;
            }
            self.break_line(w, depth + 1)?;
            self.value(w, item, depth + 1)?;
        }
        if !items.is_empty() {
            self.break_line(w, depth)?;
        }
        self.styled(w, PUNCT, "]")
    }

    fn object<W: Write>(
        &self,
        w: &mut W,
        map: &serde_json::Map<String, Value>,
        depth: usize,
    ) -> io::Result<()> {
        self.styled(w, PUNCT, "{")?;
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                self.styled(w, PUNCT, ",")?;
            }
            self.break_line(w, depth + 1)?;
            self.styled(w, KEY, &quote(key)?)?;
            self.styled(w, PUNCT, ":")?;
            if !self.indent.is_empty() {
                w.write_all(b" ")?;
            }
            self.value(w, value, depth + 1)?;
        }
        if !map.is_empty() {
            self.break_line(w, depth)?;
        }
        self.styled(w, PUNCT, "}")
    }

    fn styled<W: Write>(&self, w: &mut W, style: &str, text: &str) -> io::Result<()> {
        if self.colorize {
            write!(w, "{style}{text}{RESET}")
        } else {
            w.write_all(text.as_bytes())
        }
    }

    fn break_line<W: Write>(&self, w: &mut W, depth: usize) -> io::Result<()> {
        if self.indent.is_empty() {
            return Ok(());
        }
        writeln!(w)?;
        for _ in 0..depth {
            w.write_all(self.indent.as_bytes())?;
        }
        Ok(())
    }
}

/// JSON-quote a string, escaping as serde_json would.
fn quote(s: &str) -> io::Result<String> {
    serde_json::to_string(s).map_err(io::Error::other)
}
