//! The `timeago` and `timefmt` jq functions.
//!
//! Both delegate to [`mona_core::text`]. jaq natives are plain function
//! pointers, so `timefmt`'s layout argument cannot be captured directly;
//! instead a prelude definition packs `[$f, .]` into an array for a private
//! zero-arity native. `timeago` reads the clock per value.

use chrono::Utc;
use jaq_core::box_iter::box_once;
use jaq_core::compile::Lut;
use jaq_core::{Cv, Error, Exn, Native, ValR, ValXs};
use jaq_json::Val;
use mona_core::text;

/// Definitions mapping the public helper names onto the reserved natives.
/// Prepended to the program when time functions are requested.
pub(crate) const PRELUDE: &str =
    "def timeago: __timeago; def timefmt($f): [$f, .] | __timefmt; ";

/// Native registrations for the helpers. Always registered; the reserved
/// names are only reachable through [`PRELUDE`].
pub(crate) fn time_funs() -> [jaq_std::Filter<Native<Val>>; 2] {
    [
        ("__timeago", Box::new([]), Native::new(timeago)),
        ("__timefmt", Box::new([]), Native::new(timefmt)),
    ]
}

fn timeago<'a>(_lut: &'a Lut<Native<Val>>, cv: Cv<'a, Val>) -> ValXs<'a, Val> {
    box_once(timeago_val(cv.1).map_err(Exn::from))
}

fn timefmt<'a>(_lut: &'a Lut<Native<Val>>, cv: Cv<'a, Val>) -> ValXs<'a, Val> {
    box_once(timefmt_val(cv.1).map_err(Exn::from))
}

fn timeago_val(v: Val) -> ValR<Val> {
    let Val::Str(input) = &v else {
        return Err(Error::str(format!("{v} is not a string")));
    };
    text::relative_from_now(Utc::now(), input.as_str())
        .map(Val::from)
        .map_err(|e| Error::str(format!("cannot format {v}, {e}")))
}

fn timefmt_val(v: Val) -> ValR<Val> {
    // The prelude guarantees a [layout, input] pair.
    let Val::Arr(pair) = &v else {
        return Err(Error::str(format!("{v} is not a string")));
    };
    let layout = match pair.first() {
        Some(Val::Str(layout)) => layout,
        Some(other) => return Err(Error::str(format!("{other} is not a string"))),
        None => return Err(Error::str("timefmt requires a layout argument")),
    };
    let input = match pair.get(1) {
        Some(Val::Str(input)) => input,
        Some(other) => return Err(Error::str(format!("{other} is not a string"))),
        None => return Err(Error::str("timefmt requires a layout argument")),
    };
    text::format_at(layout.as_str(), input.as_str())
        .map(Val::from)
        .map_err(|e| Error::str(format!("cannot format {input:?}, {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeago_val_requires_string() {
        let err = timeago_val(Val::Int(42)).unwrap_err();
        assert!(err.to_string().contains("is not a string"));
    }

    #[test]
    fn timefmt_val_formats() {
        let pair = Val::from(serde_json::json!(["%Y/%m/%d", "2025-01-20T01:08:15Z"]));
        assert_eq!(timefmt_val(pair).unwrap(), Val::from("2025/01/20".to_string()));
    }

    #[test]
    fn timefmt_val_rejects_malformed_timestamp() {
        let pair = Val::from(serde_json::json!(["%Y", "invalid"]));
        let err = timefmt_val(pair).unwrap_err();
        assert!(err.to_string().contains("cannot format"));
    }

    #[test]
    fn timefmt_val_rejects_non_string_layout() {
        let pair = Val::from(serde_json::json!([3, "2025-01-20T01:08:15Z"]));
        let err = timefmt_val(pair).unwrap_err();
        assert!(err.to_string().contains("is not a string"));
    }
}
