/// Formats a result the way the lexer would read it back.
///
/// NaN is written `.nan` and the infinities `.inf` / `-.inf`; every other
/// value uses `f64`'s `Display`, which already drops the fraction of integral
/// values.
///
/// ## Example
/// ```
/// use reckon::util::num::format_number;
///
/// assert_eq!(format_number(15.0), "15");
/// assert_eq!(format_number(0.25), "0.25");
/// assert_eq!(format_number(f64::NAN), ".nan");
/// assert_eq!(format_number(f64::NEG_INFINITY), "-.inf");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        ".nan".to_string()
    } else if value == f64::INFINITY {
        ".inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-.inf".to_string()
    } else {
        value.to_string()
    }
}
