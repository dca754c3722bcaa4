pub mod json;
pub mod text;

/// Quantile of the non-`NaN` values with linear interpolation between the
/// two nearest order statistics. Returns `NaN` when no value is usable.
pub fn quantile_linear(values: &[f64], q: f64) -> f64 {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return f64::NAN;
    }
    sorted.sort_by(f64::total_cmp);
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = h - lo as f64;
    if frac == 0.0 {
        return sorted[lo];
    }
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Formats an expression value for CSV output: shortest round-trip text,
/// with integral values keeping a trailing `.0` and scientific exponents
/// signed and at least two digits wide (`1e-05`). `NaN` becomes an empty cell.
pub fn format_expression(v: f64) -> String {
    if v.is_nan() {
        return String::new();
    }
    let text = format!("{v:?}");
    match text.split_once('e') {
        Some((mantissa, exp)) => with_exponent(mantissa, exp.parse().unwrap_or(0)),
        None => text,
    }
}

pub fn format_quantile(q: f64) -> String {
    format!("{q:.2}")
}

/// General format with four significant digits: fixed notation for
/// exponents in [-4, 4), scientific otherwise, trailing zeros removed.
pub fn format_sig4(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }
    let sci = format!("{v:.3e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if (-4..4).contains(&exp) {
        let decimals = (3 - exp).max(0) as usize;
        trim_fraction(&format!("{v:.decimals$}"))
    } else {
        with_exponent(&trim_fraction(mantissa), exp)
    }
}

fn with_exponent(mantissa: &str, exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.abs())
}

fn trim_fraction(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
