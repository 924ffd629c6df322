//! Number formatting utilities for human-readable display.
//!
//! Output follows en-US conventions: `,` thousands separators, `.` decimal
//! point, trailing fractional zeros trimmed.

const COMPACT_UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Trims trailing zeros, adds thousands separators.
pub fn group_thousands(formatted: String) -> String {
    let trimmed = if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    };

    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed.as_str()),
    };
    let (integer_part, fraction) = match body.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (body, None),
    };

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, ch) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        // "-0" after rounding is just zero
        None if grouped == "0" => grouped,
        None => format!("{}{}", sign, grouped),
    }
}

/// Format with up to three fraction digits, e.g. `1,234,567.891`.
pub fn format_number(value: f64) -> String {
    format_with_decimals(value, 3)
}

/// Format with at most `decimals` fraction digits.
pub fn format_with_decimals(value: f64, decimals: usize) -> String {
    group_thousands(format!("{:.1$}", value, decimals))
}

/// Short axis-tick notation: `1.2K`, `35M`, `1.5B`.
///
/// One fraction digit below 10 of a unit, none above.
pub fn format_compact(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let mut unit = COMPACT_UNITS.iter().position(|(scale, _)| abs >= *scale);

    loop {
        let (scaled, suffix) = match unit {
            Some(i) => (abs / COMPACT_UNITS[i].0, COMPACT_UNITS[i].1),
            None => (abs, ""),
        };
        let decimals: i32 = if scaled < 10.0 { 1 } else { 0 };
        let factor = 10f64.powi(decimals);
        let rounded = (scaled * factor).round() / factor;

        // 999_999 rounds to 1000K; promote to the next unit.
        if rounded >= 1000.0 {
            let bigger = match unit {
                Some(i) => i.checked_sub(1),
                None => Some(COMPACT_UNITS.len() - 1),
            };
            if bigger.is_some() {
                unit = bigger;
                continue;
            }
        }

        let digits = group_thousands(format!("{:.1$}", rounded, decimals as usize));
        if digits == "0" {
            return digits;
        }
        return format!("{}{}{}", sign, digits, suffix);
    }
}

/// Fractional rate as a percentage with four decimals: `0.0001` → `0.0100%`.
pub fn format_rate_percent(rate: f64) -> String {
    format!("{:.4}%", rate * 100.0)
}

/// Price with a dollar prefix, shortest round-trip representation.
pub fn format_price(price: f64) -> String {
    format!("${}", price)
}
