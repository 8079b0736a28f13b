//! Number and address formatting for display.

const SUFFIXES: [&str; 32] = [
    "", "K", "M", "B", "T", "Q", "Qi", "S", "Sp", "O", "N", "D", "Ud", "Dd", "Td", "Qd", "Qid",
    "Sd", "Spd", "Od", "Nd", "V", "Uv", "Dv", "Tv", "Qv", "Qiv", "Sv", "Spv", "Ov", "Nv", "Tg",
];

/// Formats a metric such as TVL or volume.
///
/// Values below one million keep two decimals and thousands separators
/// (`38,164.65`); larger values are scaled to a suffix (`1.50M`, `2.50B`).
pub fn format_large_number(value: f64) -> String {
    if value.is_nan() {
        return "0".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    // Tiers are chosen on the value as displayed, after rounding to cents.
    if rounded(abs) < 1_000_000.0 {
        return format!("{sign}{}", with_separators(abs));
    }

    let last = SUFFIXES.len() - 1;
    let mut exponent = ((abs.log10() / 3.0).floor() as usize).clamp(2, last);
    let mut scaled = abs / 1000f64.powi(exponent as i32);
    if rounded(scaled) >= 1000.0 && exponent < last {
        exponent += 1;
        scaled /= 1000.0;
    }
    format!("{sign}{scaled:.2}{}", SUFFIXES[exponent])
}

/// `value` as it reads with two decimals.
fn rounded(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Same as [`format_large_number`] for values that arrive as strings.
/// Unparsable input formats as `"0"`.
pub fn format_large_number_str(value: &str) -> String {
    value
        .trim()
        .parse::<f64>()
        .map(format_large_number)
        .unwrap_or_else(|_| "0".to_string())
}

/// Compact formatting for prices: `K`/`M` suffixes, exponent notation from
/// one billion, five decimals otherwise.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "N/A".to_string();
    }
    if value >= 1e9 {
        return format!("{value:.2e}").replace('e', "e+");
    }
    if value >= 1e6 {
        return format!("{:.2}M", value / 1e6);
    }
    if value >= 1e3 {
        return format!("{:.2}K", value / 1e3);
    }
    format!("{value:.5}")
}

/// Shortens a ledger address to `prefix...suffix`.
pub fn shorten_address(address: &str) -> String {
    if address.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = address.chars().collect();
    let head: String = chars.iter().take(6).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{head}...{tail}")
}

fn with_separators(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{grouped}.{fraction}")
}
