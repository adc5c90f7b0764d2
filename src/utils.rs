use pretty_env_logger::formatted_builder;
use crate::jetton::EncodeError;
use crate::tvm::MAX_COINS;

const NANO_DIGITS: usize = 9;

pub fn init_logger() -> Result<(), log::SetLoggerError> {
    let mut builder = formatted_builder();

    if let Ok(s) = ::std::env::var("RUST_LOG") {
        builder.parse_filters(&s);
    } else {
        builder.parse_filters("info");
    }

    builder.try_init()
}

/// Converts a decimal TON amount such as `"0.05"` to nanotons
pub fn to_nano(amount: &str) -> Result<u128, EncodeError> {
    let amount = amount.trim();
    if amount.starts_with('-') {
        return Err(EncodeError::NegativeAmount(amount.to_string()));
    }
    let invalid = || EncodeError::InvalidAmount(amount.to_string());
    let (whole, frac) = amount.split_once('.').unwrap_or((amount, ""));
    if (whole.is_empty() && frac.is_empty()) || frac.len() > NANO_DIGITS {
        return Err(invalid());
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let digits = format!("{whole}{frac:0<NANO_DIGITS$}");
    let nano = digits
        .parse::<u128>()
        .map_err(|_| EncodeError::AmountOutOfRange(amount.to_string()))?;
    if nano > MAX_COINS {
        return Err(EncodeError::AmountOutOfRange(amount.to_string()));
    }
    Ok(nano)
}

/// Formats nanotons as a decimal TON amount without trailing zeros
pub fn from_nano(nano: u128) -> String {
    format_units(nano, NANO_DIGITS as u8)
}

/// Formats a base-unit amount with `decimals` fractional digits, trailing
/// zeros trimmed
pub fn format_units(amount: u128, decimals: u8) -> String {
    let Some(scale) = 10u128.checked_pow(decimals as u32) else {
        let digits = format!("{amount:0>width$}", width = decimals as usize + 1);
        let (whole, frac) = digits.split_at(digits.len() - decimals as usize);
        return join_units(whole.trim_start_matches('0'), frac);
    };
    let whole = (amount / scale).to_string();
    let frac = format!("{:0width$}", amount % scale, width = decimals as usize);
    join_units(&whole, &frac)
}

fn join_units(whole: &str, frac: &str) -> String {
    let whole = if whole.is_empty() { "0" } else { whole };
    match frac.trim_end_matches('0') {
        "" => whole.to_string(),
        frac => format!("{whole}.{frac}"),
    }
}
