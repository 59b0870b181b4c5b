//! Configuration validation.
//!
//! Checks every section before anything is built, so a bad file fails fast
//! with the offending `[section] key`.

use crate::domain::app_config::{MAX_INTERVAL_MINUTES, MAX_SYNTHETIC_BARS, SyntheticConfig};
use crate::domain::error::TradekitError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const PROVIDERS: [&str; 2] = ["csv", "synthetic"];
pub const STRATEGY_KINDS: [&str; 2] = ["threshold", "sma_crossover"];

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), TradekitError> {
    validate_data_config(config)?;
    validate_run_config(config)?;
    validate_strategy_config(config)?;
    validate_execution_config(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), TradekitError> {
    let provider = provider(config)?;
    validate_dates(config)?;

    match provider.as_str() {
        "csv" => {
            if config.get_trimmed("data", "data_dir").is_none() {
                return Err(TradekitError::config_missing("data", "data_dir"));
            }
        }
        _ => {
            if let Some(price) = optional_f64(config, "data", "start_price")? {
                if price <= 0.0 {
                    return Err(TradekitError::config_invalid(
                        "data",
                        "start_price",
                        "start_price must be positive",
                    ));
                }
            }
            let interval = optional_i64(config, "data", "interval_minutes")?
                .unwrap_or(SyntheticConfig::default().interval_minutes);
            if !(1..=MAX_INTERVAL_MINUTES).contains(&interval) {
                return Err(TradekitError::config_invalid(
                    "data",
                    "interval_minutes",
                    format!("interval_minutes must be between 1 and {MAX_INTERVAL_MINUTES}"),
                ));
            }
            let days = (required_date(config, "data", "end")?
                - required_date(config, "data", "start")?)
            .num_days()
                + 1;
            let needed = (days * 24 * 60 - 1) / interval + 1;
            if needed > MAX_SYNTHETIC_BARS {
                return Err(TradekitError::config_invalid(
                    "data",
                    "interval_minutes",
                    format!(
                        "range needs {needed} bars at {interval} min, limit is {MAX_SYNTHETIC_BARS}"
                    ),
                ));
            }
            if let Some(seed) = optional_i64(config, "data", "seed")? {
                if seed < 0 {
                    return Err(TradekitError::config_invalid(
                        "data",
                        "seed",
                        "seed must be non-negative",
                    ));
                }
            }
        }
    }
    Ok(())
}

pub fn validate_run_config(config: &dyn ConfigPort) -> Result<(), TradekitError> {
    if let Some(window) = optional_i64(config, "run", "window")? {
        if window < 0 {
            return Err(TradekitError::config_invalid(
                "run",
                "window",
                "window must be non-negative",
            ));
        }
    }
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), TradekitError> {
    let kind = strategy_kind(config)?;

    if let Some(quantity) = optional_f64(config, "strategy", "quantity")? {
        if quantity <= 0.0 {
            return Err(TradekitError::config_invalid(
                "strategy",
                "quantity",
                "quantity must be positive",
            ));
        }
    }

    match kind.as_str() {
        "threshold" => {
            let buy_above = optional_f64(config, "strategy", "buy_above")?
                .ok_or_else(|| TradekitError::config_missing("strategy", "buy_above"))?;
            if buy_above <= 0.0 {
                return Err(TradekitError::config_invalid(
                    "strategy",
                    "buy_above",
                    "buy_above must be positive",
                ));
            }
            if let Some(sell_below) = optional_f64(config, "strategy", "sell_below")? {
                if sell_below <= 0.0 || sell_below >= buy_above {
                    return Err(TradekitError::config_invalid(
                        "strategy",
                        "sell_below",
                        "sell_below must be positive and below buy_above",
                    ));
                }
            }
        }
        _ => {
            let short = optional_i64(config, "strategy", "short_window")?.unwrap_or(10);
            let long = optional_i64(config, "strategy", "long_window")?.unwrap_or(30);
            if short < 1 {
                return Err(TradekitError::config_invalid(
                    "strategy",
                    "short_window",
                    "short_window must be at least 1",
                ));
            }
            if short >= long {
                return Err(TradekitError::config_invalid(
                    "strategy",
                    "short_window",
                    "short_window must be smaller than long_window",
                ));
            }
        }
    }
    Ok(())
}

pub fn validate_execution_config(config: &dyn ConfigPort) -> Result<(), TradekitError> {
    if let Some(slippage) = optional_f64(config, "execution", "slippage_pct")? {
        if !(0.0..100.0).contains(&slippage) {
            return Err(TradekitError::config_invalid(
                "execution",
                "slippage_pct",
                "slippage_pct must be between 0 and 100",
            ));
        }
    }
    if let Some(flag) = config.get_trimmed("execution", "auto_fill") {
        let known = ["true", "false", "yes", "no", "on", "off", "1", "0"];
        if !known.contains(&flag.to_lowercase().as_str()) {
            return Err(TradekitError::config_invalid(
                "execution",
                "auto_fill",
                format!("expected true or false, got {flag:?}"),
            ));
        }
    }
    if let Some(price) = optional_f64(config, "execution", "reference_price")? {
        if price <= 0.0 {
            return Err(TradekitError::config_invalid(
                "execution",
                "reference_price",
                "reference_price must be positive",
            ));
        }
    }
    Ok(())
}

/// `[data] provider`, lower-cased; defaults to `csv`.
pub fn provider(config: &dyn ConfigPort) -> Result<String, TradekitError> {
    let provider = config
        .get_trimmed("data", "provider")
        .map(|p| p.to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    if !PROVIDERS.contains(&provider.as_str()) {
        return Err(TradekitError::config_invalid(
            "data",
            "provider",
            format!("unknown provider {provider:?} (expected one of {PROVIDERS:?})"),
        ));
    }
    Ok(provider)
}

/// `[strategy] kind`, lower-cased; required.
pub fn strategy_kind(config: &dyn ConfigPort) -> Result<String, TradekitError> {
    let kind = config
        .get_trimmed("strategy", "kind")
        .map(|k| k.to_lowercase())
        .ok_or_else(|| TradekitError::config_missing("strategy", "kind"))?;
    if !STRATEGY_KINDS.contains(&kind.as_str()) {
        return Err(TradekitError::config_invalid(
            "strategy",
            "kind",
            format!("unknown strategy {kind:?} (expected one of {STRATEGY_KINDS:?})"),
        ));
    }
    Ok(kind)
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), TradekitError> {
    let start = required_date(config, "data", "start")?;
    let end = required_date(config, "data", "end")?;
    if start > end {
        return Err(TradekitError::config_invalid(
            "data",
            "start",
            "start must not be after end",
        ));
    }
    Ok(())
}

pub fn required_date(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<NaiveDate, TradekitError> {
    let value = config
        .get_trimmed(section, key)
        .ok_or_else(|| TradekitError::config_missing(section, key))?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| {
        TradekitError::config_invalid(section, key, format!("invalid {key} format, expected YYYY-MM-DD"))
    })
}

/// Absent is `None`; present but unparseable or non-finite is an error.
pub fn optional_f64(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<f64>, TradekitError> {
    match config.get_trimmed(section, key) {
        None => Ok(None),
        Some(s) => match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(TradekitError::config_invalid(
                section,
                key,
                format!("expected a number, got {s:?}"),
            )),
        },
    }
}

/// Absent is `None`; present but not an integer is an error.
pub fn optional_i64(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<i64>, TradekitError> {
    match config.get_trimmed(section, key) {
        None => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(|_| {
            TradekitError::config_invalid(section, key, format!("expected an integer, got {s:?}"))
        }),
    }
}
