use std::str::FromStr;

use eyre::{Result, bail, eyre};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GasUnit {
    Wei,
    Kwei, // Babbage
    Mwei, // Lovelace
    Gwei, // Shannon, Nano
}

impl FromStr for GasUnit {
    type Err = eyre::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wei" => Ok(GasUnit::Wei),
            "kwei" | "babbage" => Ok(GasUnit::Kwei),
            "mwei" | "lovelace" => Ok(GasUnit::Mwei),
            "gwei" | "shannon" | "nano" => Ok(GasUnit::Gwei),
            _ => bail!("Unknown gas price unit: {}", s),
        }
    }
}

impl GasUnit {
    pub fn decimals(&self) -> u32 {
        match self {
            GasUnit::Wei => 0,
            GasUnit::Kwei => 3,
            GasUnit::Mwei => 6,
            GasUnit::Gwei => 9,
        }
    }
}

/// Parse a gas price like "20gwei", "0.5 gwei" or "1000" (wei) into wei.
pub fn parse_gas_price(input: &str) -> Result<u128> {
    let input = input.trim();
    let split = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(input.len());
    let (numeric_part, unit_part) = input.split_at(split);
    let unit_part = unit_part.trim();

    if numeric_part.is_empty() {
        bail!("Invalid gas price: expected '<number>[unit]', got '{}'", input)
    }

    let unit = if unit_part.is_empty() {
        GasUnit::Wei
    } else {
        GasUnit::from_str(unit_part)?
    };

    let (whole, fraction) = match numeric_part.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (numeric_part, ""),
    };
    if fraction.contains('.') {
        bail!("Invalid decimal format in '{}'", numeric_part)
    }
    if fraction.len() > unit.decimals() as usize {
        bail!("Gas price '{}' is more precise than 1 wei", input)
    }

    // shift the decimal point right by the unit's decimals
    let padded = format!("{whole}{fraction:0<width$}", width = unit.decimals() as usize);
    let digits = padded.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(0);
    }
    digits
        .parse::<u128>()
        .map_err(|_| eyre!("Gas price '{}' is out of range", input))
}
