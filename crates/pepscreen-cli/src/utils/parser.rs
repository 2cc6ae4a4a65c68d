use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid key-value pair '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Invalid mutation rule '{0}'. Expected POSITION=CODES (e.g., '2=A,G,S').")]
    InvalidMutationRule(String),

    #[error("Invalid position '{0}'. Expected a 1-based integer.")]
    InvalidPosition(String),

    #[error("Invalid range '{0}'. Expected MIN,MAX.")]
    InvalidRange(String),
}

pub fn parse_key_value(input: &str) -> Result<(&str, &str), ParseError> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidKeyValue(input.to_string())),
    }
}

pub fn parse_position(input: &str) -> Result<usize, ParseError> {
    input
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidPosition(input.to_string()))
}

/// Splits a comma-separated list, dropping empty items.
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `POSITION=CODE,CODE,...` into the position and the raw codes.
pub fn parse_mutation_rule(input: &str) -> Result<(usize, Vec<String>), ParseError> {
    let (position, codes) = parse_key_value(input)
        .map_err(|_| ParseError::InvalidMutationRule(input.to_string()))?;
    let codes = parse_list(codes);
    if codes.is_empty() {
        return Err(ParseError::InvalidMutationRule(input.to_string()));
    }
    Ok((parse_position(position)?, codes))
}

/// Parses `MIN,MAX` into a two-element array.
pub fn parse_range<T: FromStr>(input: &str) -> Result<[T; 2], ParseError> {
    let invalid = || ParseError::InvalidRange(input.to_string());
    let (min, max) = input.split_once(',').ok_or_else(invalid)?;
    Ok([
        min.trim().parse().map_err(|_| invalid())?,
        max.trim().parse().map_err(|_| invalid())?,
    ])
}
