//! Minimal TOML parser for `panel.toml`
//!
//! Handles only the subset the panel configuration needs and does NOT
//! support the full TOML spec.
//!
//! Supported features:
//! - `[section]` headers: `timing`, `handshake`, `serial`
//! - Key = value pairs (integer, string)
//! - Underscore digit separators (`5_000`)
//! - Comments (# ...)
//!
//! Keys that are absent keep their [`PanelConfig::default`] value.
//!
//! ```toml
//! [timing]
//! overtime_ms = 5_000
//! blink_interval_ms = 1_000
//! off_grace_ms = 2_000
//!
//! [handshake]
//! mismatch_limit = 10   # 0 disables strict mode
//!
//! [serial]
//! baudrate = 9600
//! data_bits = 8
//! parity = "none"
//! stop_bits = 1
//! ```

use vigil_hal::uart::{DataBits, Parity, StopBits};

use super::types::PanelConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not recognised in its section
    UnknownKey,
    /// Value has the wrong type or cannot be parsed
    InvalidValue,
    /// Value parsed but is outside its allowed range
    OutOfRange,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Handshake,
    Serial,
}

/// Parse TOML text into a [`PanelConfig`]
pub fn parse_config(input: &str) -> Result<PanelConfig, ParseError> {
    let mut config = PanelConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = strip_comment(line);
            if !header.ends_with(']') {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(&header[1..header.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
    }

    if !config.timing.is_valid() {
        return Err(ParseError::OutOfRange);
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "timing" => Ok(Section::Timing),
        "handshake" => Ok(Section::Handshake),
        "serial" => Ok(Section::Serial),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing `# comment` that is not inside a string
fn strip_comment(text: &str) -> &str {
    match text.find('#') {
        Some(hash_pos) if text[..hash_pos].matches('"').count() % 2 == 0 => {
            text[..hash_pos].trim()
        }
        _ => text,
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an integer value, accepting `_` separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits = [0u8; 24];
    let mut len = 0;
    for byte in value.bytes().filter(|&b| b != b'_') {
        if len == digits.len() {
            return Err(ParseError::InvalidValue);
        }
        digits[len] = byte;
        len += 1;
    }
    core::str::from_utf8(&digits[..len])
        .map_err(|_| ParseError::InvalidValue)?
        .parse()
        .map_err(|_| ParseError::InvalidValue)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut PanelConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Timing, "overtime_ms") => config.timing.overtime_ms = parse_int(value)?,
        (Section::Timing, "blink_interval_ms") => {
            config.timing.blink_interval_ms = parse_int(value)?
        }
        (Section::Timing, "off_grace_ms") => config.timing.off_grace_ms = parse_int(value)?,

        (Section::Handshake, "mismatch_limit") => {
            config.mismatch_limit = match parse_int::<u8>(value)? {
                0 => None,
                limit => Some(limit),
            };
        }

        (Section::Serial, "baudrate") => {
            let baudrate: u32 = parse_int(value)?;
            if baudrate == 0 {
                return Err(ParseError::OutOfRange);
            }
            config.serial.baudrate = baudrate;
        }
        (Section::Serial, "data_bits") => {
            config.serial.data_bits =
                DataBits::from_count(parse_int(value)?).ok_or(ParseError::OutOfRange)?;
        }
        (Section::Serial, "parity") => {
            config.serial.parity =
                Parity::from_name(parse_string(value)).ok_or(ParseError::InvalidValue)?;
        }
        (Section::Serial, "stop_bits") => {
            config.serial.stop_bits =
                StopBits::from_count(parse_int(value)?).ok_or(ParseError::OutOfRange)?;
        }

        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}
