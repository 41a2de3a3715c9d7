//! Build script for vigil-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate panel.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds panel.toml from the vigil-firmware          ║\n\
            ║  directory. An empty file selects the built-in defaults.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read panel.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Table = match toml::from_str(&config_content) {
        Ok(table) => table,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in panel.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    for (name, section) in &config {
        let Some(section) = section.as_table() else {
            errors.push(format!("'{}' must be a [section]", name));
            continue;
        };
        match name.as_str() {
            "timing" => validate_timing(section, &mut errors),
            "handshake" => validate_handshake(section, &mut errors),
            "serial" => validate_serial(section, &mut errors),
            _ => errors.push(format!(
                "Unknown section [{}] (expected timing, handshake, serial)",
                name
            )),
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid panel configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=panel.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check that `key` (if present) is an integer within `min..=max`
fn check_int(
    section: &str,
    table: &toml::Table,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(value)) if (min..=max).contains(value) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

fn check_known_keys(section: &str, table: &toml::Table, known: &[&str], errors: &mut Vec<String>) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", section, key));
        }
    }
}

fn validate_timing(table: &toml::Table, errors: &mut Vec<String>) {
    check_known_keys(
        "timing",
        table,
        &["overtime_ms", "blink_interval_ms", "off_grace_ms"],
        errors,
    );
    check_int("timing", table, "overtime_ms", 1, i64::MAX, errors);
    check_int("timing", table, "blink_interval_ms", 1, i64::MAX, errors);
    check_int("timing", table, "off_grace_ms", 0, i64::MAX, errors);
}

fn validate_handshake(table: &toml::Table, errors: &mut Vec<String>) {
    check_known_keys("handshake", table, &["mismatch_limit"], errors);
    check_int("handshake", table, "mismatch_limit", 0, 255, errors);
}

fn validate_serial(table: &toml::Table, errors: &mut Vec<String>) {
    check_known_keys(
        "serial",
        table,
        &["baudrate", "data_bits", "parity", "stop_bits"],
        errors,
    );
    check_int("serial", table, "baudrate", 1, u32::MAX as i64, errors);
    check_int("serial", table, "data_bits", 7, 8, errors);
    check_int("serial", table, "stop_bits", 1, 2, errors);

    if let Some(parity) = table.get("parity") {
        match parity.as_str() {
            Some("none" | "even" | "odd") => {}
            _ => errors.push("[serial] parity must be 'none', 'even' or 'odd'".to_string()),
        }
    }
}
