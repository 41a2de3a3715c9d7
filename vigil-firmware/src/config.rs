//! Startup configuration
//!
//! The panel has no persistent storage; the only configuration source is
//! the `panel.toml` compiled into the image.

use defmt::*;

use vigil_core::config::{parse_config, PanelConfig};

/// Parse the embedded configuration, falling back to defaults
///
/// build.rs already rejects invalid files, so the fallback only matters if
/// the on-target parser disagrees with the build-time validation.
pub fn load(source: &str) -> PanelConfig {
    match parse_config(source) {
        Ok(config) => {
            info!(
                "Config: overtime={}ms blink={}ms grace={}ms mismatch_limit={}",
                config.timing.overtime_ms,
                config.timing.blink_interval_ms,
                config.timing.off_grace_ms,
                config.mismatch_limit
            );
            config
        }
        Err(e) => {
            warn!("panel.toml rejected ({:?}), using defaults", e);
            PanelConfig::default()
        }
    }
}
