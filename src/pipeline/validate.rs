// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;
use crate::utils::console;

/// Validate configuration and report the effective feed.
pub fn run_validate(config: &Config) -> Result<()> {
    console::header("Validating configuration");

    match config.validate() {
        Ok(()) => {
            console::success("Config OK");
            console::sub_item(&format!("Sheet: {}", config.sheet.sheet_id));
            console::sub_item(&format!("Tab (gid): {}", config.sheet.gid));
            console::sub_item(&format!("Feed URL: {}", config.sheet.export_url()?));
            console::sub_item(&format!("User agent: {}", config.http.user_agent));
            console::sub_item(&format!("Timeout: {}s", config.http.timeout_secs));
            Ok(())
        }
        Err(e) => {
            log::error!("Config validation failed: {}", e);
            Err(e)
        }
    }
}
