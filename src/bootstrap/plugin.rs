//! Launch plugin capability surface
//!
//! A plugin lets the host front end customize the next stage: whether a
//! splash screen is shown, where log lines go when it is not, and how content
//! packs are vetted.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use console::style;

use super::sequencer::Prelaunch;
use crate::error::{Result, config};

/// Progress feedback shown while the next stage runs
pub trait SplashScreen: Send + Sync {
    /// Show a log line
    fn log(&self, message: &str);

    /// Dismiss the screen
    fn close(&self, success: bool);
}

/// Host front-end hooks handed to the next stage
pub trait LaunchPlugin: Send + Sync {
    /// Whether a splash screen is available in this environment.
    ///
    /// Does not toggle the screen; configuration decides that.
    fn should_enable_splash_screen(&self) -> bool;

    fn create_splash_screen(&self, prelaunch: &Prelaunch) -> Option<Arc<dyn SplashScreen>>;

    /// Fallback log callback used when no splash screen is shown
    fn append_log_message(&self, message: &str);

    /// Vet discovered content packs, keyed by namespace
    ///
    /// # Errors
    ///
    /// Returns an error to abort the launch.
    fn verify_content_packs(&self, packs: &BTreeMap<String, PathBuf>) -> Result<()>;
}

/// Headless plugin writing log lines to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePlugin;

impl LaunchPlugin for ConsolePlugin {
    fn should_enable_splash_screen(&self) -> bool {
        false
    }

    fn create_splash_screen(&self, _prelaunch: &Prelaunch) -> Option<Arc<dyn SplashScreen>> {
        None
    }

    fn append_log_message(&self, message: &str) {
        eprintln!("{} {}", style("[prelaunch]").dim(), message);
    }

    fn verify_content_packs(&self, packs: &BTreeMap<String, PathBuf>) -> Result<()> {
        for (namespace, source) in packs {
            if !source.exists() {
                return Err(config::invalid(format!(
                    "Content pack '{namespace}' source {} does not exist",
                    source.display()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::test_fixtures::create_temp_dir;

    #[test]
    fn test_console_plugin_is_headless() {
        assert!(!ConsolePlugin.should_enable_splash_screen());
    }

    #[test]
    fn test_console_plugin_verifies_sources_exist() {
        let temp = create_temp_dir();
        let mut packs = BTreeMap::new();
        packs.insert("present".to_string(), temp.path().to_path_buf());
        assert!(ConsolePlugin.verify_content_packs(&packs).is_ok());

        packs.insert("absent".to_string(), temp.path().join("absent"));
        let err = ConsolePlugin
            .verify_content_packs(&packs)
            .expect_err("missing source");
        assert!(err.to_string().contains("absent"));
    }
}
