//! Built-in diagnostic entry point
//!
//! [`SummaryLaunch`] stands in for a real next stage. It wires log output to
//! the plugin (or its splash screen), discovers content packs, lets the
//! plugin vet them and prints a summary of the constructed environment.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use console::style;
use tracing::info;

use super::discovery::discover_content_packs;
use super::plugin::SplashScreen;
use super::registry::{LaunchContext, LaunchTarget};
use crate::error::Result;

/// Prints the environment summary after vetting content packs
#[derive(Debug, Default)]
pub struct SummaryLaunch;

impl LaunchTarget for SummaryLaunch {
    fn launch(&mut self, ctx: LaunchContext<'_>) -> Result<()> {
        let splash = attach_log_sink(&ctx);

        let packs = discover_content_packs(
            &ctx.mods_dir,
            ctx.discovery_locations,
            ctx.prelaunch.directories().namespace(),
        );
        let verified = match &ctx.plugin {
            Some(plugin) => plugin.verify_content_packs(&packs),
            None => Ok(()),
        };
        if verified.is_ok() {
            info!(packs = packs.len(), "Content packs ready");
        }

        if let Some(splash) = &splash {
            splash.close(verified.is_ok());
        }
        if ctx.plugin.is_some() {
            if let Some(forwarder) = ctx.prelaunch.log_forwarder() {
                forwarder.detach();
            }
        }
        verified?;

        for line in render_summary(&ctx, &packs) {
            println!("{line}");
        }
        Ok(())
    }
}

/// Route log lines to the splash screen when one is shown, otherwise to the
/// plugin's fallback callback
fn attach_log_sink(ctx: &LaunchContext<'_>) -> Option<Arc<dyn SplashScreen>> {
    let plugin = ctx.plugin.as_ref()?;
    let splash = if ctx.prelaunch.config().enable_splash_screen
        && plugin.should_enable_splash_screen()
        && !cfg!(target_os = "macos")
    {
        plugin.create_splash_screen(ctx.prelaunch)
    } else {
        None
    };

    if let Some(forwarder) = ctx.prelaunch.log_forwarder() {
        match &splash {
            Some(screen) => {
                let screen = Arc::clone(screen);
                forwarder.attach(move |line| screen.log(line));
            }
            None => {
                let plugin = Arc::clone(plugin);
                forwarder.attach(move |line| plugin.append_log_message(line));
            }
        }
    }
    splash
}

/// Human-readable description of the launched environment
pub fn render_summary(ctx: &LaunchContext<'_>, packs: &BTreeMap<String, PathBuf>) -> Vec<String> {
    let hierarchy = ctx.environment.hierarchy();
    let mut lines = Vec::new();

    let bundle = ctx
        .prelaunch
        .bundle()
        .map(|b| b.uri().to_string())
        .unwrap_or_default();
    lines.push(format!("{} {}", style("Environment ready").green().bold(), bundle));

    lines.push(format!("  {}", style("Isolated locations:").bold()));
    for location in hierarchy.namespace().describe() {
        lines.push(format!("    {location}"));
    }
    lines.push(format!(
        "  {} {}",
        style("Priority prefixes:").bold(),
        hierarchy.priority().iter().collect::<Vec<_>>().join(", ")
    ));
    lines.push(format!(
        "  {} {}",
        style("Excluded prefixes:").bold(),
        hierarchy.exclusions().iter().collect::<Vec<_>>().join(", ")
    ));

    lines.push(format!("  {}", style("Dependencies:").bold()));
    for (name, path) in ctx.prelaunch.extracted() {
        lines.push(format!("    {} -> {}", style(name).cyan(), path.display()));
    }

    lines.push(format!(
        "  {} {}",
        style("Content packs:").bold(),
        packs.len()
    ));
    for (namespace, source) in packs {
        lines.push(format!("    {} -> {}", style(namespace).cyan(), source.display()));
    }

    lines
}
