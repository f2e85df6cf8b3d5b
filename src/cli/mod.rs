pub mod diagnostics;
pub mod effects;
pub mod lights;
pub mod output;
pub mod scenes;

use clap::{Parser, Subcommand};

use crate::config::{ApiConfig, OutputMode, RuntimeConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

#[derive(Parser)]
#[command(
    name = "lifx-alert",
    version,
    about = "LIFX Cloud CLI - use smart lights as a security alert signal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Include the raw API data in the output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit the rendered result as JSON instead of markdown
    #[arg(long, global = true)]
    pub json: bool,

    /// Log HTTP requests and responses to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// LIFX API base URL
    #[arg(long, global = true, env = "LIFX_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// LIFX personal access token
    #[arg(long, global = true, env = "LIFX_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true, env = "LIFX_INSECURE")]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "LIFX_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: f64,
}

impl Cli {
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            output_mode: if self.json {
                OutputMode::Json
            } else {
                OutputMode::Markdown
            },
            verbose: self.verbose,
            api: ApiConfig::new(
                &self.base_url,
                self.token.clone(),
                !self.insecure,
                self.timeout,
            ),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List lights matching a selector
    ListLights(lights::ListArgs),

    /// Set power, color, brightness or infrared
    SetState(lights::SetStateArgs),

    /// Toggle power of the selected lights
    TogglePower(lights::ToggleArgs),

    /// Run a breathe effect
    Breathe(effects::BreatheArgs),

    /// Run a pulse effect
    Pulse(effects::WaveformArgs),

    /// Flash lights in a severity-based alert color
    AlertFlash(effects::AlertFlashArgs),

    /// List saved scenes
    ListScenes,

    /// Activate a saved scene
    ActivateScene(scenes::ActivateArgs),

    /// Check that the API is reachable with the given selector
    TestConnection(lights::ListArgs),

    /// Probe the API and report latency and rate-limit state
    HealthCheck,

    /// Minimal connectivity check; prints "ok" on success
    TestModule,
}
