use clap::Args;

use crate::api::client::LifxClient;
use crate::cli::output::print_rendered;
use crate::config::RuntimeConfig;
use crate::dispatcher::EffectDispatcher;
use crate::error::AppError;
use crate::models::effect::EffectParams;
use crate::models::outcome::{DispatchOutcome, Operation};
use crate::models::severity::Severity;
use crate::render::render;
use crate::resolve;

#[derive(Args)]
pub struct WaveformArgs {
    /// Target selector
    #[arg(short, long, default_value = "all")]
    pub selector: String,
    /// Effect color
    #[arg(long)]
    pub color: String,
    /// Color to start from (defaults to the current color)
    #[arg(long)]
    pub from_color: Option<String>,
    /// Seconds per cycle
    #[arg(long)]
    pub period: Option<f64>,
    /// Number of cycles
    #[arg(long)]
    pub cycles: Option<f64>,
    /// Keep the effect color when finished
    #[arg(long)]
    pub persist: Option<bool>,
    /// Turn lights on if they are off
    #[arg(long)]
    pub power_on: Option<bool>,
}

impl WaveformArgs {
    fn params(&self) -> EffectParams {
        EffectParams {
            color: Some(self.color.clone()),
            from_color: self.from_color.clone(),
            period: self.period,
            cycles: self.cycles,
            peak: None,
            persist: self.persist,
            power_on: self.power_on,
        }
    }
}

#[derive(Args)]
pub struct BreatheArgs {
    #[command(flatten)]
    pub waveform: WaveformArgs,
    /// Where in the period the target color is at its maximum (0.0-1.0)
    #[arg(long)]
    pub peak: Option<f64>,
}

#[derive(Args)]
pub struct AlertFlashArgs {
    /// Target selector
    #[arg(short, long, default_value = "all")]
    pub selector: String,
    /// Incident severity: low, medium, high, critical (or 1-4)
    #[arg(long)]
    pub severity: String,
    /// Override the severity color
    #[arg(long)]
    pub color: Option<String>,
    /// Override the severity cycle count
    #[arg(long)]
    pub cycles: Option<f64>,
    /// Seconds per flash
    #[arg(long)]
    pub period: Option<f64>,
    /// Keep the alert color when finished
    #[arg(long)]
    pub persist: Option<bool>,
    /// Turn lights on if they are off
    #[arg(long)]
    pub power_on: Option<bool>,
}

pub async fn handle_breathe(args: &BreatheArgs, config: &RuntimeConfig) -> Result<(), AppError> {
    let selector = resolve::resolve(&args.waveform.selector)?;
    let params = EffectParams {
        peak: args.peak,
        ..args.waveform.params()
    };

    let client = LifxClient::new(&config.api)?;
    let response = EffectDispatcher::new(&client)
        .breathe(&selector, &params)
        .await?;
    let outcome = DispatchOutcome::new(Operation::Breathe, selector.to_string(), &response);
    print_rendered(&render(&outcome, config.verbose), config.output_mode);
    Ok(())
}

pub async fn handle_pulse(args: &WaveformArgs, config: &RuntimeConfig) -> Result<(), AppError> {
    let selector = resolve::resolve(&args.selector)?;

    let client = LifxClient::new(&config.api)?;
    let response = EffectDispatcher::new(&client)
        .pulse(&selector, &args.params())
        .await?;
    let outcome = DispatchOutcome::new(Operation::Pulse, selector.to_string(), &response);
    print_rendered(&render(&outcome, config.verbose), config.output_mode);
    Ok(())
}

pub async fn handle_alert_flash(
    args: &AlertFlashArgs,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let selector = resolve::resolve(&args.selector)?;
    let severity: Severity = args.severity.parse()?;
    let overrides = EffectParams {
        color: args.color.clone(),
        cycles: args.cycles,
        period: args.period,
        persist: args.persist,
        power_on: args.power_on,
        ..Default::default()
    };

    let client = LifxClient::new(&config.api)?;
    let (sent, response) = EffectDispatcher::new(&client)
        .alert_flash(&selector, severity, overrides)
        .await?;

    let outcome = DispatchOutcome::new(Operation::AlertFlash, selector.to_string(), &response)
        .with_detail(format!(
            "severity={}, color={}, cycles={}, period={}",
            severity,
            sent.color.as_deref().unwrap_or_default(),
            sent.cycles.unwrap_or_default(),
            sent.period.unwrap_or_default()
        ));
    print_rendered(&render(&outcome, config.verbose), config.output_mode);
    Ok(())
}
