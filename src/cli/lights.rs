use clap::{Args, ValueEnum};

use crate::api::client::LifxClient;
use crate::cli::output::print_rendered;
use crate::config::RuntimeConfig;
use crate::dispatcher::EffectDispatcher;
use crate::error::AppError;
use crate::models::effect::{Power, StateChange, TogglePower};
use crate::models::outcome::{DispatchOutcome, LightList, Operation};
use crate::render::render;
use crate::resolve;

#[derive(Args)]
pub struct ListArgs {
    /// Target selector: all, group:<name>, label:<name>, location:<name> or id:<serial>
    #[arg(short, long, default_value = "all")]
    pub selector: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PowerArg {
    On,
    Off,
}

impl From<PowerArg> for Power {
    fn from(arg: PowerArg) -> Self {
        match arg {
            PowerArg::On => Power::On,
            PowerArg::Off => Power::Off,
        }
    }
}

#[derive(Args)]
pub struct SetStateArgs {
    /// Target selector
    #[arg(short, long, default_value = "all")]
    pub selector: String,
    /// Power state
    #[arg(long, value_enum)]
    pub power: Option<PowerArg>,
    /// Color string, e.g. "red", "#ff0000" or "hue:120 saturation:1.0"
    #[arg(long)]
    pub color: Option<String>,
    /// Brightness (0.0-1.0)
    #[arg(long)]
    pub brightness: Option<f64>,
    /// Transition time in seconds
    #[arg(long)]
    pub duration: Option<f64>,
    /// Infrared channel level (0.0-1.0)
    #[arg(long)]
    pub infrared: Option<f64>,
    /// Fire and forget: the API answers 202 without per-device results
    #[arg(long)]
    pub fast: Option<bool>,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Target selector
    #[arg(short, long, default_value = "all")]
    pub selector: String,
    /// Transition time in seconds
    #[arg(long)]
    pub duration: Option<f64>,
}

pub async fn handle_list(args: &ListArgs, config: &RuntimeConfig) -> Result<(), AppError> {
    let selector = resolve::resolve(&args.selector)?;
    let client = LifxClient::new(&config.api)?;
    let response = client.list_lights(&selector).await?;
    print_rendered(
        &render(&LightList::new(selector, &response), config.verbose),
        config.output_mode,
    );
    Ok(())
}

pub async fn handle_set_state(
    args: &SetStateArgs,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let selector = resolve::resolve(&args.selector)?;
    let change = StateChange {
        power: args.power.map(Power::from),
        color: args.color.clone(),
        brightness: args.brightness,
        duration: args.duration,
        infrared: args.infrared,
        fast: args.fast,
    };

    let client = LifxClient::new(&config.api)?;
    let response = EffectDispatcher::new(&client)
        .set_state(&selector, &change)
        .await?;
    let outcome = DispatchOutcome::new(Operation::SetState, selector.to_string(), &response);
    print_rendered(&render(&outcome, config.verbose), config.output_mode);
    Ok(())
}

pub async fn handle_toggle(args: &ToggleArgs, config: &RuntimeConfig) -> Result<(), AppError> {
    let selector = resolve::resolve(&args.selector)?;
    let toggle = TogglePower {
        duration: args.duration,
    };

    let client = LifxClient::new(&config.api)?;
    let response = EffectDispatcher::new(&client)
        .toggle_power(&selector, &toggle)
        .await?;
    let outcome = DispatchOutcome::new(Operation::TogglePower, selector.to_string(), &response);
    print_rendered(&render(&outcome, config.verbose), config.output_mode);
    Ok(())
}
