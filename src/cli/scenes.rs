use clap::Args;

use crate::api::client::LifxClient;
use crate::cli::output::print_rendered;
use crate::config::RuntimeConfig;
use crate::dispatcher::{parse_scene_id, EffectDispatcher};
use crate::error::AppError;
use crate::models::effect::SceneActivation;
use crate::models::outcome::{DispatchOutcome, Operation, SceneList};
use crate::render::render;

#[derive(Args)]
pub struct ActivateArgs {
    /// Scene UUID (as shown by list-scenes)
    pub scene_uuid: String,
    /// Transition time in seconds
    #[arg(long)]
    pub duration: Option<f64>,
    /// Fire and forget: skip per-device results
    #[arg(long)]
    pub fast: Option<bool>,
}

pub async fn handle_list(config: &RuntimeConfig) -> Result<(), AppError> {
    let client = LifxClient::new(&config.api)?;
    let response = client.list_scenes().await?;
    print_rendered(
        &render(&SceneList::new(&response), config.verbose),
        config.output_mode,
    );
    Ok(())
}

pub async fn handle_activate(args: &ActivateArgs, config: &RuntimeConfig) -> Result<(), AppError> {
    let scene = parse_scene_id(&args.scene_uuid)?;
    let activation = SceneActivation {
        duration: args.duration,
        fast: args.fast,
    };

    let client = LifxClient::new(&config.api)?;
    let response = EffectDispatcher::new(&client)
        .activate_scene(&scene, &activation)
        .await?;
    let outcome = DispatchOutcome::new(
        Operation::ActivateScene,
        format!("scene_id:{}", scene),
        &response,
    );
    print_rendered(&render(&outcome, config.verbose), config.output_mode);
    Ok(())
}
