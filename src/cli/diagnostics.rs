use crate::api::client::LifxClient;
use crate::cli::lights::ListArgs;
use crate::cli::output::print_rendered;
use crate::config::RuntimeConfig;
use crate::diagnostics::Diagnostics;
use crate::error::AppError;
use crate::models::selector::Selector;
use crate::render::render;
use crate::resolve;

pub async fn handle_test_connection(
    args: &ListArgs,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let selector = resolve::resolve(&args.selector)?;
    let client = LifxClient::new(&config.api)?;
    let report = Diagnostics::new(&client).test_connection(&selector).await;
    print_rendered(&render(&report, config.verbose), config.output_mode);
    Ok(())
}

pub async fn handle_health_check(config: &RuntimeConfig) -> Result<(), AppError> {
    let client = LifxClient::new(&config.api)?;
    let snapshot = Diagnostics::new(&client).health_check().await;
    print_rendered(&render(&snapshot, config.verbose), config.output_mode);
    Ok(())
}

/// The platform's "Test" button: any failure propagates as an error.
pub async fn handle_test_module(config: &RuntimeConfig) -> Result<(), AppError> {
    let client = LifxClient::new(&config.api)?;
    client.list_lights(&Selector::All).await?;
    println!("ok");
    Ok(())
}
