pub mod api;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod dispatcher;
pub mod error;
pub mod models;
pub mod render;
pub mod resolve;

use cli::output::print_error;
use config::RuntimeConfig;
use error::AppError;

pub async fn run(cli_args: cli::Cli) -> i32 {
    let config = cli_args.runtime_config();

    let result = dispatch(cli_args.command, &config).await;

    match result {
        Ok(()) => 0,
        Err(err) => {
            tracing::debug!(kind = err.kind(), error = %err, "command failed");
            print_error(&err);
            err.exit_code()
        }
    }
}

async fn dispatch(command: cli::Commands, config: &RuntimeConfig) -> Result<(), AppError> {
    match command {
        cli::Commands::ListLights(args) => cli::lights::handle_list(&args, config).await,
        cli::Commands::SetState(args) => cli::lights::handle_set_state(&args, config).await,
        cli::Commands::TogglePower(args) => cli::lights::handle_toggle(&args, config).await,
        cli::Commands::Breathe(args) => cli::effects::handle_breathe(&args, config).await,
        cli::Commands::Pulse(args) => cli::effects::handle_pulse(&args, config).await,
        cli::Commands::AlertFlash(args) => cli::effects::handle_alert_flash(&args, config).await,
        cli::Commands::ListScenes => cli::scenes::handle_list(config).await,
        cli::Commands::ActivateScene(args) => cli::scenes::handle_activate(&args, config).await,
        cli::Commands::TestConnection(args) => {
            cli::diagnostics::handle_test_connection(&args, config).await
        }
        cli::Commands::HealthCheck => cli::diagnostics::handle_health_check(config).await,
        cli::Commands::TestModule => cli::diagnostics::handle_test_module(config).await,
    }
}
