use clap::Parser;
use std::process::ExitCode;

use finboard::cli::{Cli, Commands, ConfigAction, RemoteAction};
use finboard::commands::{
    ListOptions, cmd_config_get, cmd_config_set, cmd_config_show, cmd_dashboard, cmd_ls,
    cmd_remote_create, cmd_remote_delete, cmd_remote_update, cmd_shell, cmd_stats,
};
use finboard::config::Config;
use finboard::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // A broken config file is reported by the command itself
    let log_level = Config::load().ok().and_then(|c| c.log_level);
    logging::init(log_level.as_deref());

    let result = match cli.command {
        Commands::Dashboard { output } => cmd_dashboard(output),

        Commands::Ls {
            resource,
            tab,
            page,
            search,
            source,
            output,
        } => {
            cmd_ls(ListOptions {
                resource,
                tab,
                page,
                search,
                source,
                output,
            })
            .await
        }

        Commands::Stats {
            resource,
            source,
            output,
        } => cmd_stats(resource, source, output).await,

        Commands::Shell { resource, source } => cmd_shell(resource, source).await,

        Commands::Remote { action } => match action {
            RemoteAction::Create { fields, output } => cmd_remote_create(&fields, output).await,
            RemoteAction::Update { id, fields, output } => {
                cmd_remote_update(&id, &fields, output).await
            }
            RemoteAction::Delete { id, output } => cmd_remote_delete(&id, output).await,
        },

        Commands::Config { action } => match action {
            ConfigAction::Show { output } => cmd_config_show(output),
            ConfigAction::Set { key, value, output } => cmd_config_set(&key, &value, output),
            ConfigAction::Get { key, output } => cmd_config_get(&key, output),
        },
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
