use clap::Parser;

use axiom::cli::{Cli, Commands, ParamsCommands};
use axiom::commands::{
    InitOptions, handle_config, handle_init, handle_params_delete, handle_params_get,
    handle_params_set,
};
use axiom::logging::{debug_enabled, init_logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.debug || debug_enabled());

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> axiom::Result<()> {
    let global = &cli.global;

    match cli.command {
        Commands::Config => handle_config(global),
        Commands::Params { command } => match command {
            ParamsCommands::Get { path, aws } => handle_params_get(global, path, &aws).await,
            ParamsCommands::Set {
                path,
                value,
                force,
                secure,
                overwrite,
                aws,
            } => handle_params_set(global, &path, &value, force, secure, overwrite, &aws).await,
            ParamsCommands::Delete { path, force, aws } => {
                handle_params_delete(global, &path, force, &aws).await
            }
        },
        Commands::Init {
            force,
            name,
            account,
            region,
            profile,
        } => {
            let dir = match &global.config {
                Some(dir) => dir.clone(),
                None => std::env::current_dir()?,
            };
            handle_init(
                &dir,
                InitOptions {
                    force,
                    name,
                    account,
                    region,
                    profile,
                },
            )
        }
    }
}
