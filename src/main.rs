use clap::Parser;
use modelkit::cli::{handle_call, handle_create, handle_show, Cli, Commands};
use modelkit::logging::init_tracing;
use modelkit::Config;

fn main() {
    let cli = Cli::parse();

    let config = Config::from_env().with_log_level(cli.log_level);
    if let Err(e) = init_tracing(&config.log_level) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Create { json } => handle_create(json),
        Commands::Show { source } => handle_show(source),
        Commands::Call {
            method,
            args,
            source,
        } => handle_call(method, args, source),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
