use clap::Parser;

use shorty::config::{Cli, Command, StaticConfig, get_config, init_config};
use shorty::errors::ShortyError;
use shorty::runtime::modes::run_server;
use shorty::system::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Command::GenerateConfig { output } = cli.command() {
        let sample = StaticConfig::generate_sample_config();
        match output {
            Some(path) => {
                StaticConfig::default()
                    .save_to_file(path)
                    .map_err(|e| anyhow::anyhow!("failed to write {}: {}", path, e))?;
                println!("Sample configuration written to {}", path);
            }
            None => print!("{}", sample),
        }
        return Ok(());
    }

    init_config(&cli.config);
    let config = get_config();

    // guard 需要在整个进程生命周期内存活
    let _log_guard = init_logging(&config.logging)?;

    if let Err(e) = run_server(&config).await {
        if let Some(err) = e.downcast_ref::<ShortyError>() {
            eprintln!("{}", err.format_colored());
        }
        return Err(e);
    }

    Ok(())
}
