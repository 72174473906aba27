use agriscan::{cli, commands, config};
use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_logging(verbose: bool) {
    let default = if verbose { "warn,agriscan=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load().context("設定ファイルを読み込めません")?;

    match cli.command {
        Commands::Start => {
            commands::start(&config).await?;
        }

        Commands::Stats { json } => {
            commands::stats(&config, json).await?;
        }

        Commands::Scans { limit, json } => {
            commands::scans(&config, limit, json)
                .await
                .context("スキャン一覧を取得できません")?;
        }

        Commands::Upload { image, name, lang, json } => {
            commands::upload(&config, &image, name, lang, json)
                .await
                .with_context(|| format!("アップロードに失敗: {}", image.display()))?;
        }

        Commands::Report { scan_id, limit, json } => {
            commands::report(&config, &scan_id, limit, json).await?;
        }

        Commands::Map { scan_id, layer } => {
            commands::map(&config, &scan_id, &layer).await?;
        }

        Commands::Config { set_url, set_language, set_name, show } => {
            commands::config(config, set_url, set_language, set_name, show)?;
        }
    }

    Ok(())
}
