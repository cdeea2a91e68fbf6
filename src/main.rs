use clap::Parser;
use needs_match::{cli::Cli, config::Config, loader, server::MatchServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "needs_match=debug,tower_http=debug"
    } else {
        "needs_match=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("🔎 needs-match - 技術ニーズマッチング\n");

    let config = Config::load(&cli)?;

    // 1. データ読み込み
    println!("[1/2] データを読み込み中... ({})", config.data_dir.display());
    let dataset = loader::load_dataset(&config.data_dir);
    println!(
        "✔ {}件のデータ, PDF{}\n",
        dataset.table.len(),
        if dataset.pdf_text.is_empty() { "なし" } else { "あり" }
    );
    for warning in &dataset.warnings {
        println!("⚠ {}", warning);
    }

    // 2. サーバー起動
    let server = MatchServer::new(config, dataset);
    println!("[2/2] サーバー起動: http://{}", server.address());
    println!("Ctrl+C で停止\n");

    server.start().await?;

    Ok(())
}
