use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "needs-match")]
#[command(about = "技術ニーズマッチング・Wordレポート生成Webアプリ", long_about = None)]
pub struct Cli {
    /// 待ち受けアドレス
    #[arg(long)]
    pub host: Option<String>,

    /// 待ち受けポート
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// CSV/PDFを置くフォルダ（デフォルト: data）
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// 設定ファイル（デフォルト: ~/.config/needs-match/config.json）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 詳細ログを出力
    #[arg(short, long)]
    pub verbose: bool,
}
