use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agriscan")]
#[command(about = "ドローン圃場スキャンの作物診断クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話セッションを開始（スプラッシュ → ダッシュボード）
    Start,

    /// ダッシュボード統計を表示（接続できなければデモ値）
    Stats {
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 最近のスキャン一覧
    Scans {
        /// 取得件数（デフォルト: 設定の recent_scan_limit）
        #[arg(short, long)]
        limit: Option<u32>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 画像をアップロードして解析
    Upload {
        /// 圃場画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 利用者名（デフォルト: 設定の user_name）
        #[arg(short, long)]
        name: Option<String>,

        /// 言語コード (en/hi/or)
        #[arg(short = 'L', long)]
        lang: Option<String>,

        /// 正規化済みの結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// スキャンの解析レポートを表示
    Report {
        /// スキャンID
        #[arg(required = true)]
        scan_id: String,

        /// 探索する一覧の件数
        #[arg(short, long, default_value = "50")]
        limit: u32,

        /// 正規化済みのスキャンをJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// スキャンのフィールドマップを表示
    Map {
        /// スキャンID
        #[arg(required = true)]
        scan_id: String,

        /// 表示レイヤー (rgb/ndvi/pest)
        #[arg(short = 'y', long, default_value = "rgb")]
        layer: String,
    },

    /// 設定
    Config {
        /// APIベースURLを設定
        #[arg(long)]
        set_url: Option<String>,

        /// 表示言語を設定 (en/hi/or)
        #[arg(long)]
        set_language: Option<String>,

        /// 利用者名を設定
        #[arg(long)]
        set_name: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_upload() {
        let cli = Cli::parse_from(["agriscan", "-v", "upload", "field.jpg", "--name", "Asha", "-L", "hi"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Upload { image, name, lang, json } => {
                assert_eq!(image, PathBuf::from("field.jpg"));
                assert_eq!(name.as_deref(), Some("Asha"));
                assert_eq!(lang.as_deref(), Some("hi"));
                assert!(!json);
            }
            _ => panic!("upload として解析されない"),
        }
    }

    #[test]
    fn test_parse_map_default_layer() {
        let cli = Cli::parse_from(["agriscan", "map", "12"]);
        match cli.command {
            Commands::Map { scan_id, layer } => {
                assert_eq!(scan_id, "12");
                assert_eq!(layer, "rgb");
            }
            _ => panic!("map として解析されない"),
        }
    }
}
