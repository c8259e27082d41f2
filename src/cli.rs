use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "third-eye")]
#[command(about = "画像のテキスト領域検出デモ クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 検出APIのベースURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を送信してテキスト領域を検出
    Detect {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// ハイライト画像の出力先（デフォルト: 入力フォルダ/<名前>_highlighted.png）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 結果の要約をJSONで標準出力に書き出す
        #[arg(long)]
        json: bool,
    },

    /// バックエンドの稼働状況を確認
    Health,

    /// 読み込まれているモデルの情報を表示
    ModelInfo,

    /// 設定を表示/編集
    Config {
        /// ベースURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// タイムアウト秒数を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
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
    fn test_parse_detect() {
        let cli = Cli::try_parse_from(["third-eye", "detect", "sign.png", "-o", "out.png", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Detect { image, output, json } => {
                assert_eq!(image, PathBuf::from("sign.png"));
                assert_eq!(output, Some(PathBuf::from("out.png")));
                assert!(!json);
            }
            _ => panic!("detect以外として解析された"),
        }
    }

    #[test]
    fn test_parse_model_info_with_base_url() {
        let cli = Cli::try_parse_from(["third-eye", "--base-url", "http://gpu:5000", "model-info"]).unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://gpu:5000"));
        assert!(matches!(cli.command, Commands::ModelInfo));
    }

    #[test]
    fn test_detect_requires_image() {
        assert!(Cli::try_parse_from(["third-eye", "detect"]).is_err());
    }
}
