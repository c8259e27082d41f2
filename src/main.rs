use clap::Parser;
use third_eye::{cli, client, config, error, input, output, session};
use cli::{Cli, Commands};
use client::DetectClient;
use config::Config;
use error::{Result, ThirdEyeError};
use session::Session;
use third_eye_common::{count_phrase, Error, Event};

fn init_logger(verbose: bool) {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
    let _ = pretty_env_logger::formatted_builder()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

/// 保存済み設定・環境変数・`--base-url` を合わせた実効設定
fn effective_config(base_url: Option<String>) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(url) = base_url {
        config.set_base_url(url)?;
    }
    log::debug!("base url: {}", config.base_url);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Detect { image, output, json } => {
            if !json {
                println!("🔍 third-eye - テキスト検出\n");
            }

            // 1. 画像読み込み
            let file = input::read_selected_file(&image)?;
            let client = DetectClient::new(&effective_config(cli.base_url)?)?;
            let mut session = Session::new(client).with_progress(!json);

            session.dispatch(Event::FileSelected(file)).await;
            if let Some(err) = session.state().error.clone() {
                return Err(ThirdEyeError::NotAnImage(format!("{} ({})", image.display(), err)));
            }

            // 2. 送信
            session.dispatch(Event::SubmitRequested).await;
            let Some(result) = session.state().result.clone() else {
                let err = session.take_failure().unwrap_or(Error::NoFileSelected);
                eprintln!("✖ {}", err.user_message());
                if err.is_connectivity() {
                    eprintln!("  `third-eye health` でバックエンドの状態を確認してください");
                }
                return Err(err.into());
            };

            // 3. 結果画像の保存（画像が壊れていてもカウントは表示する）
            let saved = output::save_highlighted_image(&result, &image, output.as_deref())?;
            if saved.is_none() {
                session.dispatch(Event::ImageLoadFailed).await;
            }

            if json {
                let summary = serde_json::json!({
                    "file": image.display().to_string(),
                    "status": session.state().status().as_str(),
                    "text_regions_detected": result.text_regions_detected,
                    "confidence_threshold": result.confidence_threshold,
                    "highlighted_image_path": saved.as_ref().map(|p| p.display().to_string()),
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("✔ {}", count_phrase(result.text_regions_detected));
                if let Some(threshold) = result.confidence_threshold {
                    println!("  しきい値: {}", threshold);
                }
                match saved {
                    Some(path) => println!("✔ ハイライト画像を保存: {}", path.display()),
                    None => println!("⚠ ハイライト画像を表示できません（画像データが不正です）"),
                }
                println!("\n✅ 検出完了");
            }
        }

        Commands::Health => {
            let client = DetectClient::new(&effective_config(cli.base_url)?)?;
            let health = client.health().await?;
            println!("バックエンド: {}", client.base_url());
            println!("  状態: {}", health.status);
            println!("  モデル: {}", if health.model_loaded { "読込済み" } else { "未読込" });
        }

        Commands::ModelInfo => {
            let client = DetectClient::new(&effective_config(cli.base_url)?)?;
            let info = client.model_info().await?;
            if !info.model_loaded {
                println!("モデルが読み込まれていません");
                if let Some(err) = info.error {
                    println!("  理由: {}", err);
                }
                return Ok(());
            }
            println!("モデル情報:");
            if let Some(path) = info.model_path {
                println!("  パス: {}", path);
            }
            if let Some([w, h]) = info.input_size {
                println!("  入力サイズ: {}x{}", w, h);
            }
            if let Some([w, h]) = info.output_size {
                println!("  出力サイズ: {}x{}", w, h);
            }
        }

        Commands::Config { set_base_url, set_timeout, show } => {
            // 環境変数・--base-url を含まない保存済みの設定を編集する
            // 壊れた設定ファイルもここから直せるように、実効設定は読まない
            let mut stored = Config::load_for_edit(&Config::config_path()?)?;
            let mut changed = false;

            if let Some(url) = set_base_url {
                stored.set_base_url(url)?;
                changed = true;
                println!("✔ ベースURLを設定しました");
            }

            if let Some(seconds) = set_timeout {
                stored.timeout_seconds = seconds;
                changed = true;
                println!("✔ タイムアウトを設定しました");
            }

            if changed {
                stored.save()?;
            }

            if show {
                let effective = effective_config(cli.base_url)?;
                println!("設定:");
                println!("  ベースURL: {}", effective.base_url);
                println!("  タイムアウト: {}秒", effective.timeout_seconds);
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
