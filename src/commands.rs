//! 単発コマンドの処理

use crate::api::{ApiClient, ImageUpload};
use crate::app::{self, spinner};
use crate::config::Config;
use crate::error::{AgriScanError, Result};
use crate::session::Session;
use crate::views;
use agriscan_common::{
    from_dashboard_scan, Action, DashboardModel, FieldMapModel, MapLayer, ReportModel, ScanCard,
    ScanId, ScanView, SessionState,
};
use chrono::Timelike;
use std::path::Path;

fn session_for(config: &Config, language: String, user_name: String) -> Result<Session> {
    let client = ApiClient::from_config(config)?;
    let state = SessionState::onboarded(language, user_name);
    Ok(Session::new(client, state, config.recent_scan_limit))
}

fn configured_session(config: &Config) -> Result<Session> {
    session_for(
        config,
        config.language.clone(),
        config.user_name.clone().unwrap_or_default(),
    )
}

pub async fn start(config: &Config) -> Result<()> {
    let client = ApiClient::from_config(config)?;
    let state = match &config.user_name {
        Some(name) => SessionState::onboarded(config.language.clone(), name.clone()),
        None => SessionState::new(),
    };
    let mut session = Session::new(client, state, config.recent_scan_limit);
    app::run(&mut session).await
}

pub async fn stats(config: &Config, json: bool) -> Result<()> {
    let mut session = configured_session(config)?;
    session.connect().await;

    if json {
        let stats = session.state().api_stats.clone();
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let hour = chrono::Local::now().hour();
    let model = DashboardModel::build(session.state(), hour, &session.client().backend_origin());
    print!("{}", views::dashboard::render(session.state(), &model));
    Ok(())
}

pub async fn scans(config: &Config, limit: Option<u32>, json: bool) -> Result<()> {
    let client = ApiClient::from_config(config)?;
    let scans = client
        .try_recent_scans(limit.unwrap_or(config.recent_scan_limit))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&scans)?);
        return Ok(());
    }

    if scans.is_empty() {
        println!("スキャンがありません");
    }
    let origin = client.backend_origin();
    for (index, scan) in scans.iter().enumerate() {
        let card = ScanCard::from_raw(scan, &origin);
        println!("{}", views::dashboard::card_line(index, &card));
    }
    Ok(())
}

pub async fn upload(
    config: &Config,
    image_path: &Path,
    name: Option<String>,
    lang: Option<String>,
    json: bool,
) -> Result<()> {
    let image = ImageUpload::from_path(image_path)?;
    let language = lang.unwrap_or_else(|| config.language.clone());
    let user_name = name
        .or_else(|| config.user_name.clone())
        .unwrap_or_default();

    let mut session = session_for(config, language, user_name)?;

    let pb = spinner(&format!("解析中: {}", image.file_name));
    let result = session.upload(&image).await;
    pb.finish_and_clear();

    let view = match result {
        Ok(view) => view,
        Err(e) => {
            if let Some(alert) = &session.state().alert {
                eprintln!("✗ {}", alert);
            }
            return Err(e);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("✔ スキャンID: {}\n", view.id);
        print!(
            "{}",
            views::report::render(session.state(), &ReportModel::build(session.state()))
        );
    }
    Ok(())
}

pub async fn report(config: &Config, scan_id: &str, limit: u32, json: bool) -> Result<()> {
    let mut session = configured_session(config)?;
    let scans = session.client().try_recent_scans(limit).await?;

    let raw = scans
        .iter()
        .find(|s| s.id.as_ref().map(|id| id.as_str()) == Some(scan_id))
        .ok_or_else(|| AgriScanError::ScanNotFound(scan_id.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&from_dashboard_scan(raw)?)?);
        return Ok(());
    }

    session.open_scan(raw)?;
    print!(
        "{}",
        views::report::render(session.state(), &ReportModel::build(session.state()))
    );
    Ok(())
}

pub async fn map(config: &Config, scan_id: &str, layer: &str) -> Result<()> {
    let mut session = configured_session(config)?;
    let view = ScanView::new(ScanId::from(scan_id), format!("Scan #{}", scan_id));
    session.dispatch(Action::SetSelectedScan(Some(view)));
    session.dispatch(Action::SetMapLayer(MapLayer::from_tag(layer)));
    session.load_map_layers().await;

    print!(
        "{}",
        views::field_map::render(session.state(), &FieldMapModel::build(session.state()))
    );
    Ok(())
}

pub fn config(
    mut config: Config,
    set_url: Option<String>,
    set_language: Option<String>,
    set_name: Option<String>,
    show: bool,
) -> Result<()> {
    let changed = set_url.is_some() || set_language.is_some() || set_name.is_some();

    if let Some(url) = set_url {
        config.set_api_base_url(url)?;
        println!("✔ APIベースURLを設定しました: {}", config.api_base_url);
    }
    if let Some(code) = set_language {
        config.set_language(code)?;
        println!("✔ 言語を設定しました: {}", config.language);
    }
    if let Some(name) = set_name {
        config.set_user_name(name);
        println!("✔ 利用者名を設定しました");
    }
    if changed {
        config.save()?;
    }

    if show || !changed {
        println!("設定:");
        println!("  APIベースURL: {}", config.api_base_url());
        println!("  言語: {}", config.language);
        println!(
            "  利用者名: {}",
            config.user_name.as_deref().unwrap_or("未設定")
        );
        println!("  タイムアウト: {}秒", config.timeout_seconds);
        println!("  一覧件数: {}", config.recent_scan_limit);
    }
    Ok(())
}
