//! 対話セッション
//!
//! スプラッシュ（言語・名前）の後、ボトムナビのループで画面を切り替える。

use crate::api::ImageUpload;
use crate::error::Result;
use crate::session::Session;
use crate::views::{self, nav::MenuItem, settings};
use agriscan_common::{
    Action, DashboardModel, FieldMapModel, ReportModel, ScanList, SplashStep, View,
    SUPPORTED_LANGUAGES,
};
use chrono::Timelike;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// スプラッシュの表示時間
pub const SPLASH_DURATION: Duration = Duration::from_millis(2500);

pub async fn run(session: &mut Session) -> Result<()> {
    if !session.state().is_onboarded() {
        println!("\n🌾 {}", session.state().t("appName"));
        println!("   {}\n", session.state().t("tagline"));

        // 疎通確認はスプラッシュと並行
        tokio::join!(session.connect(), tokio::time::sleep(SPLASH_DURATION));
        session.dispatch(Action::SplashElapsed);
        onboard(session)?;
    } else {
        session.connect().await;
    }

    loop {
        println!("\n{}", render_current(session));

        if let Some(alert) = session.state().alert.clone() {
            eprintln!("⚠ {}", alert);
            session.dispatch(Action::DismissAlert);
        }

        let scan_count = match &session.state().recent_scans {
            ScanList::Loaded(list) => list.len(),
            _ => 0,
        };
        let items = views::nav::menu(session.state(), scan_count);
        let labels: Vec<&str> = items.iter().map(|(_, label)| label.as_str()).collect();

        let Some(choice) = Select::new().items(&labels).default(0).interact_opt()? else {
            break;
        };
        let Some((item, _)) = items.into_iter().nth(choice) else {
            continue;
        };

        match item {
            MenuItem::Quit => break,
            MenuItem::Navigate(view) => {
                session.dispatch(Action::SetCurrentView(view));
                if view == View::Map && session.state().map_layers.is_none() {
                    session.load_map_layers().await;
                }
                if view == View::Dashboard {
                    session.refresh_scans().await;
                }
            }
            MenuItem::Back => session.dispatch(Action::Back),
            MenuItem::Layer(layer) => session.dispatch(Action::SetMapLayer(layer)),
            MenuItem::OpenScan(index) => {
                let raw = match &session.state().recent_scans {
                    ScanList::Loaded(list) => list.get(index).cloned(),
                    _ => None,
                };
                if let Some(raw) = raw {
                    if let Err(e) = session.open_scan(&raw) {
                        eprintln!("⚠ {}", e);
                    }
                }
            }
            MenuItem::NewScan => new_scan(session).await?,
            MenuItem::ChangeLanguage => {
                let choices = settings::language_choices();
                let current = SUPPORTED_LANGUAGES
                    .iter()
                    .position(|l| l.code == session.state().language)
                    .unwrap_or(0);
                let picked = Select::new().items(&choices).default(current).interact()?;
                if let Some(language) = SUPPORTED_LANGUAGES.get(picked) {
                    session.dispatch(Action::SetLanguage(language.code.to_string()));
                }
            }
            MenuItem::EditName => {
                let name: String = Input::new()
                    .with_prompt(session.state().t("profile"))
                    .with_initial_text(session.state().user_name.clone())
                    .interact_text()?;
                let name = name.trim();
                if !name.is_empty() {
                    session.dispatch(Action::SetUserName(name.to_string()));
                }
            }
        }
    }

    Ok(())
}

/// 言語 → 名前のウィザード
fn onboard(session: &mut Session) -> Result<()> {
    while session.state().splash != SplashStep::Done {
        match session.state().splash {
            SplashStep::Splash => session.dispatch(Action::SplashElapsed),
            SplashStep::Language => {
                let picked = Select::new()
                    .with_prompt(session.state().t("language"))
                    .items(&settings::language_choices())
                    .default(0)
                    .interact()?;
                let code = SUPPORTED_LANGUAGES
                    .get(picked)
                    .map(|l| l.code)
                    .unwrap_or("en");
                session.dispatch(Action::ChooseLanguage(code.to_string()));
            }
            SplashStep::Name => {
                let name: String = Input::new()
                    .with_prompt(session.state().t("profile"))
                    .interact_text()?;
                session.dispatch(Action::SubmitName(name));
            }
            SplashStep::Done => {}
        }
    }
    Ok(())
}

async fn new_scan(session: &mut Session) -> Result<()> {
    let path: String = Input::new()
        .with_prompt(session.state().t("newScan"))
        .interact_text()?;

    let image = match ImageUpload::from_path(&PathBuf::from(path.trim())) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("⚠ {}", e);
            return Ok(());
        }
    };

    let spinner = spinner(&format!("{} ...", image.file_name));
    let result = session.upload(&image).await;
    spinner.finish_and_clear();

    if let Err(e) = result {
        // 画面には alert を出す。詳細はログへ
        debug!("upload error: {}", e);
    }
    Ok(())
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn render_current(session: &Session) -> String {
    let state = session.state();
    match state.current_view {
        View::Dashboard => {
            let hour = chrono::Local::now().hour();
            let model = DashboardModel::build(state, hour, &session.client().backend_origin());
            views::dashboard::render(state, &model)
        }
        View::Map => views::field_map::render(state, &FieldMapModel::build(state)),
        View::Report => views::report::render(state, &ReportModel::build(state)),
        View::Settings => views::settings::render(state),
    }
}
