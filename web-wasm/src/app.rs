//! メインアプリケーションコンポーネント
//!
//! 起動時に統計の疎通確認を1回だけ行い、接続できたら最近のスキャンを取る。
//! スプラッシュが終わるまではウィザードだけを表示する。

use crate::api::ApiClient;
use crate::components::{
    analysis_report::AnalysisReport, bottom_nav::BottomNav, dashboard::Dashboard,
    field_map::FieldMap, floating_action_button::FloatingActionButton, settings::Settings,
    splash_screen::SplashScreen,
};
use crate::store::{provide_store, Store};
use agriscan_common::endpoints::DEFAULT_RECENT_SCAN_LIMIT;
use agriscan_common::{from_upload, Action, RequestKind, SplashStep, View, GENERIC_UPLOAD_FAILURE};
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

/// スプラッシュ表示時間 (ms)
const SPLASH_MS: u32 = 2_500;

#[component]
pub fn App() -> impl IntoView {
    let store = provide_store();
    let client = ApiClient::default();
    provide_context(client.clone());

    // スプラッシュ → 言語選択
    Timeout::new(SPLASH_MS, move || store.dispatch(Action::SplashElapsed)).forget();

    // 起動時の疎通確認
    {
        let client = client.clone();
        if let Some(token) = store.begin(RequestKind::Stats) {
            spawn_local(async move {
                let stats = client.get_dashboard_stats().await;
                store.dispatch(Action::StatsResolved { token, stats });
            });
        }
    }

    // 接続状態が変わるたびに一覧を取り直す（オフラインでは取らない）
    {
        let client = client.clone();
        let connected = Memo::new(move |_| store.with(|s| s.is_connected));
        Effect::new(move |_| {
            if !connected.get() {
                return;
            }
            let Some(token) = store.begin(RequestKind::RecentScans) else {
                return;
            };
            let client = client.clone();
            spawn_local(async move {
                let scans = client.get_recent_scans(DEFAULT_RECENT_SCAN_LIMIT).await;
                store.dispatch(Action::ScansResolved { token, scans });
            });
        });
    }

    let on_upload = upload_handler(store, client.clone());

    let onboarded = Memo::new(move |_| store.with(|s| s.splash == SplashStep::Done));
    let current_view = Memo::new(move |_| store.with(|s| s.current_view));
    let shows_fab = Memo::new(move |_| store.with(|s| s.shows_fab()));
    let uploading = Memo::new(move |_| store.with(|s| s.upload_in_flight));

    view! {
        <Show when=move || onboarded.get() fallback=|| view! { <SplashScreen /> }>
            <div class="app-shell">
                <main class="app-content">
                    {move || match current_view.get() {
                        View::Dashboard => view! { <Dashboard /> }.into_any(),
                        View::Map => view! { <FieldMap /> }.into_any(),
                        View::Report => view! { <AnalysisReport /> }.into_any(),
                        View::Settings => view! { <Settings /> }.into_any(),
                    }}
                </main>
                <Show when=move || shows_fab.get()>
                    <FloatingActionButton uploading=uploading on_file=on_upload />
                </Show>
                <BottomNav />
            </div>
        </Show>
    }
}

/// FAB に渡すアップロード処理（Copy なので子ビューで何度でも使える）
fn upload_handler(store: Store, client: ApiClient) -> impl Fn(File) + Copy + Send + 'static {
    let client = StoredValue::new(client);
    move |file: File| upload(store, client.get_value(), file)
}

/// アップロードして結果をレポートに出す。失敗は alert で知らせる
fn upload(store: Store, client: ApiClient, file: File) {
    let Some(token) = store.begin(RequestKind::Upload) else {
        return;
    };
    let (user_name, language) = store.with(|s| (s.user_name.clone(), s.language.clone()));

    spawn_local(async move {
        let outcome = match client.upload_scan(&file, &user_name, &language).await {
            Ok(result) => {
                let received_at = js_sys::Date::new_0().to_iso_string().as_string();
                from_upload(result, &received_at.unwrap_or_default())
                    .map_err(|e| (GENERIC_UPLOAD_FAILURE.to_string(), e.to_string()))
            }
            Err(e) => Err((e.user_message(), e.message)),
        };

        match outcome {
            Ok(scan) => store.dispatch(Action::UploadSucceeded { token, scan }),
            Err((message, cause)) => {
                gloo::console::error!(format!("upload failed: {}", cause));
                store.dispatch(Action::UploadFailed {
                    token,
                    message: message.clone(),
                });
                gloo::dialogs::alert(&message);
                store.dispatch(Action::DismissAlert);
            }
        }
    });
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use agriscan_common::SessionState;

    fn reusable<F: Fn(File) + Copy + Send + 'static>(handler: F) -> (F, F) {
        (handler, handler)
    }

    #[test]
    fn test_upload_handler_is_reusable() {
        let owner = Owner::new();
        owner.set();
        let store = Store {
            state: RwSignal::new(SessionState::new()),
        };

        let (first, second) = reusable(upload_handler(store, ApiClient::default()));
        // <Show> の子ビューは描画のたびに同じハンドラを使う
        let _render = move || (first, second);
        assert!(!store.with(|s| s.upload_in_flight));
    }
}
