//! セッション状態のコンテキスト
//!
//! 状態は1つの RwSignal に持ち、変更は共通の reducer を通す。

use agriscan_common::{i18n, Action, RequestKind, RequestToken, SessionState};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct Store {
    pub state: RwSignal<SessionState>,
}

impl Store {
    pub fn dispatch(&self, action: Action) {
        self.state.update(|s| s.dispatch(action));
    }

    /// リクエスト開始を記録して札を返す
    pub fn begin(&self, kind: RequestKind) -> Option<RequestToken> {
        self.state.try_update(|s| s.begin(kind)).flatten()
    }

    /// 現在の言語で翻訳（リアクティブ）
    pub fn t(&self, key: &'static str) -> String {
        self.state.with(|s| i18n::translate(&s.language, key).to_string())
    }

    pub fn with<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        self.state.with(f)
    }
}

pub fn provide_store() -> Store {
    let store = Store {
        state: RwSignal::new(SessionState::new()),
    };
    provide_context(store);
    store
}

pub fn use_store() -> Store {
    expect_context::<Store>()
}
