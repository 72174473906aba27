use super::heading;
use agriscan_common::{SessionState, SUPPORTED_LANGUAGES};
use std::fmt::Write;

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render(state: &SessionState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", heading(state.t("settings")));
    let _ = writeln!(out, "{}", state.t("profile"));
    let name = if state.user_name.trim().is_empty() {
        "--"
    } else {
        state.user_name.as_str()
    };
    let _ = writeln!(out, "  {}\n", name);

    let _ = writeln!(out, "{}", state.t("language"));
    for language in SUPPORTED_LANGUAGES.iter() {
        let mark = if language.code == state.language { "●" } else { "○" };
        let _ = writeln!(out, "  {} {} ({})", mark, language.native, language.name);
    }

    let _ = writeln!(out, "\n{} v{}", state.t("appName"), APP_VERSION);
    out
}

/// 言語選択肢の表示名
pub fn language_choices() -> Vec<String> {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|l| format!("{} ({})", l.native, l.name))
        .collect()
}
