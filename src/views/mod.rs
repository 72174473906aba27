//! 端末向けの画面描画
//!
//! 各画面は表示モデルから文字列を組み立てるだけで、入出力はしない。

pub mod dashboard;
pub mod field_map;
pub mod nav;
pub mod report;
pub mod settings;

/// 0-100 の値を `█░` のバーにする
pub fn gauge(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// 見出し行
pub fn heading(title: &str) -> String {
    let width = title.chars().count().max(20);
    format!("{}\n{}", title, "─".repeat(width))
}
