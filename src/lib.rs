//! AgriScan クライアント
//!
//! バックエンドAPI・セッション・端末表示。ドメインの型と状態遷移は agriscan-common にある。

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;
pub mod views;
