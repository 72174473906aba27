//! 画面コンポーネント

pub mod analysis_report;
pub mod bottom_nav;
pub mod dashboard;
pub mod field_map;
pub mod floating_action_button;
pub mod scan_history_card;
pub mod settings;
pub mod splash_screen;
