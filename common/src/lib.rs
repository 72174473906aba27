//! AgriScan Common Library
//!
//! CLIとWeb(WASM)で共有される型・スキャンアダプタ・セッション状態

pub mod types;
pub mod task;
pub mod adapter;
pub mod error;
pub mod i18n;
pub mod state;
pub mod demo;
pub mod endpoints;
pub mod dashboard;
pub mod field_map;
pub mod report;

pub use types::{
    MapLayers, PestDetection, RawScan, ScanId, ScanResultRecord, ScanStatus, ScanView, Stats,
    UploadResult, Weather, YieldForecast,
};
pub use task::{normalize_action_plan, ActionItem, Priority, Task};
pub use adapter::{from_dashboard_scan, from_upload, ScanCard, CardHeadline};
pub use error::{
    backend_detail, upload_failure_message, ApiErrorKind, Error, Result, GENERIC_UPLOAD_FAILURE,
};
pub use i18n::{translate, Language, SUPPORTED_LANGUAGES};
pub use state::{
    reduce, Action, DataMode, MapLayer, RequestKind, RequestToken, ScanList, SessionState, SplashStep,
    View,
};
pub use dashboard::{DashboardModel, Greeting, ScanSection};
pub use field_map::{FieldMapModel, Overlay};
pub use report::ReportModel;
