//! バックエンドのエンドポイント定義
//!
//! CLI(reqwest)とWeb(fetch)が同じパスを組み立てるための関数群。
//! クエリ文字列のエンコードは各クライアント側で行う。

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// 既定のAPIベースURL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";

/// 画像パスが無いスキャンのサムネイル
pub const PLACEHOLDER_THUMBNAIL_URL: &str = "https://placehold.co/100x100?text=Scan";

/// サムネイル読み込み失敗時の代替画像
pub const FALLBACK_THUMBNAIL_URL: &str =
    "https://images.unsplash.com/photo-1599596818167-937d2b23a525?q=80&w=200&auto=format&fit=crop";

/// 一覧取得の既定件数
pub const DEFAULT_RECENT_SCAN_LIMIT: u32 = 5;

/// アップロードの multipart フィールド名
pub const UPLOAD_FIELD: &str = "file";

/// 名前未設定でアップロードするときの利用者名
pub const DEFAULT_UPLOAD_USER: &str = "Farmer";

/// パスの1区間に入れてよい文字（英数字と `-_.~` 以外はエスケープ）
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const API_PREFIX: &str = "/api/v1";

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// `GET /dashboard/stats`
pub fn stats_url(base: &str) -> String {
    join(base, "dashboard/stats")
}

/// `GET /scans`（件数はクエリで渡す）
pub fn scans_url(base: &str) -> String {
    join(base, "scans")
}

/// `GET /scans` のクエリ
pub fn scans_query(limit: u32) -> [(&'static str, String); 1] {
    [("limit", limit.to_string())]
}

/// `POST /scan/upload`
pub fn upload_url(base: &str) -> String {
    join(base, "scan/upload")
}

/// `POST /scan/upload` のクエリ
pub fn upload_query(user_name: &str, language: &str) -> [(&'static str, String); 2] {
    let user_name = match user_name.trim() {
        "" => DEFAULT_UPLOAD_USER,
        name => name,
    };
    [
        ("user_name", user_name.to_string()),
        ("lang", language.to_string()),
    ]
}

/// `GET /map/layers/{scanId}`
pub fn map_layers_url(base: &str, scan_id: &str) -> String {
    let segment = utf8_percent_encode(scan_id, PATH_SEGMENT);
    join(base, &format!("map/layers/{}", segment))
}

/// APIベースURLからバックエンドのオリジンを取り出す
///
/// 静的ファイル（スキャン画像）はオリジン直下から配信される。
pub fn backend_origin(base: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    trimmed
        .strip_suffix(API_PREFIX)
        .unwrap_or(trimmed)
        .to_string()
}

/// スキャン画像のURL（画像パスが無ければプレースホルダ）
pub fn thumbnail_url(origin: &str, image_path: Option<&str>) -> String {
    match image_path.filter(|p| !p.trim().is_empty()) {
        Some(path) => join(origin, path),
        None => PLACEHOLDER_THUMBNAIL_URL.to_string(),
    }
}
