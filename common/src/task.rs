//! アクションプラン（推奨作業）の型と正規化
//!
//! バックエンドは作業を素の文字列（旧形式）で返すこともあれば、
//! 優先度・期限つきのレコードで返すこともある。
//! ActionItem で両方を受け、normalize_action_plan で Task に揃える。

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 旧形式の作業に付与する既定値
pub const DEFAULT_DUE_DATE: &str = "ASAP";
pub const DEFAULT_STATUS: &str = "pending";
pub const DEFAULT_ZONE: &str = "General";

/// 作業の優先度
///
/// 未知のラベルは Other にそのまま残す。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Critical,
    #[default]
    High,
    Medium,
    Low,
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::Other(label) => label,
        }
    }
}

impl From<String> for Priority {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Critical" => Priority::Critical,
            "High" => Priority::High,
            "Medium" => Priority::Medium,
            "Low" => Priority::Low,
            _ => Priority::Other(label),
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.as_str().to_string()
    }
}

fn default_due_date() -> String {
    DEFAULT_DUE_DATE.to_string()
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

fn default_zone() -> String {
    DEFAULT_ZONE.to_string()
}

/// 推奨作業1件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: Option<u64>,

    pub task: String,

    #[serde(default)]
    pub priority: Priority,

    #[serde(rename = "dueDate", default = "default_due_date")]
    pub due_date: String,

    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default = "default_zone")]
    pub zone: String,

    #[serde(rename = "estimatedCost", default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// 旧形式の文字列から作業を作る
    pub fn from_legacy(index: usize, task: impl Into<String>) -> Self {
        Self {
            id: Some(index as u64),
            task: task.into(),
            priority: Priority::High,
            due_date: default_due_date(),
            status: default_status(),
            zone: default_zone(),
            estimated_cost: None,
            extra: Map::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == "completed"
    }
}

/// バックエンドが返す作業の2形式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionItem {
    Legacy(String),
    Full(Task),
}

impl ActionItem {
    /// index は旧形式の作業IDになる
    pub fn into_task(self, index: usize) -> Task {
        match self {
            ActionItem::Legacy(text) => Task::from_legacy(index, text),
            ActionItem::Full(task) => task,
        }
    }
}

/// アクションプランを Task の列に揃える
pub fn normalize_action_plan(items: Vec<ActionItem>) -> Vec<Task> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| item.into_task(index))
        .collect()
}

/// `action_plan` フィールド用のデシリアライザ
///
/// null は空扱い。文字列でもレコードでもない要素は読み飛ばす。
pub(crate) fn deserialize_action_plan<'de, D>(deserializer: D) -> Result<Vec<Task>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            serde_json::from_value::<ActionItem>(value)
                .ok()
                .map(|item| item.into_task(index))
        })
        .collect())
}
