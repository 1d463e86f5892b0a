//! Web 模块的数据类型定义

use serde::{Deserialize, Serialize};

use crate::core::RelayOptions;

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub relay_options: RelayOptions,
}

/// 抓取请求
///
/// `url` 缺失与空字符串同样视为未提供。
#[derive(Debug, Default, Deserialize)]
pub struct FetchRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// 抓取成功响应
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchResponse {
    pub success: bool,
    pub content: String,
}

/// 错误响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
