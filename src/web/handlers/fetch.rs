//! 抓取并改写页面的 API

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json as ExtractJson, State},
    http::StatusCode,
    response::Json,
};
use tokio::task;

use crate::core::{fetch_and_rewrite, RelayError};
use crate::network::session::Session;
use crate::web::types::{AppState, ErrorResponse, FetchRequest, FetchResponse};

/// 抓取目标页面并返回改写后的 HTML
///
/// 没有 JSON 请求体时按空请求处理，即返回 `URL is required`。
pub async fn fetch_url(
    State(state): State<Arc<AppState>>,
    payload: Result<ExtractJson<FetchRequest>, JsonRejection>,
) -> Result<Json<FetchResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request = read_request(payload).map_err(error_response)?;

    let url = match request.url {
        Some(url) if !url.trim().is_empty() => url.trim().to_string(),
        _ => return Err(error_response(RelayError::MissingParameter("URL".to_string()))),
    };

    tracing::info!("处理抓取请求: {}", url);

    let options = state.relay_options.clone();
    let target = url.clone();
    let result = task::spawn_blocking(move || -> Result<_, RelayError> {
        let session = Session::new(options)?;
        fetch_and_rewrite(&session, &target)
    })
    .await
    .map_err(|e| {
        tracing::error!("抓取任务失败: {}", e);
        error_response(RelayError::Internal(format!("Task execution error: {}", e)))
    })?;

    let (content, title) = result.map_err(|e| {
        tracing::error!("处理 {} 失败: {}", url, e);
        error_response(e)
    })?;

    tracing::info!(
        "处理完成: {} ({} 字节, 标题: {})",
        url,
        content.len(),
        title.as_deref().unwrap_or("-")
    );

    Ok(Json(FetchResponse {
        success: true,
        content,
    }))
}

fn read_request(
    payload: Result<ExtractJson<FetchRequest>, JsonRejection>,
) -> Result<FetchRequest, RelayError> {
    match payload {
        Ok(ExtractJson(request)) => Ok(request),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(FetchRequest::default()),
        // JSON 合法但 `url` 不是字符串
        Err(JsonRejection::JsonDataError(rejection)) => {
            Err(RelayError::InvalidUrl(rejection.body_text()))
        }
        Err(rejection) => Err(RelayError::InvalidBody(rejection.body_text())),
    }
}

/// 将错误映射为 HTTP 响应
///
/// 客户端错误原样返回信息，其余错误统一加上 `Failed to fetch content:` 前缀。
pub fn error_response(error: RelayError) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = if error.is_client_error() {
        tracing::warn!("拒绝请求: {}", error);
        error.to_string()
    } else {
        format!("Failed to fetch content: {}", error)
    };

    (status, Json(ErrorResponse { error: message }))
}
