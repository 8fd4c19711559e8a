//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构：
//! - [`AppError`] - 应用错误枚举
//! - [`ErrorBody`] - 错误响应结构
//!
//! # 错误码规范
//!
//! | 前缀 | 分类 | 示例 |
//! |------|------|------|
//! | E01xx | 运单校验错误 | E0103 运单号格式不符 |
//! | E05xx | 外部服务错误 | E0502 物流商接口不可用 |
//! | E9xxx | 系统错误 | E9002 数据库错误 |
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Order not found"))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::OnceLock;
use tracing::error;

/// 是否在错误响应中附带底层错误详情 (仅非生产环境)
static EXPOSE_ERROR_DETAILS: OnceLock<bool> = OnceLock::new();

/// Configure error-detail exposure once at startup.
///
/// Production keeps infrastructure error messages out of response bodies;
/// they are still logged via tracing.
pub fn set_expose_error_details(expose: bool) {
    let _ = EXPOSE_ERROR_DETAILS.set(expose);
}

fn expose_details() -> bool {
    *EXPOSE_ERROR_DETAILS.get_or_init(|| false)
}

/// 错误响应结构
///
/// ```json
/// {
///   "code": "E0103",
///   "message": "tracking code does not match the carrier format",
///   "example": "SHP123456789"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// 错误码
    pub code: String,
    /// 消息
    pub message: String,
    /// 期望的运单号示例 (仅格式校验错误)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// 底层错误详情 (仅非生产环境)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// 应用错误枚举
///
/// # 错误分类
///
/// | 分类 | 说明 |
/// |------|------|
/// | 输入校验错误 | 缺少字段、不支持的格式/物流商、运单号格式不符 |
/// | 业务逻辑错误 | 资源不存在 |
/// | 外部服务错误 | 物流商接口失败、订单存储不可写 |
/// | 系统错误 | 数据库错误、内部错误 |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 输入校验错误 (4xx) ==========
    #[error("Validation failed: {0}")]
    /// 验证失败 (400)
    Validation(String),

    #[error("Unsupported carrier: {0}")]
    /// 不支持的物流商 (400)
    UnsupportedCarrier(String),

    #[error("Tracking format mismatch, expected e.g. {example}")]
    /// 运单号格式不符 (400)
    FormatMismatch { example: String },

    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    // ========== 外部服务错误 (5xx) ==========
    #[error("Provider request failed: {0}")]
    /// 物流商接口不可用 (502)
    ProviderFailed(String),

    #[error("Persistence unavailable: {0}")]
    /// 订单存储不可写 (503)
    PersistenceUnavailable(String),

    // ========== 系统错误 (5xx) ==========
    #[error("Database error: {0}")]
    /// 数据库错误 (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut example = None;
        let mut details = None;

        let (status, code, message) = match &self {
            // Validation (400)
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),

            // Unsupported carrier (400)
            AppError::UnsupportedCarrier(carrier) => (
                StatusCode::BAD_REQUEST,
                "E0102",
                format!("unsupported carrier: {}", carrier),
            ),

            // Tracking format mismatch (400) - echo the expected example
            AppError::FormatMismatch { example: ex } => {
                example = Some(ex.clone());
                (
                    StatusCode::BAD_REQUEST,
                    "E0103",
                    "tracking code does not match the carrier format".to_string(),
                )
            }

            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),

            // Provider failure (502) - only reached when fallback is disabled
            AppError::ProviderFailed(msg) => {
                error!(target: "provider", error = %msg, "Provider request failed");
                if expose_details() {
                    details = Some(msg.clone());
                }
                (
                    StatusCode::BAD_GATEWAY,
                    "E0502",
                    "tracking provider request failed".to_string(),
                )
            }

            // Order store unreachable (503) - distinct from generic 500 so the
            // caller can tell "temporarily cannot write" from "bad request"
            AppError::PersistenceUnavailable(msg) => {
                error!(target: "database", error = %msg, "Order store unavailable");
                if expose_details() {
                    details = Some(msg.clone());
                }
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "E0503",
                    "database not available: cannot update order shipping".to_string(),
                )
            }

            // Database errors (500)
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                if expose_details() {
                    details = Some(msg.clone());
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Database error".to_string(),
                )
            }

            // Internal errors (500)
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                if expose_details() {
                    details = Some(msg.clone());
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorBody {
            code: code.to_string(),
            message,
            example,
            details,
        });

        (status, body).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn persistence_unavailable(msg: impl Into<String>) -> Self {
        Self::PersistenceUnavailable(msg.into())
    }
}

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;
