//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`tracking`] - 运单号生成、格式表、物流商追踪查询
//! - [`orders`] - 订单物流信息更新 (后台)
//! - [`shipping`] - 按运单号查询订单 (公开)

pub mod health;
pub mod orders;
pub mod shipping;
pub mod tracking;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
