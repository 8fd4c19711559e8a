//! 运单追踪核心模块
//!
//! # 模块结构
//!
//! - [`carriers`] - 物流商规则表 + 运单号校验
//! - [`generator`] - 按 格式/分店/日期 递增的运单号生成器
//! - [`provider`] - 外部物流商及其请求配置
//! - [`lookup`] - 外部追踪查询代理 (降级为 mock)
//! - [`extract`] - 物流商响应事件提取

pub mod carriers;
pub mod extract;
pub mod generator;
pub mod lookup;
pub mod provider;

// Re-exports
pub use carriers::CarrierRule;
pub use generator::CodeFormat;
pub use lookup::LookupService;
pub use provider::{Provider, ProviderConfig, ProviderRegistry};
