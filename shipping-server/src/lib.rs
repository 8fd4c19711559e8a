//! Petshop Shipping Server - 宠物用品商城的物流追踪服务
//!
//! # 架构概述
//!
//! 本模块提供以下核心功能：
//!
//! - **运单校验** (`tracking::carriers`): 物流商规则表 + 运单号格式校验
//! - **运单号生成** (`tracking::generator`): 按 格式/分店/日期 的原子递增序列
//! - **追踪查询代理** (`tracking::lookup`): 外部物流商查询，故障时降级为 mock
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 (计数器、订单物流字段)
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! shipping-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── tracking/      # 运单校验、生成、追踪查询
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层
//! └── utils/         # 错误、日志
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod tracking;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState, build_app, setup_environment};
pub use tracking::{CodeFormat, LookupService, Provider, ProviderRegistry};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____                __
   / __ \____ __      _/ /_____  _____
  / /_/ / __ `/ | /| / / __/ _ \/ ___/
 / ____/ /_/ /| |/ |/ / /_/  __/ /
/_/    \__,_/ |__/|__/\__/\___/_/
        Shipping & Tracking Service
"#
    );
}
