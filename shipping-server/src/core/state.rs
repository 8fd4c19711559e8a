//! 服务器状态

use std::sync::Arc;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::tracking::{LookupService, ProviderRegistry};
use crate::utils::set_expose_error_details;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc/浅拷贝实现低成本 Clone，作为 axum 的应用状态。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | lookup | LookupService | 物流商追踪查询代理 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 物流商追踪查询代理
    pub lookup: LookupService,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`Self::initialize()`] 方法代替
    pub fn new(config: Config, db: Surreal<Db>, lookup: LookupService) -> Self {
        Self { config, db, lookup }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database)
    /// 3. 物流商配置 (启动时校验) 与 HTTP 客户端
    ///
    /// # Panics
    ///
    /// 数据库或物流商配置初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_service = DbService::new(&config.database_dir())
            .await
            .expect("Failed to initialize database");

        let state = Self::with_db(config, db_service.db);
        set_expose_error_details(!config.is_production());
        state
    }

    /// 初始化服务器状态 (内存数据库，测试场景)
    pub async fn initialize_in_memory(config: &Config) -> Self {
        let db_service = DbService::in_memory()
            .await
            .expect("Failed to initialize in-memory database");
        Self::with_db(config, db_service.db)
    }

    fn with_db(config: &Config, db: Surreal<Db>) -> Self {
        // Provider configuration is validated here, before the first request
        let registry = ProviderRegistry::from_env()
            .expect("Invalid tracking provider configuration");

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.track_timeout_ms))
            .build()
            .expect("Failed to build HTTP client");

        let lookup = LookupService::new(
            client,
            Arc::new(registry),
            config.fallback_on_provider_error,
        );

        Self::new(config.clone(), db, lookup)
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
