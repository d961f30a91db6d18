// ==========================================
// 公交线路目录 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 线路/场站/专线类别的目录管理
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 类别解析
pub mod engine;

// 导入层 - CSV 导入/导出
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组件装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{Category, Route, RouteCollection, RoutePoint, RouteType};
pub use engine::CategoryLookup;
pub use api::{ApiError, ApiResult, RouteApi};
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "公交线路目录";
