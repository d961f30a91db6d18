// ==========================================
// 公交线路目录 - 配置层
// ==========================================
// 职责: 系统配置管理、数据库路径解析
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod paths;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use paths::{get_default_db_path, DB_PATH_ENV};
