// ==========================================
// 公交线路目录 - 数据库路径解析
// ==========================================
// 优先级: 环境变量 > 用户数据目录 > 当前目录
// ==========================================

use std::path::PathBuf;

/// 显式指定数据库路径的环境变量
pub const DB_PATH_ENV: &str = "TRANSPORT_ROUTES_DB_PATH";

const DB_FILE_NAME: &str = "transport_routes.db";

/// 获取默认数据库路径
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from(".").join(DB_FILE_NAME);

    if let Some(data_dir) = dirs::data_dir() {
        // 开发构建使用独立目录，避免污染正式数据
        #[cfg(debug_assertions)]
        let dir = data_dir.join("transport-routes-dev");

        #[cfg(not(debug_assertions))]
        let dir = data_dir.join("transport-routes");

        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join(DB_FILE_NAME);
        } else {
            tracing::warn!("无法创建数据目录 {}, 使用当前目录", dir.display());
        }
    }

    path.to_string_lossy().into_owned()
}
