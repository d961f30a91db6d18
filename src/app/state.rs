// ==========================================
// 公交线路目录 - 应用状态
// ==========================================
// 职责: 打开共享连接，装配仓储/配置/类别查找/RouteApi
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::RouteApi;
use crate::config::ConfigManager;
use crate::db::open_sqlite_connection;
use crate::engine::CategoryLookup;
use crate::repository::{CategoryRepository, RoutePointRepository, RouteRepository};

/// 应用状态
///
/// 所有仓储共享同一个 SQLite 连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 配置管理器
    pub config: Arc<ConfigManager>,

    /// 类别仓储（类别列表/种子数据）
    pub category_repo: Arc<CategoryRepository>,

    /// 场站仓储
    pub route_point_repo: Arc<RoutePointRepository>,

    /// 线路API（持有内存线路容器）
    pub route_api: RouteApi,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 1. 打开连接并建表
    /// 2. 按配置写入默认类别/默认场站（仅表为空时）
    /// 3. 加载类别查找表
    /// 4. 创建 RouteApi 并加载全部线路
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================

        let config = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let category_repo = Arc::new(
            CategoryRepository::from_connection(conn.clone())
                .map_err(|e| format!("无法创建CategoryRepository: {}", e))?,
        );
        let route_point_repo = Arc::new(
            RoutePointRepository::from_connection(conn.clone())
                .map_err(|e| format!("无法创建RoutePointRepository: {}", e))?,
        );
        let route_repo = Arc::new(
            RouteRepository::from_connection(conn)
                .map_err(|e| format!("无法创建RouteRepository: {}", e))?,
        );

        // ==========================================
        // 种子数据
        // ==========================================

        let seed_categories = config
            .seed_default_categories()
            .map_err(|e| format!("读取配置失败: {}", e))?;
        if seed_categories {
            category_repo
                .seed_defaults_if_empty()
                .map_err(|e| format!("写入默认类别失败: {}", e))?;
        }

        let seed_depots = config
            .seed_default_depots()
            .map_err(|e| format!("读取配置失败: {}", e))?;
        if seed_depots {
            route_point_repo
                .seed_defaults_if_empty()
                .map_err(|e| format!("写入默认场站失败: {}", e))?;
        }

        // ==========================================
        // 初始化API层
        // ==========================================

        let categories = CategoryLookup::load(category_repo.as_ref())
            .map_err(|e| format!("加载类别失败: {}", e))?;

        let route_api = RouteApi::new(route_repo, route_point_repo.clone(), categories)
            .map_err(|e| format!("加载线路失败: {}", e))?;

        tracing::info!(
            "AppState初始化完成: 线路 {} 条, 类别 {} 个",
            route_api.routes().len(),
            route_api.categories().categories().len()
        );

        Ok(Self {
            db_path,
            config,
            category_repo,
            route_point_repo,
            route_api,
        })
    }
}
