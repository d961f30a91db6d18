// ==========================================
// 公交线路目录 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod category_repo;
pub mod error;
pub mod route_point_repo;
pub mod route_repo;
pub mod traits;

// 重导出核心仓储
pub use category_repo::CategoryRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use route_point_repo::RoutePointRepository;
pub use route_repo::RouteRepository;
pub use traits::{CategoryStore, RoutePointStore, RouteStore};
