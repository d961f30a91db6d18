// ==========================================
// 公交线路目录 - 领域层
// ==========================================
// 职责: 实体、值对象与内存容器
// 红线: 领域层不访问数据库
// ==========================================

pub mod category;
pub mod route;
pub mod route_collection;
pub mod route_point;
pub mod types;

// 重导出核心实体
pub use category::{Category, CategoryError};
pub use route::Route;
pub use route_collection::RouteCollection;
pub use route_point::RoutePoint;
pub use types::{RouteType, ROUTE_NUMBER_MAX, ROUTE_NUMBER_MIN};
