// ==========================================
// 公交线路目录 - 仓储接口
// ==========================================
// 职责: 定义核心层消费的持久化协作方接口（不包含业务逻辑）
// 实现者: RouteRepository / RoutePointRepository / CategoryRepository（rusqlite）
// ==========================================

use crate::domain::{Category, Route, RoutePoint};
use crate::repository::error::RepositoryResult;

// ==========================================
// RouteStore
// ==========================================
pub trait RouteStore {
    /// 全部线路（端点字段已反范式化，类别保持登记顺序）
    fn get_all_routes(&self) -> RepositoryResult<Vec<Route>>;

    /// 新增线路
    ///
    /// # 返回
    /// - Ok(i64): 新分配的线路 id
    /// - Err: 约束违反（线路号重复/越界、端点或类别不存在）等
    fn add_route(&self, route: &Route) -> RepositoryResult<i64>;

    /// 更新线路（按 id）
    ///
    /// # 返回
    /// - Ok(true): 已更新
    /// - Ok(false): id 不存在
    fn update_route(&self, route: &Route) -> RepositoryResult<bool>;

    /// 删除线路，返回是否删除了记录
    fn delete_route(&self, id: i64) -> RepositoryResult<bool>;

    fn is_route_number_exists(&self, route_number: i32) -> RepositoryResult<bool>;
}

// ==========================================
// RoutePointStore
// ==========================================
pub trait RoutePointStore {
    fn get_all_route_points(&self) -> RepositoryResult<Vec<RoutePoint>>;

    /// 新增场站，返回新分配的 id（传入值的 id 被忽略）
    fn add_route_point(&self, point: &RoutePoint) -> RepositoryResult<i64>;

    /// 删除场站；仍被线路引用时返回外键错误
    fn delete_route_point(&self, id: i64) -> RepositoryResult<bool>;
}

// ==========================================
// CategoryStore
// ==========================================
pub trait CategoryStore {
    /// 全部类别；颜色不合法的记录使整个加载失败
    fn get_all_categories(&self) -> RepositoryResult<Vec<Category>>;

    fn add_category(&self, category: &Category) -> RepositoryResult<()>;
}
