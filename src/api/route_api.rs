// ==========================================
// 公交线路目录 - 线路 API
// ==========================================
// 职责: 持有内存线路容器，编排 校验 → 仓储写入 → 重新加载
// 约束: 仓储确认成功前不修改内存状态
// 约束: 单一所有者（&mut self 修改），不跨线程共享
// ==========================================

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::error::{ApiError, ApiResult, ValidationError};
use crate::api::validator::RouteValidator;
use crate::domain::{Route, RouteCollection, RoutePoint};
use crate::engine::CategoryLookup;
use crate::repository::{RoutePointStore, RouteStore};

pub struct RouteApi {
    route_store: Arc<dyn RouteStore>,
    point_store: Arc<dyn RoutePointStore>,
    categories: CategoryLookup,
    routes: RouteCollection,
}

impl RouteApi {
    /// 创建 RouteApi 并从仓储加载全部线路
    pub fn new(
        route_store: Arc<dyn RouteStore>,
        point_store: Arc<dyn RoutePointStore>,
        categories: CategoryLookup,
    ) -> ApiResult<Self> {
        let mut api = Self {
            route_store,
            point_store,
            categories,
            routes: RouteCollection::new(),
        };
        api.load_all_routes()?;
        Ok(api)
    }

    /// 以仓储为准重建内存容器
    ///
    /// # 返回
    /// 加载的线路条数
    pub fn load_all_routes(&mut self) -> ApiResult<usize> {
        let rows = self.route_store.get_all_routes()?;
        let mut routes = RouteCollection::new();
        for route in rows {
            routes.add(route);
        }
        self.routes = routes;
        debug!("线路已加载: {} 条", self.routes.len());
        Ok(self.routes.len())
    }

    /// 当前顺序的只读视图
    pub fn routes(&self) -> &RouteCollection {
        &self.routes
    }

    pub fn categories(&self) -> &CategoryLookup {
        &self.categories
    }

    // ==========================================
    // 线路查询/排序
    // ==========================================

    pub fn search_by_route_number(&self, route_number: i32) -> Option<&Route> {
        self.routes.linear_search(route_number)
    }

    pub fn sort_by_route_number(&mut self) {
        self.routes.insertion_sort();
    }

    // ==========================================
    // 线路写入
    // ==========================================

    /// 表单保存：校验文本输入后新增或更新
    ///
    /// # 参数
    /// - number_text: 线路号原始文本
    /// - start / end: 所选起终点
    /// - categories: 所选类别代码
    /// - existing_id: 编辑已有线路时为其 id，新增时为 None
    ///
    /// # 返回
    /// 线路 id（新增时为新分配的 id）
    pub fn validate_and_save_route(
        &mut self,
        number_text: &str,
        start: Option<&RoutePoint>,
        end: Option<&RoutePoint>,
        categories: &[char],
        existing_id: Option<i64>,
    ) -> ApiResult<i64> {
        let input = RouteValidator::validate_input(number_text, start, end)?;

        match existing_id {
            None => {
                let route = Route::new(
                    0,
                    input.route_number,
                    input.start_point,
                    input.end_point,
                    categories.to_vec(),
                );
                self.add_route(&route)
            }
            Some(id) => {
                let route = Route::new(
                    id,
                    input.route_number,
                    input.start_point,
                    input.end_point,
                    categories.to_vec(),
                );
                self.update_route(&route)?;
                Ok(id)
            }
        }
    }

    /// 新增线路（值域 + 唯一性校验），成功后重新加载
    pub fn add_route(&mut self, route: &Route) -> ApiResult<i64> {
        let id = self.persist_new_route(route)?;
        self.load_all_routes()?;
        info!("线路已新增: id={}, number={}", id, route.route_number());
        Ok(id)
    }

    /// 校验并写入仓储，不重新加载（批量导入结束后统一加载）
    pub(crate) fn persist_new_route(&self, route: &Route) -> ApiResult<i64> {
        RouteValidator::check_route_number(route.route_number())?;
        if self.route_store.is_route_number_exists(route.route_number())? {
            return Err(ValidationError::DuplicateRouteNumber(route.route_number()).into());
        }

        self.route_store
            .add_route(route)
            .map_err(|e| ApiError::NotSaved(e.to_string()))
    }

    /// 更新线路；线路号变化时检查唯一性
    pub fn update_route(&mut self, route: &Route) -> ApiResult<()> {
        RouteValidator::check_route_number(route.route_number())?;

        let current = self
            .routes
            .iter()
            .find(|r| r.id() == route.id())
            .ok_or_else(|| ApiError::NotFound(format!("Route(id={})", route.id())))?;

        if current.route_number() != route.route_number()
            && self.route_store.is_route_number_exists(route.route_number())?
        {
            return Err(ValidationError::DuplicateRouteNumber(route.route_number()).into());
        }

        let updated = self
            .route_store
            .update_route(route)
            .map_err(|e| ApiError::NotSaved(e.to_string()))?;
        if !updated {
            return Err(ApiError::NotSaved(format!("Route(id={}) 不存在", route.id())));
        }

        self.load_all_routes()?;
        info!("线路已更新: id={}, number={}", route.id(), route.route_number());
        Ok(())
    }

    /// 删除线路；仓储删除成功后从内存容器移除
    ///
    /// # 返回
    /// - Ok(true): 已删除
    /// - Ok(false): 仓储中不存在该 id，内存不变
    pub fn delete_route(&mut self, id: i64) -> ApiResult<bool> {
        if !self.route_store.delete_route(id)? {
            return Ok(false);
        }
        if !self.routes.remove_by_id(id) {
            warn!("线路 id={} 已从仓储删除，但不在内存容器中", id);
        }
        info!("线路已删除: id={}", id);
        Ok(true)
    }

    // ==========================================
    // 场站
    // ==========================================

    pub fn route_points(&self) -> ApiResult<Vec<RoutePoint>> {
        Ok(self.point_store.get_all_route_points()?)
    }

    /// 新增场站，返回带新 id 的副本
    pub fn add_route_point(&self, point: &RoutePoint) -> ApiResult<RoutePoint> {
        let id = self
            .point_store
            .add_route_point(point)
            .map_err(|e| ApiError::NotSaved(e.to_string()))?;
        info!("场站已新增: id={}, {}", id, point);
        Ok(point.with_id(id))
    }

    /// 删除场站；仍被线路引用时返回业务规则错误
    pub fn delete_route_point(&self, id: i64) -> ApiResult<bool> {
        Ok(self.point_store.delete_route_point(id)?)
    }
}
