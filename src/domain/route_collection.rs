// ==========================================
// 公交线路目录 - 线路有序容器
// ==========================================
// 职责: 按插入顺序保存线路，提供按 id 删除、线性查找、插入排序
// 约束: 不做线路号唯一性检查（唯一性由仓储层保证）
// 约束: 单线程使用，无内部锁
// ==========================================

use crate::domain::route::Route;

/// 线路有序容器（数组存储）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteCollection {
    routes: Vec<Route>,
}

impl RouteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加到末尾，O(1) 摊还
    pub fn add(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// 删除第一条 id 匹配的线路
    ///
    /// # 返回
    /// - `true`: 已删除
    /// - `false`: 未找到，容器不变
    pub fn remove_by_id(&mut self, id: i64) -> bool {
        match self.routes.iter().position(|r| r.id() == id) {
            Some(index) => {
                self.routes.remove(index);
                true
            }
            None => false,
        }
    }

    /// 按 0 起始下标取线路，越界返回 `None`
    pub fn get(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn clear(&mut self) {
        self.routes.clear();
    }

    /// 按当前顺序线性查找，返回第一条线路号相等的线路
    pub fn linear_search(&self, route_number: i32) -> Option<&Route> {
        self.routes.iter().find(|r| r.route_number() == route_number)
    }

    /// 按线路号升序原地插入排序（稳定，O(n²)）
    ///
    /// 前缀 `[0, i)` 始终有序。取出第 i 个元素后从前缀头部向后扫描，
    /// 越过所有线路号 ≤ 该元素的位置再插入，因此相等线路号保持原相对顺序。
    pub fn insertion_sort(&mut self) {
        for i in 1..self.routes.len() {
            let key = self.routes[i].route_number();
            let mut pos = 0;
            while pos < i && self.routes[pos].route_number() <= key {
                pos += 1;
            }
            if pos < i {
                self.routes[pos..=i].rotate_right(1);
            }
        }
    }

    /// 只读视图
    pub fn as_slice(&self) -> &[Route] {
        &self.routes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn into_vec(self) -> Vec<Route> {
        self.routes
    }
}

impl FromIterator<Route> for RouteCollection {
    fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RouteCollection {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::route_point::RoutePoint;

    fn route(id: i64, number: i32) -> Route {
        Route::new(
            id,
            number,
            RoutePoint::new(1, "L1", "D1", "A"),
            RoutePoint::new(2, "L2", "D2", "B"),
            vec![],
        )
    }

    fn numbers(c: &RouteCollection) -> Vec<i32> {
        c.iter().map(Route::route_number).collect()
    }

    fn ids(c: &RouteCollection) -> Vec<i64> {
        c.iter().map(Route::id).collect()
    }

    /// 参照实现：逐个取出，插入到新序列中第一个更大键之前
    fn reference_insertion_order(input: &[(i64, i32)]) -> Vec<i64> {
        let mut sorted: Vec<(i64, i32)> = Vec::new();
        for &(id, n) in input {
            let pos = sorted.iter().position(|&(_, k)| k > n).unwrap_or(sorted.len());
            sorted.insert(pos, (id, n));
        }
        sorted.into_iter().map(|(id, _)| id).collect()
    }

    #[test]
    fn test_add_get_size() {
        let mut c = RouteCollection::new();
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert!(c.get(0).is_none());

        c.add(route(1, 150));
        c.add(route(2, 50));
        assert_eq!(c.len(), 2);
        assert!(!c.is_empty());
        assert_eq!(c.get(0).map(Route::id), Some(1));
        assert_eq!(c.get(1).map(Route::id), Some(2));
        assert!(c.get(2).is_none());
    }

    #[test]
    fn test_add_allows_duplicates() {
        let mut c = RouteCollection::new();
        c.add(route(1, 10));
        c.add(route(1, 10));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_remove_by_id() {
        let mut c: RouteCollection = vec![route(1, 10), route(2, 20), route(3, 30)]
            .into_iter()
            .collect();

        assert!(c.remove_by_id(2));
        assert_eq!(c.len(), 2);
        assert_eq!(ids(&c), vec![1, 3]);
        assert!(c.linear_search(20).is_none());

        // 不存在的 id：容器不变
        assert!(!c.remove_by_id(99));
        assert_eq!(c.len(), 2);

        // 头部删除
        assert!(c.remove_by_id(1));
        assert_eq!(ids(&c), vec![3]);
    }

    #[test]
    fn test_remove_by_id_removes_first_match_only() {
        let mut c: RouteCollection = vec![route(7, 10), route(7, 20)].into_iter().collect();
        assert!(c.remove_by_id(7));
        assert_eq!(numbers(&c), vec![20]);
    }

    #[test]
    fn test_linear_search() {
        let c: RouteCollection = vec![route(1, 150), route(2, 50), route(3, 150)]
            .into_iter()
            .collect();

        assert_eq!(c.linear_search(50).map(Route::id), Some(2));
        // 重复线路号取第一条
        assert_eq!(c.linear_search(150).map(Route::id), Some(1));
        assert!(c.linear_search(9999).is_none());
        assert!(RouteCollection::new().linear_search(1).is_none());
    }

    #[test]
    fn test_insertion_sort_scenario() {
        let mut c = RouteCollection::new();
        c.add(route(1, 150));
        c.add(route(2, 50));
        c.insertion_sort();
        assert_eq!(c.get(0).map(Route::route_number), Some(50));
        assert_eq!(c.get(1).map(Route::route_number), Some(150));
    }

    #[test]
    fn test_insertion_sort_empty_and_single() {
        let mut empty = RouteCollection::new();
        empty.insertion_sort();
        assert!(empty.is_empty());

        let mut single: RouteCollection = vec![route(1, 5)].into_iter().collect();
        single.insertion_sort();
        assert_eq!(ids(&single), vec![1]);
    }

    #[test]
    fn test_insertion_sort_is_stable() {
        let input = [(1, 300), (2, 100), (3, 300), (4, 5), (5, 100), (6, 300)];
        let mut c: RouteCollection = input.iter().map(|&(id, n)| route(id, n)).collect();
        c.insertion_sort();

        assert_eq!(numbers(&c), vec![5, 100, 100, 300, 300, 300]);
        assert_eq!(ids(&c), vec![4, 2, 5, 1, 3, 6]);
        assert_eq!(ids(&c), reference_insertion_order(&input));
    }

    #[test]
    fn test_insertion_sort_matches_reference_on_many_inputs() {
        // 确定性伪随机序列（线性同余），覆盖大量重复键
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        for len in 0..40 {
            let input: Vec<(i64, i32)> = (0..len)
                .map(|i| {
                    seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                    (i as i64 + 1, ((seed >> 33) % 12) as i32 + 1)
                })
                .collect();

            let mut c: RouteCollection = input.iter().map(|&(id, n)| route(id, n)).collect();
            c.insertion_sort();

            let sorted = numbers(&c);
            assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(ids(&c), reference_insertion_order(&input));
        }
    }

    #[test]
    fn test_insertion_sort_reverse_input() {
        let mut c: RouteCollection = (1..=10).rev().map(|n| route(n as i64, n)).collect();
        c.insertion_sort();
        assert_eq!(numbers(&c), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_views_are_read_only_snapshots() {
        let c: RouteCollection = vec![route(1, 10), route(2, 20)].into_iter().collect();
        let mut copied: Vec<Route> = c.as_slice().to_vec();
        copied.clear();
        assert_eq!(c.len(), 2);

        let collected: Vec<i64> = (&c).into_iter().map(Route::id).collect();
        assert_eq!(collected, vec![1, 2]);
        assert_eq!(c.clone().into_vec().len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut c: RouteCollection = vec![route(1, 10)].into_iter().collect();
        c.clear();
        assert!(c.is_empty());
    }
}
