// ==========================================
// 公交线路目录 - 线路实体
// ==========================================
// 对齐: routes + route_categories 表
// 红线: 端点按值嵌入（快照），场站记录在别处修改不会回写到线路
// ==========================================

use crate::domain::route_point::RoutePoint;
use crate::domain::types::RouteType;
use crate::engine::CategoryLookup;
use serde::Serialize;

/// 线路
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    id: i64,
    route_number: i32,
    start_point: RoutePoint,
    end_point: RoutePoint,
    special_categories: Vec<char>,
    route_type: RouteType, // 派生字段，随 route_number 重算
}

impl Route {
    /// 创建线路
    ///
    /// # 参数
    /// - id: 主键，0 表示尚未落库
    /// - route_number: 线路号（本层不校验值域）
    /// - start_point / end_point: 端点快照
    /// - special_categories: 专线类别代码，保持给定顺序
    pub fn new(
        id: i64,
        route_number: i32,
        start_point: RoutePoint,
        end_point: RoutePoint,
        special_categories: Vec<char>,
    ) -> Self {
        Self {
            id,
            route_number,
            start_point,
            end_point,
            special_categories,
            route_type: RouteType::from_route_number(route_number),
        }
    }

    /// 解析逗号分隔的类别串（"K,M"），去空白、丢弃空项
    ///
    /// 多字符的片段返回 `None`。
    pub fn parse_category_string(raw: &str) -> Option<Vec<char>> {
        let mut codes = Vec::new();
        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let mut chars = part.chars();
            match (chars.next(), chars.next()) {
                (Some(code), None) => codes.push(code),
                _ => return None,
            }
        }
        Some(codes)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    pub fn route_number(&self) -> i32 {
        self.route_number
    }

    /// 设置线路号并重算线路类型（值域校验由调用方负责）
    pub fn set_route_number(&mut self, route_number: i32) {
        self.route_number = route_number;
        self.route_type = RouteType::from_route_number(route_number);
    }

    pub fn start_point(&self) -> &RoutePoint {
        &self.start_point
    }

    /// 复制端点字段到线路
    pub fn set_start_point(&mut self, point: &RoutePoint) {
        self.start_point = point.clone();
    }

    pub fn end_point(&self) -> &RoutePoint {
        &self.end_point
    }

    pub fn set_end_point(&mut self, point: &RoutePoint) {
        self.end_point = point.clone();
    }

    pub fn special_categories(&self) -> &[char] {
        &self.special_categories
    }

    pub fn set_special_categories(&mut self, codes: Vec<char>) {
        self.special_categories = codes;
    }

    /// 类别代码逗号拼接（"K,M"）
    pub fn special_category_string(&self) -> String {
        self.special_categories
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn route_type(&self) -> RouteType {
        self.route_type
    }

    /// 徽标背景色，按当前线路号即时计算
    pub fn badge_color(&self) -> &'static str {
        RouteType::from_route_number(self.route_number).badge_color()
    }

    /// 徽标文字色，按当前线路号即时计算
    pub fn text_color(&self) -> &'static str {
        RouteType::from_route_number(self.route_number).text_color()
    }

    pub fn category_color<'a>(&self, code: char, lookup: &'a CategoryLookup) -> &'a str {
        lookup.bg_color(code)
    }

    pub fn category_text_color<'a>(&self, code: char, lookup: &'a CategoryLookup) -> &'a str {
        lookup.text_color(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::{default_categories, DEFAULT_CATEGORY_BG_COLOR};

    fn point(id: i64, desc: &str) -> RoutePoint {
        RoutePoint::new(id, "L", "D", desc)
    }

    #[test]
    fn test_route_type_follows_number() {
        let mut r = Route::new(1, 150, point(1, "A"), point(2, "B"), vec![]);
        assert_eq!(r.route_type(), RouteType::Urban);
        assert_eq!(r.badge_color(), "#B8F1B9");
        assert_eq!(r.text_color(), "#1E5127");

        r.set_route_number(250);
        assert_eq!(r.route_type(), RouteType::Mixed);
        assert_eq!(r.badge_color(), "#DFE0FF");

        r.set_route_number(350);
        assert_eq!(r.route_type(), RouteType::Suburban);
        assert_eq!(r.text_color(), "#534600");

        r.set_route_number(999);
        assert_eq!(r.route_type(), RouteType::Regional);

        // 本层不做值域校验
        r.set_route_number(1000);
        assert_eq!(r.route_number(), 1000);
        assert_eq!(r.route_type(), RouteType::Unknown);
        assert_eq!(r.badge_color(), "#E3E9EA");
        assert_eq!(r.text_color(), "#161D1D");
    }

    #[test]
    fn test_colors_agree_with_route_type() {
        for n in [-5, 0, 1, 199, 200, 299, 300, 399, 400, 999, 1000] {
            let r = Route::new(0, n, point(1, "A"), point(2, "B"), vec![]);
            assert_eq!(r.badge_color(), r.route_type().badge_color());
            assert_eq!(r.text_color(), r.route_type().text_color());
        }
    }

    #[test]
    fn test_point_copy_semantics() {
        let mut depot = point(1, "Depot 1");
        let mut r = Route::new(1, 10, point(9, "X"), point(2, "B"), vec![]);
        r.set_start_point(&depot);

        // 场站在别处被替换，线路快照保持不变
        depot = RoutePoint::new(1, "L", "D", "Renamed");
        assert_eq!(r.start_point().description(), "Depot 1");
        assert_eq!(depot.description(), "Renamed");

        r.set_end_point(&depot);
        assert_eq!(r.end_point().description(), "Renamed");
    }

    #[test]
    fn test_serialized_route_type_tracks_number() {
        let mut r = Route::new(1, 150, point(1, "A"), point(2, "B"), vec!['K']);
        r.set_route_number(420);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["route_number"], 420);
        assert_eq!(json["route_type"], "REGIONAL");
        assert_eq!(json["special_categories"], serde_json::json!(["K"]));
    }

    #[test]
    fn test_category_string() {
        let r = Route::new(1, 10, point(1, "A"), point(2, "B"), vec!['K', 'M']);
        assert_eq!(r.special_category_string(), "K,M");

        let empty = Route::new(1, 10, point(1, "A"), point(2, "B"), vec![]);
        assert_eq!(empty.special_category_string(), "");
    }

    #[test]
    fn test_parse_category_string() {
        assert_eq!(Route::parse_category_string(""), Some(vec![]));
        assert_eq!(Route::parse_category_string("K"), Some(vec!['K']));
        assert_eq!(Route::parse_category_string(" K , S,M "), Some(vec!['K', 'S', 'M']));
        assert_eq!(Route::parse_category_string("K,,M"), Some(vec!['K', 'M']));
        assert_eq!(Route::parse_category_string("KM"), None);
    }

    #[test]
    fn test_category_colors_delegate_to_lookup() {
        let lookup = CategoryLookup::new(default_categories());
        let r = Route::new(1, 10, point(1, "A"), point(2, "B"), vec!['K']);
        assert_eq!(r.category_color('K', &lookup), "#FF6B6B");
        assert_eq!(r.category_text_color('K', &lookup), "#721C24");
        assert_eq!(r.category_color('?', &lookup), DEFAULT_CATEGORY_BG_COLOR);
    }
}
