// ==========================================
// 公交线路目录 - 场站字段解析
// ==========================================
// 格式: "description (locality, district)"
// 规则: 取最后一个 '(' 与最后一个 ')'，括号内按第一个逗号拆分
// 解析失败时整段作为 description，locality/district 为空
// ==========================================

use crate::domain::RoutePoint;

/// 从 CSV 字段解析出的场站描述（尚未关联 id）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPoint {
    pub description: String,
    pub locality: String,
    pub district: String,
}

impl ParsedPoint {
    /// 转为待落库的场站（id = 0）
    pub fn to_route_point(&self) -> RoutePoint {
        RoutePoint::new(0, &self.locality, &self.district, &self.description)
    }
}

pub fn parse_point_field(raw: &str) -> ParsedPoint {
    let field = raw.trim();

    if let (Some(open), Some(close)) = (field.rfind('('), field.rfind(')')) {
        if open < close {
            let interior = &field[open + 1..close];
            let (locality, district) = match interior.split_once(',') {
                Some((l, d)) => (l.trim().to_string(), d.trim().to_string()),
                None => (String::new(), String::new()),
            };
            return ParsedPoint {
                description: field[..open].trim().to_string(),
                locality,
                district,
            };
        }
    }

    ParsedPoint {
        description: field.to_string(),
        locality: String::new(),
        district: String::new(),
    }
}

/// 按 description 精确匹配已知场站
pub fn find_by_description<'a>(known: &'a [RoutePoint], description: &str) -> Option<&'a RoutePoint> {
    known.iter().find(|p| p.description() == description)
}
