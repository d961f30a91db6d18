// ==========================================
// 公交线路目录 - 领域类型定义
// ==========================================
// 线路类型由线路号区间唯一决定
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 线路号下限（含）
pub const ROUTE_NUMBER_MIN: i32 = 1;

/// 线路号上限（含）
pub const ROUTE_NUMBER_MAX: i32 = 999;

// ==========================================
// 线路类型 (Route Type)
// ==========================================
// 区间: 1-199 市区 / 200-299 混合 / 300-399 郊区 / 400-999 区域
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteType {
    Urban,    // 市区
    Mixed,    // 混合
    Suburban, // 郊区
    Regional, // 区域
    Unknown,  // 未知（超出线路号值域）
}

impl RouteType {
    /// 按线路号区间判定线路类型
    pub fn from_route_number(number: i32) -> Self {
        match number {
            1..=199 => RouteType::Urban,
            200..=299 => RouteType::Mixed,
            300..=399 => RouteType::Suburban,
            400..=999 => RouteType::Regional,
            _ => RouteType::Unknown,
        }
    }

    /// 展示名称（CSV 导出的 Route Type 列）
    pub fn display_name(&self) -> &'static str {
        match self {
            RouteType::Urban => "Urban",
            RouteType::Mixed => "Mixed",
            RouteType::Suburban => "Suburban",
            RouteType::Regional => "Regional",
            RouteType::Unknown => "Unknown",
        }
    }

    /// 徽标背景色
    pub fn badge_color(&self) -> &'static str {
        match self {
            RouteType::Urban => "#B8F1B9",
            RouteType::Mixed => "#DFE0FF",
            RouteType::Suburban => "#F9E287",
            RouteType::Regional | RouteType::Unknown => "#E3E9EA",
        }
    }

    /// 徽标文字色
    pub fn text_color(&self) -> &'static str {
        match self {
            RouteType::Urban => "#1E5127",
            RouteType::Mixed => "#3B4279",
            RouteType::Suburban => "#534600",
            RouteType::Regional | RouteType::Unknown => "#161D1D",
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_type_bands() {
        for n in 1..=199 {
            assert_eq!(RouteType::from_route_number(n), RouteType::Urban);
        }
        for n in 200..=299 {
            assert_eq!(RouteType::from_route_number(n), RouteType::Mixed);
        }
        for n in 300..=399 {
            assert_eq!(RouteType::from_route_number(n), RouteType::Suburban);
        }
        for n in 400..=999 {
            assert_eq!(RouteType::from_route_number(n), RouteType::Regional);
        }
    }

    #[test]
    fn test_route_type_out_of_domain() {
        for n in [i32::MIN, -1, 0, 1000, 9999, i32::MAX] {
            assert_eq!(RouteType::from_route_number(n), RouteType::Unknown);
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(RouteType::Urban.to_string(), "Urban");
        assert_eq!(RouteType::Mixed.to_string(), "Mixed");
        assert_eq!(RouteType::Suburban.to_string(), "Suburban");
        assert_eq!(RouteType::Regional.to_string(), "Regional");
        assert_eq!(RouteType::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_regional_and_unknown_share_colors() {
        assert_eq!(RouteType::Regional.badge_color(), RouteType::Unknown.badge_color());
        assert_eq!(RouteType::Regional.text_color(), RouteType::Unknown.text_color());
    }
}
