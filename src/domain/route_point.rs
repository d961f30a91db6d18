// ==========================================
// 公交线路目录 - 场站（线路端点）
// ==========================================
// 对齐: route_points 表
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 场站
///
/// `id == 0` 表示尚未落库。三个文本字段永不为 NULL（缺失时为空串）。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoutePoint {
    id: i64,
    locality: String,    // 城市/居民点
    district: String,    // 区
    description: String, // 场站名称
}

impl RoutePoint {
    pub fn new(
        id: i64,
        locality: impl Into<String>,
        district: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            locality: locality.into(),
            district: district.into(),
            description: description.into(),
        }
    }

    /// 从可能为 NULL 的数据库列构造
    pub fn from_nullable(
        id: i64,
        locality: Option<String>,
        district: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self::new(
            id,
            locality.unwrap_or_default(),
            district.unwrap_or_default(),
            description.unwrap_or_default(),
        )
    }

    /// 返回带新 id 的副本（落库后回填）
    pub fn with_id(&self, id: i64) -> Self {
        Self { id, ..self.clone() }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn locality(&self) -> &str {
        &self.locality
    }

    pub fn district(&self) -> &str {
        &self.district
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

impl fmt::Display for RoutePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.description, self.locality, self.district)
    }
}
