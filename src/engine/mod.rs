// ==========================================
// 公交线路目录 - 引擎层
// ==========================================
// 职责: 展示属性解析（类别代码 → 名称/颜色）
// ==========================================

pub mod category_lookup;

pub use category_lookup::CategoryLookup;
