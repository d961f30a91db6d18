// ==========================================
// 公交线路目录 - 应用层
// ==========================================
// 职责: 组件装配（连接、仓储、配置、种子数据、RouteApi）
// ==========================================

pub mod state;

// 重导出
pub use state::AppState;
