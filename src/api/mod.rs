// ==========================================
// 公交线路目录 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令行/界面调用
// ==========================================

pub mod error;
pub mod route_api;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult, ValidationError};
pub use route_api::RouteApi;
pub use validator::{RouteValidator, ValidatedRouteInput};
