// ==========================================
// 公交线路目录 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换Repository错误为用户可读的错误消息
// ==========================================

use crate::domain::{ROUTE_NUMBER_MAX, ROUTE_NUMBER_MIN};
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 输入校验失败原因（校验失败时不发生任何写入）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("线路号不能为空")]
    EmptyRouteNumber,

    #[error("线路号必须是 {min} 到 {max} 之间的数字: {0}", min = ROUTE_NUMBER_MIN, max = ROUTE_NUMBER_MAX)]
    RouteNumberNotNumeric(String),

    #[error("线路号必须是 {min} 到 {max} 之间的数字: {0}", min = ROUTE_NUMBER_MIN, max = ROUTE_NUMBER_MAX)]
    RouteNumberOutOfRange(i32),

    #[error("必须选择起点和终点场站")]
    MissingEndpoint,

    #[error("线路号已存在: {0}")]
    DuplicateRouteNumber(i32),

    #[error("类别代码无效: {0}")]
    InvalidCategoryCode(String),
}

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("数据验证失败: {0}")]
    Validation(#[from] ValidationError),

    /// 仓储拒绝写入（约束冲突/连接问题），内存状态未改变
    #[error("保存失败: {0}")]
    NotSaved(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    #[error("数据库错误: {0}")]
    DatabaseError(String),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})", entity, id))
            }
            RepositoryError::UniqueConstraintViolation(msg)
            | RepositoryError::CheckConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(msg)
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("仍存在引用关系: {}", msg))
            }
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::RouteNumberOutOfRange(1000).to_string(),
            "线路号必须是 1 到 999 之间的数字: 1000"
        );
        assert_eq!(
            ValidationError::DuplicateRouteNumber(12).to_string(),
            "线路号已存在: 12"
        );
    }

    #[test]
    fn test_repository_error_mapping() {
        let api: ApiError = RepositoryError::ForeignKeyViolation("FOREIGN KEY".to_string()).into();
        assert!(matches!(api, ApiError::BusinessRuleViolation(_)));

        let api: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert!(matches!(api, ApiError::DatabaseError(_)));

        let api: ApiError = RepositoryError::NotFound {
            entity: "Route".to_string(),
            id: "7".to_string(),
        }
        .into();
        assert!(matches!(api, ApiError::NotFound(_)));
    }
}
