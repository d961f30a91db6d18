// ==========================================
// 公交线路目录 - 导入模块错误类型
// ==========================================
// 说明: 单行数据问题不产生错误（跳过该行），这里只有文件级错误
// 工具: thiserror 派生宏
// ==========================================

use crate::api::error::ApiError;
use thiserror::Error;

/// 导入/导出错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("文件写入失败: {0}")]
    FileWriteError(String),

    #[error("线路服务错误: {0}")]
    Api(#[from] ApiError),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
