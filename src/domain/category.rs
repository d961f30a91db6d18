// ==========================================
// 公交线路目录 - 专线类别
// ==========================================
// 对齐: categories 表
// 约束: 颜色必须为 #RRGGBB，构造时立即校验
// ==========================================

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern is valid")
});

/// 未知类别的默认背景色
pub const DEFAULT_CATEGORY_BG_COLOR: &str = "#95A5A6";

/// 未知类别的默认文字色
pub const DEFAULT_CATEGORY_TEXT_COLOR: &str = "#34495E";

/// 类别构造错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("颜色格式无效 (field={field}): {value}，期望 #RRGGBB")]
    InvalidColor { field: &'static str, value: String },
}

/// 专线类别（商业/快线/夜班）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    code: char,
    name: String,
    bg_color: String,
    text_color: String,
}

impl Category {
    /// 创建类别，颜色不合法时立即失败
    pub fn new(
        code: char,
        name: impl Into<String>,
        bg_color: impl Into<String>,
        text_color: impl Into<String>,
    ) -> Result<Self, CategoryError> {
        let bg_color = bg_color.into();
        let text_color = text_color.into();

        if !is_valid_hex_color(&bg_color) {
            return Err(CategoryError::InvalidColor {
                field: "bg_color",
                value: bg_color,
            });
        }
        if !is_valid_hex_color(&text_color) {
            return Err(CategoryError::InvalidColor {
                field: "text_color",
                value: text_color,
            });
        }

        Ok(Self {
            code,
            name: name.into(),
            bg_color,
            text_color,
        })
    }

    /// 未知代码的灰色占位类别（名称取代码本身）
    pub(crate) fn fallback(code: char) -> Self {
        Self {
            code,
            name: code.to_string(),
            bg_color: DEFAULT_CATEGORY_BG_COLOR.to_string(),
            text_color: DEFAULT_CATEGORY_TEXT_COLOR.to_string(),
        }
    }

    pub fn code(&self) -> char {
        self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bg_color(&self) -> &str {
        &self.bg_color
    }

    pub fn text_color(&self) -> &str {
        &self.text_color
    }
}

/// 校验 #RRGGBB 格式
pub fn is_valid_hex_color(color: &str) -> bool {
    HEX_COLOR.is_match(color)
}

/// 默认类别种子数据
///
/// 快线使用拉丁字母 `S`。
pub fn default_categories() -> Vec<Category> {
    [
        ('K', "Commercial", "#FF6B6B", "#721C24"),
        ('S', "Express", "#4ECDC4", "#0E6251"),
        ('M', "Night", "#45B7D1", "#1B4F72"),
    ]
    .into_iter()
    .map(|(code, name, bg, text)| Category {
        code,
        name: name.to_string(),
        bg_color: bg.to_string(),
        text_color: text.to_string(),
    })
    .collect()
}
