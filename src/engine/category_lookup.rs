// ==========================================
// 公交线路目录 - 类别解析服务
// ==========================================
// 职责: 类别代码 → (名称, 背景色, 文字色)
// 说明: 显式构造并注入，不使用进程级单例
// 约束: 未知代码返回默认灰色，不报错
// ==========================================

use crate::domain::category::{
    Category, DEFAULT_CATEGORY_BG_COLOR, DEFAULT_CATEGORY_TEXT_COLOR,
};
use crate::repository::error::RepositoryResult;
use crate::repository::traits::CategoryStore;
use std::collections::HashMap;

/// 类别解析服务
#[derive(Debug, Clone, Default)]
pub struct CategoryLookup {
    categories: Vec<Category>,
    index: HashMap<char, usize>,
}

impl CategoryLookup {
    /// 从已构造（已校验）的类别列表创建
    ///
    /// 代码重复时以先出现者为准。
    pub fn new(categories: Vec<Category>) -> Self {
        let mut index = HashMap::with_capacity(categories.len());
        for (i, c) in categories.iter().enumerate() {
            index.entry(c.code()).or_insert(i);
        }
        Self { categories, index }
    }

    /// 从仓储加载类别目录
    ///
    /// 颜色格式不合法的记录在加载时即失败（由仓储构造 Category 时校验）。
    pub fn load(store: &dyn CategoryStore) -> RepositoryResult<Self> {
        let categories = store.get_all_categories()?;
        tracing::debug!("类别目录已加载: {} 项", categories.len());
        Ok(Self::new(categories))
    }

    /// 查找已登记的类别
    pub fn get(&self, code: char) -> Option<&Category> {
        self.index.get(&code).map(|&i| &self.categories[i])
    }

    /// 解析类别，未知代码返回灰色占位
    pub fn resolve(&self, code: char) -> Category {
        self.get(code)
            .cloned()
            .unwrap_or_else(|| Category::fallback(code))
    }

    pub fn bg_color(&self, code: char) -> &str {
        self.get(code)
            .map(Category::bg_color)
            .unwrap_or(DEFAULT_CATEGORY_BG_COLOR)
    }

    pub fn text_color(&self, code: char) -> &str {
        self.get(code)
            .map(Category::text_color)
            .unwrap_or(DEFAULT_CATEGORY_TEXT_COLOR)
    }

    /// 全部类别（登记顺序）
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::default_categories;
    use crate::repository::RepositoryError;

    struct FixedStore(Vec<Category>);

    impl CategoryStore for FixedStore {
        fn get_all_categories(&self) -> RepositoryResult<Vec<Category>> {
            Ok(self.0.clone())
        }

        fn add_category(&self, _category: &Category) -> RepositoryResult<()> {
            Ok(())
        }
    }

    struct BrokenStore;

    impl CategoryStore for BrokenStore {
        fn get_all_categories(&self) -> RepositoryResult<Vec<Category>> {
            Err(RepositoryError::ValidationError("颜色格式无效".to_string()))
        }

        fn add_category(&self, _category: &Category) -> RepositoryResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_resolve_known_code() {
        let lookup = CategoryLookup::new(default_categories());
        let express = lookup.resolve('S');
        assert_eq!(express.name(), "Express");
        assert_eq!(express.bg_color(), "#4ECDC4");
        assert_eq!(lookup.text_color('M'), "#1B4F72");
    }

    #[test]
    fn test_resolve_unknown_code_is_grey() {
        let lookup = CategoryLookup::new(default_categories());
        let unknown = lookup.resolve('X');
        assert_eq!(unknown.code(), 'X');
        assert_eq!(unknown.bg_color(), "#95A5A6");
        assert_eq!(unknown.text_color(), "#34495E");
        assert!(lookup.get('X').is_none());

        let empty = CategoryLookup::default();
        assert_eq!(empty.bg_color('K'), "#95A5A6");
    }

    #[test]
    fn test_load_from_store() {
        let lookup = CategoryLookup::load(&FixedStore(default_categories())).unwrap();
        assert_eq!(lookup.categories().len(), 3);
        assert_eq!(lookup.bg_color('K'), "#FF6B6B");
    }

    #[test]
    fn test_load_fails_fast() {
        assert!(CategoryLookup::load(&BrokenStore).is_err());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let first = Category::new('K', "First", "#000000", "#FFFFFF").unwrap();
        let second = Category::new('K', "Second", "#111111", "#EEEEEE").unwrap();
        let lookup = CategoryLookup::new(vec![first, second]);
        assert_eq!(lookup.resolve('K').name(), "First");
    }
}
