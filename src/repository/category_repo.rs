// ==========================================
// 公交线路目录 - 专线类别仓储
// ==========================================
// 职责: 管理 categories 表
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::category::default_categories;
use crate::domain::Category;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::traits::CategoryStore;
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

pub struct CategoryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CategoryRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        ensure_schema(&*repo.get_conn()?)?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 表为空时写入默认类别 (K/S/M)
    pub fn seed_defaults_if_empty(&self) -> RepositoryResult<usize> {
        let count: i64 = {
            let conn = self.get_conn()?;
            conn.query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?
        };
        if count > 0 {
            return Ok(0);
        }

        let defaults = default_categories();
        for category in &defaults {
            self.add_category(category)?;
        }
        tracing::info!("已写入默认专线类别: {} 条", defaults.len());
        Ok(defaults.len())
    }
}

impl CategoryStore for CategoryRepository {
    fn get_all_categories(&self) -> RepositoryResult<Vec<Category>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT code, name, bg_color, text_color FROM categories ORDER BY rowid")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        rows.into_iter()
            .map(|(code, name, bg, text)| -> RepositoryResult<Category> {
                let code = code.chars().next().ok_or_else(|| {
                    RepositoryError::ValidationError("类别代码为空".to_string())
                })?;
                Ok(Category::new(code, name, bg, text)?)
            })
            .collect()
    }

    fn add_category(&self, category: &Category) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO categories (code, name, bg_color, text_color) VALUES (?1, ?2, ?3, ?4)",
            params![
                category.code().to_string(),
                category.name(),
                category.bg_color(),
                category.text_color(),
            ],
        )?;
        Ok(())
    }
}
