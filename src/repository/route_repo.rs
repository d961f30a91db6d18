// ==========================================
// 公交线路目录 - 线路仓储
// ==========================================
// 职责: 管理 routes + route_categories 表
// 约束: 线路号唯一、1-999 由表约束保证；线路与类别在同一事务写入
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::{Route, RoutePoint};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::traits::RouteStore;
use rusqlite::{params, Connection, Result as SqliteResult, Transaction};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub struct RouteRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RouteRepository {
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

    /// 读取全部线路的类别代码（按 position 排序）
    fn load_category_map(conn: &Connection) -> RepositoryResult<HashMap<i64, Vec<char>>> {
        let mut stmt = conn.prepare(
            "SELECT route_id, category_code FROM route_categories ORDER BY route_id, position",
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<SqliteResult<Vec<_>>>()?;

        let mut map: HashMap<i64, Vec<char>> = HashMap::new();
        for (route_id, code) in rows {
            if let Some(c) = code.chars().next() {
                map.entry(route_id).or_default().push(c);
            }
        }
        Ok(map)
    }

    /// 写入线路类别（重复代码只保留第一次出现）
    fn insert_categories(tx: &Transaction<'_>, route_id: i64, codes: &[char]) -> RepositoryResult<()> {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO route_categories (route_id, category_code, position) VALUES (?1, ?2, ?3)",
        )?;
        for (position, code) in codes.iter().enumerate() {
            stmt.execute(params![route_id, code.to_string(), position as i64])?;
        }
        Ok(())
    }
}

impl RouteStore for RouteRepository {
    fn get_all_routes(&self) -> RepositoryResult<Vec<Route>> {
        let conn = self.get_conn()?;
        let mut categories = Self::load_category_map(&conn)?;

        let mut stmt = conn.prepare(
            r#"
            SELECT
                r.id,
                r.route_number,
                sp.id, sp.locality, sp.district, sp.description,
                ep.id, ep.locality, ep.district, ep.description
            FROM routes r
            JOIN route_points sp ON r.start_point_id = sp.id
            JOIN route_points ep ON r.end_point_id = ep.id
            ORDER BY r.id
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                let start = RoutePoint::from_nullable(row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?);
                let end = RoutePoint::from_nullable(row.get(6)?, row.get(7)?, row.get(8)?, row.get(9)?);
                Ok((row.get::<_, i64>(0)?, row.get::<_, i32>(1)?, start, end))
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        let routes = rows
            .into_iter()
            .map(|(id, number, start, end)| {
                let codes = categories.remove(&id).unwrap_or_default();
                Route::new(id, number, start, end, codes)
            })
            .collect();

        Ok(routes)
    }

    fn add_route(&self, route: &Route) -> RepositoryResult<i64> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO routes (route_number, start_point_id, end_point_id) VALUES (?1, ?2, ?3)",
            params![
                route.route_number(),
                route.start_point().id(),
                route.end_point().id()
            ],
        )?;
        let route_id = tx.last_insert_rowid();
        Self::insert_categories(&tx, route_id, route.special_categories())?;
        tx.commit()?;

        tracing::debug!("新增线路: id={}, number={}", route_id, route.route_number());
        Ok(route_id)
    }

    fn update_route(&self, route: &Route) -> RepositoryResult<bool> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let affected = tx.execute(
            "UPDATE routes SET route_number = ?1, start_point_id = ?2, end_point_id = ?3 WHERE id = ?4",
            params![
                route.route_number(),
                route.start_point().id(),
                route.end_point().id(),
                route.id()
            ],
        )?;
        if affected == 0 {
            return Ok(false);
        }

        tx.execute(
            "DELETE FROM route_categories WHERE route_id = ?1",
            params![route.id()],
        )?;
        Self::insert_categories(&tx, route.id(), route.special_categories())?;
        tx.commit()?;
        Ok(true)
    }

    fn delete_route(&self, id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        // route_categories 通过 ON DELETE CASCADE 清理
        let affected = conn.execute("DELETE FROM routes WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    fn is_route_number_exists(&self, route_number: i32) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row(
            "SELECT COUNT(*) FROM routes WHERE route_number = ?1",
            params![route_number],
            |row| row.get(0),
        )?;
        Ok(n > 0)
    }
}
