// ==========================================
// 公交线路目录 - 场站仓储
// ==========================================
// 职责: 管理 route_points 表
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::RoutePoint;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::traits::RoutePointStore;
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

/// 默认场站（库为空时按配置写入）
const DEFAULT_DEPOTS: &[(&str, &str, &str)] = &[
    ("Saint Petersburg", "Frunzensky", "Bus depot No. 1"),
    ("Saint Petersburg", "Primorsky", "Bus depot No. 2"),
    ("Saint Petersburg", "Nevsky", "Bus depot No. 3"),
    ("Saint Petersburg", "Kirovsky", "Bus depot No. 5"),
    ("Saint Petersburg", "Krasnogvardeysky", "Bus depot No. 6"),
    ("Saint Petersburg", "Moskovsky", "Bus depot No. 7"),
    ("Kolpino", "Kolpinsky", "Kolpino bus depot"),
];

pub struct RoutePointRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RoutePointRepository {
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

    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM route_points", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// 库为空时写入默认场站
    ///
    /// # 返回
    /// 写入的条数（非空库返回 0）
    pub fn seed_defaults_if_empty(&self) -> RepositoryResult<usize> {
        if self.count()? > 0 {
            return Ok(0);
        }

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO route_points (locality, district, description) VALUES (?1, ?2, ?3)",
            )?;
            for (locality, district, description) in DEFAULT_DEPOTS {
                stmt.execute(params![locality, district, description])?;
            }
        }
        tx.commit()?;

        tracing::info!("已写入默认场站: {} 条", DEFAULT_DEPOTS.len());
        Ok(DEFAULT_DEPOTS.len())
    }
}

impl RoutePointStore for RoutePointRepository {
    fn get_all_route_points(&self) -> RepositoryResult<Vec<RoutePoint>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT id, locality, district, description FROM route_points ORDER BY id")?;

        let rows = stmt
            .query_map([], |row| {
                Ok(RoutePoint::from_nullable(
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                ))
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(rows)
    }

    fn add_route_point(&self, point: &RoutePoint) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO route_points (locality, district, description) VALUES (?1, ?2, ?3)",
            params![point.locality(), point.district(), point.description()],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!("新增场站: id={}, {}", id, point);
        Ok(id)
    }

    fn delete_route_point(&self, id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM route_points WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_repo() -> RoutePointRepository {
        RoutePointRepository::new(":memory:").expect("Failed to create test repository")
    }

    #[test]
    fn test_add_and_list() {
        let repo = setup_test_repo();

        let id1 = repo
            .add_route_point(&RoutePoint::new(0, "L1", "D1", "A"))
            .expect("Failed to add");
        let id2 = repo
            .add_route_point(&RoutePoint::new(0, "L2", "D2", "B"))
            .expect("Failed to add");
        assert!(id1 > 0);
        assert!(id2 > id1);

        let points = repo.get_all_route_points().expect("Failed to list");
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], RoutePoint::new(id1, "L1", "D1", "A"));
        assert_eq!(points[1].description(), "B");
    }

    #[test]
    fn test_delete() {
        let repo = setup_test_repo();
        let id = repo
            .add_route_point(&RoutePoint::new(0, "L", "D", "A"))
            .expect("Failed to add");

        assert!(repo.delete_route_point(id).expect("Failed to delete"));
        assert!(!repo.delete_route_point(id).expect("Failed to delete"));
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_seed_defaults_only_once() {
        let repo = setup_test_repo();
        assert_eq!(repo.seed_defaults_if_empty().unwrap(), DEFAULT_DEPOTS.len());
        assert_eq!(repo.seed_defaults_if_empty().unwrap(), 0);
        assert_eq!(repo.count().unwrap(), DEFAULT_DEPOTS.len());
    }
}
