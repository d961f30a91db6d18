// ==========================================
// 公交线路目录 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为（外键/busy_timeout）
// - 统一建表（各仓储共享同一套 schema，表间有外键依赖）
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 建表（幂等）
///
/// 表:
/// - route_points: 场站
/// - categories: 专线类别（颜色 CHECK 仅为粗校验，精确校验在 Category::new）
/// - routes: 线路（线路号 1-999 且唯一）
/// - route_categories: 线路-类别关联，position 保存类别顺序
/// - config_kv: 键值配置
/// - schema_version
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS route_points (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            locality TEXT NOT NULL,
            district TEXT NOT NULL,
            description TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS categories (
            code TEXT PRIMARY KEY CHECK(LENGTH(code) = 1),
            name TEXT NOT NULL,
            bg_color TEXT NOT NULL CHECK(LENGTH(bg_color) = 7 AND bg_color LIKE '#%'),
            text_color TEXT NOT NULL CHECK(LENGTH(text_color) = 7 AND text_color LIKE '#%')
        );

        CREATE TABLE IF NOT EXISTS routes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            route_number INTEGER NOT NULL CHECK(route_number >= 1 AND route_number <= 999),
            start_point_id INTEGER NOT NULL,
            end_point_id INTEGER NOT NULL,
            FOREIGN KEY(start_point_id) REFERENCES route_points(id),
            FOREIGN KEY(end_point_id) REFERENCES route_points(id),
            UNIQUE(route_number)
        );

        CREATE TABLE IF NOT EXISTS route_categories (
            route_id INTEGER NOT NULL,
            category_code TEXT NOT NULL,
            position INTEGER NOT NULL,
            PRIMARY KEY(route_id, category_code),
            FOREIGN KEY(route_id) REFERENCES routes(id) ON DELETE CASCADE,
            FOREIGN KEY(category_code) REFERENCES categories(code)
        );

        CREATE INDEX IF NOT EXISTS idx_route_categories_route
          ON route_categories(route_id, position);

        CREATE TABLE IF NOT EXISTS config_kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_version_absent_then_present() {
        let conn = open_sqlite_connection(":memory:").unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), None);

        ensure_schema(&conn).unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), Some(CURRENT_SCHEMA_VERSION));

        // 幂等
        ensure_schema(&conn).unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), Some(CURRENT_SCHEMA_VERSION));
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = open_sqlite_connection(":memory:").unwrap();
        let fk: i64 = conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0)).unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_route_number_check_constraint() {
        let conn = open_sqlite_connection(":memory:").unwrap();
        ensure_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO route_points (locality, district, description) VALUES ('L', 'D', 'A')",
            [],
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO routes (route_number, start_point_id, end_point_id) VALUES (1000, 1, 1)",
            [],
        );
        assert!(result.is_err());
    }
}
