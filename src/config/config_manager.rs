// ==========================================
// 公交线路目录 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value)
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 配置键
pub mod config_keys {
    /// 启动时若类别表为空则写入 K/S/M（默认 true）
    pub const SEED_DEFAULT_CATEGORIES: &str = "seed_default_categories";
    /// 启动时若场站表为空则写入默认场站（默认 false）
    pub const SEED_DEFAULT_DEPOTS: &str = "seed_default_depots";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            ensure_schema(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入配置值（存在则覆盖）
    pub fn set_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            r#"
            INSERT INTO config_kv (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        tracing::debug!("配置已更新: {}={}", key, value);
        Ok(())
    }

    /// 读取布尔配置，缺失时返回默认值
    ///
    /// 接受 true/false/1/0/yes/no（不区分大小写）
    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool, Box<dyn Error>> {
        let raw = match self.get_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };

        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(format!("配置值格式错误 (key: {}): {}", key, other).into()),
        }
    }

    pub fn seed_default_categories(&self) -> Result<bool, Box<dyn Error>> {
        self.get_bool_or(config_keys::SEED_DEFAULT_CATEGORIES, true)
    }

    pub fn seed_default_depots(&self) -> Result<bool, Box<dyn Error>> {
        self.get_bool_or(config_keys::SEED_DEFAULT_DEPOTS, false)
    }

    /// 获取所有配置的快照（JSON格式，按键排序）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare("SELECT key, value FROM config_kv ORDER BY key")?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> ConfigManager {
        ConfigManager::new(":memory:").expect("Failed to create ConfigManager")
    }

    #[test]
    fn test_defaults_when_missing() {
        let config = setup();
        assert!(config.seed_default_categories().unwrap());
        assert!(!config.seed_default_depots().unwrap());
        assert_eq!(config.get_value("missing").unwrap(), None);
    }

    #[test]
    fn test_set_and_override() {
        let config = setup();
        config.set_value(config_keys::SEED_DEFAULT_DEPOTS, "yes").unwrap();
        assert!(config.seed_default_depots().unwrap());

        config.set_value(config_keys::SEED_DEFAULT_DEPOTS, "0").unwrap();
        assert!(!config.seed_default_depots().unwrap());
    }

    #[test]
    fn test_invalid_bool_is_error() {
        let config = setup();
        config.set_value(config_keys::SEED_DEFAULT_CATEGORIES, "maybe").unwrap();
        assert!(config.seed_default_categories().is_err());
    }

    #[test]
    fn test_snapshot_is_sorted_json() {
        let config = setup();
        config.set_value("b", "2").unwrap();
        config.set_value("a", "1").unwrap();
        assert_eq!(config.get_config_snapshot().unwrap(), r#"{"a":"1","b":"2"}"#);
    }
}
