use std::fmt;

use redis::{
    Client as RedisClient, Cmd, Connection, ConnectionLike, FromRedisValue, RedisError,
    ToRedisArgs,
};
use tracing::{debug, error, info, warn};

use crate::config::{StoreConfig, Validator};
use crate::store::error::{StoreError, StoreResult};
use crate::store::key_type::KeyType;

/// `set` 未指定時常用的過期秒數
pub const DEFAULT_TTL_SECS: u64 = 600;

/// 單一連線的儲存客戶端
///
/// 每個命令都會阻塞到伺服器回覆為止，不重試、不逾時（逾時只能在連線層設定）。
/// 客戶端獨佔底層連線，無法複製，共享時請傳遞引用或使用
/// [`SharedHandle`](crate::store::SharedHandle)：
///
/// ```compile_fail
/// fn duplicate(client: &store_client::StoreClient) -> store_client::StoreClient {
///     client.clone()
/// }
/// ```
pub struct StoreClient<C = Connection> {
    conn: C,
}

impl<C> fmt::Debug for StoreClient<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreClient").finish_non_exhaustive()
    }
}

impl StoreClient<Connection> {
    /// 依配置建立連線並完成認證
    ///
    /// 空密碼不會送出 AUTH。連線或認證失敗回傳 [`StoreError::Connection`]，
    /// 缺少客戶端能力（例如未啟用 TLS）回傳 [`StoreError::Environment`]。
    pub fn connect(config: &StoreConfig) -> StoreResult<Self> {
        config.validate()?;

        let info = config.connection_info().map_err(StoreError::from_connect)?;
        let client = RedisClient::open(info).map_err(StoreError::from_connect)?;

        let connection = match config.connection_timeout() {
            Some(timeout) => client.get_connection_with_timeout(timeout),
            None => client.get_connection(),
        };
        let conn = connection.map_err(|err| {
            error!("無法建立儲存連線 {}: {}", config.endpoint(), err);
            StoreError::from_connect(err)
        })?;

        conn.set_read_timeout(config.read_timeout())
            .map_err(StoreError::Connection)?;
        conn.set_write_timeout(config.write_timeout())
            .map_err(StoreError::Connection)?;

        info!("成功建立儲存連線: {}", config.endpoint());
        Ok(Self::from_connection(conn))
    }
}

impl<C: ConnectionLike> StoreClient<C> {
    /// 包裝一條已建立的連線
    pub fn from_connection(conn: C) -> Self {
        Self { conn }
    }

    /// 取得底層連線，用於本客戶端未封裝的命令
    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    /// 放棄封裝，取回底層連線
    pub fn into_inner(self) -> C {
        self.conn
    }

    fn query<T: FromRedisValue>(&mut self, name: &'static str, cmd: &Cmd) -> StoreResult<T> {
        cmd.query(&mut self.conn)
            .map_err(|err| Self::command_failed(name, err))
    }

    /// 分類命令錯誤並記錄：連線錯誤用 error，伺服器回報的錯誤用 warn
    fn command_failed(name: &'static str, err: RedisError) -> StoreError {
        let err = StoreError::from(err);
        if err.is_connection_error() {
            error!("儲存命令 {} 連線失敗: {}", name, err);
        } else {
            warn!("儲存命令 {} 失敗: {}", name, err);
        }
        err
    }

    fn require_non_empty<T>(operation: &'static str, items: &[T], what: &str) -> StoreResult<()> {
        if items.is_empty() {
            return Err(StoreError::invalid_argument(
                operation,
                format!("at least one {} is required", what),
            ));
        }
        Ok(())
    }

    /// 設定字串值，`ttl_secs` 為 0 時不設過期時間
    pub fn set<V: ToRedisArgs>(&mut self, key: &str, value: V, ttl_secs: u64) -> StoreResult<()> {
        debug!("Setting key: {}, ttl: {}s", key, ttl_secs);

        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if ttl_secs > 0 {
            cmd.arg("EX").arg(ttl_secs);
        }
        self.query("SET", &cmd)
    }

    /// 加入無序集合，回傳新增成員數
    pub fn sadd<V: ToRedisArgs>(&mut self, key: &str, members: &[V]) -> StoreResult<usize> {
        Self::require_non_empty("sadd", members, "member")?;
        debug!("Adding {} member(s) to set: {}", members.len(), key);

        let mut cmd = redis::cmd("SADD");
        cmd.arg(key);
        for member in members {
            cmd.arg(member);
        }
        self.query("SADD", &cmd)
    }

    /// 加入有序集合，`members` 為 (score, member) 配對，回傳新增成員數
    pub fn zadd<V: ToRedisArgs>(&mut self, key: &str, members: &[(f64, V)]) -> StoreResult<usize> {
        Self::require_non_empty("zadd", members, "score/member pair")?;
        debug!("Adding {} member(s) to sorted set: {}", members.len(), key);

        let mut cmd = redis::cmd("ZADD");
        cmd.arg(key);
        for (score, member) in members {
            cmd.arg(*score).arg(member);
        }
        self.query("ZADD", &cmd)
    }

    pub fn smembers(&mut self, key: &str) -> StoreResult<Vec<String>> {
        debug!("Reading set members: {}", key);
        self.query("SMEMBERS", redis::cmd("SMEMBERS").arg(key))
    }

    /// 從列表頭部推入（類似堆疊），回傳列表長度
    pub fn lpush<V: ToRedisArgs>(&mut self, key: &str, value: V) -> StoreResult<usize> {
        debug!("Pushing to list head: {}", key);
        self.query("LPUSH", redis::cmd("LPUSH").arg(key).arg(value))
    }

    /// 從列表尾部推入（類似佇列），回傳列表長度
    pub fn rpush<V: ToRedisArgs>(&mut self, key: &str, value: V) -> StoreResult<usize> {
        debug!("Pushing to list tail: {}", key);
        self.query("RPUSH", redis::cmd("RPUSH").arg(key).arg(value))
    }

    /// 取列表區間，索引可為負數（-1 表示最後一個元素）
    pub fn lrange(&mut self, key: &str, start: isize, stop: isize) -> StoreResult<Vec<String>> {
        debug!("Reading list range: {} [{}, {}]", key, start, stop);
        self.query("LRANGE", redis::cmd("LRANGE").arg(key).arg(start).arg(stop))
    }

    /// 設定雜湊欄位，欄位為新建立時回傳 true
    pub fn hset<V: ToRedisArgs>(&mut self, key: &str, field: &str, value: V) -> StoreResult<bool> {
        debug!("Setting hash field: {}.{}", key, field);
        self.query("HSET", redis::cmd("HSET").arg(key).arg(field).arg(value))
    }

    pub fn hget(&mut self, key: &str, field: &str) -> StoreResult<Option<String>> {
        debug!("Getting hash field: {}.{}", key, field);
        self.query("HGET", redis::cmd("HGET").arg(key).arg(field))
    }

    /// 一次設定多個鍵，`ttl_secs` 大於 0 時每個鍵都套用相同的過期時間
    ///
    /// MSET 與後續 EXPIRE 在同一個 pipeline 中送出，但不是交易。
    pub fn set_many<K, V>(&mut self, pairs: &[(K, V)], ttl_secs: u64) -> StoreResult<()>
    where
        K: AsRef<str>,
        V: ToRedisArgs,
    {
        Self::require_non_empty("set_many", pairs, "key/value pair")?;
        debug!("Setting {} key(s), ttl: {}s", pairs.len(), ttl_secs);

        let mut pipe = redis::pipe();
        pipe.cmd("MSET");
        for (key, value) in pairs {
            pipe.arg(key.as_ref()).arg(value);
        }
        pipe.ignore();

        if ttl_secs > 0 {
            for (key, _) in pairs {
                pipe.cmd("EXPIRE").arg(key.as_ref()).arg(ttl_secs).ignore();
            }
        }

        pipe.query::<()>(&mut self.conn)
            .map_err(|err| Self::command_failed("MSET", err))
    }

    pub fn get(&mut self, key: &str) -> StoreResult<Option<String>> {
        debug!("Getting key: {}", key);
        self.query("GET", redis::cmd("GET").arg(key))
    }

    /// 一次讀取多個鍵，結果順序與 `keys` 相同，缺少的鍵為 `None`
    pub fn get_many<K: AsRef<str>>(&mut self, keys: &[K]) -> StoreResult<Vec<Option<String>>> {
        Self::require_non_empty("get_many", keys, "key")?;
        debug!("Getting {} key(s)", keys.len());

        let mut cmd = redis::cmd("MGET");
        for key in keys {
            cmd.arg(key.as_ref());
        }
        self.query("MGET", &cmd)
    }

    /// 列出所有鍵名（KEYS *），大型資料庫上會阻塞伺服器
    pub fn keys_all(&mut self) -> StoreResult<Vec<String>> {
        debug!("Listing all keys");
        self.query("KEYS", redis::cmd("KEYS").arg("*"))
    }

    pub fn delete(&mut self, key: &str) -> StoreResult<bool> {
        debug!("Deleting key: {}", key);
        self.query("DEL", redis::cmd("DEL").arg(key))
    }

    /// 刪除多個鍵，回傳實際刪除的數量
    pub fn delete_many<K: AsRef<str>>(&mut self, keys: &[K]) -> StoreResult<usize> {
        Self::require_non_empty("delete_many", keys, "key")?;
        debug!("Deleting {} key(s)", keys.len());

        let mut cmd = redis::cmd("DEL");
        for key in keys {
            cmd.arg(key.as_ref());
        }
        self.query("DEL", &cmd)
    }

    pub fn increment(&mut self, key: &str) -> StoreResult<i64> {
        debug!("Incrementing key: {}", key);
        self.query("INCR", redis::cmd("INCR").arg(key))
    }

    pub fn decrement(&mut self, key: &str) -> StoreResult<i64> {
        debug!("Decrementing key: {}", key);
        self.query("DECR", redis::cmd("DECR").arg(key))
    }

    pub fn exists(&mut self, key: &str) -> StoreResult<bool> {
        debug!("Checking if key exists: {}", key);
        self.query("EXISTS", redis::cmd("EXISTS").arg(key))
    }

    /// 設定鍵的過期時間，鍵不存在時回傳 false
    pub fn expire(&mut self, key: &str, seconds: u64) -> StoreResult<bool> {
        debug!("Setting expiry for key: {}, seconds: {}", key, seconds);
        self.query("EXPIRE", redis::cmd("EXPIRE").arg(key).arg(seconds))
    }

    /// 僅在 `new_key` 不存在時改名 (RENAMENX)
    ///
    /// `new_key` 已存在時回傳 false；`key` 不存在時伺服器回報錯誤。
    pub fn rename_if_absent(&mut self, key: &str, new_key: &str) -> StoreResult<bool> {
        debug!("Renaming key {} -> {} if absent", key, new_key);
        self.query("RENAMENX", redis::cmd("RENAMENX").arg(key).arg(new_key))
    }

    pub fn key_type(&mut self, key: &str) -> StoreResult<KeyType> {
        debug!("Reading type of key: {}", key);
        let reply: String = self.query("TYPE", redis::cmd("TYPE").arg(key))?;
        Ok(reply.parse().unwrap_or_else(|never| match never {}))
    }

    /// 清空所有資料庫
    pub fn flush_all(&mut self) -> StoreResult<()> {
        warn!("Flushing all keys from the store");
        self.query("FLUSHALL", &redis::cmd("FLUSHALL"))
    }

    pub fn ping(&mut self) -> StoreResult<String> {
        debug!("Pinging store server");
        self.query("PING", &redis::cmd("PING"))
    }
}
