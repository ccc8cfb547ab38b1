//! 測試用的腳本化連線
//!
//! 記錄送出的每一條命令，並依序回傳預先排好的回覆，
//! 讓命令封裝可以在沒有真實伺服器的情況下驗證。

use redis::{ConnectionLike, RedisError, RedisResult, Value};
use std::collections::VecDeque;

#[derive(Default)]
pub struct ScriptedConnection {
    replies: VecDeque<RedisResult<Value>>,
    /// 已送出的命令，每條命令拆成字串參數
    pub sent: Vec<Vec<String>>,
}

impl ScriptedConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, value: Value) -> Self {
        self.replies.push_back(Ok(value));
        self
    }

    pub fn fail(mut self, err: RedisError) -> Self {
        self.replies.push_back(Err(err));
        self
    }

    fn next_reply(&mut self) -> RedisResult<Value> {
        self.replies.pop_front().unwrap_or(Ok(Value::Okay))
    }
}

impl ConnectionLike for ScriptedConnection {
    fn req_packed_command(&mut self, cmd: &[u8]) -> RedisResult<Value> {
        self.sent.extend(decode_commands(cmd));
        self.next_reply()
    }

    fn req_packed_commands(
        &mut self,
        cmd: &[u8],
        offset: usize,
        count: usize,
    ) -> RedisResult<Vec<Value>> {
        let commands = decode_commands(cmd);
        let total = commands.len();
        self.sent.extend(commands);

        let replies = (0..total)
            .map(|_| self.next_reply())
            .collect::<RedisResult<Vec<_>>>()?;
        Ok(replies.into_iter().skip(offset).take(count).collect())
    }

    fn get_db(&self) -> i64 {
        0
    }

    fn check_connection(&mut self) -> bool {
        true
    }

    fn is_open(&self) -> bool {
        true
    }
}

pub fn bulk(value: &str) -> Value {
    Value::BulkString(value.as_bytes().to_vec())
}

/// 解析 RESP 陣列格式的已編碼命令
fn decode_commands(mut bytes: &[u8]) -> Vec<Vec<String>> {
    let mut commands = Vec::new();
    while !bytes.is_empty() {
        let (count, rest) = read_header(bytes, b'*');
        bytes = rest;

        let mut args = Vec::with_capacity(count);
        for _ in 0..count {
            let (len, rest) = read_header(bytes, b'$');
            args.push(String::from_utf8_lossy(&rest[..len]).into_owned());
            bytes = &rest[len + 2..];
        }
        commands.push(args);
    }
    commands
}

fn read_header(bytes: &[u8], marker: u8) -> (usize, &[u8]) {
    assert_eq!(bytes[0], marker, "非預期的 RESP 標記");
    let end = bytes
        .windows(2)
        .position(|w| w == b"\r\n")
        .expect("缺少 CRLF");
    let n = std::str::from_utf8(&bytes[1..end])
        .expect("長度不是 UTF-8")
        .parse()
        .expect("長度不是數字");
    (n, &bytes[end + 2..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_packed_command() {
        let mut conn = ScriptedConnection::new().reply(bulk("v"));
        let value: Option<String> = redis::cmd("GET").arg("k").query(&mut conn).unwrap();

        assert_eq!(value.as_deref(), Some("v"));
        assert_eq!(conn.sent, vec![vec!["GET".to_string(), "k".to_string()]]);
    }
}
