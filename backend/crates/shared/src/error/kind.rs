//! Error Kind
//!
//! [`ErrorKind`] は HTTP ステータスと `error` フィールドの文言を決める。

use std::fmt;

/// 応答ステータスに対応するエラー分類
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Forbidden.status_code(), 403);
/// assert_eq!(ErrorKind::NotFound.to_string(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 入力検証エラー・不正な JSON / パス / クエリ
    BadRequest,
    /// トークンなし・無効・期限切れ、またはログイン失敗
    Unauthorized,
    /// 認証済みだがロール不足
    Forbidden,
    NotFound,
    /// 一意制約違反
    Conflict,
    InternalServerError,
    /// DB 接続不可・リソース枯渇
    ServiceUnavailable,
}

impl ErrorKind {
    pub const fn status_code(&self) -> u16 {
        self.parts().0
    }

    /// `ErrorBody.error` に入る理由句
    pub const fn as_str(&self) -> &'static str {
        self.parts().1
    }

    /// 5xx かどうか。5xx のメッセージは応答に含めずログにだけ出す。
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    const fn parts(&self) -> (u16, &'static str) {
        match self {
            ErrorKind::BadRequest => (400, "Bad Request"),
            ErrorKind::Unauthorized => (401, "Unauthorized"),
            ErrorKind::Forbidden => (403, "Forbidden"),
            ErrorKind::NotFound => (404, "Not Found"),
            ErrorKind::Conflict => (409, "Conflict"),
            ErrorKind::InternalServerError => (500, "Internal Server Error"),
            ErrorKind::ServiceUnavailable => (503, "Service Unavailable"),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
