use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortyError {
    InvalidInput(String),
    Conflict(String),
    NotFound(String),
    Io(String),
    SnapshotNotFound(String),
    Serialization(String),
    Persistence(String),
    RandomSource(String),
    Config(String),
}

impl ShortyError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ShortyError::InvalidInput(_) => "E001",
            ShortyError::Conflict(_) => "E002",
            ShortyError::NotFound(_) => "E003",
            ShortyError::Io(_) => "E004",
            ShortyError::SnapshotNotFound(_) => "E005",
            ShortyError::Serialization(_) => "E006",
            ShortyError::Persistence(_) => "E007",
            ShortyError::RandomSource(_) => "E008",
            ShortyError::Config(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ShortyError::InvalidInput(_) => "Invalid Input",
            ShortyError::Conflict(_) => "Conflict",
            ShortyError::NotFound(_) => "Resource Not Found",
            ShortyError::Io(_) => "File Operation Error",
            ShortyError::SnapshotNotFound(_) => "Snapshot Not Found",
            ShortyError::Serialization(_) => "Serialization Error",
            ShortyError::Persistence(_) => "Persistence Error",
            ShortyError::RandomSource(_) => "Random Source Error",
            ShortyError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ShortyError::InvalidInput(msg)
            | ShortyError::Conflict(msg)
            | ShortyError::NotFound(msg)
            | ShortyError::Io(msg)
            | ShortyError::SnapshotNotFound(msg)
            | ShortyError::Serialization(msg)
            | ShortyError::Persistence(msg)
            | ShortyError::RandomSource(msg)
            | ShortyError::Config(msg) => msg,
        }
    }

    /// HTTP status the API answers with for this error
    pub fn http_status(&self) -> StatusCode {
        match self {
            ShortyError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ShortyError::Conflict(_) => StatusCode::CONFLICT,
            ShortyError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Errors raised by the filesystem side of load/save
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            ShortyError::Io(_) | ShortyError::SnapshotNotFound(_) | ShortyError::Serialization(_)
        )
    }

    /// 格式化为彩色输出（用于启动失败时的终端输出）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ShortyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShortyError {}

// 便捷的构造函数
impl ShortyError {
    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        ShortyError::InvalidInput(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        ShortyError::Conflict(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShortyError::NotFound(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        ShortyError::Io(msg.into())
    }

    pub fn snapshot_not_found<T: Into<String>>(msg: T) -> Self {
        ShortyError::SnapshotNotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ShortyError::Serialization(msg.into())
    }

    pub fn persistence<T: Into<String>>(msg: T) -> Self {
        ShortyError::Persistence(msg.into())
    }

    pub fn random_source<T: Into<String>>(msg: T) -> Self {
        ShortyError::RandomSource(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ShortyError::Config(msg.into())
    }
}

impl From<std::io::Error> for ShortyError {
    fn from(err: std::io::Error) -> Self {
        ShortyError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ShortyError {
    fn from(err: serde_json::Error) -> Self {
        ShortyError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortyError>;
