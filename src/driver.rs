use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::io::AsyncRead;

/// A single entry in a directory listing, as reported by a driver.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub size: i64,
    /// Unix permission bits, rendered as the rwx triplets in detailed listings.
    pub mode: u32,
    pub is_dir: bool,
    pub modified: DateTime<Utc>,
}

impl FileEntry {
    pub fn file(name: impl Into<String>, size: i64, modified: DateTime<Utc>) -> Self {
        FileEntry {
            name: name.into(),
            size,
            mode: 0o644,
            is_dir: false,
            modified,
        }
    }

    pub fn dir(name: impl Into<String>, modified: DateTime<Utc>) -> Self {
        FileEntry {
            name: name.into(),
            size: 0,
            mode: 0o755,
            is_dir: true,
            modified,
        }
    }
}

/// Byte stream handed back by [`Driver::get_file`]; dropped by the core once
/// the transfer finishes.
pub type FileStream = Box<dyn AsyncRead + Send + Unpin>;

/// The backend contract. The server core owns everything on the wire and
/// nothing of the backing store: authentication and all filesystem semantics
/// are delegated here. Paths are virtual absolute paths (`/files/two.txt`);
/// the driver decides how they map onto real storage.
///
/// Each connection gets its own driver instance and runs commands strictly
/// serially, so methods take `&mut self` and need no internal locking.
///
/// Boolean results mean "action taken"; an `Err` is treated as a failure and
/// surfaced to the client with a transient or permanent negative reply.
#[async_trait]
pub trait Driver: Send {
    async fn authenticate(&mut self, user: &str, pass: &str, remote_ip: &str) -> Result<bool>;

    /// Size of the file in bytes, or a negative value when unavailable.
    async fn bytes(&mut self, path: &str) -> Result<i64>;

    async fn modified_time(&mut self, path: &str) -> Result<DateTime<Utc>>;

    async fn change_dir(&mut self, path: &str) -> Result<bool>;

    async fn dir_contents(&mut self, path: &str) -> Result<Vec<FileEntry>>;

    async fn delete_dir(&mut self, path: &str) -> Result<bool>;

    async fn delete_file(&mut self, path: &str) -> Result<bool>;

    async fn rename(&mut self, from: &str, to: &str) -> Result<bool>;

    async fn make_dir(&mut self, path: &str) -> Result<bool>;

    async fn get_file(&mut self, path: &str) -> Result<FileStream>;

    /// Consumes `data` (the client side of the data channel) and stores it at
    /// `path`. Returns false to refuse the upload.
    async fn put_file(
        &mut self,
        path: &str,
        data: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<bool>;
}

/// Produces one fresh [`Driver`] per accepted connection.
pub trait DriverFactory: Send + Sync {
    fn new_driver(&self) -> Result<Box<dyn Driver>>;
}
