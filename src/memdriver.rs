use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::io::AsyncRead;

use crate::driver::{Driver, DriverFactory, FileEntry, FileStream};

pub const FILE_ONE: &str = "This is the first file available for download.\n\nBy James";
pub const FILE_TWO: &str = "This is file number two.\n\n2012-12-04";

/// A minimal driver that stores everything in memory. The credentials are
/// fixed and the client cannot upload, delete or rename anything.
///
/// This exists as a demonstration of the interface drivers are required to
/// implement; a custom driver is reasonably started by copying this file and
/// changing the method bodies.
pub struct MemDriver;

#[async_trait]
impl Driver for MemDriver {
    async fn authenticate(&mut self, user: &str, pass: &str, _remote_ip: &str) -> Result<bool> {
        Ok(user == "test" && pass == "1234")
    }

    async fn bytes(&mut self, path: &str) -> Result<i64> {
        Ok(match path {
            "/one.txt" => FILE_ONE.len() as i64,
            "/files/two.txt" => FILE_TWO.len() as i64,
            _ => -1,
        })
    }

    async fn modified_time(&mut self, _path: &str) -> Result<DateTime<Utc>> {
        Ok(Utc::now())
    }

    async fn change_dir(&mut self, path: &str) -> Result<bool> {
        Ok(path == "/" || path == "/files")
    }

    async fn dir_contents(&mut self, path: &str) -> Result<Vec<FileEntry>> {
        Ok(match path {
            "/" => vec![
                FileEntry::dir("files", Utc::now()),
                FileEntry::file("one.txt", FILE_ONE.len() as i64, Utc::now()),
            ],
            "/files" => vec![FileEntry::file(
                "two.txt",
                FILE_TWO.len() as i64,
                Utc::now(),
            )],
            _ => Vec::new(),
        })
    }

    async fn delete_dir(&mut self, _path: &str) -> Result<bool> {
        Ok(false)
    }

    async fn delete_file(&mut self, _path: &str) -> Result<bool> {
        Ok(false)
    }

    async fn rename(&mut self, _from: &str, _to: &str) -> Result<bool> {
        Ok(false)
    }

    async fn make_dir(&mut self, _path: &str) -> Result<bool> {
        Ok(false)
    }

    async fn get_file(&mut self, path: &str) -> Result<FileStream> {
        match path {
            "/one.txt" => Ok(Box::new(FILE_ONE.as_bytes()) as FileStream),
            "/files/two.txt" => Ok(Box::new(FILE_TWO.as_bytes()) as FileStream),
            _ => anyhow::bail!("no such file: {}", path),
        }
    }

    async fn put_file(
        &mut self,
        _path: &str,
        _data: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<bool> {
        Ok(false)
    }
}

pub struct MemDriverFactory;

impl DriverFactory for MemDriverFactory {
    fn new_driver(&self) -> Result<Box<dyn Driver>> {
        Ok(Box::new(MemDriver))
    }
}
