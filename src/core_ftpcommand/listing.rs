use chrono::{DateTime, Datelike, Utc};

use crate::constants::{LIST_TIME_OLD, LIST_TIME_RECENT};
use crate::driver::FileEntry;

/// Renders driver directory entries into the two listing shapes the protocol
/// requires: the `ls -l` style detailed form for LIST and the bare-names form
/// for NLST.
pub struct ListingFormatter<'a> {
    files: &'a [FileEntry],
}

impl<'a> ListingFormatter<'a> {
    pub fn new(files: &'a [FileEntry]) -> Self {
        ListingFormatter { files }
    }

    /// Names only, one per line.
    pub fn short(&self) -> String {
        let mut out = String::new();
        for file in self.files {
            out.push_str(&file.name);
            out.push_str("\r\n");
        }
        out
    }

    /// One `ls -l` style line per entry: type/permission prefix, size padded
    /// to 12 columns, modification time, name.
    pub fn detailed(&self) -> String {
        let mut out = String::new();
        for file in self.files {
            out.push_str(&format!(
                "{} {:<12} {} {}\r\n",
                format_mode(file),
                file.size,
                format_mtime(&file.modified),
                file.name
            ));
        }
        out
    }
}

fn format_mode(entry: &FileEntry) -> String {
    let mut mode = String::with_capacity(10);
    mode.push(if entry.is_dir { 'd' } else { '-' });
    for shift in [6u32, 3, 0] {
        let bits = (entry.mode >> shift) & 0o7;
        mode.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        mode.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        mode.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    mode
}

/// Entries from the current year show a time, older ones show the year.
fn format_mtime(modified: &DateTime<Utc>) -> String {
    if modified.year() == Utc::now().year() {
        modified.format(LIST_TIME_RECENT).to_string()
    } else {
        modified.format(LIST_TIME_OLD).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn short_joins_names_with_crlf() {
        let files = vec![
            FileEntry::dir("files", Utc::now()),
            FileEntry::file("one.txt", 57, Utc::now()),
        ];
        assert_eq!(ListingFormatter::new(&files).short(), "files\r\none.txt\r\n");
    }

    #[test]
    fn short_of_nothing_is_empty() {
        assert_eq!(ListingFormatter::new(&[]).short(), "");
    }

    #[test]
    fn detailed_renders_mode_size_time_and_name() {
        let modified = Utc.with_ymd_and_hms(2012, 12, 4, 9, 30, 0).unwrap();
        let files = vec![FileEntry::file("two.txt", 38, modified)];
        assert_eq!(
            ListingFormatter::new(&files).detailed(),
            "-rw-r--r-- 38           Dec  4  2012 two.txt\r\n"
        );
    }

    #[test]
    fn directories_get_the_d_prefix_and_exec_bits() {
        let modified = Utc.with_ymd_and_hms(2012, 12, 4, 9, 30, 0).unwrap();
        let files = vec![FileEntry::dir("files", modified)];
        let listing = ListingFormatter::new(&files).detailed();
        assert!(listing.starts_with("drwxr-xr-x 0            "));
        assert!(listing.ends_with(" files\r\n"));
    }

    #[test]
    fn current_year_entries_show_a_clock_time() {
        let now = Utc::now();
        let files = vec![FileEntry::file("fresh.txt", 1, now)];
        let listing = ListingFormatter::new(&files).detailed();
        assert!(listing.contains(&now.format("%H:%M").to_string()));
        assert!(!listing.contains(&format!("  {}", now.year())));
    }
}
