use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::LIST_FLAGS_PATTERN;

lazy_static! {
    static ref LIST_FLAGS: Regex =
        Regex::new(LIST_FLAGS_PATTERN).expect("list flags pattern is valid");
}

/// Some FTP clients send `ls`-style flags to LIST and NLST. Support for them
/// varies between servers and implementing them all is a lot of work with
/// uncertain payoff, so anything matching is dropped.
pub fn strip_list_flags(param: &str) -> &str {
    if LIST_FLAGS.is_match(param) {
        ""
    } else {
        param
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_flag_style_params() {
        assert_eq!(strip_list_flags("-al"), "");
        assert_eq!(strip_list_flags("-t"), "");
        assert_eq!(strip_list_flags("-alt"), "");
    }

    #[test]
    fn keeps_real_paths() {
        assert_eq!(strip_list_flags("/files"), "/files");
        assert_eq!(strip_list_flags("-rated"), "-rated");
        assert_eq!(strip_list_flags(""), "");
    }
}
