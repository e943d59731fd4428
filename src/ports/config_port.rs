//! Configuration access port trait.
//!
//! Keys the engine reads: `[engine] variant, snapshot` and
//! `[performance] window, returns`.

pub trait ConfigPort {
    /// Raw value, or `None` when the section or key is absent.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    /// Integer value; absent or unparseable values yield `default`.
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
}
