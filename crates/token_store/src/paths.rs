use std::path::{Path, PathBuf};

pub const STORE_DIR: &str = ".chat-session";
pub const STORE_FILE: &str = "storage.json";

#[must_use]
pub fn store_root(base: &Path) -> PathBuf {
    base.join(STORE_DIR)
}

#[must_use]
pub fn store_file(base: &Path) -> PathBuf {
    store_root(base).join(STORE_FILE)
}
