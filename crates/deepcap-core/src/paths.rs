use anyhow::Result;
use std::path::PathBuf;

const DEEPCAP_DIR: &str = ".deepcap";
const DB_FILE: &str = "deepcap.db";

/// Environment variable to override the DeepCap directory.
const DEEPCAP_DIR_ENV: &str = "DEEPCAP_DIR";

/// Resolve the DeepCap data directory.
/// Priority: DEEPCAP_DIR env var > ~/.deepcap/
pub fn resolve_deepcap_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DEEPCAP_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|h| h.join(DEEPCAP_DIR))
        .ok_or_else(|| anyhow::anyhow!("Failed to determine home directory"))
}

/// Ensure the DeepCap directory exists and return its path.
pub fn ensure_deepcap_dir() -> Result<PathBuf> {
    let dir = resolve_deepcap_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the database path: ~/.deepcap/deepcap.db
pub fn database_path() -> Result<PathBuf> {
    Ok(resolve_deepcap_dir()?.join(DB_FILE))
}

/// Ensure database path exists and return as string.
pub fn ensure_database_path() -> Result<PathBuf> {
    Ok(ensure_deepcap_dir()?.join(DB_FILE))
}

/// Convenience helper returning the database path as a UTF-8 string.
pub fn ensure_database_path_string() -> Result<String> {
    Ok(ensure_database_path()?.to_string_lossy().into_owned())
}
