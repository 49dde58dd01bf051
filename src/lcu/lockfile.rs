// Lockfile discovery for LCU credentials

use std::fs;
use std::path::{Path, PathBuf};

const LOCKFILE_NAMES: [&str; 3] = ["lockfile", "LeagueClientUx.lockfile", "LeagueClient.lockfile"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcuCredentials {
    pub port: u16,
    pub token: String,
    pub lockfile_path: PathBuf,
}

/// Lockfile format: `name:pid:port:token:protocol`
pub fn parse_lockfile(content: &str, path: &Path) -> Option<LcuCredentials> {
    let parts: Vec<&str> = content.trim().split(':').collect();
    if parts.len() < 5 {
        return None;
    }
    let port = parts[2].parse::<u16>().ok()?;
    let token = parts[3].to_string();
    if token.is_empty() {
        return None;
    }
    Some(LcuCredentials {
        port,
        token,
        lockfile_path: path.to_path_buf(),
    })
}

pub fn read_lockfile_once<S: AsRef<str>>(league_paths: &[S]) -> Option<LcuCredentials> {
    for dir in league_paths {
        let dir = PathBuf::from(dir.as_ref());
        for name in LOCKFILE_NAMES {
            let path = dir.join(name);
            if let Ok(content) = fs::read_to_string(&path) {
                if let Some(creds) = parse_lockfile(&content, &path) {
                    return Some(creds);
                }
            }
        }
    }
    None
}
