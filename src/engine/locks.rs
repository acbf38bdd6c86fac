use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per output path. Two invocations writing the same file
/// run one after the other; different files never wait on each other.
#[derive(Default)]
pub struct PathLocks {
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock every path in `paths`. Paths are taken in sorted order so two
    /// callers with overlapping sets cannot deadlock.
    pub async fn acquire(&self, paths: &[PathBuf]) -> Vec<OwnedMutexGuard<()>> {
        let mut sorted: Vec<&Path> = paths.iter().map(PathBuf::as_path).collect();
        sorted.sort();
        sorted.dedup();

        let mut guards = Vec::with_capacity(sorted.len());
        for path in sorted {
            let lock = {
                let mut locks = self.locks.lock().await;
                Arc::clone(locks.entry(path.to_path_buf()).or_default())
            };
            guards.push(lock.lock_owned().await);
        }
        guards
    }
}
