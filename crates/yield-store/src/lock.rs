//! Per-campaign commit lock.
//!
//! An OS advisory lock on a `{campaign}.lock` file next to the campaign
//! document. The kernel drops the lock when the holding process exits, so a
//! crashed writer never leaves a lock that has to be reclaimed. The file itself
//! stays in place; removing it while another writer waits on it would let a
//! third writer lock a fresh inode at the same path.
//!
//! The holder writes its pid into the file for the `Locked` error message only.

use std::fs::{File, OpenOptions, TryLockError};
use std::io::{Seek, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::error::StoreError;

const LOCK_WAIT_TIMEOUT: Duration = Duration::from_secs(10);
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(50);

pub struct CommitLockGuard {
    file: File,
}

impl Drop for CommitLockGuard {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

pub fn acquire(dir: &Path, campaign_id: &str) -> Result<CommitLockGuard, StoreError> {
    acquire_within(dir, campaign_id, LOCK_WAIT_TIMEOUT)
}

pub fn acquire_within(
    dir: &Path,
    campaign_id: &str,
    timeout: Duration,
) -> Result<CommitLockGuard, StoreError> {
    let lock_path = dir.join(format!("{campaign_id}.lock"));
    let io = |source| StoreError::Io {
        path: lock_path.clone(),
        source,
    };

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(io)?;
    let started = Instant::now();

    loop {
        match file.try_lock() {
            Ok(()) => {
                record_holder(&mut file).map_err(io)?;
                return Ok(CommitLockGuard { file });
            }
            Err(TryLockError::WouldBlock) => {
                if started.elapsed() >= timeout {
                    return Err(StoreError::Locked {
                        campaign_id: campaign_id.to_string(),
                        holder: describe_holder(&lock_path),
                    });
                }
                std::thread::sleep(LOCK_RETRY_DELAY);
            }
            Err(TryLockError::Error(source)) => return Err(io(source)),
        }
    }
}

fn record_holder(file: &mut File) -> std::io::Result<()> {
    file.set_len(0)?;
    file.rewind()?;
    writeln!(file, "{}", std::process::id())?;
    file.flush()
}

fn describe_holder(lock_path: &Path) -> String {
    std::fs::read_to_string(lock_path)
        .ok()
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .map_or_else(
            || format!("holder of {}", lock_path.display()),
            |pid| format!("pid {pid}"),
        )
}
