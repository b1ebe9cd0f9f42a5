//! Setuid/setgid launcher library.
//!
//! The binary this crate builds is meant to be installed with the setuid
//! and/or setgid bit set, next to an interpreted script carrying the same
//! path plus a `.py` suffix. It demotes itself to the effective ids granted
//! at exec time, resolves its own image path through procfs and replaces
//! itself with the sibling script, argv untouched.
//!
//! The whole lifetime is one linear pass, any failure is fatal.

pub mod creds;
pub mod exec;
pub mod exepath;

use std::convert::Infallible;
use std::ffi::{NulError, OsString};
use std::io;
use std::path::PathBuf;

use log::debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to drop group id: {0}")]
    SetGid(io::Error),
    #[error("failed to drop user id: {0}")]
    SetUid(io::Error),
    #[error("failed to resolve /proc/{0}/exe: {1}")]
    ResolveExe(u32, io::Error),
    #[error("script path too long: {0} bytes")]
    PathOverflow(usize),
    #[error("argument not representable for exec: {0}")]
    BadArg(#[from] NulError),
    #[error("failed to exec {}: {}", .0.display(), .1)]
    Exec(PathBuf, io::Error),
}

/// Runs the launcher sequence once: drop privileges, resolve the running
/// executable, derive the sibling script path, exec it with `args`.
///
/// On success the process image is replaced and this function never
/// returns. Every step failure aborts the sequence, there is no retry.
pub fn launch(args: Vec<OsString>) -> Result<Infallible, Error> {
    let creds = creds::drop_privileges()?;

    // the logger comes up only once privileges are gone, RUST_LOG is
    // under the invoking user's control
    let _ = env_logger::Builder::from_default_env().try_init();
    debug!("privileges dropped: uid={} gid={}", creds.euid, creds.egid);

    let exe = exepath::resolve_self_exe()?;
    debug!("running executable: {}", exe.display());

    let script = exepath::script_path(&exe)?;
    debug!("exec target: {}", script.display());

    exec::execv(&script, &args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_fails_without_colocated_script() {
        // the test binary has no sibling script, the sequence must get
        // all the way to exec and stop there
        let err = launch(vec![OsString::from("prog")]).unwrap_err();
        match err {
            Error::Exec(path, e) => {
                assert!(path.to_string_lossy().ends_with(".py"));
                assert_eq!(e.raw_os_error(), Some(libc::ENOENT));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
