use std::ffi::OsString;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::process;

use crate::Error;

/// Suffix appended to the launcher path to locate the co-located script.
pub const SCRIPT_SUFFIX: &str = ".py";

#[inline]
fn procfs_exe(pid: u32) -> String {
    format!("/proc/{pid}/exe")
}

/// Absolute path of the executable image currently running, read from the
/// procfs symlink of our own pid.
pub fn resolve_self_exe() -> Result<PathBuf, Error> {
    let pid = process::id();
    fs::read_link(procfs_exe(pid)).map_err(|e| Error::ResolveExe(pid, e))
}

/// Derives the sibling script path by appending [`SCRIPT_SUFFIX`] to the
/// resolved executable path. The suffix is appended, never substituted:
/// `/opt/tool` maps to `/opt/tool.py`, `/opt/tool.bin` to `/opt/tool.bin.py`.
///
/// The result must still fit PATH_MAX together with the NUL terminator the
/// exec call appends. Overflow is an error, never a truncation.
pub fn script_path<P: AsRef<Path>>(exe: P) -> Result<PathBuf, Error> {
    let mut path = OsString::from(exe.as_ref());
    path.push(SCRIPT_SUFFIX);

    let len = path.as_bytes().len();
    if len >= libc::PATH_MAX as usize {
        return Err(Error::PathOverflow(len));
    }

    Ok(PathBuf::from(path))
}
