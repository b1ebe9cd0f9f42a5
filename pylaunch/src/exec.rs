use std::convert::Infallible;
use std::ffi::{CString, OsString};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

use crate::Error;

fn cstring<B: Into<Vec<u8>>>(bytes: B) -> Result<CString, Error> {
    CString::new(bytes).map_err(Error::BadArg)
}

/// Replaces the current process image with `path`, forwarding `args`
/// verbatim as the new argument vector, element 0 included. Environment
/// and open file descriptors are inherited by the replacement image.
///
/// Returns only on failure, by exec contract.
pub fn execv<P: AsRef<Path>>(path: P, args: &[OsString]) -> Result<Infallible, Error> {
    let path = path.as_ref();
    let prog = cstring(path.as_os_str().as_bytes())?;

    let argv = args
        .iter()
        .map(|a| cstring(a.as_bytes()))
        .collect::<Result<Vec<_>, Error>>()?;

    let mut argv_ptrs: Vec<*const libc::c_char> = argv.iter().map(|a| a.as_ptr()).collect();
    argv_ptrs.push(ptr::null());

    unsafe { libc::execv(prog.as_ptr(), argv_ptrs.as_ptr()) };

    Err(Error::Exec(path.to_path_buf(), io::Error::last_os_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_target_returns_error() {
        let args = vec![OsString::from("prog"), OsString::from("--flag")];
        let err = execv("/nonexistent/launcher.py", &args).unwrap_err();
        match err {
            Error::Exec(path, e) => {
                assert_eq!(path, Path::new("/nonexistent/launcher.py"));
                assert_eq!(e.raw_os_error(), Some(libc::ENOENT));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn interior_nul_in_argument_is_rejected() {
        // conversion fails before any exec is attempted
        let args = vec![OsString::from("pr\0og")];
        let err = execv("/bin/true", &args).unwrap_err();
        assert!(matches!(err, Error::BadArg(_)));
    }

    #[test]
    fn interior_nul_in_path_is_rejected() {
        let args = vec![OsString::from("prog")];
        let err = execv("/bin/tr\0ue", &args).unwrap_err();
        assert!(matches!(err, Error::BadArg(_)));
    }
}
