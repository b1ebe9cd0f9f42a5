use std::io;

use libc::{gid_t, uid_t};

use crate::Error;

/// Snapshot of the process real/effective ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials {
    pub ruid: uid_t,
    pub euid: uid_t,
    pub rgid: gid_t,
    pub egid: gid_t,
}

impl Credentials {
    /// Current process credentials. The underlying calls are always
    /// successful.
    pub fn current() -> Self {
        unsafe {
            Self {
                ruid: libc::getuid(),
                euid: libc::geteuid(),
                rgid: libc::getgid(),
                egid: libc::getegid(),
            }
        }
    }

    #[inline]
    pub fn is_dropped(&self) -> bool {
        self.ruid == self.euid && self.rgid == self.egid
    }
}

fn setregid(rgid: gid_t, egid: gid_t) -> Result<(), io::Error> {
    if unsafe { libc::setregid(rgid, egid) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

fn setreuid(ruid: uid_t, euid: uid_t) -> Result<(), io::Error> {
    if unsafe { libc::setreuid(ruid, euid) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Sets the real and effective ids to the current effective ids, one way.
/// Setting the real id alongside the effective one also overwrites the
/// saved set-user-id/set-group-id, so whatever privilege the setuid/setgid
/// bits granted at exec time cannot be re-acquired afterwards.
///
/// The group id goes first, while the original (possibly privileged) user
/// id is still in force to authorize the transition. Supplementary groups
/// are left untouched.
///
/// Both calls are checked, a failure leaves the caller with an ambiguous
/// privilege state and must abort the process.
pub fn drop_privileges() -> Result<Credentials, Error> {
    let creds = Credentials::current();

    setregid(creds.egid, creds.egid).map_err(Error::SetGid)?;
    setreuid(creds.euid, creds.euid).map_err(Error::SetUid)?;

    Ok(Credentials::current())
}
