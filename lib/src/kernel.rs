// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt::Debug;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, Write};
use std::path::{Path, PathBuf};

#[cfg(test)]
pub(crate) mod fake;

/// The standard location of the sysfs GPIO class.
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

/// Access to the GPIO control files provided by the kernel.
///
/// All paths passed to a `Kernel` are absolute, being the [`root`] joined
/// with the control file name.
///
/// [`root`]: Kernel::root
pub trait Kernel {
    /// An open value file.
    type Handle: Read + Write + Seek + Debug;

    /// The directory containing the `export` and `unexport` control files
    /// and the per-pin `gpioN` directories.
    fn root(&self) -> &Path;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Open an existing control file, write the data to it, and close it.
    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    /// Open an existing value file, for reading and optionally writing.
    fn open(&self, path: &Path, writable: bool) -> io::Result<Self::Handle>;
}

impl<K: Kernel + ?Sized> Kernel for &K {
    type Handle = K::Handle;

    #[inline]
    fn root(&self) -> &Path {
        (**self).root()
    }

    #[inline]
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    #[inline]
    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        (**self).write(path, data)
    }

    #[inline]
    fn open(&self, path: &Path, writable: bool) -> io::Result<Self::Handle> {
        (**self).open(path, writable)
    }
}

/// The kernel's sysfs GPIO interface.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sysfs {
    root: PathBuf,
}

impl Sysfs {
    /// Use the GPIO control files located under an alternate root directory.
    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        Sysfs { root: root.into() }
    }
}

impl Default for Sysfs {
    fn default() -> Self {
        Sysfs::with_root(SYSFS_GPIO_ROOT)
    }
}

impl Kernel for Sysfs {
    type Handle = File;

    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        // control files are never created, only written.
        let mut f = OpenOptions::new().write(true).truncate(true).open(path)?;
        f.write_all(data)
    }

    fn open(&self, path: &Path, writable: bool) -> io::Result<File> {
        OpenOptions::new().read(true).write(writable).open(path)
    }
}
