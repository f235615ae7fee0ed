// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// An in-memory stand-in for the sysfs GPIO tree.
//
// Exports and unexports create and remove the pin directories immediately,
// and value files follow the kernel semantics where each write replaces the
// value.  Faults can be injected to make the next N accesses to a given
// control file fail.

use super::{Kernel, SYSFS_GPIO_ROOT};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Call {
    Exists(PathBuf),
    Write(PathBuf, Vec<u8>),
    Open(PathBuf, bool),
}

type Contents = Rc<RefCell<Vec<u8>>>;

#[derive(Debug, Default)]
struct State {
    dirs: HashSet<PathBuf>,
    files: HashMap<PathBuf, Contents>,
    calls: Vec<Call>,
    // remaining failures, keyed by control file name.
    faults: HashMap<String, u32>,
}

#[derive(Debug)]
pub(crate) struct FakeKernel {
    root: PathBuf,
    state: RefCell<State>,
}

impl FakeKernel {
    pub(crate) fn new() -> FakeKernel {
        let root = PathBuf::from(SYSFS_GPIO_ROOT);
        let mut state = State::default();
        for f in ["export", "unexport"] {
            state.files.insert(root.join(f), Contents::default());
        }
        FakeKernel {
            root,
            state: RefCell::new(state),
        }
    }

    // Create the pin directory as if the pin had already been exported.
    pub(crate) fn with_exported(self, pin: u32) -> Self {
        self.state.borrow_mut().export(&self.root, pin);
        self
    }

    // Fail the next `count` writes or opens of the named control file.
    pub(crate) fn fail_next(&self, file: &str, count: u32) {
        self.state.borrow_mut().faults.insert(file.into(), count);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    // The number of writes or opens of the named control file.
    pub(crate) fn accesses(&self, file: &str) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| match c {
                Call::Write(p, _) | Call::Open(p, _) => file_name(p) == file,
                Call::Exists(_) => false,
            })
            .count()
    }

    pub(crate) fn is_exported(&self, pin: u32) -> bool {
        self.state.borrow().dirs.contains(&pin_dir(&self.root, pin))
    }

    pub(crate) fn attr(&self, pin: u32, file: &str) -> Option<Vec<u8>> {
        let path = pin_dir(&self.root, pin).join(file);
        self.state
            .borrow()
            .files
            .get(&path)
            .map(|c| c.borrow().clone())
    }

    // The number of handles holding the value file of a pin open.
    pub(crate) fn open_handles(&self, pin: u32) -> usize {
        let path = pin_dir(&self.root, pin).join("value");
        self.state
            .borrow()
            .files
            .get(&path)
            .map_or(0, |c| Rc::strong_count(c) - 1)
    }

    pub(crate) fn set_attr(&self, pin: u32, file: &str, data: &[u8]) {
        let path = pin_dir(&self.root, pin).join(file);
        if let Some(c) = self.state.borrow().files.get(&path) {
            *c.borrow_mut() = data.to_vec();
        }
    }
}

impl Kernel for FakeKernel {
    type Handle = FakeHandle;

    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, path: &Path) -> bool {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::Exists(path.into()));
        state.dirs.contains(path) || state.files.contains_key(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::Write(path.into(), data.to_vec()));
        state.fault(path)?;
        let contents = state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        match file_name(path) {
            "export" => {
                let pin = parse_pin(data)?;
                state.export(&self.root, pin);
            }
            "unexport" => {
                let pin = parse_pin(data)?;
                state.unexport(&self.root, pin)?;
            }
            "direction" => {
                let value = match data {
                    b"in" => None,
                    b"low" => Some(b"0"),
                    b"high" => Some(b"1"),
                    _ => return Err(io::Error::from(io::ErrorKind::InvalidInput)),
                };
                if let Some(v) = value {
                    if let Some(parent) = path.parent() {
                        if let Some(c) = state.files.get(&parent.join("value")) {
                            *c.borrow_mut() = v.to_vec();
                        }
                    }
                }
            }
            _ => {}
        }
        *contents.borrow_mut() = data.to_vec();
        Ok(())
    }

    fn open(&self, path: &Path, writable: bool) -> io::Result<FakeHandle> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::Open(path.into(), writable));
        state.fault(path)?;
        let contents = state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        Ok(FakeHandle {
            contents,
            pos: 0,
            writable,
        })
    }
}

impl State {
    fn fault(&mut self, path: &Path) -> io::Result<()> {
        if let Some(n) = self.faults.get_mut(file_name(path)) {
            if *n > 0 {
                *n -= 1;
                return Err(io::Error::from(io::ErrorKind::PermissionDenied));
            }
        }
        Ok(())
    }

    fn export(&mut self, root: &Path, pin: u32) {
        let dir = pin_dir(root, pin);
        if !self.dirs.insert(dir.clone()) {
            return;
        }
        for (f, v) in [
            ("direction", &b"in"[..]),
            ("edge", &b"none"[..]),
            ("active_low", &b"0"[..]),
            ("value", &b"0"[..]),
        ] {
            self.files
                .insert(dir.join(f), Rc::new(RefCell::new(v.to_vec())));
        }
    }

    fn unexport(&mut self, root: &Path, pin: u32) -> io::Result<()> {
        let dir = pin_dir(root, pin);
        if !self.dirs.remove(&dir) {
            return Err(io::Error::from(io::ErrorKind::InvalidInput));
        }
        self.files.retain(|p, _| !p.starts_with(&dir));
        Ok(())
    }
}

/// An open value file.
///
/// Shares its contents with the fake, so writes are visible to other
/// handles on the same pin.
#[derive(Debug)]
pub(crate) struct FakeHandle {
    contents: Contents,
    pos: usize,
    writable: bool,
}

impl Read for FakeHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let contents = self.contents.borrow();
        let avail = contents.get(self.pos..).unwrap_or_default();
        let n = avail.len().min(buf.len());
        buf[..n].copy_from_slice(&avail[..n]);
        self.pos += n;
        Ok(n)
    }
}

impl Write for FakeHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.writable {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        *self.contents.borrow_mut() = buf.to_vec();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for FakeHandle {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match pos {
            SeekFrom::Start(p) => self.pos = p as usize,
            _ => return Err(io::Error::from(io::ErrorKind::Unsupported)),
        }
        Ok(self.pos as u64)
    }
}

fn pin_dir(root: &Path, pin: u32) -> PathBuf {
    root.join(format!("gpio{}", pin))
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|f| f.to_str()).unwrap_or_default()
}

fn parse_pin(data: &[u8]) -> io::Result<u32> {
    std::str::from_utf8(data)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| io::Error::from(io::ErrorKind::InvalidInput))
}
