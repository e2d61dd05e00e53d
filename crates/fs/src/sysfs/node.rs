//! Sysfs 节点与节点缓存
//!
//! 节点按编号缓存：同一编号在任意时刻至多对应一个存活的 [`SysfsNode`]。
//! 缓存只持有弱引用，最后一个强引用释放时节点自行从缓存中摘除。
//! 每个节点持有父节点的强引用，`..` 因此总能直接得到。

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::{Arc, Weak};
use core::any::Any;

use net::InterfaceTable;
use sync::SpinLock;
use uapi::time::TimeSpec;
use vfs::{
    AccessMode, Credential, DirPage, FileMode, FsError, Inode, InodeMetadata, InodeType,
    OpenFlags,
};

use crate::ops::fs_ops;
use crate::sysfs::ino::{StaticDir, SysIno};
use crate::sysfs::{SysfsOptions, content, lookup, readdir};

/// 所有节点的属主
const SYSFS_UID: u32 = 0;
/// 所有节点的属组
const SYSFS_GID: u32 = 0;

const DIR_PERM: u32 = 0o555;
const SYMLINK_PERM: u32 = 0o777;
const ATTR_PERM: u32 = 0o444;

/// 一次挂载内所有节点共享的状态
pub(crate) struct SysfsShared {
    interfaces: &'static InterfaceTable,
    options: SysfsOptions,
    cache: SpinLock<BTreeMap<u64, Weak<SysfsNode>>>,
}

impl SysfsShared {
    pub(crate) fn new(interfaces: &'static InterfaceTable, options: SysfsOptions) -> Arc<Self> {
        Arc::new(Self {
            interfaces,
            options,
            cache: SpinLock::new(BTreeMap::new()),
        })
    }

    /// 取得或创建编号为 `ino` 的节点
    ///
    /// 已有存活节点时直接返回它，`parent` 被忽略。
    pub(crate) fn get_or_create(
        self: &Arc<Self>,
        parent: Option<&Arc<SysfsNode>>,
        ino: SysIno,
    ) -> Arc<SysfsNode> {
        let key = ino.encode();
        let mut cache = self.cache.lock();
        if let Some(node) = cache.get(&key).and_then(Weak::upgrade) {
            return node;
        }

        let node = SysfsNode::new(self.clone(), parent.cloned(), ino);
        cache.insert(key, Arc::downgrade(&node));
        log::trace!("sysfs: materialized {:#x}", key);
        node
    }

    /// 缓存中存活的节点数
    pub(crate) fn live_nodes(&self) -> usize {
        self.cache
            .lock()
            .values()
            .filter(|node| node.strong_count() > 0)
            .count()
    }

    fn delegate_for(&self, ino: SysIno) -> Option<Arc<dyn Inode>> {
        if ino == SysIno::of_static(StaticDir::FsCgroup) {
            self.options.cgroup_delegate.clone()
        } else {
            None
        }
    }
}

/// Sysfs 节点
///
/// 类型与权限完全由编号决定。带有 `delegate` 的节点是直通节点：
/// 内容、打开和访问检查都转发给被包装的真实节点。
pub struct SysfsNode {
    ino: SysIno,
    inode_type: InodeType,
    mode: FileMode,
    time: TimeSpec,
    parent: Option<Arc<SysfsNode>>,
    delegate: Option<Arc<dyn Inode>>,
    self_ref: Weak<SysfsNode>,
    shared: Arc<SysfsShared>,
}

impl SysfsNode {
    fn new(shared: Arc<SysfsShared>, parent: Option<Arc<SysfsNode>>, ino: SysIno) -> Arc<Self> {
        let inode_type = ino.inode_type();
        let perm = match inode_type {
            InodeType::Directory => DIR_PERM,
            InodeType::Symlink => SYMLINK_PERM,
            _ => ATTR_PERM,
        };

        Arc::new_cyclic(|self_ref| Self {
            ino,
            inode_type,
            mode: FileMode::with_type(inode_type, perm),
            time: fs_ops().timespec_now(),
            parent,
            delegate: shared.delegate_for(ino),
            self_ref: self_ref.clone(),
            shared,
        })
    }

    /// 节点编号
    pub fn ino(&self) -> SysIno {
        self.ino
    }

    /// 是否为直通节点
    pub fn is_passthrough(&self) -> bool {
        self.delegate.is_some()
    }

    /// 活动接口集合
    pub(crate) fn interfaces(&self) -> &'static InterfaceTable {
        self.shared.interfaces
    }

    /// 物化一个子节点
    pub(crate) fn child(self: &Arc<Self>, ino: SysIno) -> Arc<SysfsNode> {
        self.shared.get_or_create(Some(self), ino)
    }

    /// 当前挂载中存活的节点数
    pub fn live_nodes(&self) -> usize {
        self.shared.live_nodes()
    }

    fn this(&self) -> Result<Arc<SysfsNode>, FsError> {
        self.self_ref.upgrade().ok_or(FsError::IoError)
    }

    fn parent_node(&self) -> Result<Arc<SysfsNode>, FsError> {
        match &self.parent {
            Some(parent) => Ok(parent.clone()),
            None => self.this(),
        }
    }

    fn require_dir(&self) -> Result<(), FsError> {
        if self.inode_type == InodeType::Directory {
            Ok(())
        } else {
            Err(FsError::NotDirectory)
        }
    }

    fn synthetic_metadata(&self) -> InodeMetadata {
        let size = match self.inode_type {
            InodeType::Symlink => self.readlink().map_or(0, |target| target.len()),
            _ => 0,
        };
        InodeMetadata {
            inode_no: self.ino.encode(),
            inode_type: self.inode_type,
            mode: self.mode,
            uid: SYSFS_UID,
            gid: SYSFS_GID,
            size,
            atime: self.time,
            mtime: self.time,
            ctime: self.time,
            nlinks: if self.inode_type == InodeType::Directory { 2 } else { 1 },
            blocks: 0,
            rdev: 0,
        }
    }
}

/// 沿直通链走到最终节点
fn terminal(mut node: &dyn Inode) -> &dyn Inode {
    while let Some(delegate) = node
        .downcast_ref::<SysfsNode>()
        .and_then(|n| n.delegate.as_deref())
    {
        node = delegate;
    }
    node
}

impl Inode for SysfsNode {
    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        match &self.delegate {
            Some(delegate) => {
                let mut meta = delegate.metadata()?;
                // 内容来自真实节点，展示的权限位来自本节点
                let file_type = meta.mode & FileMode::S_IFMT;
                meta.mode = file_type | self.mode.permissions();
                Ok(meta)
            }
            None => Ok(self.synthetic_metadata()),
        }
    }

    fn read_at(&self, offset: usize, buf: &mut [u8]) -> Result<usize, FsError> {
        if let Some(delegate) = &self.delegate {
            return delegate.read_at(offset, buf);
        }

        let data = match self.inode_type {
            InodeType::Directory => return Err(FsError::IsDirectory),
            InodeType::File => content::read_attr(self.interfaces(), self.ino)?,
            _ => return Err(FsError::IoError),
        };

        let data = data.as_bytes();
        if offset >= data.len() {
            return Ok(0);
        }
        let to_read = (data.len() - offset).min(buf.len());
        buf[..to_read].copy_from_slice(&data[offset..offset + to_read]);
        Ok(to_read)
    }

    fn lookup(&self, name: &str, cred: &Credential) -> Result<Arc<dyn Inode>, FsError> {
        self.require_dir()?;
        self.access(AccessMode::EXEC, cred)?;

        match name {
            "" | "." => return Ok(self.this()? as Arc<dyn Inode>),
            ".." => return Ok(self.parent_node()? as Arc<dyn Inode>),
            _ => {}
        }

        if let Some(delegate) = &self.delegate {
            return delegate.lookup(name, cred);
        }

        let child = lookup::lookup_child(&self.this()?, name)?;
        Ok(child as Arc<dyn Inode>)
    }

    fn readdir(&self, offset: i64, budget: usize, cred: &Credential) -> Result<DirPage, FsError> {
        self.require_dir()?;
        self.access(AccessMode::READ, cred)?;

        if let Some(delegate) = &self.delegate {
            return delegate.readdir(offset, budget, cred);
        }

        readdir::list(self, offset, budget)
    }

    fn readlink(&self) -> Result<String, FsError> {
        if let Some(delegate) = &self.delegate {
            return delegate.readlink();
        }

        match self.inode_type {
            InodeType::Symlink => content::class_net_target(self.interfaces(), self.ino),
            _ => Err(FsError::InvalidArgument),
        }
    }

    fn open(
        self: Arc<Self>,
        flags: OpenFlags,
        cred: &Credential,
    ) -> Result<Arc<dyn Inode>, FsError> {
        if flags.writable() {
            return Err(FsError::ReadOnlyFs);
        }

        match &self.delegate {
            Some(delegate) => delegate.clone().open(flags, cred),
            None => {
                self.access(AccessMode::READ, cred)?;
                Ok(self as Arc<dyn Inode>)
            }
        }
    }

    fn close(&self, flags: OpenFlags, cred: &Credential) -> Result<(), FsError> {
        match &self.delegate {
            Some(delegate) => delegate.close(flags, cred),
            None => Ok(()),
        }
    }

    fn access(&self, mode: AccessMode, cred: &Credential) -> Result<(), FsError> {
        match &self.delegate {
            Some(delegate) => delegate.access(mode, cred),
            None => self.mode.check_access(SYSFS_UID, SYSFS_GID, mode, cred),
        }
    }

    fn sync(&self) -> Result<(), FsError> {
        Ok(())
    }

    fn real_inode(self: Arc<Self>) -> Arc<dyn Inode> {
        match &self.delegate {
            Some(delegate) => delegate.clone().real_inode(),
            None => self as Arc<dyn Inode>,
        }
    }

    fn same_inode(&self, other: &dyn Inode) -> bool {
        let a = terminal(self);
        let b = terminal(other);

        // 只要有一端停在 sysfs 内部，就只能按对象身份比较
        if a.downcast_ref::<SysfsNode>().is_some() || b.downcast_ref::<SysfsNode>().is_some() {
            return core::ptr::addr_eq(a as *const dyn Inode, b as *const dyn Inode);
        }
        a.same_inode(b)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn write_at(&self, _offset: usize, _buf: &[u8]) -> Result<usize, FsError> {
        Err(FsError::ReadOnlyFs)
    }

    fn create(&self, _name: &str, _mode: FileMode) -> Result<Arc<dyn Inode>, FsError> {
        Err(FsError::ReadOnlyFs)
    }

    fn mkdir(&self, _name: &str, _mode: FileMode) -> Result<Arc<dyn Inode>, FsError> {
        Err(FsError::ReadOnlyFs)
    }

    fn unlink(&self, _name: &str) -> Result<(), FsError> {
        Err(FsError::ReadOnlyFs)
    }

    fn rmdir(&self, _name: &str) -> Result<(), FsError> {
        Err(FsError::ReadOnlyFs)
    }

    fn truncate(&self, _size: usize) -> Result<(), FsError> {
        Err(FsError::ReadOnlyFs)
    }

    fn chmod(&self, _mode: FileMode) -> Result<(), FsError> {
        Err(FsError::ReadOnlyFs)
    }

    fn chown(&self, _uid: u32, _gid: u32) -> Result<(), FsError> {
        Err(FsError::ReadOnlyFs)
    }
}

impl Drop for SysfsNode {
    fn drop(&mut self) {
        let key = self.ino.encode();
        let this = self as *const SysfsNode;
        let mut cache = self.shared.cache.lock();
        // 槽位可能已被同编号的新节点占用
        if cache
            .get(&key)
            .is_some_and(|slot| core::ptr::eq(slot.as_ptr(), this))
        {
            cache.remove(&key);
        }
        drop(cache);
        log::trace!("sysfs: reclaimed {:#x}", key);
    }
}
