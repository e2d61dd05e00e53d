//! Sysfs 文件系统实现

use alloc::sync::Arc;

use net::{InterfaceTable, NET_INTERFACES};
use vfs::{FileSystem, FsError, Inode, StatFs};

use crate::sysfs::ino::SysIno;
use crate::sysfs::node::{SysfsNode, SysfsShared};

/// 挂载选项
#[derive(Clone, Default)]
pub struct SysfsOptions {
    /// `/sys/fs/cgroup` 直通到的真实目录
    ///
    /// 未设置时 `/sys/fs/cgroup` 是一个空目录。
    pub cgroup_delegate: Option<Arc<dyn Inode>>,
}

/// SysFS 文件系统对象（提供 `/sys` 目录树）。
pub struct SysFS {
    root_inode: Arc<SysfsNode>,
}

impl SysFS {
    /// 在给定的接口集合上创建 SysFS
    pub fn new(interfaces: &'static InterfaceTable) -> Arc<Self> {
        Self::with_options(interfaces, SysfsOptions::default())
    }

    /// 带挂载选项创建 SysFS
    pub fn with_options(interfaces: &'static InterfaceTable, options: SysfsOptions) -> Arc<Self> {
        let shared = SysfsShared::new(interfaces, options);
        let root = shared.get_or_create(None, SysIno::ROOT);
        Arc::new(Self { root_inode: root })
    }

    /// 在全局接口集合上创建 SysFS
    pub fn new_global() -> Arc<Self> {
        Self::new(&NET_INTERFACES)
    }

    /// 根目录节点
    pub fn root(&self) -> Arc<SysfsNode> {
        self.root_inode.clone()
    }
}

impl FileSystem for SysFS {
    fn fs_type(&self) -> &'static str {
        "sysfs"
    }

    fn root_inode(&self) -> Arc<dyn Inode> {
        self.root_inode.clone()
    }

    fn sync(&self) -> Result<(), FsError> {
        Ok(())
    }

    fn statfs(&self) -> Result<StatFs, FsError> {
        Ok(StatFs::pseudo(4096, crate::sysfs::SYSFS_NAME_MAX))
    }
}
