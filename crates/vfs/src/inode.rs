//! Inode 抽象层 - VFS 存储层接口
//!
//! 该模块定义了文件系统的底层节点接口，对应调用方可见的全部节点操作：
//! open/close/read/getattr/access/lookup/readdir/readlink/sync/cmp/realvp。
//! 节点的释放由 `Arc` 引用计数驱动：最后一个引用消失时由具体实现回收资源。

use alloc::string::String;
use alloc::sync::Arc;
use core::any::Any;
use uapi::fcntl::OpenFlags;
use uapi::time::TimeSpec;

use crate::{AccessMode, Credential, DirPage, FsError};

/// 文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InodeType {
    /// 普通文件
    File,
    /// 目录
    Directory,
    /// 符号链接
    Symlink,
    /// 字符设备
    CharDevice,
    /// 块设备
    BlockDevice,
    /// 命名管道
    Fifo,
    /// 套接字
    Socket,
}

impl InodeType {
    /// 对应的 `S_IFMT` 类型位
    pub fn mode_type(&self) -> FileMode {
        match self {
            InodeType::File => FileMode::S_IFREG,
            InodeType::Directory => FileMode::S_IFDIR,
            InodeType::Symlink => FileMode::S_IFLNK,
            InodeType::CharDevice => FileMode::S_IFCHR,
            InodeType::BlockDevice => FileMode::S_IFBLK,
            InodeType::Fifo => FileMode::S_IFIFO,
            InodeType::Socket => FileMode::S_IFSOCK,
        }
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// 文件权限和类型（与 POSIX 兼容）
    pub struct FileMode: u32 {
        // 文件类型掩码
        /// 文件类型掩码
        const S_IFMT   = 0o170000;
        /// 普通文件
        const S_IFREG  = 0o100000;
        /// 目录
        const S_IFDIR  = 0o040000;
        /// 符号链接
        const S_IFLNK  = 0o120000;
        /// 字符设备
        const S_IFCHR  = 0o020000;
        /// 块设备
        const S_IFBLK  = 0o060000;
        /// FIFO
        const S_IFIFO  = 0o010000;
        /// Socket
        const S_IFSOCK = 0o140000;

        // 用户权限
        /// 用户读
        const S_IRUSR  = 0o400;
        /// 用户写
        const S_IWUSR  = 0o200;
        /// 用户执行
        const S_IXUSR  = 0o100;

        // 组权限
        /// 组读
        const S_IRGRP  = 0o040;
        /// 组写
        const S_IWGRP  = 0o020;
        /// 组执行
        const S_IXGRP  = 0o010;

        // 其他用户权限
        /// 其他读
        const S_IROTH  = 0o004;
        /// 其他写
        const S_IWOTH  = 0o002;
        /// 其他执行
        const S_IXOTH  = 0o001;

        // 特殊位
        /// Set UID
        const S_ISUID  = 0o4000;
        /// Set GID
        const S_ISGID  = 0o2000;
        /// Sticky bit
        const S_ISVTX  = 0o1000;
    }
}

impl FileMode {
    /// 仅保留权限位（含 setuid/setgid/sticky）
    pub fn permissions(&self) -> FileMode {
        FileMode::from_bits_truncate(self.bits() & 0o7777)
    }

    /// 用类型和权限位组合出完整 mode
    pub fn with_type(inode_type: InodeType, perm: u32) -> FileMode {
        FileMode::from_bits_truncate(inode_type.mode_type().bits() | (perm & 0o7777))
    }

    /// 按属主/组/其他三级检查访问权限
    ///
    /// 只按一级判定：调用者是属主则用属主位，否则属于该组则用组位，否则用其他位。
    /// 特权调用者直接放行。
    pub fn check_access(
        &self,
        uid: u32,
        gid: u32,
        want: AccessMode,
        cred: &Credential,
    ) -> Result<(), FsError> {
        if cred.privileged {
            return Ok(());
        }

        let mut shift = 0;
        if cred.uid != uid {
            shift += 3;
            if !cred.in_group(gid) {
                shift += 3;
            }
        }

        let granted = (self.bits() << shift) & 0o700;
        if want.bits() & !granted == 0 {
            Ok(())
        } else {
            Err(FsError::PermissionDenied)
        }
    }
}

/// 文件元数据
#[derive(Debug, Clone)]
pub struct InodeMetadata {
    /// Inode 编号
    pub inode_no: u64,
    /// 文件类型
    pub inode_type: InodeType,
    /// 权限位
    pub mode: FileMode,
    /// 用户 ID
    pub uid: u32,
    /// 组 ID
    pub gid: u32,
    /// 文件大小（字节）
    pub size: usize,
    /// 访问时间
    pub atime: TimeSpec,
    /// 修改时间
    pub mtime: TimeSpec,
    /// 状态改变时间
    pub ctime: TimeSpec,
    /// 硬链接数
    pub nlinks: usize,
    /// 占用的块数（512B 为单位）
    pub blocks: usize,
    /// 设备号（仅对 CharDevice 和 BlockDevice 有效）
    pub rdev: u64,
}

/// 文件系统节点接口
///
/// 修改类操作默认返回 [`FsError::NotSupported`]，只读文件系统应覆盖为 [`FsError::ReadOnlyFs`]。
pub trait Inode: Send + Sync + Any {
    /// 获取文件元数据
    fn metadata(&self) -> Result<InodeMetadata, FsError>;

    /// 从指定偏移量读取数据
    fn read_at(&self, offset: usize, buf: &mut [u8]) -> Result<usize, FsError>;

    /// 在目录中查找子项
    ///
    /// `""` 和 `"."` 返回目录自身，`".."` 返回父目录。
    fn lookup(&self, name: &str, cred: &Credential) -> Result<Arc<dyn Inode>, FsError>;

    /// 分页列出目录内容
    ///
    /// `offset` 是上一次返回的 [`DirPage::next_offset`]（首次为 0），
    /// `budget` 是调用方缓冲区的字节数，按 dirent64 记录长度计算占用。
    fn readdir(&self, offset: i64, budget: usize, cred: &Credential) -> Result<DirPage, FsError>;

    /// 读取符号链接的目标路径
    fn readlink(&self) -> Result<String, FsError>;

    /// 打开节点，返回后续 I/O 应使用的节点（可能是被包装的真实节点）
    fn open(self: Arc<Self>, flags: OpenFlags, cred: &Credential)
    -> Result<Arc<dyn Inode>, FsError>;

    /// 关闭节点
    fn close(&self, _flags: OpenFlags, _cred: &Credential) -> Result<(), FsError> {
        Ok(())
    }

    /// 访问权限检查
    fn access(&self, mode: AccessMode, cred: &Credential) -> Result<(), FsError>;

    /// 同步文件数据到存储设备
    fn sync(&self) -> Result<(), FsError>;

    /// 返回最终承载数据的真实节点（没有包装时返回自身）
    fn real_inode(self: Arc<Self>) -> Arc<dyn Inode>;

    /// 判断两个句柄是否引用同一对象（默认按地址比较）
    fn same_inode(&self, other: &dyn Inode) -> bool {
        core::ptr::addr_eq(self as *const Self, other as *const dyn Inode)
    }

    /// 向下转型为 &dyn Any，用于支持 downcast
    fn as_any(&self) -> &dyn Any;

    /// 向指定偏移量写入数据
    fn write_at(&self, _offset: usize, _buf: &[u8]) -> Result<usize, FsError> {
        Err(FsError::NotSupported)
    }

    /// 在目录中创建文件
    fn create(&self, _name: &str, _mode: FileMode) -> Result<Arc<dyn Inode>, FsError> {
        Err(FsError::NotSupported)
    }

    /// 在目录中创建子目录
    fn mkdir(&self, _name: &str, _mode: FileMode) -> Result<Arc<dyn Inode>, FsError> {
        Err(FsError::NotSupported)
    }

    /// 删除普通文件/链接
    fn unlink(&self, _name: &str) -> Result<(), FsError> {
        Err(FsError::NotSupported)
    }

    /// 删除目录
    fn rmdir(&self, _name: &str) -> Result<(), FsError> {
        Err(FsError::NotSupported)
    }

    /// 截断文件到指定大小
    fn truncate(&self, _size: usize) -> Result<(), FsError> {
        Err(FsError::NotSupported)
    }

    /// 修改文件权限模式
    fn chmod(&self, _mode: FileMode) -> Result<(), FsError> {
        Err(FsError::NotSupported)
    }

    /// 修改文件所有者和组
    fn chown(&self, _uid: u32, _gid: u32) -> Result<(), FsError> {
        Err(FsError::NotSupported)
    }
}

/// 为 `Arc<dyn Inode>` 提供向下转型辅助方法
impl dyn Inode {
    /// 尝试向下转型为具体的 Inode 类型
    pub fn downcast_arc<T: Inode>(self: Arc<Self>) -> Result<Arc<T>, Arc<Self>> {
        if (*self).as_any().is::<T>() {
            // SAFETY: 已经通过 is::<T>() 检查了类型
            unsafe {
                let ptr = Arc::into_raw(self);
                Ok(Arc::from_raw(ptr as *const T))
            }
        } else {
            Err(self)
        }
    }

    /// 尝试获取具体类型的引用
    pub fn downcast_ref<T: Inode>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
