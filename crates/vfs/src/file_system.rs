//! 挂载层接口
//!
//! 一个 [`FileSystem`] 对应一次挂载：它给出根节点，其余节点都由根节点逐级 lookup 得到。

use alloc::sync::Arc;

use crate::{FsError, Inode};

/// 已挂载的文件系统
pub trait FileSystem: Send + Sync {
    /// 类型名（出现在 `/proc/mounts` 的第三列）
    fn fs_type(&self) -> &'static str;

    /// 根目录节点
    fn root_inode(&self) -> Arc<dyn Inode>;

    /// 把缓存的修改写回存储
    fn sync(&self) -> Result<(), FsError>;

    /// `statfs(2)` 所需的统计信息
    fn statfs(&self) -> Result<StatFs, FsError>;

    /// 卸载前的收尾，默认只做一次 sync
    fn umount(&self) -> Result<(), FsError> {
        self.sync()
    }
}

/// 文件系统统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatFs {
    /// 块大小（字节）
    pub block_size: usize,
    /// 总块数
    pub total_blocks: usize,
    /// 空闲块数
    pub free_blocks: usize,
    /// 非特权用户可用块数
    pub available_blocks: usize,
    /// 总 inode 数
    pub total_inodes: usize,
    /// 空闲 inode 数
    pub free_inodes: usize,
    /// 文件系统 ID
    pub fsid: u64,
    /// 文件名最大长度
    pub max_filename_len: usize,
}

impl StatFs {
    /// 不占用存储的伪文件系统：只有块大小和文件名上限，其余计数均为 0
    pub fn pseudo(block_size: usize, max_filename_len: usize) -> Self {
        Self {
            block_size,
            max_filename_len,
            ..Self::default()
        }
    }
}
