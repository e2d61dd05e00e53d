//! 文件系统相关的 Linux 记录布局

/// 文件名最大长度
pub const NAME_MAX: usize = 255;

/// 目录项类型：FIFO
pub const DT_FIFO: u8 = 1;
/// 目录项类型：字符设备
pub const DT_CHR: u8 = 2;
/// 目录项类型：目录
pub const DT_DIR: u8 = 4;
/// 目录项类型：块设备
pub const DT_BLK: u8 = 6;
/// 目录项类型：普通文件
pub const DT_REG: u8 = 8;
/// 目录项类型：符号链接
pub const DT_LNK: u8 = 10;
/// 目录项类型：套接字
pub const DT_SOCK: u8 = 12;

/// getdents64 返回的目录项头部（不含变长文件名）
///
/// 实际记录为 `LinuxDirent64` 紧跟以 NUL 结尾的文件名，整体按 8 字节对齐。
#[repr(C, packed)]
#[derive(Debug, Clone, Copy)]
pub struct LinuxDirent64 {
    /// inode 号
    pub d_ino: u64,
    /// 下一项的偏移量
    pub d_off: i64,
    /// 本记录长度
    pub d_reclen: u16,
    /// 文件类型（`DT_*`）
    pub d_type: u8,
}

/// `LinuxDirent64` 头部长度（19 字节）
pub const DIRENT64_HEADER_LEN: usize = core::mem::size_of::<LinuxDirent64>();

/// 计算名字长度为 `name_len` 的 dirent64 记录长度（含 NUL，8 字节对齐）
pub const fn dirent64_reclen(name_len: usize) -> usize {
    (DIRENT64_HEADER_LEN + name_len + 1 + 7) & !7
}
