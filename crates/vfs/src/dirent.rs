//! 目录分页读取协议
//!
//! 目录读取以“偏移量即续读令牌”的方式进行：
//!
//! - 每个逻辑位置（`.`、`..`、第 1 个子项……）占用固定步长的偏移空间（slot）
//! - 调用方每次传入上一次返回的 [`DirPage::next_offset`]，文件系统据此重新计算位置，
//!   不在两次调用之间保存任何迭代器状态
//! - 预算按 Linux `dirent64` 记录长度计算；第一条记录就放不下时返回 [`FsError::InvalidArgument`]

use alloc::string::String;
use alloc::vec::Vec;
use uapi::fs::{
    DT_BLK, DT_CHR, DT_DIR, DT_FIFO, DT_LNK, DT_REG, DT_SOCK, LinuxDirent64, dirent64_reclen,
};

use crate::{FsError, InodeType};

/// 轻量级目录项（readdir 返回）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// 文件名
    pub name: String,
    /// Inode 编号
    pub inode_no: u64,
    /// 文件类型
    pub inode_type: InodeType,
    /// 下一项的偏移量（即 `d_off`）
    pub next_offset: i64,
}

impl DirEntry {
    /// 该项编码为 dirent64 后的记录长度
    pub fn reclen(&self) -> usize {
        dirent64_reclen(self.name.len())
    }
}

/// 一次 readdir 调用的结果
#[derive(Debug, Clone, Default)]
pub struct DirPage {
    /// 本次返回的目录项
    pub entries: Vec<DirEntry>,
    /// 下一次调用应使用的偏移量
    pub next_offset: i64,
    /// 是否已到达目录末尾
    pub eof: bool,
}

impl DirPage {
    /// 按 Linux `dirent64` 格式序列化到 `out`，返回写入的字节数
    pub fn encode_dirent64(&self, out: &mut Vec<u8>) -> usize {
        let start = out.len();
        for entry in &self.entries {
            let reclen = entry.reclen();
            let header = LinuxDirent64 {
                d_ino: entry.inode_no,
                d_off: entry.next_offset,
                d_reclen: reclen as u16,
                d_type: inode_type_to_d_type(entry.inode_type),
            };
            let (d_ino, d_off, d_reclen) = (header.d_ino, header.d_off, header.d_reclen);
            out.extend_from_slice(&d_ino.to_ne_bytes());
            out.extend_from_slice(&d_off.to_ne_bytes());
            out.extend_from_slice(&d_reclen.to_ne_bytes());
            out.push(header.d_type);
            out.extend_from_slice(entry.name.as_bytes());
            // NUL 结尾并补齐到 8 字节边界
            let written = uapi::fs::DIRENT64_HEADER_LEN + entry.name.len();
            out.resize(out.len() + (reclen - written), 0);
        }
        out.len() - start
    }
}

/// 将 [`InodeType`] 转换为 dirent64 的 `d_type`
pub fn inode_type_to_d_type(inode_type: InodeType) -> u8 {
    match inode_type {
        InodeType::File => DT_REG,
        InodeType::Directory => DT_DIR,
        InodeType::Symlink => DT_LNK,
        InodeType::CharDevice => DT_CHR,
        InodeType::BlockDevice => DT_BLK,
        InodeType::Fifo => DT_FIFO,
        InodeType::Socket => DT_SOCK,
    }
}

/// 按预算累积目录项的构建器
///
/// 每推入一项偏移量前进一个 slot；预算不足时停止。
pub struct DirPageBuilder {
    page: DirPage,
    slot: i64,
    remaining: usize,
}

impl DirPageBuilder {
    /// 从 `offset` 开始、预算为 `budget` 字节构建一页
    ///
    /// 负偏移、零预算或未按 `slot` 对齐的偏移均视为寻址错误。
    pub fn new(offset: i64, budget: usize, slot: i64) -> Result<Self, FsError> {
        if offset < 0 || budget == 0 || slot <= 0 {
            return Err(FsError::InvalidArgument);
        }
        if offset % slot != 0 {
            return Err(FsError::InvalidArgument);
        }
        Ok(Self {
            page: DirPage {
                entries: Vec::new(),
                next_offset: offset,
                eof: false,
            },
            slot,
            remaining: budget,
        })
    }

    /// 当前位置（以 slot 计）
    pub fn position(&self) -> usize {
        (self.page.next_offset / self.slot) as usize
    }

    /// 当前偏移量
    pub fn offset(&self) -> i64 {
        self.page.next_offset
    }

    /// 尝试推入一项
    ///
    /// 放得下返回 `Ok(true)`；放不下且本页已有内容返回 `Ok(false)`；
    /// 本页还没有任何内容就放不下时返回 [`FsError::InvalidArgument`]。
    pub fn push(&mut self, name: &str, inode_no: u64, inode_type: InodeType) -> Result<bool, FsError> {
        let reclen = dirent64_reclen(name.len());
        if reclen > self.remaining {
            if self.page.entries.is_empty() {
                return Err(FsError::InvalidArgument);
            }
            return Ok(false);
        }

        self.remaining -= reclen;
        self.page.next_offset += self.slot;
        self.page.entries.push(DirEntry {
            name: String::from(name),
            inode_no,
            inode_type,
            next_offset: self.page.next_offset,
        });
        Ok(true)
    }

    /// 结束本页
    pub fn finish(mut self, eof: bool) -> DirPage {
        self.page.eof = eof;
        self.page
    }
}
