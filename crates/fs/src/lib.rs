//! # 文件系统模块 (FS)
//!
//! 本模块提供伪文件系统实现，通过实现 VFS 的 `FileSystem` 和 `Inode` trait 与虚拟文件系统层集成。
//!
//! ## 支持的文件系统
//!
//! - **[sysfs](sysfs)**: 与 Linux 兼容的 `/sys`，展示网络协议栈中的活动接口

#![no_std]
#![doc = "文件系统实现"]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod ops;
pub mod sysfs;

pub use ops::{FsOps, fs_ops, register_fs_ops};
pub use sysfs::{SysFS, SysfsNode, SysfsOptions};
