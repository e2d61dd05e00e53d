//! 内核虚拟文件系统层
//!
//! 此 crate 提供 POSIX 兼容的虚拟文件系统抽象，包括：
//!
//! - [`Inode`] trait - 节点操作接口（lookup/readdir/read/readlink/open/access...）
//! - [`FileSystem`] trait - 文件系统接口
//! - [`DirPage`] / [`DirPageBuilder`] - 以偏移量为续读令牌的目录分页协议
//! - [`Credential`] / [`AccessMode`] - 调用者凭据与访问检查
//! - 路径解析

#![no_std]
#![allow(clippy::module_inception)]

extern crate alloc;

pub mod error;

mod cred;
mod dirent;
mod file_system;
mod inode;
mod path;

// Re-export error
pub use error::FsError;

// Re-export cred
pub use cred::{AccessMode, Credential};

// Re-export dirent
pub use dirent::{DirEntry, DirPage, DirPageBuilder, inode_type_to_d_type};

// Re-export inode
pub use inode::{FileMode, Inode, InodeMetadata, InodeType};

// Re-export file_system
pub use file_system::{FileSystem, StatFs};

// Re-export path
pub use path::{PathComponent, normalize_path, parse_path, walk_path};

// Re-export uapi types for convenience
pub use uapi::fcntl::OpenFlags;
pub use uapi::fs::LinuxDirent64;
pub use uapi::time::TimeSpec;
