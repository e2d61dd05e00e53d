//! Sysfs 虚拟文件系统
//!
//! 提供与 Linux 兼容的 `/sys` 接口，用于展示网络协议栈中的活动接口：
//!
//! ```text
//! /sys
//! ├── class
//! │   └── net
//! │       └── <ifname> -> /sys/devices/virtual/net/<ifname>
//! ├── devices
//! │   ├── system
//! │   └── virtual
//! │       └── net
//! │           └── <ifname>
//! │               ├── address
//! │               ├── addr_len
//! │               ├── flags
//! │               ├── ifindex
//! │               ├── mtu
//! │               ├── tx_queue_len
//! │               └── type
//! └── fs
//!     └── cgroup
//! ```
//!
//! 整棵树没有后备存储，节点的全部语义都编码在节点号中（见 [`SysIno`]）。

mod compat;
mod content;
mod dirs;
mod ino;
mod lookup;
mod node;
mod readdir;
mod sysfs;

#[cfg(test)]
mod tests;

pub use content::format_attr;
pub use dirs::{NET_ATTRS, NetAttr};
pub use ino::{MAX_IFINDEX, StaticDir, SysIno, SysNodeKind};
pub use node::SysfsNode;
pub use sysfs::{SysFS, SysfsOptions};

/// 目录项偏移步长
pub const DIR_SLOT_SIZE: i64 = 256;

/// 路径组件最大长度
pub const SYSFS_NAME_MAX: usize = uapi::fs::NAME_MAX;
