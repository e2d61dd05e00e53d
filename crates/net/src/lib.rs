//! 内核网络接口注册表
//!
//! 此 crate 维护网络协议栈的活动接口集合，包括：
//!
//! - 接口记录（名称、索引、原生标志位、硬件地址、MTU、介质类型）
//! - 按名称和按索引两个有序视图，由同一把读写锁保护
//! - 原生介质类型到 ARP 硬件类型的映射
//!
//! 伪文件系统（如 `/sys/class/net`）只在读锁下读取这里的数据，从不修改。

#![no_std]

extern crate alloc;

pub mod interface;

// Re-export 主要接口
pub use interface::{
    IfFlags, InterfaceError, InterfaceLists, InterfaceTable, MediaType, NET_INTERFACES,
    NetInterface,
};

// Re-export smoltcp 类型：硬件地址的 6 字节视图
pub use smoltcp::wire::EthernetAddress;
