//! 与用户空间共用定义和声明
//!
//! 包含 Linux 兼容层对外暴露的常量、记录布局和标志位，
//! 确保 /sys 等伪文件系统输出的内容与 Linux 一致。

#![no_std]
#![allow(dead_code)]
// uapi 中包含大量与 Linux 兼容的常量/结构体字段定义；逐项补 `///` 噪声较大。
#![allow(missing_docs)]

pub mod fcntl;
pub mod fs;
pub mod net;
pub mod time;
