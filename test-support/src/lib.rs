//! 测试支持 crate
//!
//! 提供各 crate 运行时钩子的 Mock 实现

#![no_std]

pub mod mock;
