//! 同步原语
//!
//! 向其它内核模块提供基本的锁和同步原语：
//!
//! - [`SpinLock`] - 互斥自旋锁
//! - [`RwLock`] - 读写自旋锁（读者共享、写者独占）
//!
//! 两者都以 `lock_api` 的 raw lock trait 实现底层原子协议，
//! RAII guard、`Deref` 等外层 API 直接复用 `lock_api`。

#![no_std]

#[cfg(test)]
extern crate std;

mod raw_spin_lock;
mod rwlock;
mod spin_lock;

pub use raw_spin_lock::RawSpinLock;
pub use rwlock::{RawRwSpinLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
pub use spin_lock::{SpinLock, SpinLockGuard};
