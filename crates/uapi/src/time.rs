//! 时间相关定义

/// 与 Linux `struct timespec` 布局一致的时间戳
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeSpec {
    /// 秒
    pub tv_sec: i64,
    /// 纳秒
    pub tv_nsec: i64,
}

impl TimeSpec {
    pub const fn new(tv_sec: i64, tv_nsec: i64) -> Self {
        Self { tv_sec, tv_nsec }
    }

    pub const fn zero() -> Self {
        Self::new(0, 0)
    }
}
