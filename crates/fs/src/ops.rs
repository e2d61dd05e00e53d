//! FS 运行时操作 trait 定义和注册
//!
//! 此模块定义了 FS 层需要的外部依赖接口，通过 trait 抽象实现与 os crate 的解耦。

use core::sync::atomic::{AtomicUsize, Ordering};
use uapi::time::TimeSpec;

/// FS 运行时操作
///
/// os crate 需要实现此 trait 并在启动时注册。
pub trait FsOps: Send + Sync {
    /// 获取当前时间
    fn timespec_now(&self) -> TimeSpec;
}

// ========== FsOps 注册 ==========

static FS_OPS_DATA: AtomicUsize = AtomicUsize::new(0);
static FS_OPS_VTABLE: AtomicUsize = AtomicUsize::new(0);

/// 注册 FS 操作实现
///
/// # Safety
/// 必须在单线程环境下调用，且只能调用一次
pub unsafe fn register_fs_ops(ops: &'static dyn FsOps) {
    let ptr = ops as *const dyn FsOps;
    // SAFETY: 将 fat pointer 拆分为 data 和 vtable 两部分存储
    let (data, vtable) =
        unsafe { core::mem::transmute::<*const dyn FsOps, (usize, usize)>(ptr) };
    FS_OPS_DATA.store(data, Ordering::Release);
    FS_OPS_VTABLE.store(vtable, Ordering::Release);
}

/// 获取已注册的 FS 操作实现
///
/// # Panics
/// 如果尚未调用 [`register_fs_ops`] 注册实现，则 panic
#[inline]
pub fn fs_ops() -> &'static dyn FsOps {
    let data = FS_OPS_DATA.load(Ordering::Acquire);
    let vtable = FS_OPS_VTABLE.load(Ordering::Acquire);
    if data == 0 {
        #[cfg(test)]
        {
            extern crate test_support;
            return &test_support::mock::fs::MOCK_FS_OPS;
        }
        #[cfg(not(test))]
        panic!("fs: FsOps not registered");
    }
    // SAFETY: 重组 fat pointer
    unsafe { &*core::mem::transmute::<(usize, usize), *const dyn FsOps>((data, vtable)) }
}

#[cfg(test)]
mod test_mock {
    extern crate test_support;

    use super::FsOps;
    use uapi::time::TimeSpec;

    impl FsOps for test_support::mock::fs::MockFsOps {
        fn timespec_now(&self) -> TimeSpec {
            TimeSpec::new(test_support::mock::fs::MOCK_EPOCH_SECS, 0)
        }
    }

    #[test]
    fn test_fs_ops_fallback_does_not_panic() {
        assert_eq!(
            super::fs_ops().timespec_now().tv_sec,
            test_support::mock::fs::MOCK_EPOCH_SECS
        );
    }
}
