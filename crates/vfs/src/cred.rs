//! 调用者凭据与访问检查模式

use alloc::vec::Vec;

bitflags::bitflags! {
    /// 访问检查请求的权限
    ///
    /// 取值与属主权限位对齐（0o400/0o200/0o100），
    /// 这样按属主/组/其他检查时只需把权限位左移到属主位置再比较。
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AccessMode: u32 {
        /// 读
        const READ  = 0o400;
        /// 写
        const WRITE = 0o200;
        /// 执行/搜索
        const EXEC  = 0o100;
    }
}

/// 调用者凭据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// 有效用户 ID
    pub uid: u32,
    /// 有效组 ID
    pub gid: u32,
    /// 附加组
    pub groups: Vec<u32>,
    /// 是否为特权调用者（绕过权限位检查）
    pub privileged: bool,
}

impl Credential {
    /// 特权 root 凭据
    pub fn root() -> Self {
        Self {
            uid: 0,
            gid: 0,
            groups: Vec::new(),
            privileged: true,
        }
    }

    /// 普通用户凭据
    pub fn user(uid: u32, gid: u32) -> Self {
        Self {
            uid,
            gid,
            groups: Vec::new(),
            privileged: false,
        }
    }

    /// 追加附加组
    pub fn with_groups(mut self, groups: &[u32]) -> Self {
        self.groups.extend_from_slice(groups);
        self
    }

    /// 是否属于指定组（有效组或附加组）
    pub fn in_group(&self, gid: u32) -> bool {
        self.gid == gid || self.groups.contains(&gid)
    }
}
