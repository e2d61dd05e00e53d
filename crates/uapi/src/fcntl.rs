//! 文件打开标志

bitflags::bitflags! {
    /// open(2) 标志位（Linux 取值）
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenFlags: u32 {
        const O_RDONLY    = 0o0;
        const O_WRONLY    = 0o1;
        const O_RDWR      = 0o2;
        const O_CREAT     = 0o100;
        const O_EXCL      = 0o200;
        const O_NOCTTY    = 0o400;
        const O_TRUNC     = 0o1000;
        const O_APPEND    = 0o2000;
        const O_NONBLOCK  = 0o4000;
        const O_DIRECTORY = 0o200000;
        const O_NOFOLLOW  = 0o400000;
        const O_CLOEXEC   = 0o2000000;
    }
}

impl OpenFlags {
    /// 访问模式掩码
    pub const O_ACCMODE: u32 = 0o3;

    /// 是否以可写方式打开（O_WRONLY / O_RDWR，或带有隐含写语义的 O_TRUNC）
    pub fn writable(&self) -> bool {
        let acc = self.bits() & Self::O_ACCMODE;
        acc == Self::O_WRONLY.bits() || acc == Self::O_RDWR.bits() || self.contains(Self::O_TRUNC)
    }
}
