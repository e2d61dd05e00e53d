//! 节点编号编解码
//!
//! sysfs 没有后备存储，节点编号本身携带全部语义：
//!
//! ```text
//! 63         32 31    24 23            8 7        0
//! +------------+--------+---------------+----------+
//! |     0      |  kind  |   instance    | endpoint |
//! +------------+--------+---------------+----------+
//! ```
//!
//! - `kind`：节点类别（[`SysNodeKind`]）
//! - `instance`：静态目录编号（[`StaticDir`]），或网络接口索引（0 表示子树根目录本身）
//! - `endpoint`：接口目录下的属性文件编号（0 表示接口目录本身）

use vfs::InodeType;

const KIND_SHIFT: u32 = 24;
const INSTANCE_SHIFT: u32 = 8;
const INSTANCE_MASK: u64 = 0xffff;
const ENDPOINT_MASK: u64 = 0xff;

/// instance 字段能容纳的最大接口索引
pub const MAX_IFINDEX: u32 = 0xffff;

/// 节点类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum SysNodeKind {
    /// 固定骨架中的目录
    Static = 1,
    /// `/sys/class/net` 及其中每个接口的符号链接
    ClassNet = 2,
    /// `/sys/devices/virtual/net` 及其中每个接口的目录和属性文件
    DevicesNet = 3,
}

impl SysNodeKind {
    fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(SysNodeKind::Static),
            2 => Some(SysNodeKind::ClassNet),
            3 => Some(SysNodeKind::DevicesNet),
            _ => None,
        }
    }
}

/// 静态目录编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u16)]
pub enum StaticDir {
    /// `/`
    Root = 0,
    /// `/class`
    Class = 1,
    /// `/devices`
    Devices = 2,
    /// `/fs`
    Fs = 3,
    /// `/class/net`
    ClassNet = 4,
    /// `/devices/virtual`
    DevicesVirtual = 5,
    /// `/devices/system`
    DevicesSystem = 6,
    /// `/fs/cgroup`
    FsCgroup = 7,
    /// `/devices/virtual/net`
    DevicesVirtualNet = 8,
}

impl StaticDir {
    /// 由 instance 字段还原
    pub fn from_instance(instance: u16) -> Option<Self> {
        let dir = match instance {
            0 => StaticDir::Root,
            1 => StaticDir::Class,
            2 => StaticDir::Devices,
            3 => StaticDir::Fs,
            4 => StaticDir::ClassNet,
            5 => StaticDir::DevicesVirtual,
            6 => StaticDir::DevicesSystem,
            7 => StaticDir::FsCgroup,
            8 => StaticDir::DevicesVirtualNet,
            _ => return None,
        };
        Some(dir)
    }

    /// 结构上的父目录
    pub fn parent(self) -> StaticDir {
        match self {
            StaticDir::Root | StaticDir::Class | StaticDir::Devices | StaticDir::Fs => {
                StaticDir::Root
            }
            StaticDir::ClassNet => StaticDir::Class,
            StaticDir::DevicesVirtual | StaticDir::DevicesSystem => StaticDir::Devices,
            StaticDir::FsCgroup => StaticDir::Fs,
            StaticDir::DevicesVirtualNet => StaticDir::DevicesVirtual,
        }
    }
}

/// 解码后的节点编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SysIno {
    /// 节点类别
    pub kind: SysNodeKind,
    /// 静态目录编号或接口索引
    pub instance: u16,
    /// 属性文件编号
    pub endpoint: u8,
}

impl SysIno {
    /// 根目录
    pub const ROOT: SysIno = SysIno::of_static(StaticDir::Root);
    /// `/sys/class/net`
    pub const CLASS_NET_ROOT: SysIno = SysIno::new(SysNodeKind::ClassNet, 0, 0);
    /// `/sys/devices/virtual/net`
    pub const DEVICES_NET_ROOT: SysIno = SysIno::new(SysNodeKind::DevicesNet, 0, 0);

    /// 由三个字段构造
    pub const fn new(kind: SysNodeKind, instance: u16, endpoint: u8) -> Self {
        Self {
            kind,
            instance,
            endpoint,
        }
    }

    /// 静态目录的编号
    pub const fn of_static(dir: StaticDir) -> Self {
        Self::new(SysNodeKind::Static, dir as u16, 0)
    }

    /// 接口相关节点的编号，索引超出 instance 字段时返回 `None`
    pub fn of_interface(kind: SysNodeKind, ifindex: u32, endpoint: u8) -> Option<Self> {
        let instance = u16::try_from(ifindex).ok()?;
        Some(Self::new(kind, instance, endpoint))
    }

    /// 编码为节点号
    pub const fn encode(self) -> u64 {
        ((self.kind as u64) << KIND_SHIFT)
            | ((self.instance as u64) << INSTANCE_SHIFT)
            | self.endpoint as u64
    }

    /// 由节点号解码
    ///
    /// 超出 32 位或 kind 未知时返回 `None`。
    pub fn decode(ino: u64) -> Option<Self> {
        if ino >> 32 != 0 {
            return None;
        }
        let kind = SysNodeKind::from_raw((ino >> KIND_SHIFT) as u8)?;
        Some(Self {
            kind,
            instance: ((ino >> INSTANCE_SHIFT) & INSTANCE_MASK) as u16,
            endpoint: (ino & ENDPOINT_MASK) as u8,
        })
    }

    /// 静态目录编号（仅 `Static` 类别）
    pub fn static_dir(self) -> Option<StaticDir> {
        match self.kind {
            SysNodeKind::Static => StaticDir::from_instance(self.instance),
            _ => None,
        }
    }

    /// 接口索引（子树根目录返回 `None`）
    pub fn ifindex(self) -> Option<u32> {
        match self.kind {
            SysNodeKind::Static => None,
            _ if self.instance == 0 => None,
            _ => Some(self.instance as u32),
        }
    }

    /// 结构上的父节点编号
    ///
    /// 根目录是它自己的父目录。
    pub fn parent(self) -> SysIno {
        match self.kind {
            SysNodeKind::Static => match self.static_dir() {
                Some(dir) => SysIno::of_static(dir.parent()),
                None => SysIno::ROOT,
            },
            SysNodeKind::ClassNet if self.instance == 0 => SysIno::of_static(StaticDir::Class),
            SysNodeKind::ClassNet => SysIno::CLASS_NET_ROOT,
            SysNodeKind::DevicesNet if self.instance == 0 => {
                SysIno::of_static(StaticDir::DevicesVirtual)
            }
            SysNodeKind::DevicesNet if self.endpoint == 0 => SysIno::DEVICES_NET_ROOT,
            SysNodeKind::DevicesNet => SysIno::new(SysNodeKind::DevicesNet, self.instance, 0),
        }
    }

    /// 节点类型，完全由编号决定
    pub fn inode_type(self) -> InodeType {
        match self.kind {
            SysNodeKind::Static => InodeType::Directory,
            SysNodeKind::ClassNet if self.instance == 0 => InodeType::Directory,
            SysNodeKind::ClassNet => InodeType::Symlink,
            SysNodeKind::DevicesNet if self.instance != 0 && self.endpoint != 0 => InodeType::File,
            SysNodeKind::DevicesNet => InodeType::Directory,
        }
    }

    /// 是否为列出活动接口的目录
    pub fn is_interface_listing(self) -> bool {
        self == SysIno::CLASS_NET_ROOT || self == SysIno::DEVICES_NET_ROOT
    }
}
