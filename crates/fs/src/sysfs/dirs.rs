//! 固定目录骨架与接口属性表
//!
//! 表项顺序即目录列出顺序，不可调整。

use crate::sysfs::ino::{StaticDir, SysIno};

/// 静态目录中的一项
pub struct StaticEntry {
    /// 子项名称
    pub name: &'static str,
    /// 子项解析后的节点编号
    pub target: SysIno,
}

const fn entry(name: &'static str, target: SysIno) -> StaticEntry {
    StaticEntry { name, target }
}

static ROOT_CHILDREN: [StaticEntry; 3] = [
    entry("class", SysIno::of_static(StaticDir::Class)),
    entry("devices", SysIno::of_static(StaticDir::Devices)),
    entry("fs", SysIno::of_static(StaticDir::Fs)),
];

// `net` 直接指向接口子树的根编号，而不是静态目录编号，
// 这样列目录得到的 d_ino 与 lookup 后的 st_ino 一致
static CLASS_CHILDREN: [StaticEntry; 1] = [entry("net", SysIno::CLASS_NET_ROOT)];

static FS_CHILDREN: [StaticEntry; 1] = [entry("cgroup", SysIno::of_static(StaticDir::FsCgroup))];

static DEVICES_CHILDREN: [StaticEntry; 2] = [
    entry("system", SysIno::of_static(StaticDir::DevicesSystem)),
    entry("virtual", SysIno::of_static(StaticDir::DevicesVirtual)),
];

// 同 `/class/net`
static DEVICES_VIRTUAL_CHILDREN: [StaticEntry; 1] = [entry("net", SysIno::DEVICES_NET_ROOT)];

/// 静态目录的子项表
///
/// `/class/net` 与 `/devices/virtual/net` 的内容来自活动接口集合，这里没有表项。
pub fn static_children(dir: StaticDir) -> &'static [StaticEntry] {
    match dir {
        StaticDir::Root => &ROOT_CHILDREN,
        StaticDir::Class => &CLASS_CHILDREN,
        StaticDir::Fs => &FS_CHILDREN,
        StaticDir::Devices => &DEVICES_CHILDREN,
        StaticDir::DevicesVirtual => &DEVICES_VIRTUAL_CHILDREN,
        StaticDir::DevicesSystem
        | StaticDir::FsCgroup
        | StaticDir::ClassNet
        | StaticDir::DevicesVirtualNet => &[],
    }
}

/// 接口目录下的属性文件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NetAttr {
    /// 硬件地址
    Address = 1,
    /// 硬件地址长度
    AddrLen = 2,
    /// 接口标志
    Flags = 3,
    /// 接口索引
    Ifindex = 4,
    /// MTU
    Mtu = 5,
    /// 发送队列长度
    TxQueueLen = 6,
    /// ARP 硬件类型
    Type = 7,
}

/// 属性表（按列出顺序）
pub static NET_ATTRS: [(NetAttr, &str); 7] = [
    (NetAttr::Address, "address"),
    (NetAttr::AddrLen, "addr_len"),
    (NetAttr::Flags, "flags"),
    (NetAttr::Ifindex, "ifindex"),
    (NetAttr::Mtu, "mtu"),
    (NetAttr::TxQueueLen, "tx_queue_len"),
    (NetAttr::Type, "type"),
];

impl NetAttr {
    /// 由 endpoint 字段还原
    pub fn from_endpoint(endpoint: u8) -> Option<Self> {
        NET_ATTRS
            .iter()
            .find(|(attr, _)| *attr as u8 == endpoint)
            .map(|(attr, _)| *attr)
    }

    /// 按名称查找
    pub fn from_name(name: &str) -> Option<Self> {
        NET_ATTRS
            .iter()
            .find(|(_, attr_name)| *attr_name == name)
            .map(|(attr, _)| *attr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_order() {
        let names: alloc::vec::Vec<&str> = static_children(StaticDir::Root)
            .iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["class", "devices", "fs"]);
    }

    #[test]
    fn test_net_subtrees_resolve_to_dynamic_roots() {
        assert_eq!(static_children(StaticDir::Class)[0].target, SysIno::CLASS_NET_ROOT);
        assert_eq!(
            static_children(StaticDir::DevicesVirtual)[0].target,
            SysIno::DEVICES_NET_ROOT
        );
        assert!(static_children(StaticDir::FsCgroup).is_empty());
    }

    #[test]
    fn test_attr_lookup() {
        assert_eq!(NetAttr::from_name("mtu"), Some(NetAttr::Mtu));
        assert_eq!(NetAttr::from_name("speed"), None);
        assert_eq!(NetAttr::from_endpoint(7), Some(NetAttr::Type));
        assert_eq!(NetAttr::from_endpoint(0), None);
        assert_eq!(NetAttr::from_endpoint(8), None);
    }
}
