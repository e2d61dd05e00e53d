//! 网络接口集合
//!
//! 活动接口同时按名称和按索引排序存放，两个视图由同一把 [`RwLock`] 保护。
//! 记录本身以 `Arc` 共享且不可变：修改接口属性时替换整条记录，
//! 这样读者可以在释放读锁之后继续使用手里的快照。

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use lazy_static::lazy_static;
use smoltcp::wire::EthernetAddress;
use sync::{RwLock, RwLockReadGuard};
use uapi::net::{ARPHRD_ETHER, ARPHRD_IEEE802, ARPHRD_INFINIBAND, ETH_ALEN, IFNAMSIZ};

bitflags::bitflags! {
    /// 协议栈原生的接口标志位
    ///
    /// 低 16 位之外还有地址族等扩展位；低 16 位与 Linux 并不完全一致，
    /// 对外展示前需要翻译。
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IfFlags: u64 {
        /// 接口已启用
        const UP = 0x1;
        /// 广播地址有效
        const BROADCAST = 0x2;
        /// 调试模式
        const DEBUG = 0x4;
        /// 回环接口
        const LOOPBACK = 0x8;
        /// 点对点链路
        const POINTOPOINT = 0x10;
        /// 避免使用 trailer
        const NOTRAILERS = 0x20;
        /// 资源已分配
        const RUNNING = 0x40;
        /// 不使用 ARP
        const NOARP = 0x80;
        /// 混杂模式
        const PROMISC = 0x100;
        /// 接收所有组播
        const ALLMULTI = 0x200;
        /// 协议代码在板卡上
        const INTELLIGENT = 0x400;
        /// 支持组播
        const MULTICAST = 0x800;
        /// 组播通过广播发送
        const MULTI_BCAST = 0x1000;
        /// 无编号地址
        const UNNUMBERED = 0x2000;
        /// DHCP 管理中
        const DHCPRUNNING = 0x4000;
        /// 不对外通告
        const PRIVATE = 0x8000;
        /// IPv4 接口
        const IPV4 = 0x100_0000;
        /// IPv6 接口
        const IPV6 = 0x200_0000;
    }
}

/// 链路介质类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    /// 未知介质
    Other,
    /// 以太网
    Ether,
    /// IEEE 802.3 CSMA/CD
    Csmacd,
    /// IEEE 802.4 令牌总线
    TokenBus,
    /// IEEE 802.5 令牌环
    TokenRing,
    /// FDDI
    Fddi,
    /// InfiniBand
    Infiniband,
    /// IPv4 隧道
    Ipv4Tunnel,
    /// IPv6 隧道
    Ipv6Tunnel,
    /// 6to4 隧道
    SixToFour,
    /// 虚拟网络接口
    Vni,
    /// 软件回环
    Loopback,
}

/// IPIP 隧道的 ARP 硬件类型
const ARPHRD_IPIP: u32 = 4;
/// IPv6-in-IPv4 隧道的 ARP 硬件类型
const ARPHRD_SIT: u32 = 41;

impl MediaType {
    /// 介质对应的 ARP 硬件类型
    ///
    /// 回环接口不在此处特殊处理，由调用方按接口标志决定。
    pub fn arp_hw_type(self) -> u32 {
        match self {
            MediaType::Ether
            | MediaType::Csmacd
            | MediaType::TokenBus
            | MediaType::Fddi
            | MediaType::Vni
            | MediaType::Other
            | MediaType::Loopback => ARPHRD_ETHER,
            MediaType::TokenRing => ARPHRD_IEEE802,
            MediaType::Infiniband => ARPHRD_INFINIBAND,
            MediaType::Ipv4Tunnel => ARPHRD_IPIP,
            MediaType::Ipv6Tunnel | MediaType::SixToFour => ARPHRD_SIT,
        }
    }
}

/// 一个网络接口的记录
#[derive(Debug, Clone)]
pub struct NetInterface {
    /// 原生接口名（如 `lo0`、`e1000g0`）
    pub name: String,
    /// 协议栈分配的接口索引，从 1 开始
    pub index: u32,
    /// 原生标志位
    pub flags: IfFlags,
    /// 物理地址
    pub hw_addr: Vec<u8>,
    /// MTU
    pub mtu: u32,
    /// 介质类型
    pub media: MediaType,
}

impl NetInterface {
    /// 创建接口记录，物理地址为空
    pub fn new(name: &str, index: u32, media: MediaType) -> Self {
        Self {
            name: String::from(name),
            index,
            flags: IfFlags::empty(),
            hw_addr: Vec::new(),
            mtu: 1500,
            media,
        }
    }

    /// 设置标志位
    pub fn with_flags(mut self, flags: IfFlags) -> Self {
        self.flags = flags;
        self
    }

    /// 设置物理地址
    pub fn with_hw_addr(mut self, addr: &[u8]) -> Self {
        self.hw_addr = Vec::from(addr);
        self
    }

    /// 设置 MTU
    pub fn with_mtu(mut self, mtu: u32) -> Self {
        self.mtu = mtu;
        self
    }

    /// 是否为回环接口
    pub fn is_loopback(&self) -> bool {
        self.flags.contains(IfFlags::LOOPBACK)
    }

    /// 物理地址长度（字节）
    pub fn addr_len(&self) -> usize {
        self.hw_addr.len()
    }

    /// 以太网长度的物理地址
    pub fn ethernet_address(&self) -> Option<EthernetAddress> {
        if self.hw_addr.len() == ETH_ALEN {
            Some(EthernetAddress::from_bytes(&self.hw_addr))
        } else {
            None
        }
    }
}

/// 接口集合修改失败的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceError {
    /// 接口名为空或过长
    InvalidName,
    /// 索引为 0
    InvalidIndex,
    /// 同名接口已存在
    NameInUse,
    /// 同索引接口已存在
    IndexInUse,
    /// 接口不存在
    NotFound,
}

impl fmt::Display for InterfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            InterfaceError::InvalidName => "invalid interface name",
            InterfaceError::InvalidIndex => "invalid interface index",
            InterfaceError::NameInUse => "interface name in use",
            InterfaceError::IndexInUse => "interface index in use",
            InterfaceError::NotFound => "no such interface",
        };
        f.write_str(msg)
    }
}

/// 按名称和按索引排序的两个视图
///
/// 两个视图始终包含同一组记录。
pub struct InterfaceLists {
    by_name: BTreeMap<String, Arc<NetInterface>>,
    by_index: BTreeMap<u32, Arc<NetInterface>>,
}

impl InterfaceLists {
    const fn new() -> Self {
        Self {
            by_name: BTreeMap::new(),
            by_index: BTreeMap::new(),
        }
    }

    /// 按原生名称查找
    pub fn find_by_name(&self, name: &str) -> Option<&Arc<NetInterface>> {
        self.by_name.get(name)
    }

    /// 按索引查找
    pub fn find_by_index(&self, index: u32) -> Option<&Arc<NetInterface>> {
        self.by_index.get(&index)
    }

    /// 按索引升序遍历
    pub fn iter_by_index(&self) -> impl Iterator<Item = &Arc<NetInterface>> {
        self.by_index.values()
    }

    /// 接口数量
    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    /// 是否没有任何接口
    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

/// 活动接口集合
pub struct InterfaceTable {
    lists: RwLock<InterfaceLists>,
}

impl InterfaceTable {
    /// 创建空集合
    pub const fn new() -> Self {
        Self {
            lists: RwLock::new(InterfaceLists::new()),
        }
    }

    /// 获取读锁
    ///
    /// 持有期间集合不会变化；调用方应尽快释放。
    pub fn read(&self) -> RwLockReadGuard<'_, InterfaceLists> {
        self.lists.read()
    }

    /// 按原生名称取得记录快照
    pub fn get_by_name(&self, name: &str) -> Option<Arc<NetInterface>> {
        self.lists.read().find_by_name(name).cloned()
    }

    /// 按索引取得记录快照
    pub fn get_by_index(&self, index: u32) -> Option<Arc<NetInterface>> {
        self.lists.read().find_by_index(index).cloned()
    }

    /// 加入一个接口
    pub fn plumb(&self, iface: NetInterface) -> Result<Arc<NetInterface>, InterfaceError> {
        if iface.name.is_empty() || iface.name.len() >= IFNAMSIZ {
            return Err(InterfaceError::InvalidName);
        }
        if iface.index == 0 {
            return Err(InterfaceError::InvalidIndex);
        }

        let mut lists = self.lists.write();
        if lists.by_name.contains_key(&iface.name) {
            return Err(InterfaceError::NameInUse);
        }
        if lists.by_index.contains_key(&iface.index) {
            return Err(InterfaceError::IndexInUse);
        }

        let iface = Arc::new(iface);
        lists.by_name.insert(iface.name.clone(), iface.clone());
        lists.by_index.insert(iface.index, iface.clone());
        drop(lists);

        log::debug!("net: plumbed {} (index {})", iface.name, iface.index);
        Ok(iface)
    }

    /// 移除一个接口
    pub fn unplumb(&self, name: &str) -> Result<Arc<NetInterface>, InterfaceError> {
        let mut lists = self.lists.write();
        let iface = lists.by_name.remove(name).ok_or(InterfaceError::NotFound)?;
        lists.by_index.remove(&iface.index);
        drop(lists);

        log::debug!("net: unplumbed {} (index {})", iface.name, iface.index);
        Ok(iface)
    }

    /// 修改接口属性
    ///
    /// 名称和索引不可修改；闭包中对它们的改动会被丢弃。
    pub fn modify<F>(&self, name: &str, f: F) -> Result<Arc<NetInterface>, InterfaceError>
    where
        F: FnOnce(&mut NetInterface),
    {
        let mut lists = self.lists.write();
        let old = lists.by_name.get(name).ok_or(InterfaceError::NotFound)?;

        let mut updated = NetInterface::clone(old);
        f(&mut updated);
        updated.name = old.name.clone();
        updated.index = old.index;

        let updated = Arc::new(updated);
        lists.by_name.insert(updated.name.clone(), updated.clone());
        lists.by_index.insert(updated.index, updated.clone());
        Ok(updated)
    }
}

impl Default for InterfaceTable {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    /// 全局活动接口集合
    pub static ref NET_INTERFACES: InterfaceTable = InterfaceTable::new();
}
