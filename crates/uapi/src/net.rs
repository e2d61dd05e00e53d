//! 网络接口相关的 Linux 常量

/// 接口名缓冲区长度（含结尾 NUL）
pub const IFNAMSIZ: usize = 16;

/// 以太网地址长度
pub const ETH_ALEN: usize = 6;

// Linux 接口标志（<linux/if.h>）
/// 接口已启用
pub const IFF_UP: u32 = 0x1;
/// 广播地址有效
pub const IFF_BROADCAST: u32 = 0x2;
/// 调试开关
pub const IFF_DEBUG: u32 = 0x4;
/// 回环接口
pub const IFF_LOOPBACK: u32 = 0x8;
/// 点对点链路
pub const IFF_POINTOPOINT: u32 = 0x10;
/// 不使用 trailer
pub const IFF_NOTRAILERS: u32 = 0x20;
/// 资源已分配
pub const IFF_RUNNING: u32 = 0x40;
/// 不使用 ARP
pub const IFF_NOARP: u32 = 0x80;
/// 混杂模式
pub const IFF_PROMISC: u32 = 0x100;
/// 接收所有组播
pub const IFF_ALLMULTI: u32 = 0x200;
/// 支持组播
pub const IFF_MULTICAST: u32 = 0x1000;

// ARP 硬件类型（<linux/if_arp.h>）
/// 以太网
pub const ARPHRD_ETHER: u32 = 1;
/// IEEE 802.2（令牌环）
pub const ARPHRD_IEEE802: u32 = 6;
/// InfiniBand
pub const ARPHRD_INFINIBAND: u32 = 32;
/// 回环
pub const ARPHRD_LOOPBACK: u32 = 772;
