//! 原生网络约定与 Linux 约定之间的翻译

use net::{IfFlags, NetInterface};
use uapi::net::{
    ARPHRD_LOOPBACK, IFF_ALLMULTI, IFF_BROADCAST, IFF_DEBUG, IFF_LOOPBACK, IFF_MULTICAST,
    IFF_NOARP, IFF_NOTRAILERS, IFF_POINTOPOINT, IFF_PROMISC, IFF_RUNNING, IFF_UP, IFNAMSIZ,
};

const NATIVE_LOOPBACK_NAME: &str = "lo0";
const LINUX_LOOPBACK_NAME: &str = "lo";

/// 原生接口名 -> Linux 接口名
pub fn linux_ifname(native: &str) -> &str {
    if native == NATIVE_LOOPBACK_NAME {
        LINUX_LOOPBACK_NAME
    } else {
        native
    }
}

/// Linux 接口名 -> 原生接口名
///
/// 超出接口名长度上限的名字不可能匹配任何接口，返回 `None`。
pub fn native_ifname(linux: &str) -> Option<&str> {
    if linux.len() >= IFNAMSIZ {
        return None;
    }
    if linux == LINUX_LOOPBACK_NAME {
        Some(NATIVE_LOOPBACK_NAME)
    } else {
        Some(linux)
    }
}

/// 原生标志位与 Linux 取值相同的部分
const SHARED_FLAGS: [(IfFlags, u32); 10] = [
    (IfFlags::UP, IFF_UP),
    (IfFlags::BROADCAST, IFF_BROADCAST),
    (IfFlags::DEBUG, IFF_DEBUG),
    (IfFlags::LOOPBACK, IFF_LOOPBACK),
    (IfFlags::POINTOPOINT, IFF_POINTOPOINT),
    (IfFlags::NOTRAILERS, IFF_NOTRAILERS),
    (IfFlags::RUNNING, IFF_RUNNING),
    (IfFlags::NOARP, IFF_NOARP),
    (IfFlags::PROMISC, IFF_PROMISC),
    (IfFlags::ALLMULTI, IFF_ALLMULTI),
];

/// 原生标志位 -> Linux 标志位
///
/// 只看低 16 位；没有 Linux 对应项的位被丢弃。
pub fn linux_ifflags(native: IfFlags) -> u32 {
    let native = IfFlags::from_bits_truncate(native.bits() & 0xffff);

    let mut flags = 0;
    for (native_bit, linux_bit) in SHARED_FLAGS {
        if native.contains(native_bit) {
            flags |= linux_bit;
        }
    }
    if native.contains(IfFlags::MULTICAST) {
        flags |= IFF_MULTICAST;
    }
    flags
}

/// 接口的 Linux ARP 硬件类型
pub fn linux_hw_type(iface: &NetInterface) -> u32 {
    if iface.is_loopback() {
        ARPHRD_LOOPBACK
    } else {
        iface.media.arp_hw_type()
    }
}
