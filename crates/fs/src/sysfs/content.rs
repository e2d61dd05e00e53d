//! 属性文件内容与符号链接目标
//!
//! 接口记录只在读锁下取出快照，格式化在锁外进行。

use alloc::format;
use alloc::string::{String, ToString};

use net::{InterfaceTable, NetInterface};
use uapi::net::ETH_ALEN;
use vfs::FsError;

use crate::sysfs::compat::{linux_hw_type, linux_ifflags, linux_ifname};
use crate::sysfs::dirs::NetAttr;
use crate::sysfs::ino::SysIno;

/// 读取接口属性文件的完整内容
pub(super) fn read_attr(interfaces: &InterfaceTable, ino: SysIno) -> Result<String, FsError> {
    let ifindex = ino.ifindex().ok_or(FsError::IsDirectory)?;
    if ino.endpoint == 0 {
        return Err(FsError::IsDirectory);
    }

    let iface = interfaces.get_by_index(ifindex).ok_or_else(|| {
        log::debug!("sysfs: interface {} vanished before read", ifindex);
        FsError::IoError
    })?;
    let attr = NetAttr::from_endpoint(ino.endpoint).ok_or(FsError::IoError)?;

    Ok(format_attr(&iface, attr))
}

/// 格式化一个属性
pub fn format_attr(iface: &NetInterface, attr: NetAttr) -> String {
    match attr {
        NetAttr::Address => match iface.ethernet_address() {
            // smoltcp 的 Display 以 `-` 分隔，Linux 用 `:`
            Some(addr) => {
                let b = addr.as_bytes();
                format!(
                    "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}\n",
                    b[0], b[1], b[2], b[3], b[4], b[5]
                )
            }
            None => "00:00:00:00:00:00\n".to_string(),
        },
        NetAttr::AddrLen => {
            let len = if iface.is_loopback() {
                ETH_ALEN
            } else {
                iface.addr_len()
            };
            format!("{}\n", len)
        }
        NetAttr::Flags => format!("0x{:x}\n", linux_ifflags(iface.flags)),
        NetAttr::Ifindex => format!("{}\n", iface.index),
        NetAttr::Mtu => format!("{}\n", iface.mtu),
        NetAttr::TxQueueLen => {
            if iface.is_loopback() {
                "0\n".to_string()
            } else {
                "1\n".to_string()
            }
        }
        NetAttr::Type => format!("{}\n", linux_hw_type(iface)),
    }
}

/// `/sys/class/net/<name>` 的链接目标
pub(super) fn class_net_target(interfaces: &InterfaceTable, ino: SysIno) -> Result<String, FsError> {
    let ifindex = ino.ifindex().ok_or(FsError::InvalidArgument)?;
    let iface = interfaces.get_by_index(ifindex).ok_or_else(|| {
        log::debug!("sysfs: interface {} vanished before readlink", ifindex);
        FsError::InvalidArgument
    })?;
    Ok(format!(
        "/sys/devices/virtual/net/{}",
        linux_ifname(&iface.name)
    ))
}
