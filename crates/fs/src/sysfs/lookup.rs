//! 目录项查找
//!
//! 按目录节点的类别分派：静态目录查表，接口列表目录查活动接口集合，
//! 接口目录查属性表。`.`、`..` 由调用方在分派前处理。

use alloc::sync::Arc;

use vfs::FsError;

use crate::sysfs::SYSFS_NAME_MAX;
use crate::sysfs::compat::native_ifname;
use crate::sysfs::dirs::{NetAttr, static_children};
use crate::sysfs::ino::{SysIno, SysNodeKind};
use crate::sysfs::node::SysfsNode;

/// 在 `dir` 下查找名为 `name` 的子节点
pub(super) fn lookup_child(dir: &Arc<SysfsNode>, name: &str) -> Result<Arc<SysfsNode>, FsError> {
    if name.len() > SYSFS_NAME_MAX {
        return Err(FsError::NameTooLong);
    }

    let ino = dir.ino();
    match ino.kind {
        SysNodeKind::Static => lookup_static(dir, name),
        SysNodeKind::ClassNet | SysNodeKind::DevicesNet if ino.instance == 0 => {
            lookup_interface(dir, name, ino.kind)
        }
        SysNodeKind::DevicesNet if ino.endpoint == 0 => lookup_attr(dir, name),
        _ => Err(FsError::NotFound),
    }
}

fn lookup_static(dir: &Arc<SysfsNode>, name: &str) -> Result<Arc<SysfsNode>, FsError> {
    let table = dir.ino().static_dir().ok_or(FsError::NotFound)?;
    let entry = static_children(table)
        .iter()
        .find(|entry| entry.name == name)
        .ok_or(FsError::NotFound)?;
    Ok(dir.child(entry.target))
}

fn lookup_interface(
    dir: &Arc<SysfsNode>,
    name: &str,
    kind: SysNodeKind,
) -> Result<Arc<SysfsNode>, FsError> {
    let native = native_ifname(name).ok_or(FsError::NotFound)?;

    // 只在读锁下取索引，物化节点前释放
    let ifindex = dir
        .interfaces()
        .read()
        .find_by_name(native)
        .map(|iface| iface.index)
        .ok_or(FsError::NotFound)?;

    let child = SysIno::of_interface(kind, ifindex, 0).ok_or_else(|| {
        log::warn!("sysfs: {} has unaddressable ifindex {}", native, ifindex);
        FsError::NotFound
    })?;
    Ok(dir.child(child))
}

fn lookup_attr(dir: &Arc<SysfsNode>, name: &str) -> Result<Arc<SysfsNode>, FsError> {
    let attr = NetAttr::from_name(name).ok_or(FsError::NotFound)?;
    let ino = dir.ino();
    Ok(dir.child(SysIno::new(SysNodeKind::DevicesNet, ino.instance, attr as u8)))
}
