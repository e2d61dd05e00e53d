//! 分页列目录
//!
//! 目录项按位置编址：位置 0 是 `.`，位置 1 是 `..`，其后是子项。
//! 每个位置占 [`DIR_SLOT_SIZE`] 字节的偏移空间，偏移量就是续读令牌，
//! 每次调用都从偏移量重新推算要跳过的项数，不保留任何迭代状态。
//!
//! 接口列表取自活动接口集合的按索引遍历。两次调用之间接口可能增删，
//! 续读时因此可能跳过或重复个别接口。

use vfs::{DirPage, DirPageBuilder, FsError, InodeType};

use crate::sysfs::DIR_SLOT_SIZE;
use crate::sysfs::compat::linux_ifname;
use crate::sysfs::dirs::{NET_ATTRS, static_children};
use crate::sysfs::ino::{MAX_IFINDEX, SysIno, SysNodeKind};
use crate::sysfs::node::SysfsNode;

/// 从 `offset` 开始列出 `dir` 的一页目录项
pub(super) fn list(dir: &SysfsNode, offset: i64, budget: usize) -> Result<DirPage, FsError> {
    let mut page = DirPageBuilder::new(offset, budget, DIR_SLOT_SIZE)?;
    let ino = dir.ino();

    if !push_dots(&mut page, ino)? {
        return Ok(page.finish(false));
    }

    let eof = match ino.kind {
        SysNodeKind::Static => {
            let children = ino.static_dir().map(static_children).unwrap_or(&[]);
            let entries = children
                .iter()
                .map(|entry| (entry.name, entry.target.encode(), entry.target.inode_type()));
            push_table(&mut page, entries, children.len())?
        }
        _ if ino.is_interface_listing() => push_interfaces(&mut page, dir, ino.kind)?,
        SysNodeKind::DevicesNet => {
            let entries = NET_ATTRS.iter().map(|(attr, name)| {
                let child = SysIno::new(SysNodeKind::DevicesNet, ino.instance, *attr as u8);
                (*name, child.encode(), InodeType::File)
            });
            push_table(&mut page, entries, NET_ATTRS.len())?
        }
        SysNodeKind::ClassNet => return Err(FsError::NotDirectory),
    };

    Ok(page.finish(eof))
}

/// 推入 `.` 和 `..`，预算不足以推完时返回 `false`
fn push_dots(page: &mut DirPageBuilder, ino: SysIno) -> Result<bool, FsError> {
    if page.position() == 0 && !page.push(".", ino.encode(), InodeType::Directory)? {
        return Ok(false);
    }
    if page.position() == 1 && !page.push("..", ino.parent().encode(), InodeType::Directory)? {
        return Ok(false);
    }
    Ok(true)
}

/// 推入固定表中的子项，返回是否已到末尾
fn push_table<'a, I>(page: &mut DirPageBuilder, entries: I, len: usize) -> Result<bool, FsError>
where
    I: Iterator<Item = (&'a str, u64, InodeType)>,
{
    let skip = page.position() - 2;
    for (name, inode_no, inode_type) in entries.skip(skip) {
        if !page.push(name, inode_no, inode_type)? {
            break;
        }
    }
    Ok(page.offset() >= (len as i64 + 2) * DIR_SLOT_SIZE)
}

/// 推入活动接口，返回遍历是否已穷尽
fn push_interfaces(
    page: &mut DirPageBuilder,
    dir: &SysfsNode,
    kind: SysNodeKind,
) -> Result<bool, FsError> {
    let skip = page.position() - 2;
    let lists = dir.interfaces().read();

    let mut walk = lists
        .iter_by_index()
        .filter(|iface| {
            let addressable = iface.index <= MAX_IFINDEX;
            if !addressable {
                log::warn!(
                    "sysfs: hiding {} with unaddressable ifindex {}",
                    iface.name,
                    iface.index
                );
            }
            addressable
        })
        .skip(skip)
        .peekable();

    while let Some(&iface) = walk.peek() {
        let Some(child) = SysIno::of_interface(kind, iface.index, 0) else {
            walk.next();
            continue;
        };
        if !page.push(linux_ifname(&iface.name), child.encode(), child.inode_type())? {
            return Ok(false);
        }
        walk.next();
    }
    Ok(true)
}
