//! sysfs 测试
//!
//! 每个测试使用自己的接口集合，互不干扰。

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use net::{IfFlags, InterfaceTable, MediaType, NetInterface};
use vfs::{Credential, DirEntry, FileSystem, Inode, walk_path};

use crate::sysfs::SysFS;

mod concurrency;
mod lifecycle;

/// 空的接口集合
fn empty_table() -> &'static InterfaceTable {
    Box::leak(Box::new(InterfaceTable::new()))
}

/// 含 `lo0`（索引 1）和 `e1000g0`（索引 2）的接口集合
fn sample_table() -> &'static InterfaceTable {
    let table = empty_table();
    table
        .plumb(
            NetInterface::new("lo0", 1, MediaType::Loopback)
                .with_flags(
                    IfFlags::UP
                        | IfFlags::LOOPBACK
                        | IfFlags::RUNNING
                        | IfFlags::MULTICAST
                        | IfFlags::IPV4,
                )
                .with_mtu(8232),
        )
        .unwrap();
    table
        .plumb(
            NetInterface::new("e1000g0", 2, MediaType::Ether)
                .with_flags(
                    IfFlags::UP
                        | IfFlags::BROADCAST
                        | IfFlags::RUNNING
                        | IfFlags::MULTICAST
                        | IfFlags::IPV4,
                )
                .with_hw_addr(&[0x02, 0x08, 0x20, 0xab, 0xcd, 0xef])
                .with_mtu(1500),
        )
        .unwrap();
    table
}

fn sample_fs() -> (Arc<SysFS>, &'static InterfaceTable) {
    let table = sample_table();
    (SysFS::new(table), table)
}

fn root() -> Credential {
    Credential::root()
}

fn user() -> Credential {
    Credential::user(1000, 1000)
}

fn walk(fs: &SysFS, path: &str) -> Arc<dyn Inode> {
    walk_path(fs.root_inode(), path, &root()).unwrap()
}

/// 以 `budget` 为每页预算列出整个目录
fn list_all(dir: &Arc<dyn Inode>, budget: usize) -> Vec<DirEntry> {
    let mut entries = Vec::new();
    let mut offset = 0;
    for _ in 0..1000 {
        let page = dir.readdir(offset, budget, &root()).unwrap();
        entries.extend(page.entries);
        offset = page.next_offset;
        if page.eof {
            return entries;
        }
    }
    panic!("listing did not terminate");
}

fn names(entries: &[DirEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

fn read_all(node: &Arc<dyn Inode>) -> String {
    let mut buf = [0u8; 128];
    let n = node.read_at(0, &mut buf).unwrap();
    String::from(core::str::from_utf8(&buf[..n]).unwrap())
}
