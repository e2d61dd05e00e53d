use core::sync::atomic::{AtomicBool, Ordering};

use net::{MediaType, NetInterface};
use vfs::{FsError, InodeType};

use super::*;

#[test]
fn test_handles_outlive_interface() {
    let (fs, table) = sample_fs();
    let mtu = walk(&fs, "/devices/virtual/net/e1000g0/mtu");
    let link = walk(&fs, "/class/net/e1000g0");
    assert_eq!(read_all(&mtu), "1500\n");

    table.unplumb("e1000g0").unwrap();

    let mut buf = [0u8; 16];
    assert_eq!(mtu.read_at(0, &mut buf), Err(FsError::IoError));
    assert_eq!(link.readlink(), Err(FsError::InvalidArgument));

    // 句柄本身仍然有效
    assert_eq!(mtu.metadata().unwrap().inode_type, InodeType::File);
    assert_eq!(link.metadata().unwrap().size, 0);
    assert_eq!(
        walk(&fs, "/devices/virtual/net").lookup("e1000g0", &root()).err(),
        Some(FsError::NotFound)
    );
    assert_eq!(names(&list_all(&walk(&fs, "/class/net"), 4096)), [".", "..", "lo"]);

    // 其他接口不受影响
    assert_eq!(read_all(&walk(&fs, "/devices/virtual/net/lo/mtu")), "8232\n");
}

#[test]
fn test_replug_under_same_index() {
    let (fs, table) = sample_fs();
    let mtu = walk(&fs, "/devices/virtual/net/e1000g0/mtu");

    table.unplumb("e1000g0").unwrap();
    table
        .plumb(NetInterface::new("e1000g1", 2, MediaType::Ether).with_mtu(9000))
        .unwrap();

    // 编号只记录索引，重新出现的索引读到新接口的状态
    assert_eq!(read_all(&mtu), "9000\n");
    assert_eq!(
        walk(&fs, "/class/net/e1000g1").readlink().unwrap(),
        "/sys/devices/virtual/net/e1000g1"
    );
}

#[test]
fn test_concurrent_readers_and_reconfiguration() {
    use std::thread;

    let (fs, table) = sample_fs();
    let stop = Arc::new(AtomicBool::new(false));

    let writer = {
        let stop = stop.clone();
        thread::spawn(move || {
            for round in 0..200u32 {
                let name = alloc::format!("vnic{}", round % 4);
                let index = 10 + round % 4;
                if table.get_by_name(&name).is_some() {
                    table.unplumb(&name).unwrap();
                } else {
                    table
                        .plumb(NetInterface::new(&name, index, MediaType::Ether).with_mtu(1400))
                        .unwrap();
                }
                if round % 7 == 0 {
                    table.modify("e1000g0", |iface| iface.mtu = 1500).unwrap();
                }
            }
            stop.store(true, Ordering::Release);
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|id| {
            let fs = fs.clone();
            let stop = stop.clone();
            thread::spawn(move || {
                let cred = root();
                while !stop.load(Ordering::Acquire) {
                    let net = walk(&fs, "/class/net");
                    let entries = list_all(&net, 64);
                    assert!(names(&entries).starts_with(&[".", "..", "lo"]));

                    let ifname = alloc::format!("vnic{}", id);
                    let path = alloc::format!("/devices/virtual/net/{}/mtu", ifname);
                    match walk_path(fs.root_inode(), &path, &cred) {
                        Ok(mtu) => {
                            let mut buf = [0u8; 16];
                            match mtu.read_at(0, &mut buf) {
                                Ok(n) => assert_eq!(&buf[..n], b"1400\n"),
                                Err(err) => assert_eq!(err, FsError::IoError),
                            }
                        }
                        Err(err) => assert_eq!(err, FsError::NotFound),
                    }

                    assert_eq!(
                        read_all(&walk(&fs, "/devices/virtual/net/e1000g0/mtu")),
                        "1500\n"
                    );
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    // 所有句柄释放后只剩根节点
    assert_eq!(fs.root().live_nodes(), 1);
}
