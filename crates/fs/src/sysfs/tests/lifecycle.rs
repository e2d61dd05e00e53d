use core::any::Any;

use uapi::time::TimeSpec;
use vfs::{
    AccessMode, DirPage, DirPageBuilder, FileMode, FileSystem, FsError, InodeMetadata, InodeType,
    OpenFlags,
};

use super::*;
use crate::sysfs::{SysfsNode, SysfsOptions};

/// 充当真实 cgroup 目录的节点，只允许 root 访问
struct FakeCgroupDir {
    children: Vec<Arc<FakeCgroupFile>>,
}

struct FakeCgroupFile {
    name: &'static str,
    inode_no: u64,
    data: &'static [u8],
}

const FAKE_DIR_INO: u64 = 0xc0ffee;

impl FakeCgroupDir {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            children: alloc::vec![
                Arc::new(FakeCgroupFile {
                    name: "cgroup.procs",
                    inode_no: 0xc0fff0,
                    data: b"1\n",
                }),
                Arc::new(FakeCgroupFile {
                    name: "cpu.max",
                    inode_no: 0xc0fff1,
                    data: b"max 100000\n",
                }),
            ],
        })
    }
}

fn fake_metadata(inode_no: u64, inode_type: InodeType, perm: u32, size: usize) -> InodeMetadata {
    InodeMetadata {
        inode_no,
        inode_type,
        mode: FileMode::with_type(inode_type, perm),
        uid: 0,
        gid: 0,
        size,
        atime: TimeSpec::zero(),
        mtime: TimeSpec::zero(),
        ctime: TimeSpec::zero(),
        nlinks: 1,
        blocks: 0,
        rdev: 0,
    }
}

impl Inode for FakeCgroupDir {
    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        Ok(fake_metadata(FAKE_DIR_INO, InodeType::Directory, 0o700, 0))
    }

    fn read_at(&self, _offset: usize, _buf: &mut [u8]) -> Result<usize, FsError> {
        Err(FsError::IsDirectory)
    }

    fn lookup(&self, name: &str, _cred: &Credential) -> Result<Arc<dyn Inode>, FsError> {
        self.children
            .iter()
            .find(|child| child.name == name)
            .map(|child| child.clone() as Arc<dyn Inode>)
            .ok_or(FsError::NotFound)
    }

    fn readdir(&self, offset: i64, budget: usize, _cred: &Credential) -> Result<DirPage, FsError> {
        let mut page = DirPageBuilder::new(offset, budget, 1)?;
        for child in self.children.iter().skip(page.position()) {
            if !page.push(child.name, child.inode_no, InodeType::File)? {
                return Ok(page.finish(false));
            }
        }
        Ok(page.finish(true))
    }

    fn readlink(&self) -> Result<String, FsError> {
        Err(FsError::InvalidArgument)
    }

    fn open(
        self: Arc<Self>,
        _flags: OpenFlags,
        _cred: &Credential,
    ) -> Result<Arc<dyn Inode>, FsError> {
        Ok(self)
    }

    fn access(&self, mode: AccessMode, cred: &Credential) -> Result<(), FsError> {
        self.metadata()?.mode.check_access(0, 0, mode, cred)
    }

    fn sync(&self) -> Result<(), FsError> {
        Ok(())
    }

    fn real_inode(self: Arc<Self>) -> Arc<dyn Inode> {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Inode for FakeCgroupFile {
    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        Ok(fake_metadata(
            self.inode_no,
            InodeType::File,
            0o644,
            self.data.len(),
        ))
    }

    fn read_at(&self, offset: usize, buf: &mut [u8]) -> Result<usize, FsError> {
        let data = self.data.get(offset..).unwrap_or(&[]);
        let n = data.len().min(buf.len());
        buf[..n].copy_from_slice(&data[..n]);
        Ok(n)
    }

    fn lookup(&self, _name: &str, _cred: &Credential) -> Result<Arc<dyn Inode>, FsError> {
        Err(FsError::NotDirectory)
    }

    fn readdir(&self, _offset: i64, _budget: usize, _cred: &Credential) -> Result<DirPage, FsError> {
        Err(FsError::NotDirectory)
    }

    fn readlink(&self) -> Result<String, FsError> {
        Err(FsError::InvalidArgument)
    }

    fn open(
        self: Arc<Self>,
        _flags: OpenFlags,
        _cred: &Credential,
    ) -> Result<Arc<dyn Inode>, FsError> {
        Ok(self)
    }

    fn access(&self, _mode: AccessMode, _cred: &Credential) -> Result<(), FsError> {
        Ok(())
    }

    fn sync(&self) -> Result<(), FsError> {
        Ok(())
    }

    fn real_inode(self: Arc<Self>) -> Arc<dyn Inode> {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn cgroup_fs() -> (Arc<SysFS>, Arc<FakeCgroupDir>) {
    let delegate = FakeCgroupDir::new();
    let options = SysfsOptions {
        cgroup_delegate: Some(delegate.clone() as Arc<dyn Inode>),
    };
    (SysFS::with_options(sample_table(), options), delegate)
}

#[test]
fn test_writable_open_rejected() {
    let (fs, _) = sample_fs();
    let writable = [
        OpenFlags::O_WRONLY,
        OpenFlags::O_RDWR,
        OpenFlags::O_RDONLY | OpenFlags::O_TRUNC,
    ];
    for path in ["/", "/class/net/lo", "/devices/virtual/net/lo/mtu"] {
        for flags in writable {
            assert_eq!(
                walk(&fs, path).open(flags, &root()).err(),
                Some(FsError::ReadOnlyFs)
            );
        }
    }

    let (fs, _) = cgroup_fs();
    assert_eq!(
        walk(&fs, "/fs/cgroup").open(OpenFlags::O_RDWR, &root()).err(),
        Some(FsError::ReadOnlyFs)
    );
}

#[test]
fn test_read_open_returns_same_node() {
    let (fs, _) = sample_fs();
    let mtu = walk(&fs, "/devices/virtual/net/lo/mtu");
    let opened = mtu.clone().open(OpenFlags::O_RDONLY, &user()).unwrap();
    assert!(Arc::ptr_eq(&opened, &mtu));
    assert!(opened.close(OpenFlags::O_RDONLY, &user()).is_ok());
}

#[test]
fn test_mutations_rejected() {
    let (fs, _) = sample_fs();
    let dir = walk(&fs, "/devices/virtual/net/lo");
    let mode = FileMode::from_bits_truncate(0o644);

    assert_eq!(dir.create("x", mode).err(), Some(FsError::ReadOnlyFs));
    assert_eq!(dir.mkdir("x", mode).err(), Some(FsError::ReadOnlyFs));
    assert_eq!(dir.unlink("mtu"), Err(FsError::ReadOnlyFs));
    assert_eq!(dir.rmdir("x"), Err(FsError::ReadOnlyFs));
    assert_eq!(dir.chmod(mode), Err(FsError::ReadOnlyFs));
    assert_eq!(dir.chown(1, 1), Err(FsError::ReadOnlyFs));

    let mtu = walk(&fs, "/devices/virtual/net/lo/mtu");
    assert_eq!(mtu.write_at(0, b"9000\n"), Err(FsError::ReadOnlyFs));
    assert_eq!(mtu.truncate(0), Err(FsError::ReadOnlyFs));
    assert_eq!(read_all(&mtu), "8232\n");
}

#[test]
fn test_sync_and_filesystem_object() {
    let (fs, _) = sample_fs();
    assert!(walk(&fs, "/class/net/lo").sync().is_ok());
    assert!(fs.sync().is_ok());
    assert_eq!(fs.fs_type(), "sysfs");

    let stat = fs.statfs().unwrap();
    assert_eq!(stat.block_size, 4096);
    assert_eq!(stat.total_blocks, 0);
    assert_eq!(stat.max_filename_len, 255);
    assert!(fs.umount().is_ok());
}

#[test]
fn test_same_inode_for_synthetic_nodes() {
    let (fs, _) = sample_fs();
    let a = walk(&fs, "/devices/virtual/net/lo");
    let b = walk(&fs, "/class/net/../../devices/virtual/net/lo");
    let c = walk(&fs, "/devices/virtual/net/e1000g0");

    assert!(a.same_inode(b.as_ref()));
    assert!(!a.same_inode(c.as_ref()));
    assert!(Arc::ptr_eq(&a.clone().real_inode(), &a));
}

#[test]
fn test_cgroup_without_delegate_is_static() {
    let (fs, _) = sample_fs();
    let cgroup = walk(&fs, "/fs/cgroup");
    assert!(!cgroup.downcast_ref::<SysfsNode>().unwrap().is_passthrough());
    assert_eq!(names(&list_all(&cgroup, 4096)), [".", ".."]);
}

#[test]
fn test_passthrough_content() {
    let (fs, _) = cgroup_fs();
    let cgroup = walk(&fs, "/fs/cgroup");
    assert!(cgroup.downcast_ref::<SysfsNode>().unwrap().is_passthrough());

    let page = cgroup.readdir(0, 4096, &root()).unwrap();
    assert_eq!(names(&page.entries), ["cgroup.procs", "cpu.max"]);
    assert!(page.eof);

    let cpu = walk(&fs, "/fs/cgroup/cpu.max");
    assert!(cpu.downcast_ref::<FakeCgroupFile>().is_some());
    assert_eq!(read_all(&cpu), "max 100000\n");

    // `..` 仍回到 sysfs 中的父目录
    let parent = walk(&fs, "/fs/cgroup/..");
    assert!(Arc::ptr_eq(&parent, &walk(&fs, "/fs")));
}

#[test]
fn test_passthrough_metadata_keeps_own_mode() {
    let (fs, _) = cgroup_fs();
    let meta = walk(&fs, "/fs/cgroup").metadata().unwrap();

    assert_eq!(meta.inode_no, FAKE_DIR_INO);
    assert_eq!(meta.inode_type, InodeType::Directory);
    assert_eq!(meta.mode, FileMode::from_bits_truncate(0o040555));
}

#[test]
fn test_passthrough_access_defers_to_delegate() {
    let (fs, _) = cgroup_fs();
    let cgroup = walk(&fs, "/fs/cgroup");

    assert!(cgroup.access(AccessMode::READ, &root()).is_ok());
    assert_eq!(
        cgroup.access(AccessMode::READ, &user()),
        Err(FsError::PermissionDenied)
    );
    assert_eq!(
        cgroup.readdir(0, 4096, &user()).err(),
        Some(FsError::PermissionDenied)
    );
    assert_eq!(
        cgroup.lookup("cpu.max", &user()).err(),
        Some(FsError::PermissionDenied)
    );
}

#[test]
fn test_passthrough_open_and_compare() {
    let (fs, delegate) = cgroup_fs();
    let cgroup = walk(&fs, "/fs/cgroup");
    let delegate: Arc<dyn Inode> = delegate;

    let opened = cgroup.clone().open(OpenFlags::O_RDONLY, &root()).unwrap();
    assert!(opened.downcast_ref::<FakeCgroupDir>().is_some());
    assert!(Arc::ptr_eq(&opened, &delegate));

    assert!(Arc::ptr_eq(&cgroup.clone().real_inode(), &delegate));
    assert!(cgroup.same_inode(delegate.as_ref()));
    assert!(cgroup.same_inode(cgroup.as_ref()));
    assert!(!cgroup.same_inode(walk(&fs, "/fs").as_ref()));
}
