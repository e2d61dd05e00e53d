//! 路径解析
//!
//! 支持的典型语义：
//!
//! - 以 `/` 开头的路径从给定的起点（通常是文件系统根）开始解析
//! - `.` 解析时跳过；`..` 交给目录节点自身的 lookup 处理（根目录的父目录是它自己）
//! - 不跟随符号链接：链接本身作为结果返回，由调用方决定是否 readlink

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{Credential, FsError, Inode, InodeType};

/// 路径组件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent {
    /// 根目录 "/"
    Root,
    /// 当前目录 "."
    Current,
    /// 父目录 ".."
    Parent,
    /// 正常的文件名
    Normal(String),
}

/// 将路径字符串解析为组件列表
pub fn parse_path(path: &str) -> Vec<PathComponent> {
    let mut components = Vec::new();

    // 绝对路径以 Root 开始
    if path.starts_with('/') {
        components.push(PathComponent::Root);
    }

    for part in path.split('/').filter(|s| !s.is_empty()) {
        let component = match part {
            "." => PathComponent::Current,
            ".." => PathComponent::Parent,
            name => PathComponent::Normal(String::from(name)),
        };
        components.push(component);
    }

    components
}

/// 规范化路径（处理 ".." 和 "."）
pub fn normalize_path(path: &str) -> String {
    let components = parse_path(path);
    let mut stack: Vec<String> = Vec::new();
    let mut is_absolute = false;

    for component in components {
        match component {
            PathComponent::Root => {
                is_absolute = true;
            }
            PathComponent::Current => {}
            PathComponent::Parent => {
                if is_absolute {
                    // 绝对路径：不能越过根目录
                    stack.pop();
                } else if stack.last().is_none_or(|last| last == "..") {
                    stack.push(String::from(".."));
                } else {
                    stack.pop();
                }
            }
            PathComponent::Normal(name) => {
                stack.push(name);
            }
        }
    }

    if stack.is_empty() {
        if is_absolute {
            String::from("/")
        } else {
            String::from(".")
        }
    } else if is_absolute {
        String::from("/") + &stack.join("/")
    } else {
        stack.join("/")
    }
}

/// 从 `start` 开始逐级解析 `path`，返回最后一个组件对应的节点
///
/// 中间组件必须是目录；遇到符号链接作为中间组件时返回 [`FsError::NotDirectory`]。
pub fn walk_path(
    start: Arc<dyn Inode>,
    path: &str,
    cred: &Credential,
) -> Result<Arc<dyn Inode>, FsError> {
    let mut current = start;

    for component in parse_path(path) {
        let name = match &component {
            PathComponent::Root | PathComponent::Current => continue,
            PathComponent::Parent => "..",
            PathComponent::Normal(name) => name.as_str(),
        };

        if current.metadata()?.inode_type != InodeType::Directory {
            return Err(FsError::NotDirectory);
        }
        current = current.lookup(name, cred)?;
    }

    Ok(current)
}
