use vfs::{PathComponent, normalize_path, parse_path};

#[test]
fn test_normalize_path_absolute() {
    assert_eq!(normalize_path("/foo/bar"), "/foo/bar");
    assert_eq!(normalize_path("/"), "/");
    assert_eq!(normalize_path("///foo///bar///"), "/foo/bar");
}

#[test]
fn test_normalize_path_current() {
    assert_eq!(normalize_path("/foo/./bar"), "/foo/bar");
    assert_eq!(normalize_path("./foo"), "foo");
    assert_eq!(normalize_path("."), ".");
}

#[test]
fn test_normalize_path_parent() {
    assert_eq!(normalize_path("/foo/bar/.."), "/foo");
    assert_eq!(normalize_path("/foo/../bar"), "/bar");
    assert_eq!(normalize_path("/.."), "/");
    assert_eq!(normalize_path("/../.."), "/");
}

#[test]
fn test_normalize_path_relative() {
    assert_eq!(normalize_path("foo/bar"), "foo/bar");
    assert_eq!(normalize_path("foo/../bar"), "bar");
    assert_eq!(normalize_path("../foo"), "../foo");
    assert_eq!(normalize_path("../../foo"), "../../foo");
}

#[test]
fn test_normalize_path_empty() {
    assert_eq!(normalize_path(""), ".");
}

#[test]
fn test_parse_path_sysfs_style() {
    assert_eq!(
        parse_path("/class/net/../net/./lo"),
        vec![
            PathComponent::Root,
            PathComponent::Normal("class".to_string()),
            PathComponent::Normal("net".to_string()),
            PathComponent::Parent,
            PathComponent::Normal("net".to_string()),
            PathComponent::Current,
            PathComponent::Normal("lo".to_string()),
        ]
    );
}
