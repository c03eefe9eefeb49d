//! Container packing tests

mod common;

use depbundle::bundler::archive::{self, Compression};
use depbundle::bundler::resolver::{PackageRef, ResolvedSet};
use std::io::{Cursor, Read};
use tempfile::TempDir;

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

fn read_entry(container: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(container)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut contents = String::new();
    file.read_to_string(&mut contents).unwrap();
    contents
}

#[test]
fn package_tree_is_rooted_at_import_name() {
    let temp = TempDir::new().unwrap();
    let site = common::fake_site(temp.path());

    let mut resolved = ResolvedSet::new();
    resolved.insert(PackageRef::new("Gadget", "widgets.gadgets", site.join("widgets/gadgets.py")));

    let container = archive::pack_blocking(&resolved, Compression::Deflated).unwrap();

    assert_eq!(
        sorted(common::entry_names(&container)),
        vec![
            "widgets/__init__.py",
            "widgets/gadgets.py",
            "widgets/parts/springs.py"
        ]
    );
    assert_eq!(
        read_entry(&container, "widgets/gadgets.py"),
        "class Gadget:\n    pass\n"
    );
}

#[test]
fn single_module_becomes_top_level_file() {
    let temp = TempDir::new().unwrap();
    let site = common::fake_site(temp.path());

    let mut resolved = ResolvedSet::new();
    resolved.insert(PackageRef::new("sx", "six", site.join("six.py")));

    let container = archive::pack_blocking(&resolved, Compression::Deflated).unwrap();
    assert_eq!(common::entry_names(&container), vec!["six.py"]);
    assert_eq!(read_entry(&container, "six.py"), "PY3 = True\n");
}

#[test]
fn shared_roots_are_packed_once() {
    let temp = TempDir::new().unwrap();
    let site = common::fake_site(temp.path());

    let mut resolved = ResolvedSet::new();
    resolved.insert(PackageRef::new("widgets", "widgets", site.join("widgets")));
    resolved.insert(PackageRef::new("Gadget", "widgets.gadgets", site.join("widgets/gadgets.py")));
    resolved.insert(PackageRef::new("six", "six", site.join("six.py")));

    let container = archive::pack_blocking(&resolved, Compression::Deflated).unwrap();
    assert_eq!(
        sorted(common::entry_names(&container)),
        vec![
            "six.py",
            "widgets/__init__.py",
            "widgets/gadgets.py",
            "widgets/parts/springs.py"
        ]
    );
}

#[test]
fn packing_is_deterministic() {
    let temp = TempDir::new().unwrap();
    let site = common::fake_site(temp.path());

    let mut resolved = ResolvedSet::new();
    resolved.insert(PackageRef::new("widgets", "widgets", site.join("widgets")));
    resolved.insert(PackageRef::new("six", "six", site.join("six.py")));

    let first = archive::pack_blocking(&resolved, Compression::Deflated).unwrap();
    let second = archive::pack_blocking(&resolved, Compression::Deflated).unwrap();
    assert_eq!(first, second);
}

#[test]
fn stored_entries_are_uncompressed() {
    let temp = TempDir::new().unwrap();
    let site = common::fake_site(temp.path());

    let mut resolved = ResolvedSet::new();
    resolved.insert(PackageRef::new("widgets", "widgets", site.join("widgets")));

    let container = archive::pack_blocking(&resolved, Compression::Stored).unwrap();
    let mut zip = zip::ZipArchive::new(Cursor::new(&container)).unwrap();
    for index in 0..zip.len() {
        let entry = zip.by_index(index).unwrap();
        assert_eq!(entry.compression(), zip::CompressionMethod::Stored);
    }
}

#[test]
fn empty_set_is_an_empty_container() {
    let container = archive::pack_blocking(&ResolvedSet::new(), Compression::Deflated).unwrap();
    assert!(common::entry_names(&container).is_empty());
}

#[tokio::test]
async fn packs_on_blocking_pool() {
    let mut resolved = ResolvedSet::new();
    resolved.insert(PackageRef::new(
        "widgets",
        "widgets",
        common::site_packages().join("widgets"),
    ));

    let container = archive::pack(&resolved, Compression::Deflated).await.unwrap();
    let names = common::entry_names(&container);
    assert!(names.contains(&"widgets/__init__.py".to_string()));
    assert!(names.iter().all(|name| !name.contains("__pycache__")));
}
