//! Parsing helpers for `/proc/self/mountinfo` (and similar mountinfo files).

use std::path::PathBuf;

/// Filesystem types that are kernel plumbing rather than browsable volumes.
/// Mounts with these types are excluded from the logical drive list.
const PSEUDO_FSTYPES: &[&str] = &[
    "autofs",
    "binfmt_misc",
    "bpf",
    "cgroup",
    "cgroup2",
    "configfs",
    "debugfs",
    "devpts",
    "devtmpfs",
    "efivarfs",
    "fusectl",
    "hugetlbfs",
    "mqueue",
    "nsfs",
    "proc",
    "pstore",
    "rpc_pipefs",
    "securityfs",
    "selinuxfs",
    "sysfs",
    "tracefs",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub mount_point: PathBuf,
    pub fstype: String,
}

pub fn parse_mountinfo(content: &str) -> Vec<MountEntry> {
    content
        .lines()
        .filter_map(|line| {
            // mountinfo format:
            //   <id> <parent> <maj:min> <root> <mount point> <...> - <fstype> <source> <superopts>
            let (pre, post) = line.split_once(" - ")?;
            let pre_fields: Vec<&str> = pre.split_whitespace().collect();
            if pre_fields.len() < 5 {
                return None;
            }
            let mount_point = unescape_mount_path(pre_fields[4]);
            let fstype = post.split_whitespace().next()?.to_string();
            Some(MountEntry {
                mount_point: PathBuf::from(mount_point),
                fstype,
            })
        })
        .collect()
}

/// Extracts the sorted, deduplicated mount points of real volumes.
pub fn logical_roots(content: &str) -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = parse_mountinfo(content)
        .into_iter()
        .filter(|entry| !PSEUDO_FSTYPES.contains(&entry.fstype.as_str()))
        .map(|entry| entry.mount_point)
        .collect();

    roots.sort();
    roots.dedup();
    roots
}

pub fn unescape_mount_path(raw: &str) -> String {
    raw.replace("\\040", " ")
        .replace("\\011", "\t")
        .replace("\\012", "\n")
        .replace("\\134", "\\")
}
