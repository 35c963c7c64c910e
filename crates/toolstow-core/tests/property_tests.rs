//! Property-based tests for resolution, classification and member safety.
//!
//! These tests use proptest to generate arbitrary inputs and verify
//! the installer's safety properties hold across a wide range of cases.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;

use proptest::prelude::*;
use tempfile::TempDir;
use toolstow_core::ArtifactFormat;
use toolstow_core::InstallConfig;
use toolstow_core::InstallError;
use toolstow_core::ToolMetadata;
use toolstow_core::classify;
use toolstow_core::formats::detect::is_executable_magic;
use toolstow_core::resolve_install_dir;
use toolstow_core::security::MemberValidator;
use toolstow_core::security::PathResolver;
use toolstow_core::types::ArchiveMember;
use toolstow_core::types::DestDir;
use toolstow_core::types::SafePath;

fn create_test_dest() -> (TempDir, DestDir) {
    let temp = TempDir::new().expect("failed to create temp dir");
    let dest = DestDir::create(temp.path().join("dest")).expect("failed to create dest");
    (temp, dest)
}

proptest! {
    /// Resolution is a pure function of metadata and root.
    #[test]
    fn prop_resolve_is_deterministic(
        name in "[a-z][a-z0-9-]{0,15}",
        version in "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}"
    ) {
        let config = InstallConfig::with_root("/home/dev/.provide-foundation");
        let meta = ToolMetadata::new(name.clone(), version.clone());
        let first = resolve_install_dir(&meta, &config);
        prop_assert_eq!(&first, &resolve_install_dir(&meta, &config));
        prop_assert_eq!(
            first,
            PathBuf::from("/home/dev/.provide-foundation/tools").join(name).join(version)
        );
    }

    /// The override wins regardless of name and version.
    #[test]
    fn prop_override_verbatim(
        name in "[a-z]{1,10}",
        version in "[0-9.]{1,8}",
        custom in "/[a-z]{1,8}(/[a-z]{1,8}){0,3}"
    ) {
        let config = InstallConfig::with_root("/root-dir");
        let meta = ToolMetadata::new(name, version).with_install_path(&custom);
        prop_assert_eq!(resolve_install_dir(&meta, &config), PathBuf::from(custom));
    }

    /// Archive suffixes classify without touching the file.
    #[test]
    fn prop_archive_suffix_classification(
        stem in "[a-zA-Z0-9_-]{1,12}",
        suffix in prop::sample::select(vec!["zip", "ZIP", "tar", "gz", "tgz", "bz2", "xz", "TAR"])
    ) {
        let path = PathBuf::from(format!("/nonexistent/{stem}.{suffix}"));
        let expected = if suffix.eq_ignore_ascii_case("zip") {
            ArtifactFormat::Zip
        } else {
            ArtifactFormat::TarFamily
        };
        prop_assert_eq!(classify(&path), expected);
        prop_assert_eq!(classify(&path), classify(&path));
    }

    /// Bytes that start with no known magic never classify as Binary.
    #[test]
    fn prop_non_magic_bytes_unknown(bytes in prop::collection::vec(any::<u8>(), 0..16)) {
        prop_assume!(!is_executable_magic(&bytes));
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("artifact");
        std::fs::write(&path, &bytes).unwrap();
        prop_assert_eq!(classify(&path), ArtifactFormat::Unknown);
    }

    /// Any name with a `..` segment is rejected before resolution.
    #[test]
    fn prop_parent_segment_rejected(
        prefix in "([a-z]+/){0,5}",
        suffix in "([a-z]+/?){0,5}"
    ) {
        let name = format!("{prefix}../{suffix}");
        prop_assert!(matches!(SafePath::check_name(&name), Err(InstallError::UnsafePath { .. })), "expected UnsafePath for {}", name);
    }

    /// Absolute names are rejected.
    #[test]
    fn prop_absolute_rejected(rest in "[a-z]{1,8}(/[a-z]{1,8}){0,3}") {
        let name = format!("/{rest}");
        prop_assert!(SafePath::check_name(&name).is_err());
    }

    /// Plain relative names resolve inside the install directory.
    #[test]
    fn prop_plain_names_contained(
        components in prop::collection::vec("[a-zA-Z0-9_.-]{1,20}", 1..6)
    ) {
        prop_assume!(components.iter().all(|c| c != ".."));
        let (_temp, dest) = create_test_dest();
        let name = components.join("/");
        let safe = SafePath::validate(&name, &dest, &PathResolver::new()).unwrap();
        prop_assert!(dest.join(&safe).starts_with(dest.as_path()));
    }

    /// One unsafe member among benign ones rejects the whole list.
    #[test]
    fn prop_one_bad_member_rejects_all(
        benign in prop::collection::vec("[a-z]{1,8}(/[a-z]{1,8}){0,2}", 0..10),
        position in any::<prop::sample::Index>(),
        escape in "(\\.\\./){1,4}[a-z]{1,8}"
    ) {
        let (_temp, dest) = create_test_dest();
        let mut members: Vec<ArchiveMember> = benign.into_iter().map(ArchiveMember::file).collect();
        let at = position.index(members.len() + 1);
        members.insert(at, ArchiveMember::file(escape));

        prop_assert!(MemberValidator::new(&dest).validate_all(&members).is_err());
    }

    /// Symlink targets that climb past the install directory are rejected.
    #[test]
    fn prop_symlink_escape_rejected(
        depth in 0usize..4,
        extra in 1usize..4
    ) {
        let (_temp, dest) = create_test_dest();
        let link_dirs: Vec<String> = (0..depth).map(|i| format!("d{i}")).collect();
        let mut name = link_dirs.join("/");
        if !name.is_empty() {
            name.push('/');
        }
        name.push_str("link");
        let target = "../".repeat(depth + extra) + "outside";

        let err = MemberValidator::new(&dest)
            .validate_all(&[ArchiveMember::symlink(name, target)])
            .unwrap_err();
        prop_assert!(
            matches!(err, InstallError::UnsafeSymlink { .. }),
            "expected UnsafeSymlink, got {:?}",
            err
        );
    }
}
