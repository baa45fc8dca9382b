//! End-to-end sync scenarios against a mock download server.

use std::fs;
use std::io;
use std::path::PathBuf;

use flate2::write::GzEncoder;
use flate2::Compression;
use httpmock::prelude::*;
use tar::{Builder, EntryType, Header};
use tempfile::TempDir;

use pxesync::{PlatformSync, SyncConfig, SyncError, SyncOutcome};

const VERSION: &str = "20230101T000000Z";

fn platform_archive(version: &str) -> Vec<u8> {
    let mut builder = Builder::new(GzEncoder::new(Vec::new(), Compression::default()));

    let mut top = Header::new_ustar();
    top.set_entry_type(EntryType::Directory);
    top.set_mode(0o755);
    top.set_size(0);
    builder
        .append_data(&mut top, format!("platform-{version}/"), io::empty())
        .unwrap();

    let mut dir = Header::new_ustar();
    dir.set_entry_type(EntryType::Directory);
    dir.set_mode(0o755);
    dir.set_size(0);
    builder
        .append_data(&mut dir, format!("platform-{version}/dir/"), io::empty())
        .unwrap();

    let mut file = Header::new_ustar();
    file.set_mode(0o644);
    file.set_size(b"hello".len() as u64);
    builder
        .append_data(
            &mut file,
            format!("platform-{version}/dir/file.txt"),
            &b"hello"[..],
        )
        .unwrap();

    builder.into_inner().unwrap().finish().unwrap()
}

fn archive_path(version: &str) -> String {
    format!("/smartos/{version}/platform-{version}.tgz")
}

fn sync_against(server: &MockServer, data_dir: PathBuf) -> pxesync::Result<SyncOutcome> {
    PlatformSync::new(SyncConfig::new(server.base_url(), data_dir))?.sync()
}

#[test]
fn installs_latest_version_from_scratch() {
    let server = MockServer::start();
    let tmp = TempDir::new().unwrap();
    let data_dir = tmp.path().join("data");

    server.mock(|when, then| {
        when.method(GET).path("/latest");
        then.status(200).body(format!("/smartos/{VERSION}\n"));
    });
    let archive = server.mock(|when, then| {
        when.method(GET).path(archive_path(VERSION));
        then.status(200).body(platform_archive(VERSION));
    });

    let outcome = sync_against(&server, data_dir.clone()).unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::Installed {
            version: VERSION.to_string()
        }
    );
    archive.assert();

    let file = data_dir.join(format!("platform-{VERSION}/dir/file.txt"));
    assert_eq!(fs::read_to_string(&file).unwrap(), "hello");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&file).unwrap().permissions().mode() & 0o7777;
        assert_eq!(mode, 0o644);
    }

    // no staging directory beside the installation root
    let names: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec!["data"]);
}

#[test]
fn skips_archive_fetch_when_version_is_installed() {
    let server = MockServer::start();
    let tmp = TempDir::new().unwrap();
    let data_dir = tmp.path().join("data");

    let installed = data_dir.join(format!("platform-{VERSION}"));
    fs::create_dir_all(&installed).unwrap();
    fs::write(installed.join("marker"), b"keep").unwrap();

    server.mock(|when, then| {
        when.method(GET).path("/latest");
        then.status(200).body(format!("/smartos/{VERSION}\n"));
    });
    let archive = server.mock(|when, then| {
        when.method(GET).path(archive_path(VERSION));
        then.status(200).body(platform_archive(VERSION));
    });

    let outcome = sync_against(&server, data_dir).unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::AlreadyInstalled {
            version: VERSION.to_string()
        }
    );
    assert_eq!(archive.hits(), 0);
    assert_eq!(fs::read(installed.join("marker")).unwrap(), b"keep");
}

#[test]
fn pointer_404_surfaces_protocol_error() {
    let server = MockServer::start();
    let tmp = TempDir::new().unwrap();

    server.mock(|when, then| {
        when.method(GET).path("/latest");
        then.status(404);
    });

    let err = sync_against(&server, tmp.path().join("data")).unwrap_err();
    match err {
        SyncError::Protocol { status, .. } => assert!(status.starts_with("404")),
        other => panic!("expected protocol error, got {other:?}"),
    }
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn archive_404_leaves_installation_root_untouched() {
    let server = MockServer::start();
    let tmp = TempDir::new().unwrap();

    server.mock(|when, then| {
        when.method(GET).path("/latest");
        then.status(200).body(format!("/smartos/{VERSION}\n"));
    });
    server.mock(|when, then| {
        when.method(GET).path(archive_path(VERSION));
        then.status(404);
    });

    let err = sync_against(&server, tmp.path().join("data")).unwrap_err();
    assert!(matches!(err, SyncError::Protocol { .. }));

    // neither the data dir nor any staging directory was created
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn non_gzip_archive_body_surfaces_decompression_error() {
    let server = MockServer::start();
    let tmp = TempDir::new().unwrap();

    server.mock(|when, then| {
        when.method(GET).path("/latest");
        then.status(200).body(format!("/smartos/{VERSION}\n"));
    });
    server.mock(|when, then| {
        when.method(GET).path(archive_path(VERSION));
        then.status(200).body("this is not a tarball");
    });

    let err = sync_against(&server, tmp.path().join("data")).unwrap_err();
    assert!(matches!(err, SyncError::Decompression(_)));
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn transport_failure_surfaces_network_error() {
    let tmp = TempDir::new().unwrap();
    let config = SyncConfig::new("http://127.0.0.1:9", tmp.path().join("data"))
        .with_timeout(std::time::Duration::from_secs(1));

    let err = PlatformSync::new(config).unwrap().sync().unwrap_err();
    assert!(matches!(err, SyncError::Network(_)));
}
