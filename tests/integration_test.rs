use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::Server;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

/// A command isolated from the caller's token, endpoints and config directory.
fn ardl(config_home: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("ardl"));
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("ARDL_API_URL")
        .env_remove("ARDL_CATALOG")
        .env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home);
    cmd
}

fn releases_body(url: &str) -> String {
    format!(
        r#"[
            {{
                "id": 3,
                "tag_name": "v1.2.0-beta",
                "name": "ArLibs 1.2 Beta",
                "published_at": "2024-05-01T08:00:00Z",
                "prerelease": true,
                "html_url": "{url}/ArTeamTech/ArLibs/releases/tag/v1.2.0-beta",
                "zipball_url": "{url}/zip/v1.2.0-beta",
                "assets": [
                    {{
                        "id": 31,
                        "name": "ArLibs-1.2.0-beta.jar",
                        "size": 1048576,
                        "browser_download_url": "{url}/download/ArLibs-1.2.0-beta.jar"
                    }}
                ]
            }},
            {{
                "id": 2,
                "tag_name": "v1.1.0",
                "name": "",
                "published_at": "2024-03-01T08:00:00Z",
                "prerelease": false,
                "html_url": "{url}/ArTeamTech/ArLibs/releases/tag/v1.1.0",
                "zipball_url": "{url}/zip/v1.1.0",
                "assets": [
                    {{
                        "id": 21,
                        "name": "checksums.txt",
                        "size": 128,
                        "browser_download_url": "{url}/download/checksums.txt"
                    }}
                ]
            }}
        ]"#
    )
}

#[test]
fn test_releases_stable_channel() {
    let mut server = Server::new();
    let url = server.url();
    let mock = server
        .mock("GET", "/repos/ArTeamTech/ArLibs/releases")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(releases_body(&url))
        .create();

    let home = tempdir().unwrap();
    ardl(home.path())
        .args(["releases", "--api-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("Releases of ArTeamTech/ArLibs [stable]"))
        .stdout(predicate::str::contains("v1.1.0  (stable, 2024-03-01)"))
        .stdout(predicate::str::contains("No downloadable files for this release."))
        .stdout(predicate::str::contains(format!("source code: {}/zip/v1.1.0", url)))
        .stdout(predicate::str::contains("checksums.txt").not())
        .stdout(predicate::str::contains("ArLibs 1.2 Beta").not());

    mock.assert();
}

#[test]
fn test_releases_all_channel_as_json() {
    let mut server = Server::new();
    let url = server.url();
    let _mock = server
        .mock("GET", "/repos/ArTeamTech/ArLibs/releases")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(releases_body(&url))
        .create();

    let home = tempdir().unwrap();
    let output = ardl(home.path())
        .args(["releases", "--api-url", &url, "-c", "all", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["state"], "ready");
    let releases = json["releases"].as_array().unwrap();
    assert_eq!(releases.len(), 2);
    assert_eq!(releases[0]["badge"], "preview");
    assert_eq!(releases[0]["downloads"]["kind"], "files");
    assert_eq!(releases[0]["downloads"]["files"][0]["size"], "1.00 MB");
    assert_eq!(releases[1]["title"], "v1.1.0");
    assert_eq!(releases[1]["downloads"]["kind"], "source_archive");
}

#[test]
fn test_releases_empty_channel() {
    let mut server = Server::new();
    let url = server.url();
    let _mock = server
        .mock("GET", "/repos/ArTeamTech/ArLibs/releases")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();

    let home = tempdir().unwrap();
    ardl(home.path())
        .args(["releases", "--api-url", &url, "-c", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No releases in this category."))
        .stdout(predicate::str::contains("https://github.com/ArTeamTech/ArLibs"));
}

#[test]
fn test_releases_fetch_failure_is_rendered() {
    let mut server = Server::new();
    let url = server.url();
    let mock = server
        .mock("GET", "/repos/ArTeamTech/ArLibs/releases")
        .with_status(404)
        .expect(1)
        .create();

    let home = tempdir().unwrap();
    ardl(home.path())
        .args(["releases", "--api-url", &url, "--web-url", "http://web.test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to fetch release information."))
        .stdout(predicate::str::contains("404 Not Found"))
        .stdout(predicate::str::contains("http://web.test/ArTeamTech/ArLibs/releases"));

    mock.assert();
}

#[test]
fn test_builds_keeps_recent_build_runs() {
    let mut server = Server::new();
    let url = server.url();
    let _releases = server
        .mock("GET", "/repos/ArTeamTech/ArLibs/releases")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();
    let runs = server
        .mock("GET", "/repos/ArTeamTech/ArLibs/actions/runs?per_page=10")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "total_count": 3,
                "workflow_runs": [
                    {"id": 11, "name": "Build Plugin", "run_number": 42, "head_branch": "main",
                     "created_at": "2024-05-02T10:00:00Z", "conclusion": "success"},
                    {"id": 10, "name": "CodeQL", "run_number": 7, "head_branch": "main",
                     "created_at": "2024-05-02T09:00:00Z", "conclusion": "success"},
                    {"id": 9, "name": "Nightly BUILD", "run_number": 41, "head_branch": "dev",
                     "created_at": "2024-05-01T10:00:00Z", "conclusion": null}
                ]
            }"#,
        )
        .create();

    let home = tempdir().unwrap();
    ardl(home.path())
        .args(["builds", "--api-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recent builds of ArTeamTech/ArLibs"))
        .stdout(predicate::str::contains("Build Plugin #42  [build succeeded] main 2024-05-02"))
        .stdout(predicate::str::contains("Nightly BUILD #41  [in progress] dev 2024-05-01"))
        .stdout(predicate::str::contains("https://github.com/ArTeamTech/ArLibs/actions/runs/11"))
        .stdout(predicate::str::contains("CodeQL").not())
        .stdout(predicate::str::contains("All builds: https://github.com/ArTeamTech/ArLibs/actions"));

    runs.assert();
}

#[test]
fn test_plugins_lists_builtin_catalog() {
    let home = tempdir().unwrap();
    ardl(home.path())
        .arg("plugins")
        .assert()
        .success()
        .stdout(predicate::str::contains("* arlibs   ArLibs"))
        .stdout(predicate::str::contains("armenu   ArMenu - Multi-purpose menu plugin (coming soon)"));
}

#[test]
fn test_custom_catalog_file() {
    let mut server = Server::new();
    let url = server.url();
    let mock = server
        .mock("GET", "/repos/example/widgets/releases")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();

    let home = tempdir().unwrap();
    let catalog = home.path().join("plugins.json");
    std::fs::write(
        &catalog,
        r#"{"plugins": [
            {"id": "widgets", "name": "Widgets", "repo": "example/widgets"},
            {"id": "gadgets", "name": "Gadgets", "repo": "example/gadgets", "enabled": false}
        ]}"#,
    )
    .unwrap();

    ardl(home.path())
        .args(["plugins", "--catalog"])
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("* widgets  Widgets"))
        .stdout(predicate::str::contains("gadgets  Gadgets (coming soon)"));

    ardl(home.path())
        .args(["releases", "--api-url", &url, "-p", "widgets", "--catalog"])
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Releases of example/widgets [stable]"));

    mock.assert();
}

#[test]
fn test_disabled_plugin_is_rejected() {
    let home = tempdir().unwrap();
    ardl(home.path())
        .args(["releases", "-p", "armenu", "--api-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ArMenu is not available yet."));
}

#[test]
fn test_unknown_plugin_is_rejected() {
    let home = tempdir().unwrap();
    ardl(home.path())
        .args(["builds", "-p", "nope", "--api-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown plugin: nope."));
}

#[test]
fn test_browse_script_from_stdin() {
    let mut server = Server::new();
    let url = server.url();
    let _releases = server
        .mock("GET", "/repos/ArTeamTech/ArLibs/releases")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(releases_body(&url))
        .create();

    let home = tempdir().unwrap();
    ardl(home.path())
        .args(["browse", "--api-url", &url])
        .write_stdin("channel preview\nhelp\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Releases of ArTeamTech/ArLibs [preview]"))
        .stdout(predicate::str::contains("ArLibs 1.2 Beta  (preview, 2024-05-01)"))
        .stdout(predicate::str::contains("ArLibs-1.2.0-beta.jar [1.00 MB]"));
}
