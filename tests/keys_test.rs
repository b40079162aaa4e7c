use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn kenja(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("kenja-admin");
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("KENJA_CONFIG");
    cmd
}

const MAIN_SECRET: &str = "kenja_live_1234567890abcdef1234567890abcdef";
const MAIN_MASKED: &str = "kenja_live_1********************90abcdef";

// ─── One-shot listing ────────────────────────────────────────────

#[test]
fn keys_list_masks_secrets() {
    let dir = assert_fs::TempDir::new().unwrap();

    kenja(&dir)
        .args(["keys", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("active 2 / 2"))
        .stdout(predicate::str::contains(MAIN_MASKED))
        .stdout(predicate::str::contains(MAIN_SECRET).not());
}

#[test]
fn keys_list_reveal_shows_secrets() {
    let dir = assert_fs::TempDir::new().unwrap();

    kenja(&dir)
        .args(["keys", "list", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains(MAIN_SECRET));
}

#[test]
fn keys_permissions_lists_catalog() {
    let dir = assert_fs::TempDir::new().unwrap();

    kenja(&dir)
        .args(["keys", "permissions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("read:applications"))
        .stdout(predicate::str::contains("admin:all"));
}

// ─── Console session ─────────────────────────────────────────────

#[test]
fn console_creates_key_with_scheme_tag() {
    let dir = assert_fs::TempDir::new().unwrap();

    kenja(&dir)
        .arg("console")
        .write_stdin(
            "go api-management\nnew\nname Payroll\nperm read:reports\ncreate\nlist\nquit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("新しいAPIキーが作成されました"))
        .stdout(predicate::str::contains("Payroll"))
        .stdout(predicate::str::contains("active 3 / 3"));
}

#[test]
fn console_rejects_key_without_name_and_continues() {
    let dir = assert_fs::TempDir::new().unwrap();

    kenja(&dir)
        .arg("console")
        .write_stdin("go api-management\nnew\nperm read:users\ncreate\nlist\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "名前と権限を設定してください",
        ))
        .stdout(predicate::str::contains("active 2 / 2"));
}

#[test]
fn console_delete_asks_for_confirmation() {
    let dir = assert_fs::TempDir::new().unwrap();

    kenja(&dir)
        .arg("console")
        .write_stdin("go api-management\ndelete 1\ny\nlist\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("このAPIキーを削除してもよろしいですか？ メインAPI"))
        .stdout(predicate::str::contains("APIキーが削除されました"))
        .stdout(predicate::str::contains("active 1 / 1"));
}

#[test]
fn console_declined_delete_keeps_key() {
    let dir = assert_fs::TempDir::new().unwrap();

    kenja(&dir)
        .arg("console")
        .write_stdin("go api-management\ndelete 1\nn\nlist\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("APIキーが削除されました").not())
        .stdout(predicate::str::contains("active 2 / 2"));
}

#[test]
fn console_toggle_disables_key() {
    let dir = assert_fs::TempDir::new().unwrap();

    kenja(&dir)
        .arg("console")
        .write_stdin("go api-management\ntoggle 2\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("active 1 / 2"))
        .stdout(predicate::str::contains("無効"));
}

#[test]
fn console_copy_emits_osc52_sequence() {
    let dir = assert_fs::TempDir::new().unwrap();

    kenja(&dir)
        .arg("console")
        .write_stdin("go api-management\ncopy 1\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b]52;c;"))
        .stdout(predicate::str::contains("クリップボードにコピーしました"));
}

#[test]
fn console_unknown_key_reports_error() {
    let dir = assert_fs::TempDir::new().unwrap();

    kenja(&dir)
        .arg("console")
        .write_stdin("go api-management\nreveal 99\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("API key '99' not found"));
}

#[test]
fn console_uses_configured_scheme_tag() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("kenja.toml")
        .write_str("[keys]\nscheme_tag = \"kenja_test_\"\n")
        .unwrap();

    kenja(&dir)
        .arg("console")
        .write_stdin(
            "go api-management\nnew\nname Sandbox\nperm read:users\ncreate\nlist\nquit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("kenja_test_"));
}

#[test]
fn console_ends_on_eof() {
    let dir = assert_fs::TempDir::new().unwrap();

    kenja(&dir)
        .arg("console")
        .write_stdin("go audit-logs\nuser 佐藤花子\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 4 records"));
}
