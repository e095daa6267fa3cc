//! End-to-end command runs against a real data directory.

use clap::Parser;
use coursehub_cli::config::ConfigState;
use coursehub_cli::error::ErrorCode;
use coursehub_cli::state::AppContext;
use coursehub_cli::{execute, Cli};
use coursehub_store::FileStore;
use tempfile::TempDir;

fn context(dir: &TempDir) -> AppContext<FileStore> {
    let config = ConfigState {
        data_dir: Some(dir.path().to_path_buf()),
        ..ConfigState::default()
    };
    AppContext::new(FileStore::in_dir(dir.path()).unwrap(), config)
}

fn run(ctx: &AppContext<FileStore>, line: &str) -> Result<String, coursehub_cli::error::ApiError> {
    let words = shell_words::split(line).unwrap();
    let cli = Cli::try_parse_from(std::iter::once("coursehub".to_string()).chain(words)).unwrap();
    execute(ctx, &cli.command, cli.json)
}

#[test]
fn cart_and_theme_persist_between_invocations() {
    let dir = TempDir::new().unwrap();

    {
        let ctx = context(&dir);
        run(&ctx, "cart add 1").unwrap();
        run(&ctx, "cart add 6").unwrap();
        run(&ctx, "theme toggle").unwrap();
    }

    let ctx = context(&dir);
    let cart: serde_json::Value = serde_json::from_str(&run(&ctx, "cart --json").unwrap()).unwrap();
    let ids: Vec<u64> = cart["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 6]);
    assert_eq!(run(&ctx, "theme").unwrap(), "Theme: dark");
}

#[test]
fn sign_in_is_per_process() {
    let dir = TempDir::new().unwrap();

    {
        let ctx = context(&dir);
        run(&ctx, "login -e ada@example.com -p secret1").unwrap();
        run(&ctx, "cart add 2").unwrap();
        assert!(run(&ctx, "cart checkout").is_ok());
    }

    let ctx = context(&dir);
    assert_eq!(run(&ctx, "whoami").unwrap(), "Not signed in.");
    let err = run(&ctx, "cart checkout").unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized);
}

#[test]
fn catalog_listing_reflects_saved_cart() {
    let dir = TempDir::new().unwrap();
    {
        let ctx = context(&dir);
        run(&ctx, "cart add 4").unwrap();
    }

    let ctx = context(&dir);
    let listing = run(&ctx, "courses --category 'Data Science'").unwrap();
    assert!(listing.starts_with("1 courses found"));
    assert!(listing.contains("Data Science & Machine Learning [in cart]"));
}
