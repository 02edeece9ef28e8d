//! Games directory on disk through to a navigable menu.

use std::fs;
use std::path::Path;

use arcade_core::draw::{Bitmap, BitmapId};
use arcade_core::library::{self, MANIFEST_FILE};
use arcade_core::Menu;
use tempfile::TempDir;

fn write_game(dir: &Path, folder: &str, title: &str) {
    let game_dir = dir.join(folder);
    fs::create_dir_all(&game_dir).unwrap();
    let manifest = serde_json::json!({
        "title": title,
        "author": "Someone",
        "genre": "Arcade",
        "language": "Rust",
        "rating": "4",
        "repo": "https://example.com",
        "exe": "run.sh",
        "image": "cover.png",
    });
    fs::write(game_dir.join(MANIFEST_FILE), manifest.to_string()).unwrap();
}

#[test]
fn test_menu_walks_games_in_folder_order() {
    let temp_dir = TempDir::new().unwrap();
    write_game(temp_dir.path(), "02-breakout", "Breakout");
    write_game(temp_dir.path(), "01-pong", "Pong");
    write_game(temp_dir.path(), "03-tetris", "Tetris");
    fs::create_dir_all(temp_dir.path().join("04-no-manifest")).unwrap();

    let games = library::load_games(temp_dir.path()).unwrap();
    assert_eq!(games.len(), 3);

    let mut menu = Menu::new(games);
    let mut ids = 0;
    menu.build_carousel(|_| {
        ids += 1;
        Bitmap::new(BitmapId(ids), 64, 64)
    });

    let carousel = menu.carousel();
    let start = menu.state().current.unwrap();
    let titles: Vec<&str> = carousel
        .walk_previous(start)
        .map(|node| menu.games()[node.game].title.as_str())
        .collect();
    assert_eq!(titles, vec!["Pong", "Breakout", "Tetris"]);
    assert_eq!(menu.current_game().unwrap().title, "Pong");
}

#[test]
fn test_missing_games_dir_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = library::load_games(&temp_dir.path().join("absent"));
    assert!(matches!(
        result,
        Err(library::LibraryError::MissingDir(_))
    ));
}
