//! Tests for the board render artifact and its hash sidecar.

use strictly_gomoku::GameState;
use strictly_gomoku_cli::{RenderArtifact, RenderStatus, render_board};
use tempfile::TempDir;

#[test]
fn test_first_refresh_writes_artifact_and_sidecar() {
    let dir = TempDir::new().unwrap();
    let artifact = RenderArtifact::new(dir.path().join("gomoku.txt"));
    let state = GameState::replay(["H-08-O"]).unwrap();

    let status = artifact.refresh(&state).unwrap();
    assert!(matches!(status, RenderStatus::Written(_)));

    let text = std::fs::read_to_string(artifact.path()).unwrap();
    assert_eq!(text, render_board(&state));
    let hash = std::fs::read_to_string(artifact.hash_path()).unwrap();
    assert_eq!(hash, state.current_hash().as_str());
}

#[test]
fn test_unchanged_board_skips_write() {
    let dir = TempDir::new().unwrap();
    let artifact = RenderArtifact::new(dir.path().join("gomoku.txt"));
    let state = GameState::replay(["H-08-O"]).unwrap();
    artifact.refresh(&state).unwrap();

    // A marker proves the file is not rewritten.
    std::fs::write(artifact.path(), "marker").unwrap();
    let status = artifact.refresh(&state).unwrap();
    assert_eq!(status, RenderStatus::Unchanged(artifact.path().to_path_buf()));
    assert_eq!(std::fs::read_to_string(artifact.path()).unwrap(), "marker");
}

#[test]
fn test_changed_board_rewrites() {
    let dir = TempDir::new().unwrap();
    let artifact = RenderArtifact::new(dir.path().join("gomoku.txt"));
    let mut state = GameState::replay(["H-08-O"]).unwrap();
    artifact.refresh(&state).unwrap();

    state.apply_move("I-08-X").unwrap();
    assert!(matches!(
        artifact.refresh(&state).unwrap(),
        RenderStatus::Written(_)
    ));
    assert!(
        std::fs::read_to_string(artifact.path())
            .unwrap()
            .contains("WHITE to move")
    );
}

#[test]
fn test_missing_artifact_is_rewritten_even_with_matching_sidecar() {
    let dir = TempDir::new().unwrap();
    let artifact = RenderArtifact::new(dir.path().join("gomoku.txt"));
    let state = GameState::replay(["H-08-O"]).unwrap();
    artifact.refresh(&state).unwrap();

    std::fs::remove_file(artifact.path()).unwrap();
    assert!(matches!(
        artifact.refresh(&state).unwrap(),
        RenderStatus::Written(_)
    ));
    assert!(artifact.path().exists());
}

#[test]
fn test_foreign_sidecar_forces_rewrite() {
    let dir = TempDir::new().unwrap();
    let artifact = RenderArtifact::new(dir.path().join("gomoku.txt"));
    let state = GameState::replay(["H-08-O"]).unwrap();
    artifact.refresh(&state).unwrap();

    std::fs::write(artifact.path(), "marker").unwrap();
    std::fs::write(artifact.hash_path(), "deadbeef\n").unwrap();
    assert!(matches!(
        artifact.refresh(&state).unwrap(),
        RenderStatus::Written(_)
    ));
    assert_eq!(
        std::fs::read_to_string(artifact.path()).unwrap(),
        render_board(&state)
    );
    assert_eq!(
        std::fs::read_to_string(artifact.hash_path()).unwrap(),
        state.current_hash().as_str()
    );
}

#[test]
fn test_no_sidecar_means_nothing_rendered() {
    let dir = TempDir::new().unwrap();
    let artifact = RenderArtifact::new(dir.path().join("gomoku.txt"));
    assert!(artifact.last_rendered().unwrap().is_empty());

    let state = GameState::new();
    artifact.refresh(&state).unwrap();
    let slot = artifact.last_rendered().unwrap();
    assert!(slot.lookup(&state.current_hash()).is_some());
}
