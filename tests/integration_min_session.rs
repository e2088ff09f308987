// Minimal integration test that drives the compiled binary through a PTY.
// This exercises the real event loop and crossterm input handling across
// the main boundaries without relying on internal modules.
//
// Notes:
// - Requires a TTY; uses expectrl which allocates a pseudo terminal.
// - Marked Unix-only and ignored by default to avoid CI/platform issues.
// - Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

const SENTENCE: &str = "He liked to play with words.";

#[test]
#[ignore]
fn full_sentence_then_quit() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("bubbletype");
    let mut p = spawn(bin.display().to_string())?;

    // Give the app a moment to initialize the terminal/alternate screen
    std::thread::sleep(Duration::from_millis(200));

    p.send(SENTENCE)?;
    std::thread::sleep(Duration::from_millis(200));

    // 'q' quits from the results screen
    p.send("q")?;

    p.expect(Eof)?;
    Ok(())
}

#[test]
#[ignore]
fn reset_then_escape() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("bubbletype");
    let mut p = spawn(bin.display().to_string())?;

    std::thread::sleep(Duration::from_millis(200));

    p.send("Hx")?;
    p.send("\x12")?; // ctrl+r
    std::thread::sleep(Duration::from_millis(100));
    p.send("\x1b")?; // ESC

    p.expect(Eof)?;
    Ok(())
}
