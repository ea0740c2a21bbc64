use std::process::Command;

fn winlabel() -> Command {
    Command::new(env!("CARGO_BIN_EXE_winlabel"))
}

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = winlabel();
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute winlabel");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("focused window"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = winlabel();
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute winlabel");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("winlabel"));
}

#[test]
fn debug_window_rejects_invalid_handle() {
    // Arrange
    let mut cmd = winlabel();
    cmd.args(["debug", "window", "not-a-handle"]);

    // Act
    let output = cmd.output().expect("failed to execute winlabel");

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid window handle"));
}

#[test]
fn unknown_subcommand_fails() {
    let output = winlabel()
        .arg("frobnicate")
        .output()
        .expect("failed to execute winlabel");
    assert!(!output.status.success());
}

// `dirs::home_dir` only honors HOME on Unix-like systems.
#[cfg(unix)]
mod with_temp_home {
    use super::*;

    fn in_home(home: &std::path::Path, args: &[&str]) -> std::process::Output {
        winlabel()
            .args(args)
            .env("HOME", home)
            .output()
            .expect("failed to execute winlabel")
    }

    #[test]
    fn init_creates_config_once() {
        // Arrange
        let home = tempfile::tempdir().unwrap();
        let path = home.path().join(".config/winlabel/config.toml");

        // Act
        let first = in_home(home.path(), &["init"]);
        let second = in_home(home.path(), &["init"]);

        // Assert
        assert!(first.status.success());
        assert!(path.is_file());
        assert!(String::from_utf8_lossy(&first.stdout).contains("Created"));
        assert!(String::from_utf8_lossy(&second.stdout).contains("Already exists"));
    }

    #[test]
    fn doctor_warns_without_config() {
        // Arrange
        let home = tempfile::tempdir().unwrap();

        // Act
        let output = in_home(home.path(), &["doctor"]);

        // Assert
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("config.toml not found"));
    }

    #[test]
    fn doctor_reports_repaired_values() {
        // Arrange
        let home = tempfile::tempdir().unwrap();
        let dir = home.path().join(".config/winlabel");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("config.toml"),
            "[widget.callbacks]\non_left = \"explode\"\n",
        )
        .unwrap();

        // Act
        let output = in_home(home.path(), &["doctor"]);

        // Assert
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("unknown action"), "{stdout}");
    }

    #[test]
    fn doctor_reports_parse_errors() {
        // Arrange
        let home = tempfile::tempdir().unwrap();
        let dir = home.path().join(".config/winlabel");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "[widget\nlabel = 1\n").unwrap();

        // Act
        let output = in_home(home.path(), &["doctor"]);

        // Assert
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("[fail]"), "{stdout}");
    }
}
