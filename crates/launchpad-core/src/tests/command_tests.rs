//! Tests for Exec line interpretation

use crate::command::{CommandInterpreter, InvocationSpec, parse_command};
use crate::entry::DesktopEntry;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn test_plain_command() {
    let spec = parse_command("gimp --new-instance image.png");
    assert_eq!(spec.executable, "gimp");
    assert_eq!(spec.arguments, strings(&["--new-instance", "image.png"]));
    assert!(spec.env_overrides.is_empty());
}

#[test]
fn test_env_assignment_before_command() {
    let spec = parse_command("FOO=bar cmd arg1");
    assert_eq!(spec.executable, "cmd");
    assert_eq!(spec.env_overrides, strings(&["FOO=bar"]));
    // Arguments start after the first raw token, not after the executable
    assert_eq!(spec.arguments, strings(&["cmd", "arg1"]));
}

#[test]
fn test_multiple_env_assignments() {
    let spec = parse_command("A=1 B=2 app");
    assert_eq!(spec.executable, "app");
    assert_eq!(spec.env_overrides, strings(&["A=1", "B=2"]));
    assert_eq!(spec.arguments, strings(&["B=2", "app"]));
}

#[test]
fn test_flags_are_skipped_when_looking_for_executable() {
    let spec = parse_command("env --unset=X -i app");
    assert_eq!(spec.executable, "env");
    assert_eq!(spec.env_overrides, strings(&["--unset=X"]));

    let spec = parse_command("-x=1 -v app");
    assert_eq!(spec.executable, "app");
}

#[test]
fn test_field_code_truncates_rest_of_line() {
    let spec = parse_command("cmd %U extra");
    assert_eq!(spec.executable, "cmd");
    assert!(spec.arguments.is_empty());
}

#[test]
fn test_field_code_after_arguments() {
    let spec = parse_command("code --reuse-window %F");
    assert_eq!(spec.executable, "code");
    assert_eq!(spec.arguments, strings(&["--reuse-window"]));
}

#[test]
fn test_field_code_at_start_yields_empty_command() {
    let spec = parse_command("%U");
    assert_eq!(spec, InvocationSpec {
        executable: String::new(),
        arguments: Vec::new(),
        env_overrides: Vec::new(),
    });
}

#[test]
fn test_double_space_keeps_empty_token() {
    let spec = parse_command("app  --flag");
    assert_eq!(spec.executable, "app");
    assert_eq!(spec.arguments, strings(&["", "--flag"]));
}

#[test]
fn test_only_assignments_defaults_to_first_token() {
    let spec = parse_command("A=1 B=2");
    assert_eq!(spec.executable, "A=1");
    assert_eq!(spec.env_overrides, strings(&["A=1", "B=2"]));
}

#[test]
fn test_terminal_mode_keeps_only_executable() {
    let interpreter = CommandInterpreter::new("foot");
    let entry = DesktopEntry {
        exec: "vim file.txt".to_string(),
        terminal: true,
        ..Default::default()
    };

    let spec = interpreter.for_entry(&entry);
    assert_eq!(spec.executable, "foot");
    assert_eq!(spec.arguments, strings(&["vim"]));
}

#[test]
fn test_terminal_mode_keeps_env_overrides() {
    let interpreter = CommandInterpreter::new("alacritty");
    let spec = interpreter.interpret("EDITOR=vi htop -d 10", true);

    assert_eq!(spec.executable, "alacritty");
    assert_eq!(spec.arguments, strings(&["htop"]));
    assert_eq!(spec.env_overrides, strings(&["EDITOR=vi"]));
}

#[test]
fn test_non_terminal_entry_is_unwrapped() {
    let interpreter = CommandInterpreter::new("foot");
    let entry = DesktopEntry {
        exec: "firefox %u".to_string(),
        terminal: false,
        ..Default::default()
    };

    let spec = interpreter.for_entry(&entry);
    assert_eq!(spec.executable, "firefox");
    assert!(spec.arguments.is_empty());
    assert_eq!(interpreter.terminal(), "foot");
}

#[test]
fn test_parse_is_deterministic() {
    let line = "LANG=C app --opt=1 file %f";
    assert_eq!(parse_command(line), parse_command(line));
}
