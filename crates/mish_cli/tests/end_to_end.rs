//! Drive the `mish` binary over piped standard input.

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const FOREGROUND_ONLY_BANNER: &str = "\nEntering foreground-only mode (& is now ignored)\n";

fn mish(input: &str, home: Option<&Path>) -> Output {
    mish_bytes(input.as_bytes(), home)
}

fn mish_bytes(input: &[u8], home: Option<&Path>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_mish"));
    command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .env_remove("MISH_LOG");
    if let Some(home) = home {
        command.env("HOME", home);
    }
    let mut child = command.spawn().expect("spawn mish");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input)
        .expect("write input");
    child.wait_with_output().expect("wait for mish")
}

/// Start `mish` and wait for its first prompt, so its signal handlers are
/// installed before the caller sends anything.
fn interactive_mish() -> Child {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mish"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .env_remove("MISH_LOG")
        .spawn()
        .expect("spawn mish");
    let mut prompt = [0u8; 2];
    child
        .stdout
        .as_mut()
        .expect("stdout")
        .read_exact(&mut prompt)
        .expect("first prompt");
    assert_eq!(&prompt, b": ");
    child
}

fn stop_signal(child: &Child) {
    kill(Pid::from_raw(child.id() as i32), Signal::SIGTSTP).expect("deliver SIGTSTP");
}

fn background_pid(printed: &str) -> i32 {
    printed
        .lines()
        .find_map(|line| line.split("background pid is ").nth(1))
        .expect("background launch announced")
        .trim()
        .parse()
        .expect("numeric pid")
}

/// True once `pid` no longer exists or only lingers as a zombie waiting for
/// its new parent to reap it.
fn process_gone(pid: i32) -> bool {
    if kill(Pid::from_raw(pid), None::<Signal>) == Err(Errno::ESRCH) {
        return true;
    }
    fs::read_to_string(format!("/proc/{pid}/stat"))
        .ok()
        .and_then(|stat| {
            let (_, after_name) = stat.rsplit_once(')')?;
            after_name.trim_start().chars().next()
        })
        .map_or(true, |state| state == 'Z')
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn status_tracks_last_foreground_command() {
    let output = mish("status\nfalse\nstatus\ntrue\nstatus\nexit\n", None);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        ": exit value 0\n: : exit value 1\n: : exit value 0\n: "
    );
}

#[test]
fn end_of_input_exits_cleanly() {
    let output = mish("true\n", None);
    assert!(output.status.success());
    assert_eq!(stdout(&output), ": : ");
}

#[test]
fn comments_and_blank_lines_do_nothing() {
    let output = mish("# echo hidden\n\necho shown\nexit\n", None);
    let printed = stdout(&output);
    assert!(!printed.contains("hidden"));
    assert!(printed.contains("shown\n"));
}

#[test]
fn redirections_round_trip_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("greeting.txt");
    let script = format!(
        "echo hello there > {0}\ncat < {0}\nwc -l < {0} > {0}.count\nexit\n",
        file.display()
    );
    let output = mish(&script, None);

    assert_eq!(fs::read_to_string(&file).unwrap(), "hello there\n");
    assert!(stdout(&output).contains("hello there\n"));
    let count = fs::read_to_string(dir.path().join("greeting.txt.count")).unwrap();
    assert_eq!(count.trim(), "1");
}

#[test]
fn missing_input_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.txt");
    let output = mish(&format!("cat < {}\nstatus\nexit\n", missing.display()), None);

    assert!(stderr(&output).contains(&format!("cannot open {} for input", missing.display())));
    assert!(stdout(&output).contains("exit value 1"));
}

#[test]
fn unknown_command_fails_with_exit_value_one() {
    let output = mish("no-such-command-anywhere\nstatus\nexit\n", None);
    assert!(stderr(&output).contains("no-such-command-anywhere"));
    assert!(stdout(&output).contains("exit value 1"));
}

#[test]
fn cd_without_argument_goes_home() {
    let home = tempfile::tempdir().unwrap();
    let output = mish("cd\npwd\nexit\n", Some(home.path()));

    let expected = fs::canonicalize(home.path()).unwrap();
    assert!(stdout(&output).contains(&format!("{}\n", expected.display())));
}

#[test]
fn cd_into_missing_directory_names_it() {
    let home = tempfile::tempdir().unwrap();
    let missing = home.path().join("nowhere");
    let output = mish(&format!("cd {}\nstatus\nexit\n", missing.display()), None);

    assert!(stderr(&output).contains(&missing.display().to_string()));
    // Built-ins never change the foreground status.
    assert!(stdout(&output).contains("exit value 0"));
}

#[test]
fn double_dollar_expands_to_shell_pid() {
    let mut command = Command::new(env!("CARGO_BIN_EXE_mish"));
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    let pid = child.id();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"echo pid-$$-end\nexit\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(stdout(&output).contains(&format!("pid-{pid}-end\n")));
}

#[test]
fn background_job_is_announced_and_reaped() {
    let output = mish("true &\nsleep 1\n\nexit\n", None);
    let printed = stdout(&output);

    let pid = background_pid(&printed);
    assert!(printed.contains(&format!("background pid {pid} is done: exit value 0\n")));
}

#[test]
fn background_output_goes_to_null_device() {
    let output = mish("echo quiet &\nsleep 1\nexit\n", None);
    assert!(!stdout(&output).contains("quiet"));
}

#[test]
fn exit_kills_outstanding_jobs() {
    let output = mish("sleep 30 &\nexit\n", None);
    assert!(output.status.success());
    let pid = background_pid(&stdout(&output));

    let deadline = Instant::now() + Duration::from_secs(10);
    while !process_gone(pid) && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(20));
    }
    assert!(process_gone(pid), "background job {pid} survived exit");
}

#[test]
fn end_of_input_also_kills_outstanding_jobs() {
    let output = mish("sleep 30 &\n", None);
    assert!(output.status.success());
    let pid = background_pid(&stdout(&output));

    let deadline = Instant::now() + Duration::from_secs(10);
    while !process_gone(pid) && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(20));
    }
    assert!(process_gone(pid), "background job {pid} survived end of input");
}

#[test]
fn invalid_utf8_line_does_not_end_the_shell() {
    let output = mish_bytes(b"echo \xff\xfe\necho alive\nexit\n", None);
    assert!(output.status.success());
    assert!(stdout(&output).contains("alive\n"));
}

#[test]
fn nul_byte_is_reported_and_shell_continues() {
    let output = mish_bytes(b"echo a\0b\necho alive\nexit\n", None);
    assert!(output.status.success());
    assert!(stderr(&output).contains("nul byte"));
    assert!(stdout(&output).contains("alive\n"));
}

#[test]
fn stop_signal_while_idle_toggles_mode_immediately() {
    let mut child = interactive_mish();
    let mut stdin = child.stdin.take().expect("stdin");

    thread::sleep(Duration::from_millis(200));
    stop_signal(&child);
    thread::sleep(Duration::from_millis(200));
    stdin.write_all(b"true &\nexit\n").unwrap();
    drop(stdin);

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    // Banner, re-printed prompt, then the prompt after the foreground `true`.
    assert_eq!(stdout(&output), format!("{FOREGROUND_ONLY_BANNER}: : "));
}

#[test]
fn stop_signal_during_foreground_command_is_deferred() {
    let mut child = interactive_mish();
    let mut stdin = child.stdin.take().expect("stdin");

    stdin.write_all(b"sleep 2\n").unwrap();
    thread::sleep(Duration::from_millis(600));
    stop_signal(&child);
    stdin.write_all(b"true &\nexit\n").unwrap();
    drop(stdin);

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let printed = stdout(&output);
    // One banner after `sleep` returns, no re-prompt, and `&` now ignored.
    assert_eq!(printed, format!("{FOREGROUND_ONLY_BANNER}: : "));
    assert_eq!(printed.matches("foreground-only").count(), 1);
    assert!(!printed.contains("background pid"));
}

#[test]
fn builtins_ignore_background_marker() {
    let output = mish("status &\nexit\n", None);
    let printed = stdout(&output);
    assert!(printed.contains("exit value 0"));
    assert!(!printed.contains("background pid"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("mish.toml");
    fs::write(&config, "exit_signal = \"SIGNOPE\"\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_mish"))
        .arg("--config")
        .arg(&config)
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(!output.status.success());
}
