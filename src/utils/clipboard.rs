//! System clipboard access through the platform's copy utility.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

/// A copy utility and the arguments that make it read stdin.
type ClipboardTool = (&'static str, &'static [&'static str]);

#[cfg(target_os = "macos")]
const TOOLS: &[ClipboardTool] = &[("pbcopy", &[])];
#[cfg(target_os = "windows")]
const TOOLS: &[ClipboardTool] = &[("cmd", &["/C", "clip"])];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const TOOLS: &[ClipboardTool] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Copy `text` with the first utility that succeeds.
pub fn copy_to_clipboard(text: &str) -> Result<(), String> {
    copy_with(TOOLS, text)
}

fn copy_with(tools: &[ClipboardTool], text: &str) -> Result<(), String> {
    for (cmd, args) in tools {
        match run_with_stdin(cmd, args, text) {
            Ok(()) => return Ok(()),
            Err(err) => debug!(tool = cmd, error = %err, "clipboard tool failed"),
        }
    }
    let names: Vec<&str> = tools.iter().map(|(cmd, _)| *cmd).collect();
    Err(format!(
        "Copy failed: no working clipboard tool (tried {})",
        names.join(", ")
    ))
}

fn run_with_stdin(cmd: &str, args: &[&str], input: &str) -> Result<(), String> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|err| format!("`{cmd}` not available: {err}"))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(input.as_bytes())
            .map_err(|err| format!("`{cmd}` rejected input: {err}"))?;
    }

    match child.wait() {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(format!("`{cmd}` exited with {status}")),
        Err(err) => Err(format!("`{cmd}` failed: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tools_report_what_was_tried() {
        let tools: &[ClipboardTool] = &[
            ("lucent-no-such-tool-a", &[]),
            ("lucent-no-such-tool-b", &["--flag"]),
        ];
        let err = copy_with(tools, "hello").expect_err("no tool exists");
        assert!(err.contains("lucent-no-such-tool-a, lucent-no-such-tool-b"));
    }

    #[test]
    fn empty_tool_list_fails() {
        assert!(copy_with(&[], "hello").is_err());
    }
}
