use tokio::process::Command;

use crate::error::ProbeError;

pub fn render(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `program` to completion and return its stdout.
pub async fn run(program: &str, args: &[String]) -> Result<String, ProbeError> {
    let output = Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| ProbeError::Spawn {
            command: render(program, args),
            source,
        })?;

    if !output.status.success() {
        return Err(ProbeError::CommandFailed {
            command: render(program, args),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
