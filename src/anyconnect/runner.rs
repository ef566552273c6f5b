//! Process execution for the AnyConnect CLI

use super::{ClientError, CommandOutput, CommandRunner};
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs the real executable, blocking until it exits.
///
/// stdout and stderr share one pipe so the captured text keeps the order
/// the client printed it in. No timeout is applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(
        &self,
        program: &Path,
        args: &[&str],
        stdin: &str,
    ) -> Result<CommandOutput, ClientError> {
        let io_err = |source: io::Error| ClientError::Io {
            program: program.to_path_buf(),
            source,
        };

        let (mut reader, writer) = io::pipe().map_err(io_err)?;

        // The Command holds the parent's copies of the write end; it must be
        // dropped before reading or EOF never arrives.
        let mut child = {
            let mut command = Command::new(program);
            command
                .args(args)
                .stdin(Stdio::piped())
                .stdout(writer.try_clone().map_err(io_err)?)
                .stderr(writer);
            command.spawn().map_err(|source| ClientError::Spawn {
                program: program.to_path_buf(),
                source,
            })?
        };
        debug!("Spawned {} (pid {})", program.display(), child.id());

        if let Some(mut pipe) = child.stdin.take() {
            match pipe.write_all(stdin.as_bytes()) {
                Ok(()) => {}
                // Client exited without reading its input; the exit status tells the rest
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(io_err(e));
                }
            }
        }

        let mut buf = Vec::new();
        if let Err(e) = reader.read_to_end(&mut buf) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(io_err(e));
        }

        let status = child.wait().map_err(io_err)?;
        debug!("{} exited with {}", program.display(), status);

        Ok(CommandOutput {
            output: String::from_utf8_lossy(&buf).into_owned(),
            code: status.code(),
        })
    }
}
