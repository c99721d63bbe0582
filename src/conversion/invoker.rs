//! External media tool invocation
//!
//! Builds and runs one headless tool command per file. The tool reads a
//! single input, writes a single output stream to a fixed temporary file in
//! the job's directory, and quits when the job is done. Its stdout/stderr
//! are captured, never streamed; they only surface on a failing exit.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::core::PathNormalizer;

use super::error::TranscodeError;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Fixed temporary output name inside the job's directory.
///
/// The tool always writes here first; the file is renamed to its final,
/// collision-resolved name only after a successful exit.
pub fn temp_output_path(directory: &Path, target_extension: &str) -> PathBuf {
    directory.join(format!("_output_{target_extension}"))
}

/// Runs the external media tool for one file at a time.
pub struct TranscodeInvoker {
    tool_path: PathBuf,
    normalizer: PathNormalizer,
    timeout: Option<Duration>,
}

impl TranscodeInvoker {
    pub fn new(tool_path: PathBuf, normalizer: PathNormalizer, timeout: Option<Duration>) -> Self {
        Self {
            tool_path,
            normalizer,
            timeout,
        }
    }

    /// Transcode `input` into `output`.
    ///
    /// Blocks until the tool exits; a configured timeout kills a hung tool
    /// instead of stalling the batch.
    pub fn transcode(
        &self,
        input: &Path,
        output: &Path,
        target_extension: &str,
        bitrate_kbps: u32,
    ) -> Result<(), TranscodeError> {
        let mut child = self
            .build_command(input, output, target_extension, bitrate_kbps)
            .spawn()
            .map_err(|source| TranscodeError::Launch {
                tool: self.tool_path.clone(),
                source,
            })?;

        // Drain both pipes on their own threads so a chatty tool cannot
        // fill a pipe buffer and block before we wait on it.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = self.wait(&mut child)?;

        if let Some(handle) = stdout {
            let _ = handle.join();
        }
        let stderr_bytes = stderr
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        if status.success() {
            Ok(())
        } else {
            let stderr_text = String::from_utf8_lossy(&stderr_bytes);
            Err(TranscodeError::NonZeroExit {
                status,
                detail: stderr_text.lines().last().unwrap_or("no output").to_string(),
            })
        }
    }

    /// Full argument list: headless interface, one input, the transcode
    /// pipeline, and an instruction to quit after the job.
    fn build_command(
        &self,
        input: &Path,
        output: &Path,
        target_extension: &str,
        bitrate_kbps: u32,
    ) -> Command {
        let mut cmd = Command::new(&self.tool_path);
        cmd.arg("-I")
            .arg("dummy")
            .arg(self.normalizer.to_portable(&input.to_string_lossy()))
            .arg(self.sout_pipeline(output, target_extension, bitrate_kbps))
            .arg("vlc://quit")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Transcode-and-sink pipeline string for the target format.
    ///
    /// A wav target re-encodes to 16-bit linear PCM, 2 channels, in a wav
    /// container; anything else goes to the lossy codec at the requested
    /// bitrate, with the container inferred from the destination extension.
    fn sout_pipeline(&self, output: &Path, target_extension: &str, bitrate_kbps: u32) -> String {
        let dst = self.normalizer.to_portable(&output.to_string_lossy());
        if target_extension == ".wav" {
            format!(":sout=#transcode{{acodec=s16l,channels=2}}:std{{access=file,mux=wav,dst={dst},access=file}}")
        } else {
            format!(":sout=#transcode{{acodec=mpga,ab={bitrate_kbps}}}:std{{dst={dst},access=file}}")
        }
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus, TranscodeError> {
        let Some(limit) = self.timeout else {
            return Ok(child.wait()?);
        };

        let deadline = Instant::now() + limit;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(TranscodeError::TimedOut(limit));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<thread::JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}
