//! Test programs that run behind a bridge.

#![allow(dead_code)]

use std::io::{self, Read, Write};
use std::thread;
use std::time::{Duration, Instant};

use termbridge::bridge::MouseTracking;
use termbridge::events::HostMessage;
use termbridge::program::{Program, ProgramError, ProgramIo};

pub const QUIT: u8 = b'q';

pub enum Recorded {
    Host(HostMessage),
    Input(Vec<u8>),
    InputFailed(io::Error),
}

impl From<HostMessage> for Recorded {
    fn from(message: HostMessage) -> Self {
        Recorded::Host(message)
    }
}

/// Everything a [`RecordingProgram`] observed.
pub struct Recording {
    pub messages: Vec<HostMessage>,
    pub input: Vec<u8>,
    pub mouse_tracking: MouseTracking,
    /// The input thread, still alive when the program returns.
    pub reader: thread::JoinHandle<()>,
}

/// Records host messages and input, echoing input to its output, until it
/// reads [`QUIT`].
pub struct RecordingProgram {
    pub read_size: usize,
}

impl Default for RecordingProgram {
    fn default() -> Self {
        Self { read_size: 1024 }
    }
}

impl Program for RecordingProgram {
    type Message = Recorded;
    type Model = Recording;

    fn run(self, io: ProgramIo<Recorded>) -> Result<Recording, ProgramError> {
        let ProgramIo {
            mut input,
            mut output,
            messages,
            mouse_tracking,
        } = io;

        let tx = messages.sender();
        let read_size = self.read_size;
        let reader = thread::spawn(move || {
            let mut buffer = vec![0u8; read_size];
            loop {
                match input.read(&mut buffer) {
                    Ok(count) => {
                        if tx.send(Recorded::Input(buffer[..count].to_vec())).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        let _ = tx.send(Recorded::InputFailed(err));
                        break;
                    }
                }
            }
        });

        let mut recorded = Vec::new();
        let mut seen = Vec::new();
        loop {
            match messages.recv().map_err(|e| ProgramError::Failed(e.to_string()))? {
                Recorded::Host(message) => recorded.push(message),
                Recorded::Input(bytes) => {
                    assert!(!bytes.is_empty(), "reader returned zero bytes");
                    output.write_all(&bytes)?;
                    seen.extend_from_slice(&bytes);
                    if seen.contains(&QUIT) {
                        return Ok(Recording {
                            messages: recorded,
                            input: seen,
                            mouse_tracking,
                            reader,
                        });
                    }
                }
                Recorded::InputFailed(err) => return Err(ProgramError::Io(err)),
            }
        }
    }
}

/// Panics as soon as it starts.
pub struct PanickingProgram;

impl Program for PanickingProgram {
    type Message = HostMessage;
    type Model = ();

    fn run(self, _io: ProgramIo<HostMessage>) -> Result<(), ProgramError> {
        panic!("model exploded");
    }
}

/// Wait until `condition` holds or `timeout` passes.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}
