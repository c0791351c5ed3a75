//! Minimal program used by the binary and the tests.
//!
//! Echoes host input back, reports structured host events as text lines and
//! quits on `q` or Ctrl-C. A host detach ends the session like a quit.

use std::io::{self, Read, Write};
use std::thread;

use crate::events::{HostMessage, PointerEvent, ResizeEvent};
use crate::program::{Program, ProgramError, ProgramIo};

const CTRL_C: u8 = 0x03;

pub enum EchoMessage {
    Host(HostMessage),
    Input(Vec<u8>),
    InputFailed(io::Error),
}

impl From<HostMessage> for EchoMessage {
    fn from(message: HostMessage) -> Self {
        EchoMessage::Host(message)
    }
}

/// What the echo session saw before it quit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EchoModel {
    pub size: Option<ResizeEvent>,
    pub pointer: Vec<PointerEvent>,
    pub echoed: Vec<u8>,
}

pub struct EchoProgram;

impl Program for EchoProgram {
    type Message = EchoMessage;
    type Model = EchoModel;

    fn run(self, io: ProgramIo<EchoMessage>) -> Result<EchoModel, ProgramError> {
        let ProgramIo {
            mut input,
            mut output,
            messages,
            ..
        } = io;

        // Input is turned into messages so host events are handled while
        // the reader is blocked.
        let tx = messages.sender();
        thread::Builder::new()
            .name("echo-input".to_string())
            .spawn(move || {
                let mut buffer = [0u8; 1024];
                loop {
                    match input.read(&mut buffer) {
                        Ok(count) => {
                            if tx.send(EchoMessage::Input(buffer[..count].to_vec())).is_err() {
                                break;
                            }
                        }
                        Err(err) => {
                            let _ = tx.send(EchoMessage::InputFailed(err));
                            break;
                        }
                    }
                }
            })
            .map_err(ProgramError::Spawn)?;

        write!(output, "echo ready, 'q' quits\r\n")?;
        let mut model = EchoModel::default();

        loop {
            let message = messages
                .recv()
                .map_err(|_| ProgramError::Failed("message channel closed".to_string()))?;
            match message {
                EchoMessage::Input(bytes) => {
                    let quit_at = bytes.iter().position(|&b| b == b'q' || b == CTRL_C);
                    let echo = &bytes[..quit_at.unwrap_or(bytes.len())];
                    output.write_all(echo)?;
                    model.echoed.extend_from_slice(echo);
                    if quit_at.is_some() {
                        write!(output, "\r\nbye\r\n")?;
                        return Ok(model);
                    }
                }
                EchoMessage::Host(HostMessage::Resize(size)) => {
                    write!(output, "\r\nresize {}x{}\r\n", size.width, size.height)?;
                    model.size = Some(size);
                }
                EchoMessage::Host(HostMessage::Pointer(event)) => {
                    write!(
                        output,
                        "\r\npointer {:?} {:?} at {},{}\r\n",
                        event.action, event.button, event.x, event.y
                    )?;
                    model.pointer.push(event);
                }
                // Detached by the host: a normal end of session.
                EchoMessage::InputFailed(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                    return Ok(model);
                }
                EchoMessage::InputFailed(err) => return Err(ProgramError::Io(err)),
            }
        }
    }
}
