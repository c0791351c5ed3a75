//! JSON-lines host transport.
//!
//! One command per line in, one reply per line out:
//!
//! ```text
//! {"op":"write","data":"hello"}          -> {"status":"ok"}
//! {"op":"read"}                          -> {"status":"output","data":"..."}
//! {"op":"resize","width":120,"height":40} -> {"status":"ok"}
//! {"op":"mouse","args":[0,1,10,5]}       -> {"status":"ok"}
//! {"op":"detach"}                        -> {"status":"ok"}
//! ```

use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::bridge::{HostOps, HostValue};
use crate::events::HostMessage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum HostCommand {
    Write { data: String },
    Read,
    Resize { width: i64, height: i64 },
    Mouse { args: Vec<HostValue> },
    Detach,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HostReply {
    Ok,
    Output { data: String },
    Rejected { error: String },
}

impl<M: From<HostMessage>> HostOps<M> {
    pub fn invoke(&self, command: HostCommand) -> HostReply {
        match command {
            HostCommand::Write { data } => {
                if self.input.ingest(data.as_bytes()) {
                    HostReply::Ok
                } else {
                    HostReply::Rejected {
                        error: "bridge is detached".to_string(),
                    }
                }
            }
            HostCommand::Read => HostReply::Output {
                data: self.output.drain_text(),
            },
            HostCommand::Resize { width, height } => {
                match self.events.dispatch_resize(width, height) {
                    Ok(_) => HostReply::Ok,
                    Err(err) => HostReply::Rejected {
                        error: err.to_string(),
                    },
                }
            }
            HostCommand::Mouse { args } => match self.events.dispatch_pointer(&args) {
                Ok(_) => HostReply::Ok,
                Err(err) => HostReply::Rejected {
                    error: err.to_string(),
                },
            },
            HostCommand::Detach => {
                self.detach.detach();
                HostReply::Ok
            }
        }
    }
}

/// Serve host commands from `reader` until it is exhausted, then detach.
///
/// Malformed lines get a `rejected` reply; the session keeps going.
pub fn serve_lines<R, W, M>(reader: R, mut writer: W, ops: &HostOps<M>) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    M: From<HostMessage>,
{
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<HostCommand>(line) {
            Ok(command) => ops.invoke(command),
            Err(err) => {
                tracing::warn!("Malformed host command: {}", err);
                HostReply::Rejected {
                    error: format!("malformed command: {}", err),
                }
            }
        };
        serde_json::to_writer(&mut writer, &reply)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    tracing::debug!("Host input exhausted, detaching");
    ops.detach.detach();
    Ok(())
}
