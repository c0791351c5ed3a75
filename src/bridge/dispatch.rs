//! Decoding of host-supplied structured events.
//!
//! Hosts pass flat positional values. They are validated and decoded here so
//! the program only ever sees [`ResizeEvent`] and [`PointerEvent`].

use std::fmt;
use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bridge::lifecycle::Lifecycle;
use crate::events::{HostMessage, PointerAction, PointerButton, PointerEvent, ResizeEvent};

/// Minimum positional fields of a pointer event: action, button, x, y.
pub const POINTER_REQUIRED_FIELDS: usize = 4;

/// One positional value as handed over by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl HostValue {
    /// Integer view of the value. Fractions are truncated.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            HostValue::Int(value) => Some(*value),
            HostValue::Float(value) if value.is_finite() => Some(value.trunc() as i64),
            HostValue::Str(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// Truthiness of the value.
    pub fn as_flag(&self) -> bool {
        match self {
            HostValue::Null => false,
            HostValue::Bool(value) => *value,
            HostValue::Int(value) => *value != 0,
            HostValue::Float(value) => *value != 0.0 && !value.is_nan(),
            HostValue::Str(text) => !text.is_empty(),
        }
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Null => f.write_str("null"),
            HostValue::Bool(value) => write!(f, "{}", value),
            HostValue::Int(value) => write!(f, "{}", value),
            HostValue::Float(value) => write!(f, "{}", value),
            HostValue::Str(text) => write!(f, "{:?}", text),
        }
    }
}

impl From<i64> for HostValue {
    fn from(value: i64) -> Self {
        HostValue::Int(value)
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        HostValue::Bool(value)
    }
}

/// Rejected host event. Never fatal: the session carries on without it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("expected at least {expected} fields, got {got}")]
    MissingFields { expected: usize, got: usize },

    #[error("field '{field}' is not a number: {value}")]
    InvalidField { field: &'static str, value: String },

    #[error("field '{field}' out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("unknown pointer action code {0}")]
    UnknownAction(i64),

    #[error("unknown pointer button code {0}")]
    UnknownButton(i64),

    #[error("bridge is detached")]
    Detached,
}

fn decode_int(field: &'static str, value: &HostValue) -> Result<i64, DispatchError> {
    value.as_int().ok_or_else(|| DispatchError::InvalidField {
        field,
        value: value.to_string(),
    })
}

/// Cell counts and coordinates: negative is malformed, anything past
/// `u32::MAX` saturates.
fn decode_cell(field: &'static str, value: i64) -> Result<u32, DispatchError> {
    if value < 0 {
        return Err(DispatchError::OutOfRange { field, value });
    }
    Ok(u32::try_from(value).unwrap_or(u32::MAX))
}

pub fn decode_resize(width: i64, height: i64) -> Result<ResizeEvent, DispatchError> {
    Ok(ResizeEvent {
        width: decode_cell("width", width)?,
        height: decode_cell("height", height)?,
    })
}

/// Decode `[action, button, x, y, alt?, ctrl?, shift?]`.
///
/// Missing modifier fields default to `false`; fields past the seventh are
/// ignored.
pub fn decode_pointer(args: &[HostValue]) -> Result<PointerEvent, DispatchError> {
    if args.len() < POINTER_REQUIRED_FIELDS {
        return Err(DispatchError::MissingFields {
            expected: POINTER_REQUIRED_FIELDS,
            got: args.len(),
        });
    }

    let action_code = decode_int("action", &args[0])?;
    let action =
        PointerAction::from_code(action_code).ok_or(DispatchError::UnknownAction(action_code))?;
    let button_code = decode_int("button", &args[1])?;
    let button =
        PointerButton::from_code(button_code).ok_or(DispatchError::UnknownButton(button_code))?;
    let x = decode_cell("x", decode_int("x", &args[2])?)?;
    let y = decode_cell("y", decode_int("y", &args[3])?)?;
    let flag = |index: usize| args.get(index).is_some_and(HostValue::as_flag);

    Ok(PointerEvent {
        action,
        button,
        x,
        y,
        alt: flag(4),
        ctrl: flag(5),
        shift: flag(6),
    })
}

/// Hands decoded host events to the program's message channel.
pub struct EventDispatcher<M> {
    tx: Sender<M>,
    lifecycle: Lifecycle,
}

impl<M> Clone for EventDispatcher<M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            lifecycle: self.lifecycle.clone(),
        }
    }
}

impl<M: From<HostMessage>> EventDispatcher<M> {
    pub(crate) fn new(tx: Sender<M>, lifecycle: Lifecycle) -> Self {
        Self { tx, lifecycle }
    }

    pub fn dispatch_resize(&self, width: i64, height: i64) -> Result<ResizeEvent, DispatchError> {
        let event = decode_resize(width, height).inspect_err(|err| {
            tracing::warn!("Rejected resize ({}x{}): {}", width, height, err);
        })?;
        self.dispatch(HostMessage::Resize(event))?;
        Ok(event)
    }

    pub fn dispatch_pointer(&self, args: &[HostValue]) -> Result<PointerEvent, DispatchError> {
        let event = decode_pointer(args).inspect_err(|err| {
            tracing::warn!("Invalid mouse event arguments: {}", err);
        })?;
        self.dispatch(HostMessage::Pointer(event))?;
        Ok(event)
    }

    pub fn dispatch(&self, message: HostMessage) -> Result<(), DispatchError> {
        if self.lifecycle.is_terminated() {
            tracing::debug!("Dropping {:?}: bridge terminated", message);
            return Err(DispatchError::Detached);
        }
        tracing::debug!("Dispatching {:?}", message);
        self.tx.send(M::from(message)).map_err(|_| {
            tracing::debug!("Program message channel closed");
            DispatchError::Detached
        })
    }
}
