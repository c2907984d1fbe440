//! Uniform success/failure wrapper returned by every source.
//!
//! Serialized shapes:
//! - success: `{"ok": true, "status": 200, "data": ...}`
//! - failure: `{"ok": false, "status": <code>, "error": "...", "details"?: "..."}`

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::IgError;

/// Status carried by every success envelope.
pub const OK_STATUS: u16 = 200;

#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Success(T),
    Failure(Failure),
}

/// Failure half of [`Envelope`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub status: u16,
    pub error: String,
    pub details: Option<String>,
}

impl Failure {
    pub fn from_error(err: &IgError) -> Self {
        Self {
            status: err.status(),
            error: err.to_string(),
            details: err.details().map(str::to_owned),
        }
    }
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Envelope::Success(data)
    }

    pub fn from_error(err: &IgError) -> Self {
        Envelope::Failure(Failure::from_error(err))
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    /// HTTP status the outer layer should mirror.
    pub fn status(&self) -> u16 {
        match self {
            Envelope::Success(_) => OK_STATUS,
            Envelope::Failure(failure) => failure.status,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Envelope::Success(data) => Some(data),
            Envelope::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Envelope::Success(_) => None,
            Envelope::Failure(failure) => Some(failure),
        }
    }
}

/// Project expected failures into an envelope; unexpected ones stay `Err`.
pub fn into_envelope<T>(result: Result<T, IgError>) -> Result<Envelope<T>, IgError> {
    match result {
        Ok(data) => Ok(Envelope::success(data)),
        Err(err) if err.is_expected() => Ok(Envelope::from_error(&err)),
        Err(err) => Err(err),
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Envelope::Success(data) => {
                let mut state = serializer.serialize_struct("Envelope", 3)?;
                state.serialize_field("ok", &true)?;
                state.serialize_field("status", &OK_STATUS)?;
                state.serialize_field("data", data)?;
                state.end()
            }
            Envelope::Failure(failure) => {
                let len = if failure.details.is_some() { 4 } else { 3 };
                let mut state = serializer.serialize_struct("Envelope", len)?;
                state.serialize_field("ok", &false)?;
                state.serialize_field("status", &failure.status)?;
                state.serialize_field("error", &failure.error)?;
                match &failure.details {
                    Some(details) => state.serialize_field("details", details)?,
                    None => state.skip_field("details")?,
                }
                state.end()
            }
        }
    }
}
