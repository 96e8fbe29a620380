//! Owned response body and the size-prefixed envelope around its messages.
//!
//! With `format=flatbuffers` the API answers with one message per requested
//! location, each preceded by its length as a little-endian `u32`. The body is
//! kept as a single owned buffer and every view into it borrows from the
//! [`ForecastResponse`], so a view can never outlive the bytes it reads.

use bytes::Bytes;

use crate::WeatherError;

const PREFIX_LEN: usize = std::mem::size_of::<u32>();

/// Decoder for one size-prefixed message, typically generated flatbuffers code.
///
/// Implementations borrow from the message slice rather than copying it.
pub trait ResponseSchema<'a>: Sized {
    fn read(message: &'a [u8]) -> Result<Self, WeatherError>;
}

impl<'a> ResponseSchema<'a> for &'a [u8] {
    fn read(message: &'a [u8]) -> Result<Self, WeatherError> {
        Ok(message)
    }
}

#[derive(Debug, Clone)]
pub struct ForecastResponse {
    status: u16,
    body: Bytes,
    frames: usize,
}

impl ForecastResponse {
    /// Take ownership of `body`, checking that it splits into whole messages.
    pub fn new(status: u16, body: Bytes) -> Result<Self, WeatherError> {
        let frames = count_frames(&body)?;
        Ok(Self { status, body, frames })
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Raw body including length prefixes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn into_bytes(self) -> Bytes {
        self.body
    }

    /// Number of messages (one per location).
    pub fn len(&self) -> usize {
        self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// Message payloads without their length prefixes.
    pub fn frames(&self) -> Frames<'_> {
        Frames { rest: &self.body }
    }

    /// Decode every message with `T`; the results borrow from `self`.
    pub fn decode<'a, T: ResponseSchema<'a>>(&'a self) -> Result<Vec<T>, WeatherError> {
        self.frames().map(T::read).collect()
    }

    /// Decode the first message, the common single-location case.
    pub fn first<'a, T: ResponseSchema<'a>>(&'a self) -> Result<T, WeatherError> {
        let message = self
            .frames()
            .next()
            .ok_or_else(|| WeatherError::MalformedEnvelope("response contains no messages".into()))?;
        T::read(message)
    }
}

/// Iterator over the messages of a validated body.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Frames<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let (len, rest) = split_prefix(self.rest)?;
        let (message, rest) = rest.split_at(len);
        self.rest = rest;
        Some(message)
    }
}

fn split_prefix(buf: &[u8]) -> Option<(usize, &[u8])> {
    let (prefix, rest) = buf.split_first_chunk::<PREFIX_LEN>()?;
    let len = u32::from_le_bytes(*prefix) as usize;
    (len <= rest.len()).then_some((len, rest))
}

fn count_frames(body: &[u8]) -> Result<usize, WeatherError> {
    if body.is_empty() {
        return Err(WeatherError::MalformedEnvelope("empty body".into()));
    }

    let mut rest = body;
    let mut frames = 0;
    while !rest.is_empty() {
        if rest.len() < PREFIX_LEN {
            return Err(WeatherError::MalformedEnvelope(format!(
                "{} trailing bytes after message {frames}",
                rest.len()
            )));
        }

        let (len, after) = split_prefix(rest).ok_or_else(|| {
            WeatherError::MalformedEnvelope(format!(
                "message {frames} is truncated ({} bytes available)",
                rest.len() - PREFIX_LEN
            ))
        })?;
        if len == 0 {
            return Err(WeatherError::MalformedEnvelope(format!("message {frames} is empty")));
        }

        rest = &after[len..];
        frames += 1;
    }

    Ok(frames)
}
