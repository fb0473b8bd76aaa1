//! Interactive CLI channel with prompt-based reads.

use std::time::Duration;

use log::trace;
use regex::bytes::Regex;
use russh::{Channel, ChannelMsg, client::Msg};

use super::buffer::PatternBuffer;
use crate::error::{ChannelError, Result};

/// A shell channel on a switch, read in prompt-delimited chunks.
///
/// Writes send one line at a time; reads block until the expected prompt
/// pattern appears in the output tail or the timeout elapses.
pub struct CliChannel {
    channel: Channel<Msg>,
    buffer: PatternBuffer,
    timeout: Duration,
}

impl CliChannel {
    pub fn new(channel: Channel<Msg>, timeout: Duration, search_depth: usize) -> Self {
        Self {
            channel,
            buffer: PatternBuffer::new(search_depth),
            timeout,
        }
    }

    /// Send a single line, terminated with a newline.
    pub async fn send_line(&mut self, line: &str) -> Result<()> {
        trace!("send: {line}");
        let mut data = line.as_bytes().to_vec();
        data.push(b'\n');
        self.channel
            .data(&data[..])
            .await
            .map_err(ChannelError::Ssh)?;
        Ok(())
    }

    /// Read until `pattern` matches the output tail, returning everything
    /// accumulated since the previous read.
    pub async fn read_until(&mut self, pattern: &Regex) -> Result<Vec<u8>> {
        let deadline = tokio::time::Instant::now() + self.timeout;

        loop {
            if self.buffer.tail_matches(pattern) {
                let data = self.buffer.take();
                trace!("recv: {} bytes", data.len());
                return Ok(data);
            }

            let msg = tokio::time::timeout_at(deadline, self.channel.wait())
                .await
                .map_err(|_| ChannelError::PromptTimeout(self.timeout))?;

            match msg {
                Some(ChannelMsg::Data { ref data }) => self.buffer.extend(data),
                Some(ChannelMsg::ExtendedData { ref data, .. }) => self.buffer.extend(data),
                Some(ChannelMsg::Eof) | Some(ChannelMsg::Close) | None => {
                    return Err(ChannelError::Closed.into());
                }
                Some(_) => {}
            }
        }
    }

    /// Discard anything buffered but not yet consumed by a read.
    pub fn drain(&mut self) {
        self.buffer.clear();
    }
}
