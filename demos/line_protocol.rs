// demos/line_protocol.rs
//! Parses a text protocol that arrives in arbitrary chunks.
//!
//! Each message is a `\r\n`-terminated header line followed by a body whose
//! length the header announces. Incomplete input is left in the buffer and
//! parsing resumes once the next chunk arrives.

use cursorbuf::prelude::*;
use tracing::info;

#[derive(Debug)]
struct Message {
    command: String,
    body: Vec<u8>,
}

/// Parses one message, or returns `Ok(None)` if more input is needed.
fn parse_message(buf: &mut Buffer) -> Result<Option<Message>> {
    let mark = buf.position();
    let header = match buf.read_line() {
        Ok(line) => line,
        Err(e) if e.is_incomplete() => return Ok(None),
        Err(e) => return Err(e),
    };

    let (command, len) = header
        .split_once(' ')
        .and_then(|(cmd, len)| Some((cmd.to_string(), len.parse::<usize>().ok()?)))
        .ok_or(BufferError::InvalidString)?;

    if len == 0 {
        return Ok(Some(Message {
            command,
            body: Vec::new(),
        }));
    }
    match buf.read_bytes(len) {
        Ok(body) => Ok(Some(Message { command, body })),
        Err(e) if e.is_incomplete() => {
            buf.un_take(buf.position() - mark);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let chunks: [&[u8]; 5] = [
        b"PUT 5\r\nhel",
        b"loGET 0\r",
        b"\n",
        b"PUT 3\r\nabcDEL 4\r\n",
        b"key1",
    ];

    let pool = BufferPool::new(PoolConfig::network());
    let mut inbound = pool.acquire();

    for (i, chunk) in chunks.iter().enumerate() {
        inbound.write(chunk)?;
        info!(chunk = i, unread = inbound.len(), "chunk received");

        while let Some(message) = parse_message(&mut inbound)? {
            println!(
                "{} {:?}",
                message.command,
                String::from_utf8_lossy(&message.body)
            );
        }
    }

    println!("Leftover bytes: {}", inbound.len());
    Ok(())
}
