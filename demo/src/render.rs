//! Rendering of response envelopes to a text output region.

use std::io::{self, Write};

use request_core::ResponseEnvelope;

/// Sink for rendered responses. Invoked at most once per successful
/// operation (twice, in order, for the concurrent fetch).
pub trait Render {
    fn render(&mut self, envelope: &ResponseEnvelope);
}

/// Writes envelopes as formatted text sections: request line, status,
/// headers, body.
pub struct ConsoleRenderer<W: Write> {
    out: W,
}

impl ConsoleRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_envelope(&mut self, envelope: &ResponseEnvelope) -> io::Result<()> {
        let descriptor = &envelope.descriptor;
        writeln!(
            self.out,
            "--- {} {} ---",
            descriptor.method.as_str(),
            descriptor.path
        )?;
        writeln!(self.out, "status: {}", envelope.status)?;
        writeln!(self.out, "headers:")?;
        for (name, value) in &envelope.headers {
            writeln!(self.out, "  {name}: {value}")?;
        }
        let body = serde_json::to_string_pretty(&envelope.body)
            .unwrap_or_else(|_| envelope.body.to_string());
        writeln!(self.out, "body:")?;
        writeln!(self.out, "{body}")?;
        writeln!(self.out)
    }
}

impl<W: Write> Render for ConsoleRenderer<W> {
    fn render(&mut self, envelope: &ResponseEnvelope) {
        if let Err(error) = self.write_envelope(envelope) {
            tracing::warn!(%error, "failed to write rendered output");
        }
    }
}
