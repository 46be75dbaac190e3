use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};

use randjson_core::{Formatting, Node};

use crate::errors::GenerationError;
use crate::output::TrackedSink;
use crate::progress::{CancelToken, ProgressEvent, ProgressObserver};

/// Totals for one document write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Progress events emitted: one per scalar and one per container close.
    pub writes: u64,
    pub bytes_written: u64,
}

/// Streams a document tree to a sink as JSON text.
///
/// The tree is walked in document order and written directly; no
/// intermediate copy is built. After each scalar value and each container
/// close reaches the sink, one [`ProgressEvent::Written`] is emitted.
pub struct JsonWriter<W: Write> {
    sink: TrackedSink<W>,
    formatting: Formatting,
    writes: u64,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(sink: W, formatting: Formatting) -> Self {
        Self {
            sink: TrackedSink::new(sink),
            formatting,
            writes: 0,
        }
    }

    /// Write `root` as one JSON text and flush the sink.
    pub fn write_document<O>(
        &mut self,
        root: &Node,
        observer: &mut O,
        cancel: &CancelToken,
    ) -> Result<WriteSummary, GenerationError>
    where
        O: ProgressObserver + ?Sized,
    {
        self.writes = 0;
        let mark = self.sink.position();

        match self.formatting {
            Formatting::Compact => {
                self.write_node(&mut CompactFormatter, root, &mut *observer, cancel)?
            }
            Formatting::Indented => {
                self.write_node(&mut PrettyFormatter::new(), root, &mut *observer, cancel)?
            }
        }
        self.sink.flush()?;

        Ok(WriteSummary {
            writes: self.writes,
            bytes_written: self.sink.since(mark),
        })
    }

    /// Recover the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }

    fn write_node<F, O>(
        &mut self,
        fmt: &mut F,
        node: &Node,
        observer: &mut O,
        cancel: &CancelToken,
    ) -> Result<(), GenerationError>
    where
        F: Formatter,
        O: ProgressObserver + ?Sized,
    {
        cancel.check()?;

        match node {
            Node::String(value) => self.write_str(value)?,
            Node::Number(value) if value.is_finite() => fmt.write_f64(&mut self.sink, *value)?,
            Node::Number(_) | Node::Null => fmt.write_null(&mut self.sink)?,
            Node::Boolean(value) => fmt.write_bool(&mut self.sink, *value)?,
            Node::Array(items) => {
                fmt.begin_array(&mut self.sink)?;
                for (index, item) in items.iter().enumerate() {
                    fmt.begin_array_value(&mut self.sink, index == 0)?;
                    self.write_node(fmt, item, &mut *observer, cancel)?;
                    fmt.end_array_value(&mut self.sink)?;
                }
                fmt.end_array(&mut self.sink)?;
            }
            Node::Object(members) => {
                fmt.begin_object(&mut self.sink)?;
                for (index, (key, value)) in members.iter().enumerate() {
                    fmt.begin_object_key(&mut self.sink, index == 0)?;
                    self.write_str(key)?;
                    fmt.end_object_key(&mut self.sink)?;
                    fmt.begin_object_value(&mut self.sink)?;
                    self.write_node(fmt, value, &mut *observer, cancel)?;
                    fmt.end_object_value(&mut self.sink)?;
                }
                fmt.end_object(&mut self.sink)?;
            }
        }

        self.writes += 1;
        observer.notify(ProgressEvent::Written {
            writes: self.writes,
        });
        Ok(())
    }

    fn write_str(&mut self, value: &str) -> io::Result<()> {
        value
            .serialize(&mut serde_json::Serializer::new(&mut self.sink))
            .map_err(io::Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoProgress;

    fn render(node: &Node, formatting: Formatting) -> String {
        let mut writer = JsonWriter::new(Vec::new(), formatting);
        writer
            .write_document(node, &mut NoProgress, &CancelToken::new())
            .expect("write document");
        String::from_utf8(writer.into_inner()).expect("utf8 output")
    }

    #[test]
    fn writes_compact_text() {
        let root = Node::Object(vec![
            ("a".to_string(), Node::Array(vec![Node::Null, Node::Boolean(true)])),
            ("b".to_string(), Node::Number(5.0)),
            ("c".to_string(), Node::Object(Vec::new())),
        ]);
        assert_eq!(
            render(&root, Formatting::Compact),
            r#"{"a":[null,true],"b":5.0,"c":{}}"#
        );
    }

    #[test]
    fn writes_indented_text() {
        let root = Node::Object(vec![
            ("a".to_string(), Node::Array(vec![Node::String("x".to_string())])),
            ("b".to_string(), Node::Array(Vec::new())),
        ]);
        let expected = "{\n  \"a\": [\n    \"x\"\n  ],\n  \"b\": []\n}";
        assert_eq!(render(&root, Formatting::Indented), expected);
    }

    #[test]
    fn escapes_strings() {
        let root = Node::Object(vec![(
            "k".to_string(),
            Node::String("quote\" back\\ tab\t nl\n bell\u{7}".to_string()),
        )]);
        assert_eq!(
            render(&root, Formatting::Compact),
            r#"{"k":"quote\" back\\ tab\t nl\n bell\u0007"}"#
        );
    }

    #[test]
    fn counts_scalars_and_closes_but_not_keys() {
        let root = Node::Object(vec![
            ("a".to_string(), Node::Array(vec![Node::Null, Node::Number(1.25)])),
            ("b".to_string(), Node::String(String::new())),
        ]);
        let mut seen = Vec::new();
        let mut writer = JsonWriter::new(Vec::new(), Formatting::Compact);
        let summary = writer
            .write_document(
                &root,
                &mut |event: ProgressEvent| seen.push(event),
                &CancelToken::new(),
            )
            .expect("write document");

        assert_eq!(summary.writes, 5);
        assert_eq!(seen.len(), 5);
        assert_eq!(seen.last(), Some(&ProgressEvent::Written { writes: 5 }));
        let text = String::from_utf8(writer.into_inner()).expect("utf8 output");
        assert_eq!(summary.bytes_written, text.len() as u64);
    }

    #[test]
    fn cancelled_token_stops_before_writing() {
        let token = CancelToken::new();
        token.cancel();
        let mut writer = JsonWriter::new(Vec::new(), Formatting::Compact);
        let result = writer.write_document(&Node::Object(Vec::new()), &mut NoProgress, &token);
        assert!(matches!(result, Err(GenerationError::Cancelled)));
        assert!(writer.into_inner().is_empty());
    }
}
