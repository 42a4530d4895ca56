use tracing::{Level, span};

/// Log levels of the host (`OrthancPluginLogLevel`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum HostLogLevel {
    Error,
    Warning,
    Info,
    Trace,
}

/// A rendered log event.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HostLogRecord<'a> {
    pub plugin: &'a str,
    pub level: HostLogLevel,
    pub file: &'a str,
    pub line: u32,
    pub message: &'a str,
}

/// Destination of log messages, i.e. `OrthancPluginLogMessage`.
pub trait LogSink: Send + Sync {
    fn log(&self, record: &HostLogRecord<'_>);
}

/// A [tracing::Subscriber] which writes to the log of the host.
///
/// **Note**: only events are supported, spans are not. Hint: just use [tracing::debug].
/// [tracing::info], [tracing::warn], and [tracing::error].
pub struct HostLogger<S> {
    pub sink: S,
    /// Plugin name
    pub plugin_name: &'static str,
    /// Force [Level::INFO] to be logged as [HostLogLevel::Warning]
    pub verbose: bool,
}

impl<S: LogSink + 'static> tracing::Subscriber for HostLogger<S> {
    fn enabled(&self, _: &tracing::Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _: &span::Attributes<'_>) -> span::Id {
        span::Id::from_u64(1)
    }

    fn record(&self, _: &span::Id, _: &span::Record<'_>) {}

    fn record_follows_from(&self, _: &span::Id, _: &span::Id) {}

    fn event(&self, event: &tracing::Event<'_>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let message = visitor.render();
        let metadata = event.metadata();
        let record = HostLogRecord {
            plugin: self.plugin_name,
            level: to_host_level(metadata.level(), self.verbose),
            file: metadata.file().unwrap_or("unknown"),
            line: metadata.line().unwrap_or(0),
            message: &message,
        };
        self.sink.log(&record);
    }

    fn enter(&self, _: &span::Id) {}

    fn exit(&self, _: &span::Id) {}
}

fn to_host_level(level: &Level, verbose: bool) -> HostLogLevel {
    if *level == Level::ERROR {
        HostLogLevel::Error
    } else if *level == Level::WARN || (*level == Level::INFO && verbose) {
        HostLogLevel::Warning
    } else if *level == Level::INFO {
        HostLogLevel::Info
    } else {
        HostLogLevel::Trace
    }
}

#[derive(Default)]
struct FieldVisitor {
    data: Vec<String>,
    message: Option<String>,
}

impl FieldVisitor {
    /// Fields as `key=value`, followed by the message.
    fn render(self) -> String {
        self.data.into_iter().chain(self.message).collect::<Vec<_>>().join(" ")
    }
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message.replace(format!("{value:?}"));
        } else {
            self.data.push(format!("{}={value:?}", field.name()));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message.replace(value.to_string());
        } else {
            let s = format!("{}=\"{}\"", field.name(), value.replace('"', "\\\""));
            self.data.push(s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingSink(Arc<Mutex<Vec<(HostLogLevel, String)>>>);

    impl LogSink for RecordingSink {
        fn log(&self, record: &HostLogRecord<'_>) {
            assert_eq!(record.plugin, "dicomweb-proxy");
            assert!(record.file.ends_with("logger.rs"));
            self.0
                .lock()
                .unwrap()
                .push((record.level, record.message.to_string()));
        }
    }

    fn capture(verbose: bool, f: impl FnOnce()) -> Vec<(HostLogLevel, String)> {
        let sink = RecordingSink::default();
        let logger = HostLogger {
            sink: sink.clone(),
            plugin_name: "dicomweb-proxy",
            verbose,
        };
        tracing::subscriber::with_default(logger, f);
        let records = sink.0.lock().unwrap().clone();
        records
    }

    #[test]
    fn test_render_fields_then_message() {
        let actual = capture(false, || {
            tracing::info!(server = "PACS", count = 3, "Listed instances")
        });
        let expected = vec![(
            HostLogLevel::Info,
            "server=\"PACS\" count=3 Listed instances".to_string(),
        )];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_render_message_only() {
        let actual = capture(false, || tracing::error!("Retrieve failed: {}", 42));
        assert_eq!(
            actual,
            vec![(HostLogLevel::Error, "Retrieve failed: 42".to_string())]
        );
    }

    #[test]
    fn test_escape_quotes() {
        let actual = capture(false, || tracing::warn!(aet = "A\"B"));
        assert_eq!(actual, vec![(HostLogLevel::Warning, "aet=\"A\\\"B\"".to_string())]);
    }

    #[rstest]
    #[case(Level::ERROR, false, HostLogLevel::Error)]
    #[case(Level::WARN, false, HostLogLevel::Warning)]
    #[case(Level::INFO, false, HostLogLevel::Info)]
    #[case(Level::INFO, true, HostLogLevel::Warning)]
    #[case(Level::DEBUG, false, HostLogLevel::Trace)]
    #[case(Level::DEBUG, true, HostLogLevel::Trace)]
    #[case(Level::TRACE, true, HostLogLevel::Trace)]
    fn test_to_host_level(
        #[case] level: Level,
        #[case] verbose: bool,
        #[case] expected: HostLogLevel,
    ) {
        assert_eq!(to_host_level(&level, verbose), expected)
    }

    #[test]
    fn test_verbose_promotes_info() {
        let actual = capture(true, || {
            tracing::info!("opened");
            tracing::debug!("details");
        });
        let expected = vec![
            (HostLogLevel::Warning, "opened".to_string()),
            (HostLogLevel::Trace, "details".to_string()),
        ];
        assert_eq!(actual, expected);
    }
}
