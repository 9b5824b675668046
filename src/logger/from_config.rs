//! Maps a normalized config onto console, file and HTTP outputs.

use super::{Dispatcher, DispatcherBuilder};
use crate::config::{
    CONSOLE_KEY, Config, DATADOG_KEY, FILE_KEY, LOKI_KEY, LevelSpec, NormalizedConfig,
};
use crate::internal;
use crate::level::{DEFAULT_LEVEL, Severity};
use crate::output::{ConsoleOutput, FileFormat, FileOutput, HttpOutput};

/// Unknown thresholds don't fail construction; the sink runs at the default instead.
fn resolve_threshold(key: &str, spec: &LevelSpec) -> Severity {
    spec.resolve().unwrap_or_else(|| {
        internal::warn(
            "CONFIG",
            &format!("{key}: level '{spec}' is not a known severity, using {DEFAULT_LEVEL}"),
        );
        DEFAULT_LEVEL
    })
}

impl Dispatcher {
    /// Normalizes `config` and builds every sink it enables.
    ///
    /// # Errors
    /// Invalid sink shapes, missing file paths or collector fields, and HTTP
    /// client initialization failures.
    pub fn from_config(config: &Config) -> Result<Self, crate::Error> {
        let normalized = config.normalize()?;
        Self::from_normalized(&normalized)
    }

    /// # Errors
    /// See [`Dispatcher::from_config`].
    pub fn from_normalized(config: &NormalizedConfig) -> Result<Self, crate::Error> {
        internal::debug("DISPATCHER", "Building dispatcher from config");

        for key in [CONSOLE_KEY, FILE_KEY, DATADOG_KEY] {
            if config.get(key).is_some_and(|sink| sink.is_literal()) {
                internal::warn(
                    "CONFIG",
                    &format!("{key}: string value ignored, expected a table or boolean"),
                );
            }
        }

        let mut builder = DispatcherBuilder::new().service(config.service_name());
        builder = Self::configure_console(builder, config)?;
        builder = Self::configure_file(builder, config)?;
        builder = Self::configure_datadog(builder, config)?;

        let dispatcher = builder.build();
        if dispatcher.transport_count() == 0 {
            internal::warn("DISPATCHER", "No sinks configured, logging calls are no-ops");
        } else {
            internal::debug(
                "DISPATCHER",
                &format!(
                    "Ready: text={} json={} service={}",
                    dispatcher.text().map_or(0, |c| c.len()),
                    dispatcher.json().map_or(0, |c| c.len()),
                    config.service_name()
                ),
            );
        }
        Ok(dispatcher)
    }

    /// Loki mode takes over the console: the serialized record goes to stdout alone,
    /// and the text console is not built.
    fn configure_console(
        builder: DispatcherBuilder,
        config: &NormalizedConfig,
    ) -> Result<DispatcherBuilder, crate::Error> {
        if let Some(loki) = config.loki() {
            let threshold = resolve_threshold(LOKI_KEY, &loki.level);
            internal::debug("CONSOLE", &format!("Loki mode, threshold {threshold}"));
            if config.contains(CONSOLE_KEY) {
                internal::debug("CONSOLE", "console settings ignored in loki mode");
            }
            return Ok(builder.json_output(ConsoleOutput::raw().level(threshold)));
        }

        let Some(console) = config.console()? else {
            return Ok(builder);
        };

        let threshold = resolve_threshold(CONSOLE_KEY, &console.level);
        internal::debug(
            "CONSOLE",
            &format!("Text console, threshold {threshold}, colors {}", console.colors),
        );
        Ok(builder.text_output(ConsoleOutput::text().colors(console.colors).level(threshold)))
    }

    /// Both files share one threshold. The json-composite file gets line text,
    /// each line carrying the serialized record as its message.
    fn configure_file(
        builder: DispatcherBuilder,
        config: &NormalizedConfig,
    ) -> Result<DispatcherBuilder, crate::Error> {
        let Some(file) = config.file()? else {
            return Ok(builder);
        };

        let threshold = resolve_threshold(FILE_KEY, &file.level);
        internal::debug(
            "FILE",
            &format!(
                "text={} json={} threshold {threshold}",
                file.text_path.display(),
                file.json_path.display()
            ),
        );

        Ok(builder
            .text_output(FileOutput::new(file.text_path, FileFormat::Pretty).level(threshold))
            .json_output(FileOutput::new(file.json_path, FileFormat::Line).level(threshold)))
    }

    fn configure_datadog(
        builder: DispatcherBuilder,
        config: &NormalizedConfig,
    ) -> Result<DispatcherBuilder, crate::Error> {
        let Some(datadog) = config.datadog()? else {
            return Ok(builder);
        };

        let threshold = resolve_threshold(DATADOG_KEY, &datadog.level);
        internal::debug(
            "HTTP",
            &format!("Collector host={} service={}", datadog.host, datadog.service),
        );

        let url = datadog.url()?;
        Ok(builder.json_output(HttpOutput::new(url.as_str())?.level(threshold)))
    }
}
