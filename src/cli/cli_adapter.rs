use error_stack::ResultExt;
use tracing::{info, instrument};

use crate::{domain::gnosis::date_label::format_date, gnosis::Gnosis};

use super::command::{Command, CommandError, USAGE};

/// Runs parsed commands against an open Gnosis sheet.
pub struct CliAdapter {
    gnosis: Gnosis,
}

impl std::fmt::Debug for CliAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliAdapter")
            .field("gnosis", &self.gnosis)
            .finish()
    }
}

impl CliAdapter {
    pub fn new(gnosis: Gnosis) -> Self {
        Self { gnosis }
    }

    #[instrument(skip(args))]
    pub async fn run(&mut self, args: Vec<String>) -> error_stack::Result<String, CommandError> {
        let command = Command::parse(&args)?;
        let output = self.handle(command).await?;
        info!("Command completed");
        Ok(output)
    }

    #[instrument]
    pub async fn handle(&mut self, command: Command) -> error_stack::Result<String, CommandError> {
        let gnosis = &mut self.gnosis;
        let output = match command {
            Command::Help => USAGE.to_string(),
            Command::ListStats => gnosis.stat_names().join("\n"),
            Command::GetStat { stat, date } => gnosis
                .get_stat(&stat, date)
                .await
                .change_context(CommandError::ExecutionFailed)?
                .unwrap_or_default(),
            Command::SetStat { stat, date, value } => {
                gnosis
                    .update_stat(&stat, date, &value)
                    .await
                    .change_context(CommandError::ExecutionFailed)?;
                format!("{stat} on {} set to {value}", format_date(date))
            }
            Command::AddStat { stat } => {
                let column = gnosis
                    .add_stat_series(&stat)
                    .await
                    .change_context(CommandError::ExecutionFailed)?;
                format!("Added {stat} in column {column}")
            }
            Command::Series { stat } => gnosis
                .get_stat_series(&stat)
                .await
                .change_context(CommandError::ExecutionFailed)?
                .into_iter()
                .map(|point| {
                    format!(
                        "{}\t{}",
                        format_date(point.date),
                        point.value.unwrap_or_default()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Command::Start { stat } => format_date(
                gnosis
                    .get_stat_start(&stat)
                    .await
                    .change_context(CommandError::ExecutionFailed)?,
            ),
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::memory_worksheet::MemoryWorksheet;
    use std::sync::{Arc, Mutex};

    async fn adapter() -> CliAdapter {
        let sheet = MemoryWorksheet::from_rows([
            vec!["", "steps", "weight"],
            vec!["Tue, 03/01/16", "START", ""],
            vec!["Wed, 03/02/16", "100", "80"],
            vec!["Thu, 03/03/16", "", "81"],
        ]);
        CliAdapter::new(Gnosis::with_worksheet(Box::new(sheet)).await.unwrap())
    }

    fn args(values: &[&str]) -> Vec<String> {
        std::iter::once("gnosis")
            .chain(values.iter().copied())
            .map(str::to_owned)
            .collect()
    }

    #[tokio::test]
    async fn test_stats_lists_names_in_column_order() {
        let mut cli = adapter().await;
        assert_eq!(cli.run(args(&["stats"])).await.unwrap(), "steps\nweight");
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let mut cli = adapter().await;
        assert_eq!(
            cli.run(args(&["set", "steps", "2016-03-03", "90"])).await.unwrap(),
            "steps on Thu, 03/03/16 set to 90"
        );
        assert_eq!(cli.run(args(&["get", "steps", "2016-03-03"])).await.unwrap(), "90");
    }

    #[tokio::test]
    async fn test_series_and_start() {
        let mut cli = adapter().await;
        assert_eq!(
            cli.run(args(&["series", "steps"])).await.unwrap(),
            "Wed, 03/02/16\t100\nThu, 03/03/16\t"
        );
        assert_eq!(cli.run(args(&["start", "steps"])).await.unwrap(), "Wed, 03/02/16");
    }

    #[tokio::test]
    async fn test_debug_shows_layout() {
        let cli = adapter().await;
        let debug = format!("{cli:?}");
        assert!(debug.contains("steps"));
        assert!(debug.contains("weight"));
        assert!(debug.contains("2016-03-01"));
    }

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_command_is_left_to_the_caller_to_log() {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut cli = adapter().await;
        cli.run(args(&["get", "sleep", "2016-03-02"])).await.unwrap_err();

        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(!logs.contains("ERROR"));
    }

    #[tokio::test]
    async fn test_failures_are_execution_errors() {
        let mut cli = adapter().await;
        let report = cli.run(args(&["get", "sleep", "2016-03-02"])).await.unwrap_err();
        assert_eq!(report.current_context(), &CommandError::ExecutionFailed);
    }
}
