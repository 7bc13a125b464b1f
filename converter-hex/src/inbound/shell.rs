//! Interactive shell loop.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use converter_types::RateProvider;

use super::commands::{Command, HELP};
use super::render::{render_currencies, render_view};
use crate::ConverterSession;

const PROMPT: &str = "> ";

/// Drives a [`ConverterSession`] from typed commands.
///
/// Commands that start a fetch wait for it to settle before redrawing, so
/// each redraw shows either the new rates or the error banner.
pub struct Shell<P: RateProvider + 'static> {
    session: ConverterSession<P>,
}

impl<P: RateProvider + 'static> Shell<P> {
    pub fn new(session: ConverterSession<P>) -> Self {
        Self { session }
    }

    /// Runs until `quit` or end of input.
    pub async fn run<R, W>(mut self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.session.start();
        writer
            .write_all(render_view(&self.session.settled().await).as_bytes())
            .await?;

        let mut lines = reader.lines();
        loop {
            writer.write_all(PROMPT.as_bytes()).await?;
            writer.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let output = match Command::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command).await,
                Err(e) => format!("{}\n", e),
            };
            writer.write_all(output.as_bytes()).await?;
        }
        writer.flush().await
    }

    /// Applies one command and returns the text to print.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&mut self, command: Command) -> String {
        match command {
            Command::From(code) => {
                self.session.select_from(code);
                render_view(&self.session.settled().await)
            }
            Command::To(code) => {
                self.session.select_to(code);
                render_view(&self.session.view())
            }
            Command::Amount(raw) => {
                self.session.edit_amount(&raw);
                render_view(&self.session.view())
            }
            Command::Swap => {
                self.session.swap();
                render_view(&self.session.settled().await)
            }
            Command::Retry => match self.session.retry() {
                Ok(()) => render_view(&self.session.settled().await),
                Err(e) => format!("{}\n", e),
            },
            Command::List => render_currencies(&self.session.view()),
            Command::Show => render_view(&self.session.view()),
            Command::Help => HELP.to_string(),
            Command::Quit => String::new(),
        }
    }
}
