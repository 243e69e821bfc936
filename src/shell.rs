//! Line-oriented front end for the submission form.
//!
//! Runs on whatever runtime drives it; the binary uses a single-threaded one.
//! Input keeps being read while a request is in flight, so commands typed
//! during `Pending` are answered (and refused) immediately.

use crate::{
    Result,
    analysis::Document,
    form::{CompletedSubmission, RequestStatus, SubmissionController, SubmissionTicket},
};
use std::{future::Future, io::Write, path::PathBuf, pin::Pin};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

pub const PENDING_LABEL: &str = "Generating.....";
pub const DISABLED_MESSAGE: &str = "The form is disabled while the document is analyzed.";

const HELP: &str = "\
Document Q&A
Upload a document and ask a question about its content.

  file <path>     select the document to analyze
  query <text>    set the question
  submit          analyze the document
  reset           clear the file, the question and the answer
  status          show the form
  help            show this help
  quit            exit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    File(PathBuf),
    Query(String),
    Submit,
    Reset,
    Status,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Parses one input line. Everything after `query ` is kept verbatim.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    match word {
        "" => Command::Empty,
        "file" if !rest.trim().is_empty() => Command::File(PathBuf::from(rest.trim())),
        "query" => Command::Query(rest.to_string()),
        "submit" => Command::Submit,
        "reset" => Command::Reset,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

enum Flow {
    Continue,
    Started(SubmissionTicket),
    Quit,
}

type InFlight = Pin<Box<dyn Future<Output = CompletedSubmission> + Send>>;

pub struct Shell<W: Write> {
    controller: SubmissionController,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(controller: SubmissionController, out: W) -> Self {
        Self { controller, out }
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    pub fn into_parts(self) -> (SubmissionController, W) {
        (self.controller, self.out)
    }

    /// Reads commands until `quit` or end of input. Either way an outstanding
    /// request is still awaited so its answer gets shown and the form is idle
    /// again when this returns.
    pub async fn run<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut in_flight: Option<InFlight> = None;

        self.prompt()?;
        loop {
            tokio::select! {
                completed = async {
                    match in_flight.as_mut() {
                        Some(request) => request.await,
                        None => std::future::pending().await,
                    }
                } => {
                    in_flight = None;
                    self.settle(completed)?;
                }
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        debug!("End of input");
                        break;
                    };
                    match self.handle(parse_command(&line)).await? {
                        Flow::Continue => {}
                        Flow::Started(ticket) => {
                            let client = self.controller.client();
                            in_flight = Some(Box::pin(SubmissionController::execute(client, ticket)));
                        }
                        Flow::Quit => {
                            if in_flight.is_some() {
                                writeln!(self.out, "Waiting for the answer before exiting.")?;
                            }
                            break;
                        }
                    }
                    self.prompt()?;
                }
            }
        }

        if let Some(request) = in_flight {
            let completed = request.await;
            self.settle(completed)?;
        }
        Ok(())
    }

    async fn handle(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Empty => {}
            Command::Help => write!(self.out, "{HELP}")?,
            Command::Status => self.render_form()?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(text) => {
                writeln!(self.out, "Unknown command: {text} (try `help`)")?;
            }
            Command::File(_) | Command::Query(_) | Command::Submit | Command::Reset
                if self.controller.is_pending() =>
            {
                writeln!(self.out, "{DISABLED_MESSAGE}")?;
            }
            Command::File(path) => match Document::from_path(&path).await {
                Ok(document) => {
                    writeln!(self.out, "Selected {}", document.file_name)?;
                    self.controller.select_file(document);
                }
                Err(e) => {
                    warn!("Could not read {}: {}", path.display(), e);
                    writeln!(self.out, "Could not read {}: {}", path.display(), e)?;
                }
            },
            Command::Query(text) => {
                self.controller.set_query(text);
            }
            Command::Reset => {
                self.controller.reset();
                writeln!(self.out, "Form cleared.")?;
            }
            Command::Submit => {
                if let Some(ticket) = self.controller.begin_submit() {
                    writeln!(self.out, "{PENDING_LABEL}")?;
                    return Ok(Flow::Started(ticket));
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn settle(&mut self, completed: CompletedSubmission) -> Result<()> {
        if self.controller.finish(completed) {
            self.render_result()?;
            self.prompt()?;
        }
        Ok(())
    }

    fn render_form(&mut self) -> Result<()> {
        let input = self.controller.input();
        let file = match input.file.display_value() {
            "" => "(none)",
            name => name,
        };
        let status = match self.controller.status() {
            RequestStatus::Idle => "Idle",
            RequestStatus::Pending => PENDING_LABEL,
        };
        writeln!(self.out, "File: {file}")?;
        writeln!(self.out, "Question: {}", input.query)?;
        writeln!(self.out, "Status: {status}")?;
        if let Some(result) = self.controller.result() {
            writeln!(
                self.out,
                "Completed at {}",
                result.completed_at.format("%Y-%m-%d %H:%M:%S UTC")
            )?;
            self.render_result()?;
        }
        Ok(())
    }

    fn render_result(&mut self) -> Result<()> {
        if let Some(text) = self.controller.result_text() {
            writeln!(self.out, "\nAnswer\n{text}\n")?;
        }
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }
}
