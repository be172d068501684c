use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use manual_core::{update, AppState, Msg};
use manual_logging::{manual_debug, manual_warn};

use super::effects::EffectRunner;
use super::input::{self, Command, HELP_TEXT};
use super::render;

const TICK: Duration = Duration::from_millis(75);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    Line(String),
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Forwards stdin lines to the loop until end of input.
pub fn spawn_stdin_reader(tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || forward_lines(io::stdin().lock(), &tx));
}

/// Sends every line of `reader`, then `InputClosed`. Lines that are not UTF-8
/// are passed on with the bad bytes replaced.
fn forward_lines<R: BufRead>(mut reader: R, tx: &mpsc::Sender<LoopEvent>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                if tx.send(LoopEvent::Line(decode_line(&buf))).is_err() {
                    return;
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                manual_warn!("stdin read failed: {}", err);
                break;
            }
        }
    }
    let _ = tx.send(LoopEvent::InputClosed);
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(err) => {
            manual_warn!("input line is not UTF-8 ({}); replacing invalid bytes", err);
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

pub struct TerminalApp<W: Write> {
    state: AppState,
    effects: EffectRunner,
    out: W,
    pending_input: VecDeque<String>,
}

impl<W: Write> TerminalApp<W> {
    pub fn new(effects: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            effects,
            out,
            pending_input: VecDeque::new(),
        }
    }

    /// Prints the first screen and submits `keyword` when one was given.
    pub fn start(&mut self, keyword: Option<&str>) -> io::Result<()> {
        writeln!(self.out, "{}", render::render(&self.state.view()))?;
        if let Some(keyword) = keyword {
            self.dispatch_msg(Msg::KeywordChanged(keyword.to_string()))?;
            self.dispatch_msg(Msg::SearchSubmitted)?;
        }
        Ok(())
    }

    /// Runs until `quit` or end of input. Lines typed while a search is in
    /// flight wait for its completion so they apply to the new list.
    pub fn run(&mut self, rx: mpsc::Receiver<LoopEvent>) -> io::Result<()> {
        let mut input_closed = false;
        loop {
            self.drain_engine()?;

            while !self.state.search_in_flight() {
                let Some(line) = self.pending_input.pop_front() else {
                    break;
                };
                if self.handle_line(&line)? == Flow::Quit {
                    return Ok(());
                }
            }

            if input_closed {
                if self.pending_input.is_empty() && !self.state.search_in_flight() {
                    return Ok(());
                }
                thread::sleep(TICK);
                continue;
            }

            match rx.recv_timeout(TICK) {
                Ok(LoopEvent::Line(line)) => {
                    if input::parse_command(&line) == Ok(Some(Command::Quit)) {
                        return Ok(());
                    }
                    if self.state.search_in_flight() {
                        manual_debug!("queueing input until search completes");
                    }
                    self.pending_input.push_back(line);
                }
                Ok(LoopEvent::InputClosed) | Err(RecvTimeoutError::Disconnected) => {
                    input_closed = true;
                }
                Err(RecvTimeoutError::Timeout) => self.dispatch_msg(Msg::Tick)?,
            }
        }
    }

    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        let command = match input::parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => {
                writeln!(self.out, "{err}")?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => writeln!(self.out, "{HELP_TEXT}")?,
            Command::List => writeln!(self.out, "{}", render::render(&self.state.view()))?,
            Command::Export if self.state.list().is_empty() => {
                writeln!(self.out, "nothing to export; search first")?;
            }
            command => {
                let view = self.state.view();
                for msg in input::command_to_msgs(&command, &view).unwrap_or_default() {
                    self.dispatch_msg(msg)?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    #[cfg(test)]
    fn state(&self) -> &AppState {
        &self.state
    }

    fn drain_engine(&mut self) -> io::Result<()> {
        while let Some(msg) = self.effects.poll() {
            self.dispatch_msg(msg)?;
        }
        Ok(())
    }

    fn dispatch_msg(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        if was_dirty {
            writeln!(self.out, "{}", render::render(&self.state.view()))?;
        }
        for notice in self.effects.run(effects) {
            writeln!(self.out, "{notice}")?;
        }
        self.out.flush()
    }
}
