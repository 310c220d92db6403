use std::io::{self, prelude::*, Stderr, StdinLock, Stdout};
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::CatalogStore;
use crate::config::Config;
use crate::loader::LoadError;

pub type Result<T> = std::result::Result<T, TextInterfaceError>;

/// What the menu loop does after a command returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

struct Command<R, W, E> {
    choice: u32,
    short_desc: String,
    operation: fn(&mut TextInterface<R, W, E>) -> Result<Flow>,
}

/// Numbered menu over a `CatalogStore`.  Generic over its streams so a whole session can be
/// driven from memory.
pub struct TextInterface<R, W, E> {
    io: TextIO<R, W, E>,
    config: Config,
    store: CatalogStore,
    commands: Vec<Command<R, W, E>>,
}

impl TextInterface<StdinLock<'static>, Stdout, Stderr> {
    pub fn init(config: Config) -> Self {
        TextInterface::with_io(config, io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> TextInterface<R, W, E> {
    pub fn with_io(config: Config, stdin: R, stdout: W, stderr: E) -> Self {
        let mut commands: Vec<Command<R, W, E>> = Vec::new();

        commands.push(Command {
            choice: 1,
            short_desc: String::from("Load data file"),
            operation: Self::load,
        });

        commands.push(Command {
            choice: 2,
            short_desc: String::from("Print course list (A-Z)"),
            operation: Self::list,
        });

        commands.push(Command {
            choice: 3,
            short_desc: String::from("Print one course & prerequisites"),
            operation: Self::course,
        });

        commands.push(Command {
            choice: 9,
            short_desc: String::from("Exit"),
            operation: Self::quit,
        });

        TextInterface {
            io: TextIO {
                stdin,
                stdout,
                stderr,
            },
            config,
            store: CatalogStore::init(),
            commands,
        }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Show the menu and dispatch choices until the user exits or input runs out.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.io.stdout, "ABCU Course Advisor")?;

        loop {
            self.print_menu()?;

            let input = match self.read_line()? {
                Some(line) => line,
                None => {
                    debug!("menu input closed");
                    writeln!(self.io.stdout)?;
                    return Ok(());
                },
            };

            let op = u32::from_str(input.trim())
                .ok()
                .and_then(|choice| self.commands.iter().find(|c| c.choice == choice))
                .map(|c| c.operation);

            match op {
                Some(op) => {
                    if op(self)? == Flow::Exit {
                        return Ok(());
                    }
                },
                None => writeln!(self.io.stdout, "Invalid choice.")?,
            };
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.io.stdout, "\nMAIN MENU")?;
        for comm in &self.commands {
            writeln!(self.io.stdout, "  {}) {}", comm.choice, comm.short_desc)?;
        }
        write!(self.io.stdout, "Choice: ")?;
        self.io.stdout.flush()?;
        Ok(())
    }

    /// One line from stdin, `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut io_buff = String::new();
        if self.io.stdin.read_line(&mut io_buff)? == 0 {
            return Ok(None);
        }
        Ok(Some(io_buff))
    }

    fn load(&mut self) -> Result<Flow> {
        let path = self.config.data_file.clone();
        writeln!(self.io.stdout, "Loading \"{}\" ...", path.display())?;

        match self.store.load_from_path(&path) {
            Ok(count) => writeln!(self.io.stdout, "Loaded {} courses.", count)?,
            Err(LoadError::Format(errors)) => {
                writeln!(self.io.stderr, "\nFILE FORMAT ERRORS:")?;
                for e in &errors {
                    writeln!(self.io.stderr, "  {}", e)?;
                }
                writeln!(self.io.stderr, "DATA NOT LOADED.")?;
            },
            Err(e) => {
                warn!(error = %e, "catalog file unavailable");
                writeln!(self.io.stderr, "ERROR: {}", e)?;
                writeln!(
                    self.io.stdout,
                    "Load failed.  Make sure \"{}\" is in the program folder.",
                    path.display()
                )?;
            },
        };

        Ok(Flow::Continue)
    }

    fn list(&mut self) -> Result<Flow> {
        if self.store.is_empty() {
            self.no_data()?;
            return Ok(Flow::Continue);
        }

        writeln!(self.io.stdout, "\n---------- FULL COURSE LIST ----------")?;
        for (id, title) in self.store.list_all() {
            writeln!(self.io.stdout, "{} | {}", id, title)?;
        }

        Ok(Flow::Continue)
    }

    fn course(&mut self) -> Result<Flow> {
        if self.store.is_empty() {
            self.no_data()?;
            return Ok(Flow::Continue);
        }

        write!(self.io.stdout, "Enter course number (e.g., CSCI200): ")?;
        self.io.stdout.flush()?;

        let id = match self.read_line()? {
            Some(line) => String::from(line.trim()),
            None => return Ok(Flow::Exit),
        };

        match self.store.describe(&id) {
            Ok(view) => writeln!(self.io.stdout, "{}", view)?,
            Err(e) => writeln!(self.io.stdout, "{}.", e)?,
        };

        Ok(Flow::Continue)
    }

    fn quit(&mut self) -> Result<Flow> {
        writeln!(self.io.stdout, "Good-bye!")?;
        Ok(Flow::Exit)
    }

    /// An empty catalog is reported differently depending on whether a load ever succeeded.
    fn no_data(&mut self) -> Result<()> {
        match self.store.loaded_at() {
            None => writeln!(self.io.stdout, "No data loaded yet.")?,
            Some(at) => writeln!(
                self.io.stdout,
                "No courses in catalog (file loaded {}).",
                at.format("%H:%M:%S")
            )?,
        };
        Ok(())
    }
}

struct TextIO<R, W, E> {
    stdin: R,
    stdout: W,
    stderr: E,
}

#[derive(Debug, Error)]
pub enum TextInterfaceError {
    #[error("IO Error({0})")]
    IOError(#[from] io::Error),
}
