// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Set up logging to stderr, so it never gets mixed up with output data.

use tracing::{subscriber, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub enum Verbosity {
    Quiet,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// From the number of times `-v` was given, and whether `-q` was given.
    pub fn new(verbose:u8,quiet:bool) -> Self {
        if quiet { Verbosity::Quiet } else { Verbosity::from(verbose) }
    }
}

impl From<u8> for Verbosity {
    fn from(v: u8) -> Self {
        match v {
            0 => Verbosity::Info,
            1 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }
}

impl From<Verbosity> for Level {
    fn from(v: Verbosity) -> Self {
        match v {
            Verbosity::Quiet => Level::WARN,
            Verbosity::Info => Level::INFO,
            Verbosity::Debug => Level::DEBUG,
            Verbosity::Trace => Level::TRACE,
        }
    }
}

#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub enum LoggingMode {
    Compact,
    Json,
}

/// Install the global subscriber. `RUST_LOG`, if set, overrides the level given by `verbosity`.
pub fn init(verbosity:Verbosity,mode:LoggingMode) -> anyhow::Result<()> {
    let level : Level = verbosity.into();
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env()?;
    let builder = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter);
    match mode {
        LoggingMode::Compact => subscriber::set_global_default(builder.compact().with_target(false).finish())?,
        LoggingMode::Json => subscriber::set_global_default(builder.json().flatten_event(true).finish())?,
    }
    Ok(())
}
