// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


use std::process::ExitCode;
use clap::Parser;
use main_app::logging::{self, LoggingMode, Verbosity};
use main_app::Opts;
use tracing::error;

fn main() -> ExitCode {
    let opts : Opts = Opts::parse();
    let mode = if opts.log_json { LoggingMode::Json } else { LoggingMode::Compact };
    if let Err(e) = logging::init(Verbosity::new(opts.verbose,opts.quiet),mode) {
        eprintln!("Could not set up logging : {:#}",e);
        return ExitCode::FAILURE;
    }
    match main_app::run(&opts) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}",e);
            ExitCode::FAILURE
        }
    }
}
