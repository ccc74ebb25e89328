// Copyright 2024 Saptak Santra
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Usage: `hanzi-host [--config PATH] [TEXT]`

use clap::Parser;
use hanzi_host::prelude::*;
use hanzi_host::RegistryInspector;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hanzi-host")]
#[command(about = "Bootstrap the character panel and print it")]
struct Cli {
    /// Host configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Characters to show
    #[arg(default_value = "长大好")]
    text: String,
}

#[cfg(feature = "profiling")]
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::prelude::*;

    let file = tracing_appender::rolling::never(".", "hanzi-host.trace.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();
    Some(guard)
}

#[cfg(not(feature = "profiling"))]
fn init_tracing() -> Option<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    None
}

fn load_config(path: Option<&Path>) -> hanzi_host::Result<HostConfig> {
    match path {
        Some(path) => HostConfig::from_path(path),
        None => Ok(HostConfig::default()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut host = Host::new(config);
    host.add_plugins(default_plugins());

    if let Err(err) = host.bootstrap() {
        print!("{}", DiagnosticView::new(err).render());
        return ExitCode::FAILURE;
    }
    if tracing::enabled!(tracing::Level::DEBUG) {
        RegistryInspector::print_summary(host.registry());
    }

    match host.mount(CharacterPanel::new(cli.text)) {
        Ok(mounted) => {
            println!("[{}]", mounted.mount_point());
            print!("{}", mounted.render());
            ExitCode::SUCCESS
        }
        Err(err) => {
            print!("{}", DiagnosticView::new(err).render());
            ExitCode::FAILURE
        }
    }
}
