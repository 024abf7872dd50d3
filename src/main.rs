// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! Triton CLI entrypoint.
//!
//! By default this runs the interactive TUI against a live chat-completion
//! endpoint; the credential is read from `TRITON_API_KEY` (or
//! `OPENAI_API_KEY`). Use `--demo` to run fully offline against built-in
//! example diagrams.

use std::error::Error;
use std::sync::Arc;

use triton::config::GeneratorConfig;
use triton::llm::{Generator, OpenAiGenerator, ScriptedGenerator};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--model <name>] [--endpoint <url>] [--timeout-secs <n>]\n  {program} --demo\n\nThe API credential is read from TRITON_API_KEY (fallback OPENAI_API_KEY);\nit is never passed on the command line.\n\n--demo runs offline against built-in example diagrams and cannot be\ncombined with --model/--endpoint/--timeout-secs."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    model: Option<String>,
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--model" => {
                if options.model.is_some() {
                    return Err(());
                }
                let model = args.next().ok_or(())?;
                options.model = Some(model);
            }
            "--endpoint" => {
                if options.endpoint.is_some() {
                    return Err(());
                }
                let endpoint = args.next().ok_or(())?;
                options.endpoint = Some(endpoint);
            }
            "--timeout-secs" => {
                if options.timeout_secs.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let secs: u64 = raw.parse().map_err(|_| ())?;
                options.timeout_secs = Some(secs);
            }
            _ => return Err(()),
        }
    }

    if options.demo
        && (options.model.is_some() || options.endpoint.is_some() || options.timeout_secs.is_some())
    {
        return Err(());
    }

    Ok(options)
}

fn main() {
    env_logger::init();

    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "triton".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let generator: Arc<dyn Generator> = if options.demo {
            Arc::new(ScriptedGenerator::demo())
        } else {
            let config =
                GeneratorConfig::from_env(options.endpoint, options.model, options.timeout_secs)?;
            Arc::new(OpenAiGenerator::new(config)?)
        };

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        // The TUI blocks on terminal events; generate calls run on the
        // runtime, which block_on keeps driving underneath.
        let handle = runtime.handle().clone();
        runtime.block_on(async move {
            let tui_join =
                tokio::task::spawn_blocking(move || {
                    triton::tui::run(generator, handle).map_err(|err| err.to_string())
                })
                .await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("triton: {err}");
        std::process::exit(1);
    }
}
