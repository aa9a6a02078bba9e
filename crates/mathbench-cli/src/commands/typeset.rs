// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `mathbench typeset`

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use mathbench_panels::RENDER_FAILED;
use mathbench_typeset::{standalone_page, MathMlTypesetter, Typesetter};

use super::write_output;
use crate::cli::TypesetArgs;

pub fn run(args: TypesetArgs) -> Result<ExitCode> {
    let source = read_source(args.input.as_deref())?;
    let rendered = match MathMlTypesetter.typeset(args.kind, &source) {
        Ok(rendered) => rendered,
        Err(err) => {
            eprintln!("{RENDER_FAILED}: {err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let html = if args.page {
        let title = args
            .title
            .or_else(|| {
                args.input
                    .as_deref()
                    .and_then(Path::file_stem)
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "Mathbench".to_string());
        standalone_page(&title, &rendered.html)
    } else {
        rendered.html
    };
    write_output(args.out.as_deref(), &html)?;
    Ok(ExitCode::SUCCESS)
}

fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}
