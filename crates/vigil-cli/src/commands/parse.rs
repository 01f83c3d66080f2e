use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use vigil_core::entities::Assessment;
use vigil_monitor::{AlertDecision, classify, parse_sections};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ParseArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ParseResponse {
    assessment: Assessment,
    decision: AlertDecision,
}

/// Handle `vigil parse`. Runs offline; no configuration needed.
pub fn handle(args: &ParseArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = match args.file.as_deref() {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    output(&analyze(&text), flags.format)
}

fn analyze(text: &str) -> ParseResponse {
    let assessment = parse_sections(text);
    let decision = classify(&assessment.severity, &assessment.relevance);
    ParseResponse {
        assessment,
        decision,
    }
}
