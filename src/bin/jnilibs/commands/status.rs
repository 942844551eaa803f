//! `jnilibs status` command

use anyhow::Result;
use serde_json::json;

use crate::cli::StatusArgs;
use crate::commands::load_workspace;
use crate::GlobalOptions;
use jnilibs::core::AbiDirMap;
use jnilibs::ops::{status, AbiState};
use jnilibs::toolchain::{NdkLocator, ProcessEnv};

pub fn execute(_args: StatusArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let (ctx, ws) = load_workspace(global_opts)?;

    let locator = NdkLocator::for_workspace(&ws);
    let report = status(ws.staging(), &locator, &ProcessEnv, &AbiDirMap::ndk())?;

    if shell.is_json() {
        for entry in &report.abis {
            shell.json_event(&json!({
                "reason": "status",
                "abi": entry.abi,
                "state": entry.state,
                "staged": entry.staged.display().to_string(),
                "source": entry.source.as_ref().map(|p| p.display().to_string()),
            }));
        }
        return Ok(());
    }

    if let Some(reason) = &report.unresolved {
        shell.warn(reason);
    }

    println!("Staging tree: {}", ctx.display_path(ws.staging().root()));
    println!();
    for entry in &report.abis {
        let detail = match entry.state {
            AbiState::Unavailable => String::new(),
            _ => format!("  {}", ctx.display_path(&entry.staged)),
        };
        println!("  {:<12} {:<11}{}", entry.abi, entry.state, detail);
    }

    if !report.is_clean() {
        println!();
        println!("Run `jnilibs stage` to refresh.");
    }

    Ok(())
}
