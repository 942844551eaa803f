//! `jnilibs stage` command

use anyhow::Result;
use serde_json::json;

use crate::cli::StageArgs;
use crate::commands::clean::report_removals;
use crate::commands::load_workspace;
use crate::GlobalOptions;
use jnilibs::core::abi::LIBCXX_SHARED;
use jnilibs::ops::{stage, AbiOutcome};
use jnilibs::toolchain::{NdkLocator, ProcessEnv};
use jnilibs::util::Status;

pub fn execute(args: StageArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let (ctx, mut ws) = load_workspace(global_opts)?;

    if !args.abis.is_empty() {
        ws = ws.with_abis(args.abis);
    }

    let locator = NdkLocator::for_workspace(&ws);
    let report = stage(&ws, &locator, &ProcessEnv)?;

    // Removals from the leading clean pass are routine
    if shell.is_verbose() || shell.is_json() {
        report_removals(shell, &ctx, ws.staging(), &report.cleaned);
    }

    if let Some(reason) = &report.skipped {
        shell.warn(format!("{}; skipping {} staging", reason, LIBCXX_SHARED));
        shell.json_event(&json!({
            "reason": "skipped",
            "message": reason.to_string(),
        }));
        return Ok(());
    }

    if let Some(toolchain) = &report.toolchain {
        let ndk = toolchain.ndk();
        let revision = ndk
            .revision()
            .map(|v| format!(" r{}", v))
            .unwrap_or_default();
        shell.status(
            Status::Using,
            format!(
                "NDK{} at {} (from {})",
                revision,
                ndk.root().display(),
                ndk.origin()
            ),
        );
        shell.json_event(&json!({
            "reason": "ndk",
            "root": ndk.root().display().to_string(),
            "origin": ndk.origin().to_string(),
            "prebuilt": toolchain.prebuilt().display().to_string(),
        }));
    }

    for entry in &report.abis {
        match &entry.outcome {
            AbiOutcome::Copied {
                source,
                dest,
                bytes,
            } => {
                shell.status(
                    Status::Copied,
                    format!(
                        "{} for {} -> {}",
                        LIBCXX_SHARED,
                        entry.abi,
                        ctx.display_path(dest)
                    ),
                );
                shell.json_event(&json!({
                    "reason": "copied",
                    "abi": entry.abi,
                    "source": source.display().to_string(),
                    "dest": dest.display().to_string(),
                    "bytes": bytes,
                }));
            }
            AbiOutcome::Missing { checked } => {
                shell.warn(format!(
                    "{} not found for {} at {}",
                    LIBCXX_SHARED,
                    entry.abi,
                    checked.display()
                ));
                shell.json_event(&json!({
                    "reason": "missing",
                    "abi": entry.abi,
                    "checked": checked.display().to_string(),
                }));
            }
        }
    }

    let copied = report.copied().count();
    shell.status(
        Status::Finished,
        format!(
            "staged {} of {} ABI(s), {} warning(s)",
            copied,
            report.abis.len(),
            report.warning_count()
        ),
    );
    shell.json_event(&json!({
        "reason": "stage-finished",
        "copied": copied,
        "warnings": report.warning_count(),
    }));

    Ok(())
}
