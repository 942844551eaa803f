//! `jnilibs clean` command

use anyhow::Result;
use serde_json::json;

use crate::cli::CleanArgs;
use crate::commands::load_workspace;
use crate::GlobalOptions;
use jnilibs::core::StagingTree;
use jnilibs::ops::{clean, CleanReport};
use jnilibs::util::{GlobalContext, Shell, Status};

pub fn execute(_args: CleanArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let (ctx, ws) = load_workspace(global_opts)?;

    let report = clean(ws.staging())?;

    report_removals(shell, &ctx, ws.staging(), &report);

    if shell.is_json() {
        shell.json_event(&json!({
            "reason": "clean-finished",
            "removed": report.removed_files.len(),
        }));
    } else if report.is_empty() {
        shell.status(Status::Finished, "nothing to clean");
    } else {
        shell.status(
            Status::Finished,
            format!(
                "cleaned {} staged library file(s)",
                report.removed_files.len()
            ),
        );
    }

    Ok(())
}

/// Print one line (or JSON event) per removed path.
pub fn report_removals(
    shell: &Shell,
    ctx: &GlobalContext,
    tree: &StagingTree,
    report: &CleanReport,
) {
    let root = report.removed_root.then(|| tree.root());
    let removed = report
        .removed_files
        .iter()
        .chain(&report.removed_temps)
        .chain(&report.removed_dirs)
        .map(|path| path.as_path())
        .chain(root);

    for path in removed {
        shell.status(Status::Removed, ctx.display_path(path));
        shell.json_event(&json!({
            "reason": "removed",
            "path": path.display().to_string(),
        }));
    }
}
