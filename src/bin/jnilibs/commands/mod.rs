//! Command implementations

pub mod clean;
pub mod completions;
pub mod locate;
pub mod stage;
pub mod status;

use anyhow::Result;

use crate::GlobalOptions;
use jnilibs::core::Workspace;
use jnilibs::util::GlobalContext;

/// Resolve the project context and workspace from global options.
///
/// `--jni-libs-dir` wins over configuration.
pub fn load_workspace(global_opts: &GlobalOptions) -> Result<(GlobalContext, Workspace)> {
    let ctx = match &global_opts.project_dir {
        Some(dir) => GlobalContext::with_project_root(dir)?,
        None => GlobalContext::new()?,
    };

    let config = ctx.load_config();
    let mut ws = Workspace::from_config(&ctx, &config);
    if let Some(dir) = &global_opts.jni_libs_dir {
        ws = ws.with_jni_libs_dir(dir);
    }

    Ok((ctx, ws))
}
