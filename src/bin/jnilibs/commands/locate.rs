//! `jnilibs locate` command

use anyhow::Result;
use serde_json::json;

use crate::cli::LocateArgs;
use crate::commands::load_workspace;
use crate::GlobalOptions;
use jnilibs::core::{Abi, AbiDirMap};
use jnilibs::toolchain::{NdkLocator, ProcessEnv, Toolchain};

pub fn execute(_args: LocateArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let (_ctx, ws) = load_workspace(global_opts)?;

    let locator = NdkLocator::for_workspace(&ws);
    let dirs = AbiDirMap::ndk();

    let toolchain = match locator.resolve(&ProcessEnv) {
        Ok(toolchain) => toolchain,
        Err(e) => {
            if shell.is_json() {
                shell.json_event(&json!({
                    "reason": "ndk-not-found",
                    "message": e.to_string(),
                }));
            } else {
                shell.warn(e);
            }
            return Ok(());
        }
    };

    if shell.is_json() {
        shell.json_event(&locate_event(&toolchain, &dirs));
        return Ok(());
    }

    let ndk = toolchain.ndk();
    println!("NDK:");
    println!();
    println!("  Root:     {}", ndk.root().display());
    println!("  From:     {}", ndk.origin());
    match ndk.revision() {
        Some(revision) => println!("  Revision: {}", revision),
        None => println!("  Revision: unknown"),
    }
    println!("  Prebuilt: {}", toolchain.prebuilt().display());
    println!();

    println!("Runtime libraries:");
    for abi in Abi::ALL {
        let lib = toolchain.runtime_lib(abi, &dirs);
        let marker = if lib.is_file() { "" } else { " (missing)" };
        println!("  {:<12} {}{}", abi, lib.display(), marker);
    }

    Ok(())
}

fn locate_event(toolchain: &Toolchain, dirs: &AbiDirMap) -> serde_json::Value {
    let ndk = toolchain.ndk();
    let libs: Vec<serde_json::Value> = Abi::ALL
        .into_iter()
        .map(|abi| {
            let lib = toolchain.runtime_lib(abi, dirs);
            json!({
                "abi": abi,
                "path": lib.display().to_string(),
                "present": lib.is_file(),
            })
        })
        .collect();

    json!({
        "reason": "ndk",
        "root": ndk.root().display().to_string(),
        "origin": ndk.origin().to_string(),
        "revision": ndk.revision().map(|v| v.to_string()),
        "prebuilt": toolchain.prebuilt().display().to_string(),
        "libraries": libs,
    })
}
