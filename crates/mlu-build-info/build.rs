use std::{
    env,
    path::{Path, PathBuf},
};

use vergen_gix::{Emitter, GixBuilder};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Packagers can pin the SHA without a checkout.
    println!("cargo:rerun-if-env-changed=MLU_BUILD_SHA_SHORT");

    if let Some(pinned) = env::var("MLU_BUILD_SHA_SHORT")
        .ok()
        .and_then(|s| short_sha(&s))
    {
        emit_fallbacks(Some(&pinned));
        return;
    }

    // Git probing is best-effort; a tarball build still gets `unknown`.
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_default();
    let Some(repo_root) = find_repo_root(Path::new(&manifest_dir)) else {
        emit_fallbacks(None);
        return;
    };

    let git = match GixBuilder::default()
        .repo_path(Some(repo_root))
        .sha(true)
        .build()
    {
        Ok(git) => git,
        Err(err) => {
            println!("cargo:warning=mlu-build-info: vergen-gix config failed: {err}");
            emit_fallbacks(None);
            return;
        }
    };

    if let Err(err) = Emitter::default()
        .add_instructions(&git)
        .and_then(|e| e.emit())
    {
        println!("cargo:warning=mlu-build-info: vergen-gix emit failed: {err}");
        emit_fallbacks(None);
    }
}

fn emit_fallbacks(sha_short: Option<&str>) {
    let sha = sha_short.unwrap_or("unknown");
    println!("cargo:rustc-env=VERGEN_GIT_SHA={sha}");
}

fn short_sha(raw: &str) -> Option<String> {
    let candidate: String = raw.trim().chars().take(7).collect();
    (candidate.len() == 7 && candidate.chars().all(|c| c.is_ascii_hexdigit())).then_some(candidate)
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}
