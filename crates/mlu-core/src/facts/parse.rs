//! Parsers over raw tool output.
//!
//! Every parser returns `Option` and never panics on odd input; callers
//! decide whether a `None` means "omit the fact" or "empty value".

use std::sync::LazyLock;

use regex::Regex;

static PYTHON_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\d.]+)").expect("static python version pattern"));

const CUDNN_MAJOR: &str = "#define CUDNN_MAJOR";
const CUDNN_MINOR: &str = "#define CUDNN_MINOR";
const CUDNN_PATCHLEVEL: &str = "#define CUDNN_PATCHLEVEL";

/// Find the first line that starts with `name`.
///
/// With `strip_name` the result is whatever follows `name` on that line,
/// trimmed; otherwise the whole trimmed line. The match is case-sensitive
/// and anchored at the start of the line, so `torch` also matches a
/// `torchvision` line that happens to come first.
pub fn find_in_lines<I, S>(lines: I, name: &str, strip_name: bool) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if name.is_empty() {
        return None;
    }
    lines.into_iter().find_map(|line| {
        let line = line.as_ref();
        let rest = line.strip_prefix(name)?;
        Some(if strip_name { rest.trim() } else { line.trim() }.to_string())
    })
}

/// First line of `text`, trimmed. `None` for blank output.
pub fn first_line(text: &str) -> Option<String> {
    text.lines()
        .next()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(ToString::to_string)
}

/// Leading dotted version of an interpreter version line.
///
/// `"3.10.12 (main, Nov 20 2023) [GCC 11.4.0]"` gives `"3.10.12"`; a line
/// that does not start with a digit or dot is returned unchanged.
pub fn python_version(version_line: &str) -> String {
    PYTHON_VERSION
        .captures(version_line)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| version_line.to_string(), |m| m.as_str().to_string())
}

/// CUDA toolkit release from `nvcc --version` output.
///
/// `"Cuda compilation tools, release 12.0, V12.0.140"` gives `"12.0"`.
pub fn cuda_release(nvcc_output: &str) -> Option<String> {
    let line = nvcc_output.lines().find(|l| l.contains("release"))?;
    let (_, after) = line.split_once("release")?;
    let token = after.split(',').next().unwrap_or_default().trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// `MAJOR.MINOR.PATCH` from the three cuDNN version macros.
///
/// All three `#define` lines must be present.
pub fn cudnn_version(header: &str) -> Option<String> {
    let lookup = |name: &str| {
        find_in_lines(header.lines(), name, true).filter(|value| !value.is_empty())
    };

    let major = lookup(CUDNN_MAJOR)?;
    let minor = lookup(CUDNN_MINOR)?;
    let patch = lookup(CUDNN_PATCHLEVEL)?;
    Some(format!("{major}.{minor}.{patch}"))
}

/// Filesystem location embedded in a package-listing value.
///
/// Editable installs show up as `"0.2.1   /home/me/src/SparseConvNet"`;
/// everything after the version token is the location.
pub fn vcs_path(listing_value: &str) -> Option<String> {
    let mut tokens = listing_value.split_whitespace();
    tokens.next()?;
    let rest: Vec<&str> = tokens.collect();
    (!rest.is_empty()).then(|| rest.join(" "))
}
