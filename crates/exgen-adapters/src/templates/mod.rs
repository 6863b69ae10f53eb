//! Template sources.
//!
//! Template paths are `/`-separated and relative to the template root, for
//! example `ts/models/sequelize/index.ts`. Group listings only consider files
//! directly inside the requested directory.

mod directory;
mod embedded;
mod memory;

pub use directory::DirectoryTemplates;
pub use embedded::EmbeddedTemplates;
pub use memory::MemoryTemplates;

use globset::{Glob, GlobMatcher};

use exgen_core::error::{Context, ExgenResult};

/// Environment variable naming a directory that replaces the built-in set.
pub const TEMPLATES_DIR_ENV: &str = "EXGEN_TEMPLATES_DIR";

fn compile_glob(glob: &str) -> ExgenResult<GlobMatcher> {
    Ok(Glob::new(glob)
        .context(format!("invalid template glob '{glob}'"))?
        .compile_matcher())
}

/// Names of the files in `paths` that sit directly in `dir` and match `glob`,
/// sorted.
fn select_group<'a>(
    paths: impl Iterator<Item = &'a str>,
    dir: &str,
    glob: &str,
) -> ExgenResult<Vec<String>> {
    let matcher = compile_glob(glob)?;
    let dir = dir.trim_end_matches('/');

    let mut names: Vec<String> = paths
        .filter_map(|path| {
            let (parent, name) = path.rsplit_once('/')?;
            (parent == dir && matcher.is_match(name)).then(|| name.to_string())
        })
        .collect();
    names.sort();
    Ok(names)
}
