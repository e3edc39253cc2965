//! Implementation of `sift init`.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use sift_config::{CONFIG_FILENAME, global_config_path, global_template, local_template};
use sift_highlight::{SyntaxHighlighter, subheader};

use crate::cli::{
    args::InitCommand,
    context::{CommandContext, fail},
};

/// Index directory entry for `.gitignore`.
const GITIGNORE_ENTRY: &str = ".sift/";

/// Where the configuration goes.
enum Target {
    /// `.sift.toml` in the working directory.
    Project(PathBuf),
    /// `~/.sift.toml`.
    Global(PathBuf),
}

impl Target {
    /// Picks the target. Running in the home directory always means global.
    fn choose(cwd: &Path, global: bool) -> Option<Self> {
        let global_path = global_config_path();
        let in_home = global_path
            .as_deref()
            .and_then(Path::parent)
            .is_some_and(|home| home == cwd);

        if global || in_home {
            global_path.map(Self::Global)
        } else {
            Some(Self::Project(cwd.join(CONFIG_FILENAME)))
        }
    }

    /// The file to write.
    fn path(&self) -> &Path {
        match self {
            Self::Project(path) | Self::Global(path) => path,
        }
    }

    /// The commented template for this target.
    fn template(&self) -> String {
        match self {
            Self::Project(_) => local_template(),
            Self::Global(_) => global_template(),
        }
    }
}

/// Writes a commented starter configuration.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let Some(target) = Target::choose(&ctx.cwd, cmd.global) else {
        return fail(&"could not determine home directory");
    };
    let path = target.path();

    if path.exists() && !cmd.force {
        let code = fail(&format_args!("configuration file already exists: {}", path.display()));
        eprintln!("use --force to overwrite");
        return code;
    }

    let template = target.template();
    if let Err(e) = fs::write(path, &template) {
        return fail(&format_args!("failed to write {}: {e}", path.display()));
    }

    println!("Created {}", path.display());
    println!();
    println!("{}", subheader("Configuration written:"));
    for line in SyntaxHighlighter::new().highlight_toml(&template).lines() {
        println!("   {line}");
    }

    if let Target::Project(path) = &target
        && let Some(dir) = path.parent()
    {
        match ignore_index_dir(dir) {
            Ok(true) => println!("Added {GITIGNORE_ENTRY} to .gitignore"),
            Ok(false) => {}
            Err(e) => eprintln!("warning: could not update .gitignore: {e}"),
        }
    }

    ExitCode::SUCCESS
}

/// Appends [`GITIGNORE_ENTRY`] to an existing `.gitignore` in `dir`.
///
/// Returns whether the file changed. A missing `.gitignore` is left missing.
fn ignore_index_dir(dir: &Path) -> io::Result<bool> {
    let path = dir.join(".gitignore");
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    let listed = contents
        .lines()
        .map(|line| line.trim().trim_end_matches('/'))
        .any(|line| line == ".sift");
    if listed {
        return Ok(false);
    }

    let mut file = fs::OpenOptions::new().append(true).open(&path)?;
    let separator = if contents.is_empty() || contents.ends_with('\n') {
        ""
    } else {
        "\n"
    };
    writeln!(file, "{separator}{GITIGNORE_ENTRY}")?;
    Ok(true)
}
