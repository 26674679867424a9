use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use husk_pal::{
    collect, DirOps, EnvOps, EnvScope, HostPal, NativePal, SpecialDirOption, SpecialFolder,
};
use serde_json::json;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScopeArg {
    /// This process's environment block
    Process,
    /// The per-user persistent store (where the platform has one)
    User,
    /// The machine-wide persistent store (where the platform has one)
    Machine,
}

impl std::fmt::Display for ScopeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeArg::Process => write!(f, "process"),
            ScopeArg::User => write!(f, "user"),
            ScopeArg::Machine => write!(f, "machine"),
        }
    }
}

impl From<ScopeArg> for EnvScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Process => EnvScope::Process,
            ScopeArg::User => EnvScope::User,
            ScopeArg::Machine => EnvScope::Machine,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "husk-probe")]
#[command(about = "🌾 HUSK - inspect process and host state through one facade")]
struct Cli {
    /// Emit machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print everything the host reports about itself
    Snapshot,

    #[command(subcommand)]
    Env(EnvCommand),

    #[command(subcommand)]
    Cwd(CwdCommand),

    /// Resolve the well-known per-user and system folders
    Dirs {
        /// Report configured locations without checking they exist
        #[arg(long)]
        raw: bool,
    },

    /// List mounted volume roots
    Drives,

    /// Show the argument vector and reconstructed command line
    Args,
}

#[derive(Debug, Subcommand)]
enum EnvCommand {
    /// Read one variable
    Get {
        name: String,
        #[arg(long, value_enum, default_value_t = ScopeArg::Process)]
        scope: ScopeArg,
    },

    /// Write one variable (an empty VALUE deletes it)
    Set {
        name: String,
        value: String,
        #[arg(long, value_enum, default_value_t = ScopeArg::Process)]
        scope: ScopeArg,
    },

    /// List every variable in a scope
    List {
        #[arg(long, value_enum, default_value_t = ScopeArg::Process)]
        scope: ScopeArg,
    },

    /// Expand $NAME and ${NAME} references against the process environment
    Expand { input: String },
}

#[derive(Debug, Subcommand)]
enum CwdCommand {
    /// Print the current working directory
    Get,

    /// Change the current working directory
    Set { path: PathBuf },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse();
    let pal = NativePal::new();

    match cli.command {
        Commands::Snapshot => cmd_snapshot(&pal, cli.json),
        Commands::Env(cmd) => match cmd {
            EnvCommand::Get { name, scope } => cmd_env_get(&pal, &name, scope.into()),
            EnvCommand::Set { name, value, scope } => {
                cmd_env_set(&pal, &name, &value, scope.into())
            }
            EnvCommand::List { scope } => cmd_env_list(&pal, scope.into(), cli.json),
            EnvCommand::Expand { input } => {
                println!("{}", pal.expand(&input));
                Ok(())
            }
        },
        Commands::Cwd(cmd) => match cmd {
            CwdCommand::Get => {
                let cwd = pal.current_dir().context("failed to read working directory")?;
                println!("{}", cwd.display());
                Ok(())
            }
            CwdCommand::Set { path } => cmd_cwd_set(&pal, &path),
        },
        Commands::Dirs { raw } => cmd_dirs(&pal, raw, cli.json),
        Commands::Drives => cmd_drives(&pal, cli.json),
        Commands::Args => cmd_args(&pal, cli.json),
    }
}

fn cmd_snapshot(pal: &impl HostPal, as_json: bool) -> Result<()> {
    let snap = collect(pal).context("failed to collect host snapshot")?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
    } else {
        println!("{snap}");
    }
    Ok(())
}

fn cmd_env_get(pal: &impl HostPal, name: &str, scope: EnvScope) -> Result<()> {
    let value = pal
        .var_in(name, scope)
        .with_context(|| format!("failed to read {name} in {scope} scope"))?;
    match value {
        Some(value) => println!("{value}"),
        None => println!("(unset)"),
    }
    Ok(())
}

fn cmd_env_set(pal: &impl HostPal, name: &str, value: &str, scope: EnvScope) -> Result<()> {
    pal.set_var_in(name, value, scope)
        .with_context(|| format!("failed to write {name} in {scope} scope"))?;
    if value.is_empty() {
        println!("removed {name} ({scope} scope)");
    } else {
        println!("{name}={value} ({scope} scope)");
    }
    Ok(())
}

fn cmd_env_list(pal: &impl HostPal, scope: EnvScope, as_json: bool) -> Result<()> {
    let vars = pal
        .vars_in(scope)
        .with_context(|| format!("failed to list the {scope} environment"))?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&vars)?);
    } else {
        for (name, value) in vars {
            println!("{name}={value}");
        }
    }
    Ok(())
}

fn cmd_cwd_set(pal: &impl HostPal, path: &std::path::Path) -> Result<()> {
    pal.set_current_dir(path)
        .with_context(|| format!("failed to change directory to {}", path.display()))?;
    let cwd = pal.current_dir().context("failed to read working directory")?;
    println!("{}", cwd.display());
    Ok(())
}

fn cmd_dirs(pal: &impl HostPal, raw: bool, as_json: bool) -> Result<()> {
    let option = if raw {
        SpecialDirOption::DoNotVerify
    } else {
        SpecialDirOption::VerifyExists
    };

    if as_json {
        let mut map = serde_json::Map::new();
        for folder in SpecialFolder::all() {
            let path = pal
                .special_dir_with(*folder, option)
                .with_context(|| format!("failed to resolve the {} folder", folder.name()))?;
            let value = match path {
                Some(path) => json!(path),
                None => serde_json::Value::Null,
            };
            map.insert(folder.name().to_string(), value);
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::Value::Object(map))?
        );
    } else {
        for folder in SpecialFolder::all() {
            match pal
                .special_dir_with(*folder, option)
                .with_context(|| format!("failed to resolve the {} folder", folder.name()))?
            {
                Some(path) => println!("{:<12} {}", folder.name(), path.display()),
                None => println!("{:<12} -", folder.name()),
            }
        }
    }
    Ok(())
}

fn cmd_drives(pal: &impl HostPal, as_json: bool) -> Result<()> {
    let drives = pal.logical_drives().context("failed to list volume roots")?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&drives)?);
    } else {
        for drive in drives {
            println!("{}", drive.display());
        }
    }
    Ok(())
}

fn cmd_args(pal: &impl HostPal, as_json: bool) -> Result<()> {
    let args = pal.args().context("failed to read the argument vector")?;
    let command_line = pal
        .command_line()
        .context("failed to reconstruct the command line")?;
    let exe = pal.current_exe().context("failed to locate the executable")?;

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "executable": exe,
                "command_line": command_line,
                "args": args,
                "pid": pal.process_id(),
                "tid": pal.thread_id(),
            }))?
        );
    } else {
        println!("executable  : {}", exe.display());
        println!("command line: {command_line}");
        for (idx, arg) in args.iter().enumerate() {
            println!("  argv[{idx}] = {arg}");
        }
        println!("pid {} / tid {}", pal.process_id(), pal.thread_id());
    }
    Ok(())
}
