use clap::Parser;
use miette::Result;

use bmv::cli::{Cli, Commands};
use bmv::core::{Config, Session};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    // This is standard practice for CLI tools that output to stdout.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    let config = Config::load(&global);
    let mut session = Session::open()?;

    match cli.command {
        Commands::Register(args) => bmv::cli::commands::register::run(args, &config, &mut session, &global),
        Commands::Login(args) => bmv::cli::commands::login::run(args, &config, &mut session, &global),
        Commands::Logout(args) => bmv::cli::commands::logout::run(args, &mut session, &global),
        Commands::Whoami(args) => bmv::cli::commands::whoami::run(args, &session, &global),
        Commands::Roles(cmd) => bmv::cli::commands::roles::run(cmd, &config, &global),
        Commands::Venues(cmd) => bmv::cli::commands::venues::run(cmd, &global),
        Commands::Vendors(cmd) => bmv::cli::commands::vendors::run(cmd, &global),
        Commands::Config(cmd) => bmv::cli::commands::config::run(cmd, &config, &global),
        Commands::Completions(args) => bmv::cli::commands::completions::run(args),
    }
}
